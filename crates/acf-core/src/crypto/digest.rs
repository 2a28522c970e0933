use crate::error::AcfError;
use sha2::{Digest, Sha512};

/// SHA-512 of `input`. Empty input is rejected rather than hashed.
pub fn sha512(input: &[u8]) -> Result<[u8; 64], AcfError> {
    if input.is_empty() {
        return Err(AcfError::CreateDigestInvalidInput);
    }
    let mut hasher = Sha512::new();
    hasher.update(input);
    Ok(hasher.finalize().into())
}
