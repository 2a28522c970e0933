use crate::error::AcfError;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

/// PBKDF2-HMAC-SHA-512 of `password`, zeroized on drop. `iterations` must
/// be nonzero and fit in a signed 32-bit range; `output_len` must be
/// nonzero.
pub fn derive_password_hash(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>, AcfError> {
    if iterations == 0 {
        return Err(AcfError::CreatePasswordHashZeroIterations);
    }
    if iterations > i32::MAX as u32 {
        return Err(AcfError::CreatePasswordHashIterationTooLarge);
    }
    if output_len == 0 {
        return Err(AcfError::CreatePasswordHashInvalidOutputLength);
    }

    let mut out = Zeroizing::new(vec![0u8; output_len]);
    pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out);
    Ok(out)
}
