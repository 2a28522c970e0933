use crate::error::AcfError;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha2::Sha512;
use spki::DecodePublicKey;

/// RSA PKCS#1 v1.5 verification of `signature` over SHA-512(`message`).
/// Every failure path — key import, signature shape, padding mismatch —
/// collapses to the same verdict: `SignatureNotValid`. There is no
/// intermediate state a caller could mistake for partial success.
pub fn verify_signature(
    public_key_der: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<(), AcfError> {
    let public_key = RsaPublicKey::from_public_key_der(public_key_der)
        .map_err(|_| AcfError::VerifyPublicKeyImportFailure)?;
    let verifying_key = VerifyingKey::<Sha512>::new(public_key);
    let signature =
        Signature::try_from(signature).map_err(|_| AcfError::SignatureNotValid)?;
    verifying_key
        .verify(message, &signature)
        .map_err(|_| AcfError::SignatureNotValid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use rsa::pkcs1v15::SigningKey;
    use rsa::pkcs8::EncodePublicKey;
    use rsa::signature::{RandomizedSigner, SignatureEncoding};
    use rsa::RsaPrivateKey;

    fn fixture_keypair() -> (RsaPrivateKey, Vec<u8>) {
        let private_key = RsaPrivateKey::new(&mut OsRng, 2048).expect("generate test key");
        let public_key_der = private_key
            .to_public_key()
            .to_public_key_der()
            .expect("encode public key")
            .as_bytes()
            .to_vec();
        (private_key, public_key_der)
    }

    #[test]
    fn verifies_a_freshly_signed_message() {
        let (private_key, public_key_der) = fixture_keypair();
        let signing_key = SigningKey::<Sha512>::new(private_key);
        let message = b"acf payload bytes";
        let signature = signing_key.sign_with_rng(&mut OsRng, message);

        assert!(verify_signature(&public_key_der, message, &signature.to_bytes()).is_ok());
    }

    #[test]
    fn rejects_a_tampered_message() {
        let (private_key, public_key_der) = fixture_keypair();
        let signing_key = SigningKey::<Sha512>::new(private_key);
        let message = b"acf payload bytes";
        let signature = signing_key.sign_with_rng(&mut OsRng, message);

        let result = verify_signature(&public_key_der, b"acf payload byteS", &signature.to_bytes());
        assert_eq!(result.unwrap_err(), AcfError::SignatureNotValid);
    }

    #[test]
    fn rejects_a_mismatched_key() {
        let (private_key, _) = fixture_keypair();
        let (_, other_public_key_der) = fixture_keypair();
        let signing_key = SigningKey::<Sha512>::new(private_key);
        let message = b"acf payload bytes";
        let signature = signing_key.sign_with_rng(&mut OsRng, message);

        let result = verify_signature(&other_public_key_der, message, &signature.to_bytes());
        assert_eq!(result.unwrap_err(), AcfError::SignatureNotValid);
    }

    #[test]
    fn rejects_a_malformed_public_key() {
        let result = verify_signature(b"not a der key", b"message", b"sig");
        assert_eq!(result.unwrap_err(), AcfError::VerifyPublicKeyImportFailure);
    }
}
