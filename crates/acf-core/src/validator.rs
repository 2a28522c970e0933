//! The shared "decode + verify signature + parse JSON + check serial +
//! check expiry" pipeline every public operation is built from.

use crate::asn1;
use crate::authority::ServiceAuthority;
use crate::constants;
use crate::crypto;
use crate::datetime;
use crate::error::AcfError;
use crate::json::{self, RawAcfJson};
use crate::payload::AcfType;
use chrono::NaiveDate;

/// Everything a downstream operation needs once an ACF has cleared
/// decode, signature, serial-match, and expiration checks.
pub(crate) struct ValidatedAcf {
    pub acf_type: AcfType,
    pub version: u32,
    pub raw: RawAcfJson,
    pub expiration_date: NaiveDate,
    pub matched_authority: ServiceAuthority,
}

/// Steps 1-9 of the decode/verify pipeline. Each step's failure
/// short-circuits with the error named in the component design.
pub(crate) fn validate_and_parse_acf(
    acf_bytes: &[u8],
    public_key_der: &[u8],
    device_serial: &str,
    now_unix: i64,
) -> Result<ValidatedAcf, AcfError> {
    if acf_bytes.is_empty() {
        return Err(AcfError::GetSevAuthInvalidAcf);
    }
    if public_key_der.is_empty() {
        return Err(AcfError::GetSevAuthInvalidPublicKey);
    }
    if device_serial.is_empty() {
        return Err(AcfError::GetSevAuthInvalidSerialNumber);
    }

    let capsule = asn1::decode_capsule(acf_bytes)?;

    if capsule.algorithm_oid != constants::SIGNATURE_ALGORITHM_OID {
        return Err(AcfError::VerifyOidMismatchFailure);
    }
    if capsule.processing_type != constants::PROCESSING_TYPE {
        return Err(AcfError::VerifyProcessingTypeMismatch);
    }

    crypto::verify_signature(public_key_der, &capsule.source_file_data, &capsule.signature)?;

    let raw = json::parse(&capsule.source_file_data)?;
    let version = json::require_version(&raw)?;
    let acf_type = json::require_type(&raw)?;
    let machines = json::require_machines(&raw)?;
    let expiration_date = json::require_expiration(&raw)?;

    let matched_authority = json::select_machine(machines, device_serial)?;

    if datetime::is_expired(expiration_date, now_unix) {
        return Err(AcfError::AcfExpired);
    }

    Ok(ValidatedAcf {
        acf_type,
        version,
        raw,
        expiration_date,
        matched_authority,
    })
}
