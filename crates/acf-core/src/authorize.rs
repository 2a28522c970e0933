//! Public authorization operations: full authorize-and-extract, metadata
//! description, and the BMC/virtualization upload check.

use crate::constants;
use crate::crypto;
use crate::datetime;
use crate::error::AcfError;
use crate::payload::{AcfMetadata, AcfPayload, AcfType, AcfUserFields};
use crate::replay;
use crate::validator::{self, ValidatedAcf};
use zeroize::Zeroizing;

/// Which replay rule an upload-time verification runs under.
#[derive(Debug, Clone, Copy)]
pub enum UploadMode {
    /// The standard BMC upload path: full type-dependent replay rule.
    Bmc,
    /// A virtualization host may additionally require that no replay id
    /// be present at all.
    Virtualization { fail_if_replay_present: bool },
}

/// `checkAuthorizationAndGetAcfUserFields`: validates, enforces version
/// gating, checks the password for `service` ACFs, extracts the
/// type-specific payload, and requires that a present replay id exactly
/// equal the persisted value (a mismatch means upload-time persistence
/// never landed).
pub fn check_authorization_and_get_acf_user_fields(
    acf_bytes: &[u8],
    public_key_der: &[u8],
    device_serial: &str,
    now_unix: i64,
    password: Option<&[u8]>,
    persisted_replay_id: u64,
) -> Result<AcfUserFields, AcfError> {
    let fields = validate_and_build(acf_bytes, public_key_der, device_serial, now_unix, password)?;
    if let Some(acf_id) = fields.replay_id {
        if acf_id != persisted_replay_id {
            return Err(AcfError::ReplayIdPersistenceFailure);
        }
    }
    Ok(fields)
}

/// `extractACFMetadata`: describes an ACF without a password and without
/// touching replay state. Used by UI "describe this ACF" flows.
pub fn extract_acf_metadata(
    acf_bytes: &[u8],
    public_key_der: &[u8],
    device_serial: &str,
    now_unix: i64,
) -> Result<AcfMetadata, AcfError> {
    let validated = validator::validate_and_parse_acf(acf_bytes, public_key_der, device_serial, now_unix)?;
    Ok(AcfMetadata {
        acf_type: validated.acf_type,
        version: validated.version,
        expiration_time_unix: datetime::expiration_instant_unix(validated.expiration_date),
        expiration_date: validated.expiration_date,
        has_replay_id: validated.raw.replay_id.is_some(),
    })
}

/// `verifyACFForBMCUpload`: validates (no password check) and applies the
/// full replay rule, returning the value the caller must persist.
pub fn verify_for_upload(
    acf_bytes: &[u8],
    public_key_der: &[u8],
    device_serial: &str,
    now_unix: i64,
    persisted_replay_id: u64,
    mode: UploadMode,
) -> Result<u64, AcfError> {
    let validated = validator::validate_and_parse_acf(acf_bytes, public_key_der, device_serial, now_unix)?;
    let replay_id = validated.raw.replay_id;

    if let UploadMode::Virtualization {
        fail_if_replay_present: true,
    } = mode
    {
        if replay_id.is_some() {
            return Err(AcfError::PowerVmRequestedReplayFailure);
        }
    }

    replay::apply_replay_policy(validated.acf_type, replay_id, persisted_replay_id)
}

/// Validate and extract user fields without applying any replay policy.
/// Shared by the public authenticate-path operation above and by the
/// orchestrator, which applies its own (full, not equality) replay rule.
pub(crate) fn validate_and_build(
    acf_bytes: &[u8],
    public_key_der: &[u8],
    device_serial: &str,
    now_unix: i64,
    password: Option<&[u8]>,
) -> Result<AcfUserFields, AcfError> {
    let validated = validator::validate_and_parse_acf(acf_bytes, public_key_der, device_serial, now_unix)?;
    let replay_id = validated.raw.replay_id;
    let payload = build_payload(&validated, password)?;
    Ok(AcfUserFields {
        version: validated.version,
        acf_type: validated.acf_type,
        expiration_time_unix: datetime::expiration_instant_unix(validated.expiration_date),
        replay_id,
        payload,
    })
}

fn build_payload(validated: &ValidatedAcf, password: Option<&[u8]>) -> Result<AcfPayload, AcfError> {
    match validated.acf_type {
        AcfType::Service => {
            let password = password
                .filter(|p| !p.is_empty())
                .ok_or(AcfError::GetSevAuthInvalidPassword)?;
            let hashed_hex = validated
                .raw
                .hashed_auth_code
                .as_deref()
                .ok_or(AcfError::DecodeReadHashedAuthCodeFailure)?;
            let expected = crypto::hex_to_bin(hashed_hex, usize::MAX)?;
            let salt_hex = validated
                .raw
                .salt
                .as_deref()
                .ok_or(AcfError::DecodeReadSaltFailure)?;
            let salt = crypto::hex_to_bin(salt_hex, usize::MAX)?;
            let iterations = validated
                .raw
                .iterations
                .filter(|i| *i > 0)
                .ok_or(AcfError::DecodeReadIterationsFailure)? as u32;

            let derived = crypto::derive_password_hash(password, &salt, iterations, expected.len())?;
            if !crypto::constant_time_eq(&derived, &expected) {
                return Err(AcfError::PasswordNotValid);
            }
            Ok(AcfPayload::Service {
                authority: validated.matched_authority,
            })
        }
        AcfType::AdminReset => {
            let hex_code = validated
                .raw
                .admin_auth_code
                .as_deref()
                .ok_or(AcfError::DecodeReadAdminAuthCodeFailure)?;
            let auth_code = crypto::hex_to_bin(hex_code, constants::ADMIN_AUTH_CODE_MAX_LEN)?;
            Ok(AcfPayload::AdminReset {
                auth_code: Zeroizing::new(auth_code),
            })
        }
        AcfType::ResourceDump => {
            let ascii_script_file = required_script(validated)?;
            Ok(AcfPayload::ResourceDump {
                ascii_script_file,
                authority: validated.matched_authority,
            })
        }
        AcfType::BmcShell => {
            let ascii_script_file = required_script(validated)?;
            let bmc_timeout = validated
                .raw
                .bmc_timeout
                .ok_or(AcfError::DecodeReadBmcTimeoutFailure)?;
            let issue_bmc_dump = validated
                .raw
                .issue_bmc_dump
                .ok_or(AcfError::DecodeReadIssueBmcDumpFailure)?;
            Ok(AcfPayload::BmcShell {
                ascii_script_file,
                bmc_timeout,
                issue_bmc_dump,
            })
        }
    }
}

fn required_script(validated: &ValidatedAcf) -> Result<String, AcfError> {
    let script = validated
        .raw
        .ascii_script_file
        .clone()
        .ok_or(AcfError::DecodeReadAsciiScriptFailure)?;
    if script.is_empty() || script.len() > constants::MAX_ASCII_SCRIPT_FILE_LENGTH {
        return Err(AcfError::DecodeReadAsciiScriptFailure);
    }
    Ok(script)
}
