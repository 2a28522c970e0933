//! Wire-format JSON schema and field-presence binding.
//!
//! `RawAcfJson` mirrors the payload schema byte-for-byte (every field is
//! optional at the `serde` layer) so that a missing or mistyped key can be
//! reported as a specific, named error rather than a generic parse failure.
//! Unknown top-level keys are ignored rather than rejected, for forward
//! compatibility with newer ACF producers.

use crate::constants;
use crate::datetime;
use crate::error::AcfError;
use crate::payload::AcfType;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMachineEntry {
    pub serial_number: Option<String>,
    pub framework_ec: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAcfJson {
    pub version: Option<i64>,
    #[serde(rename = "type")]
    pub acf_type: Option<String>,
    pub machines: Option<Vec<RawMachineEntry>>,
    pub hashed_auth_code: Option<String>,
    pub salt: Option<String>,
    pub iterations: Option<i64>,
    pub expiration: Option<String>,
    #[allow(dead_code)]
    pub request_id: Option<String>,
    pub replay_id: Option<u64>,
    pub admin_auth_code: Option<String>,
    pub ascii_script_file: Option<String>,
    pub bmc_timeout: Option<i64>,
    pub issue_bmc_dump: Option<bool>,
}

pub(crate) fn parse(bytes: &[u8]) -> Result<RawAcfJson, AcfError> {
    serde_json::from_slice(bytes).map_err(|_| AcfError::DecodeJsonParseFailure)
}

pub(crate) fn require_version(raw: &RawAcfJson) -> Result<u32, AcfError> {
    match raw.version {
        Some(1) => Ok(1),
        Some(2) => Ok(2),
        Some(_) => Err(AcfError::UnsupportedVersion),
        None => Err(AcfError::DecodeReadVersionFailure),
    }
}

/// `type` is a V2 addition; a V1 ACF never carries one and defaults to
/// `service` (the only type V1 producers ever minted).
pub(crate) fn require_type(raw: &RawAcfJson) -> Result<AcfType, AcfError> {
    match raw.acf_type.as_deref() {
        None => Ok(AcfType::Service),
        Some("service") => Ok(AcfType::Service),
        Some("administrative") => Ok(AcfType::AdminReset),
        Some("resourcedump") => Ok(AcfType::ResourceDump),
        Some("bmcshell") => Ok(AcfType::BmcShell),
        _ => Err(AcfError::DecodeReadTypeFailure),
    }
}

pub(crate) fn require_expiration(raw: &RawAcfJson) -> Result<NaiveDate, AcfError> {
    let s = raw
        .expiration
        .as_deref()
        .ok_or(AcfError::DecodeReadExpirationFailure)?;
    datetime::parse_expiration_date(s).map_err(|_| AcfError::DecodeReadExpirationFailure)
}

pub(crate) fn require_machines(raw: &RawAcfJson) -> Result<&[RawMachineEntry], AcfError> {
    let machines = raw
        .machines
        .as_deref()
        .ok_or(AcfError::DecodeReadMachineArrayFailure)?;
    if machines.is_empty() {
        return Err(AcfError::DecodeMachineArrayInvalidLength);
    }
    Ok(machines)
}

/// First machine entry whose serial matches `device_serial` (or the
/// `UNSET` wildcard), resolved straight to its authority level. Entries are
/// scanned in document order.
pub(crate) fn select_machine(
    machines: &[RawMachineEntry],
    device_serial: &str,
) -> Result<crate::authority::ServiceAuthority, AcfError> {
    for entry in machines {
        let serial = entry
            .serial_number
            .as_deref()
            .ok_or(AcfError::DecodeReadSerialNumberFailure)?;
        let framework_ec = entry
            .framework_ec
            .as_deref()
            .ok_or(AcfError::DecodeReadFrameworkEcFailure)?;
        if serial == device_serial || serial == constants::UNSET_SERIAL_NUM_KEYWORD {
            return crate::authority::authority_from_framework_ec(framework_ec);
        }
    }
    Err(AcfError::SerialNumberMismatch)
}
