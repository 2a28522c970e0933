//! Typed output of the authorization pipeline: the ACF's type, the
//! resolved authority, and a tagged union of the type-specific fields.

use crate::authority::ServiceAuthority;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// The four ACF kinds a capsule's JSON payload may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcfType {
    Service,
    #[serde(rename = "administrative")]
    AdminReset,
    #[serde(rename = "resourcedump")]
    ResourceDump,
    #[serde(rename = "bmcshell")]
    BmcShell,
}

/// Type-specific fields extracted from a validated ACF. Carries only the
/// fields relevant to its own variant — no "dead" fields shared across
/// types.
#[derive(Debug, Clone)]
pub enum AcfPayload {
    Service {
        authority: ServiceAuthority,
    },
    AdminReset {
        auth_code: Zeroizing<Vec<u8>>,
    },
    ResourceDump {
        ascii_script_file: String,
        authority: ServiceAuthority,
    },
    BmcShell {
        ascii_script_file: String,
        bmc_timeout: i64,
        issue_bmc_dump: bool,
    },
}

/// The fully authorized, type-bound record a caller acts on.
#[derive(Debug, Clone)]
pub struct AcfUserFields {
    pub version: u32,
    pub acf_type: AcfType,
    pub expiration_time_unix: i64,
    pub replay_id: Option<u64>,
    pub payload: AcfPayload,
}

/// Result of `extract_acf_metadata`: enough to describe an ACF without
/// authorizing it (no password needed, no replay state touched).
#[derive(Debug, Clone)]
pub struct AcfMetadata {
    pub acf_type: AcfType,
    pub version: u32,
    pub expiration_time_unix: i64,
    pub expiration_date: chrono::NaiveDate,
    pub has_replay_id: bool,
}
