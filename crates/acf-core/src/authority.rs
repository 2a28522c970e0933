//! Authority levels and the `frameworkEc` string they are resolved from.

use crate::error::AcfError;
use serde::{Deserialize, Serialize};

/// Authorization level granted by a machine entry, ordered low to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ServiceAuthority {
    None = 0,
    User = 10,
    Ce = 20,
    Dev = 30,
}

/// Whether the host is running in the field (customer-installed) or is
/// still in a development/manufacturing state. Development ACF keys are
/// refused once a machine has left the factory floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    Field,
    Development,
}

/// Resolve the authority level encoded in a machine entry's `frameworkEc`
/// string. Only PowerVM P10 and P11 "Development"/"Service" generations are
/// recognized today; every other string is rejected rather than silently
/// downgraded to `None`.
pub fn authority_from_framework_ec(framework_ec: &str) -> Result<ServiceAuthority, AcfError> {
    match framework_ec {
        "PowerVM P10 Development" | "PowerVM P11 Development" => Ok(ServiceAuthority::Dev),
        "PowerVM P10 Service" | "PowerVM P11 Service" => Ok(ServiceAuthority::Ce),
        _ => Err(AcfError::GetAuthFromFrameworkEcInvalid),
    }
}
