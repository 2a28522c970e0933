//! Anti-replay ordering rules. A service ACF may be re-presented within
//! its validity window (`>=`); every other type is single-shot (`>`).

use crate::error::AcfError;
use crate::payload::AcfType;

/// Apply the replay-ID policy and return the value the caller should
/// persist on success. Absence of a replay id is always accepted and
/// leaves the persisted value unchanged.
pub(crate) fn apply_replay_policy(
    acf_type: AcfType,
    acf_replay_id: Option<u64>,
    persisted: u64,
) -> Result<u64, AcfError> {
    let Some(acf_id) = acf_replay_id else {
        return Ok(persisted);
    };

    let accepted = match acf_type {
        AcfType::Service => acf_id >= persisted,
        AcfType::AdminReset | AcfType::ResourceDump | AcfType::BmcShell => acf_id > persisted,
    };

    if accepted {
        Ok(acf_id)
    } else {
        Err(AcfError::InvalidReplayId)
    }
}
