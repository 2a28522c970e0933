//! The targeted ACF orchestrator: `Idle -> ReadReplay -> GetAuth -> Act ->
//! [PersistReplay | Rollback] -> Done`.
//!
//! Replay persistence is the only state-mutating step with a compensating
//! action. `resetAdmin` and `installAcf` are assumed externally
//! idempotent; the orchestrator does not attempt to undo them.

use crate::authorize;
use crate::error::AcfError;
use crate::payload::{AcfPayload, AcfType, AcfUserFields};
use crate::replay;
use crate::{InstallSink, ReplayStore};

/// The action a caller asked the orchestrator to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetedAction {
    Install,
    Authenticate,
    Verify,
}

/// Result of a completed `targeted_auth` call.
#[derive(Debug, Clone)]
pub struct TargetedAcfOutcome {
    pub user_fields: AcfUserFields,
}

/// `targetedAuth(acf, action, password?)`.
#[allow(clippy::too_many_arguments)]
pub fn targeted_auth<R, I>(
    acf_bytes: &[u8],
    action: TargetedAction,
    password: Option<&[u8]>,
    public_key_der: &[u8],
    device_serial: &str,
    now_unix: i64,
    replay_store: &R,
    install_sink: &I,
) -> Result<TargetedAcfOutcome, AcfError>
where
    R: ReplayStore,
    I: InstallSink,
{
    let original_replay_id = replay_store.retrieve_replay_id()?;
    tracing::debug!(original_replay_id, ?action, "targeted ACF: replay id read");

    let user_fields =
        authorize::validate_and_build(acf_bytes, public_key_der, device_serial, now_unix, password)?;
    let updated_replay_id =
        replay::apply_replay_policy(user_fields.acf_type, user_fields.replay_id, original_replay_id)?;

    if action != TargetedAction::Install {
        tracing::debug!(?action, "targeted ACF: no side effects for this action");
        return Ok(TargetedAcfOutcome { user_fields });
    }

    if updated_replay_id != original_replay_id {
        replay_store.store_replay_id(updated_replay_id)?;
        tracing::debug!(updated_replay_id, "targeted ACF: replay id persisted");
    }

    if let Err(dispatch_err) = dispatch_install(acf_bytes, &user_fields, install_sink) {
        if updated_replay_id != original_replay_id {
            if let Err(rollback_err) = replay_store.store_replay_id(original_replay_id) {
                tracing::warn!(
                    error = %rollback_err,
                    original_replay_id,
                    "targeted ACF: best-effort replay id rollback failed"
                );
            } else {
                tracing::warn!(
                    original_replay_id,
                    "targeted ACF: rolled back replay id after dispatch failure"
                );
            }
        }
        return Err(dispatch_err);
    }

    Ok(TargetedAcfOutcome { user_fields })
}

fn dispatch_install<I: InstallSink>(
    acf_bytes: &[u8],
    user_fields: &AcfUserFields,
    install_sink: &I,
) -> Result<(), AcfError> {
    match (&user_fields.acf_type, &user_fields.payload) {
        (AcfType::AdminReset, AcfPayload::AdminReset { auth_code }) => {
            install_sink.reset_admin(auth_code)?;
            install_sink.remove_acf();
            Ok(())
        }
        _ => install_sink.install_acf(acf_bytes, user_fields.acf_type, &user_fields.payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::fixtures::{keypair, sign_acf};
    use std::cell::{Cell, RefCell};

    struct FakeReplayStore {
        value: Cell<u64>,
        fail_store: Cell<bool>,
    }

    impl ReplayStore for FakeReplayStore {
        fn retrieve_replay_id(&self) -> Result<u64, AcfError> {
            Ok(self.value.get())
        }
        fn store_replay_id(&self, id: u64) -> Result<(), AcfError> {
            if self.fail_store.get() {
                return Err(AcfError::SystemError("disk full".into()));
            }
            self.value.set(id);
            Ok(())
        }
    }

    struct FakeInstallSink {
        reset_admin_result: Result<(), AcfError>,
        install_calls: RefCell<Vec<AcfType>>,
        removed: Cell<bool>,
    }

    impl InstallSink for FakeInstallSink {
        fn reset_admin(&self, _auth_code: &[u8]) -> Result<(), AcfError> {
            self.reset_admin_result.clone()
        }
        fn remove_acf(&self) {
            self.removed.set(true);
        }
        fn install_acf(
            &self,
            _blob: &[u8],
            acf_type: AcfType,
            _fields: &AcfPayload,
        ) -> Result<(), AcfError> {
            self.install_calls.borrow_mut().push(acf_type);
            Ok(())
        }
    }

    fn admin_reset_acf(replay_id: u64) -> (rsa::RsaPrivateKey, Vec<u8>, Vec<u8>) {
        let (private_key, fixture) = keypair();
        let payload = format!(
            r#"{{"version":2,"type":"administrative","expiration":"2099-01-01","requestId":"r1",
                "replayId":{replay_id},
                "machines":[{{"serialNumber":"SRL0001","frameworkEc":"PowerVM P10 Service"}}],
                "adminAuthCode":"ab"}}"#
        );
        let acf = sign_acf(&private_key, &payload);
        (private_key, fixture.public_key_der, acf)
    }

    #[test]
    fn install_persists_replay_and_dispatches_admin_reset() {
        let (_private_key, public_key_der, acf) = admin_reset_acf(7);
        let replay_store = FakeReplayStore {
            value: Cell::new(5),
            fail_store: Cell::new(false),
        };
        let install_sink = FakeInstallSink {
            reset_admin_result: Ok(()),
            install_calls: RefCell::new(Vec::new()),
            removed: Cell::new(false),
        };

        let outcome = targeted_auth(
            &acf,
            TargetedAction::Install,
            None,
            &public_key_der,
            "SRL0001",
            0,
            &replay_store,
            &install_sink,
        )
        .unwrap();

        assert_eq!(outcome.user_fields.acf_type, AcfType::AdminReset);
        assert_eq!(replay_store.value.get(), 7);
        assert!(install_sink.removed.get());
    }

    #[test]
    fn failed_dispatch_rolls_back_replay_id() {
        let (_private_key, public_key_der, acf) = admin_reset_acf(7);
        let replay_store = FakeReplayStore {
            value: Cell::new(5),
            fail_store: Cell::new(false),
        };
        let install_sink = FakeInstallSink {
            reset_admin_result: Err(AcfError::SystemError("reset failed".into())),
            install_calls: RefCell::new(Vec::new()),
            removed: Cell::new(false),
        };

        let result = targeted_auth(
            &acf,
            TargetedAction::Install,
            None,
            &public_key_der,
            "SRL0001",
            0,
            &replay_store,
            &install_sink,
        );

        assert!(result.is_err());
        assert_eq!(replay_store.value.get(), 5);
        assert!(!install_sink.removed.get());
    }

    #[test]
    fn verify_action_has_no_side_effects() {
        let (_private_key, public_key_der, acf) = admin_reset_acf(7);
        let replay_store = FakeReplayStore {
            value: Cell::new(5),
            fail_store: Cell::new(false),
        };
        let install_sink = FakeInstallSink {
            reset_admin_result: Ok(()),
            install_calls: RefCell::new(Vec::new()),
            removed: Cell::new(false),
        };

        let outcome = targeted_auth(
            &acf,
            TargetedAction::Verify,
            None,
            &public_key_der,
            "SRL0001",
            0,
            &replay_store,
            &install_sink,
        )
        .unwrap();

        assert_eq!(outcome.user_fields.acf_type, AcfType::AdminReset);
        assert_eq!(replay_store.value.get(), 5);
        assert!(install_sink.install_calls.borrow().is_empty());
        assert!(!install_sink.removed.get());
    }
}
