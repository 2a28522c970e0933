//! PAM-style authentication adapter: the one place the core knows about a
//! "service user" and a fixed key-try order.

use crate::authority::FieldMode;
use crate::authorize;
use crate::constants;
use crate::error::AcfError;
use crate::payload::AcfUserFields;
use crate::{FailDelay, FieldModeSource, KeySlot, PublicKeySource, SerialNumberSource};

/// The only local account this adapter takes authentication decisions
/// for. Every other user is ignored (`PAM_IGNORE` in PAM terms) rather
/// than denied.
pub const SERVICE_USER: &str = "service";

/// Imposed on any authentication failure: a minimum 2-second delay.
pub const FAIL_DELAY_MICROS: u32 = 2_000_000;

/// `pamAuthenticate(user, password)`. Returns `None` if `user` is not the
/// service user (the caller should treat this as "ignore, not my
/// account"); otherwise `Some(Ok(fields))` on success or
/// `Some(Err(last_error))` once every trusted key has been tried.
pub fn pam_authenticate<S, P, F, D>(
    user: &str,
    password: &[u8],
    acf_bytes: &[u8],
    now_unix: i64,
    serial_source: &S,
    key_source: &P,
    field_mode_source: &F,
    fail_delay: &D,
) -> Option<Result<AcfUserFields, AcfError>>
where
    S: SerialNumberSource,
    P: PublicKeySource,
    F: FieldModeSource,
    D: FailDelay,
{
    if user != SERVICE_USER {
        return None;
    }

    let serial = normalize_serial(serial_source.read_serial_number());

    let field_mode = match field_mode_source.read_field_mode() {
        Ok(mode) => mode,
        Err(err) => {
            tracing::warn!("pam adapter: field mode unreadable, treating as fatal");
            fail_delay.fail_delay(FAIL_DELAY_MICROS);
            return Some(Err(err));
        }
    };

    let mut slots = vec![KeySlot::Production, KeySlot::ProductionBackup];
    if field_mode == FieldMode::Development {
        slots.push(KeySlot::Development);
    }

    let mut last_err = AcfError::Failure;
    for slot in slots {
        let key = match key_source.read_public_key(slot) {
            Ok(key) => key,
            Err(err) => {
                tracing::debug!(?slot, "pam adapter: key slot unreadable, trying next");
                last_err = err;
                continue;
            }
        };

        match authorize::validate_and_build(acf_bytes, &key, &serial, now_unix, Some(password)) {
            Ok(fields) => return Some(Ok(fields)),
            Err(err) => last_err = err,
        }
    }

    tracing::warn!(error = ?last_err, "pam adapter: all trusted keys failed");
    fail_delay.fail_delay(FAIL_DELAY_MICROS);
    Some(Err(last_err))
}

fn normalize_serial(serial: String) -> String {
    if serial.is_empty() || serial == constants::BLANK_SERIAL_NUMBER {
        constants::UNSET_SERIAL_NUM_KEYWORD.to_string()
    } else {
        serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::fixtures::{keypair, sign_acf};
    use std::cell::Cell;
    use std::collections::HashMap;

    struct FakeSerial(String);
    impl SerialNumberSource for FakeSerial {
        fn read_serial_number(&self) -> String {
            self.0.clone()
        }
    }

    struct FakeKeys(HashMap<KeySlot, Vec<u8>>);
    impl PublicKeySource for FakeKeys {
        fn read_public_key(&self, slot: KeySlot) -> Result<Vec<u8>, AcfError> {
            self.0
                .get(&slot)
                .cloned()
                .ok_or(AcfError::GetSevAuthInvalidPublicKey)
        }
    }

    struct FakeFieldMode(FieldMode);
    impl FieldModeSource for FakeFieldMode {
        fn read_field_mode(&self) -> Result<FieldMode, AcfError> {
            Ok(self.0)
        }
    }

    struct FakeFailDelay {
        calls: Cell<u32>,
    }
    impl FailDelay for FakeFailDelay {
        fn fail_delay(&self, micros: u32) {
            self.calls.set(self.calls.get() + 1);
            assert!(micros >= FAIL_DELAY_MICROS);
        }
    }

    fn service_acf() -> (Vec<u8>, Vec<u8>) {
        let (private_key, fixture) = keypair();
        let salt = hex::decode("aabbccdd").unwrap();
        let hashed = crate::crypto::derive_password_hash(b"hunter2", &salt, 1000, 32).unwrap();
        let payload = format!(
            r#"{{"version":1,"type":"service","expiration":"2099-01-01","requestId":"r1",
                "machines":[{{"serialNumber":"SRL0001","frameworkEc":"PowerVM P10 Service"}}],
                "hashedAuthCode":"{}","salt":"aabbccdd","iterations":1000}}"#,
            hex::encode(&*hashed)
        );
        (fixture.public_key_der, sign_acf(&private_key, &payload))
    }

    #[test]
    fn ignores_non_service_users() {
        let (public_key_der, acf) = service_acf();
        let serial = FakeSerial("SRL0001".to_string());
        let mut keys = HashMap::new();
        keys.insert(KeySlot::Production, public_key_der);
        let keys = FakeKeys(keys);
        let field_mode = FakeFieldMode(FieldMode::Field);
        let fail_delay = FakeFailDelay {
            calls: Cell::new(0),
        };

        let result = pam_authenticate(
            "root",
            b"hunter2",
            &acf,
            0,
            &serial,
            &keys,
            &field_mode,
            &fail_delay,
        );
        assert!(result.is_none());
        assert_eq!(fail_delay.calls.get(), 0);
    }

    #[test]
    fn succeeds_with_production_key() {
        let (public_key_der, acf) = service_acf();
        let serial = FakeSerial("SRL0001".to_string());
        let mut keys = HashMap::new();
        keys.insert(KeySlot::Production, public_key_der);
        let keys = FakeKeys(keys);
        let field_mode = FakeFieldMode(FieldMode::Field);
        let fail_delay = FakeFailDelay {
            calls: Cell::new(0),
        };

        let result = pam_authenticate(
            SERVICE_USER,
            b"hunter2",
            &acf,
            0,
            &serial,
            &keys,
            &field_mode,
            &fail_delay,
        );
        assert!(matches!(result, Some(Ok(_))));
        assert_eq!(fail_delay.calls.get(), 0);
    }

    #[test]
    fn falls_back_to_development_key_only_outside_field_mode() {
        let (public_key_der, acf) = service_acf();
        let serial = FakeSerial("SRL0001".to_string());
        let mut keys = HashMap::new();
        keys.insert(KeySlot::Development, public_key_der);
        let keys = FakeKeys(keys);

        let field_mode_dev = FakeFieldMode(FieldMode::Development);
        let fail_delay = FakeFailDelay {
            calls: Cell::new(0),
        };
        let result = pam_authenticate(
            SERVICE_USER,
            b"hunter2",
            &acf,
            0,
            &serial,
            &keys,
            &field_mode_dev,
            &fail_delay,
        );
        assert!(matches!(result, Some(Ok(_))));

        let field_mode_field = FakeFieldMode(FieldMode::Field);
        let fail_delay2 = FakeFailDelay {
            calls: Cell::new(0),
        };
        let result2 = pam_authenticate(
            SERVICE_USER,
            b"hunter2",
            &acf,
            0,
            &serial,
            &keys,
            &field_mode_field,
            &fail_delay2,
        );
        assert!(matches!(result2, Some(Err(_))));
        assert_eq!(fail_delay2.calls.get(), 1);
    }

    #[test]
    fn blank_serial_normalizes_to_unset() {
        let (private_key, fixture) = keypair();
        let payload = r#"{"version":1,"type":"service","expiration":"2099-01-01","requestId":"r1",
            "machines":[{"serialNumber":"UNSET","frameworkEc":"PowerVM P10 Service"}],
            "hashedAuthCode":"00","salt":"00","iterations":1000}"#;
        let acf = sign_acf(&private_key, payload);
        let serial = FakeSerial(constants::BLANK_SERIAL_NUMBER.to_string());
        let mut keys = HashMap::new();
        keys.insert(KeySlot::Production, fixture.public_key_der);
        let keys = FakeKeys(keys);
        let field_mode = FakeFieldMode(FieldMode::Field);
        let fail_delay = FakeFailDelay {
            calls: Cell::new(0),
        };

        // Wrong password, but the point of this test is that the serial
        // normalizes to UNSET and matches — the failure should be
        // PasswordNotValid, not SerialNumberMismatch.
        let result = pam_authenticate(
            SERVICE_USER,
            b"wrong",
            &acf,
            0,
            &serial,
            &keys,
            &field_mode,
            &fail_delay,
        );
        match result {
            Some(Err(AcfError::PasswordNotValid)) => {}
            other => panic!("expected PasswordNotValid, got {other:?}"),
        }
    }
}
