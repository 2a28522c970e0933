//! Decode, verify, and authorize Access Control Files (ACFs): signed
//! capsules that grant a BMC's service processor time-bounded,
//! serial-number-bound elevated access without any per-user long-lived
//! credential on the device.
//!
//! This crate owns the cryptography, ASN.1/JSON decoding, and the
//! authorization state machine. It never touches a filesystem, D-Bus, or
//! PAM itself — callers supply those through the collaborator traits
//! below.

mod asn1;
mod crypto;
mod datetime;
mod error;
mod json;
mod orchestrator;
mod replay;
mod validator;

pub mod adapter;
pub mod authority;
pub mod authorize;
pub mod constants;
pub mod payload;

pub use authorize::{
    check_authorization_and_get_acf_user_fields, extract_acf_metadata, verify_for_upload,
    UploadMode,
};
pub use error::{AcfError, AcfResult};
pub use orchestrator::{targeted_auth, TargetedAction, TargetedAcfOutcome};
pub use payload::{AcfMetadata, AcfPayload, AcfType, AcfUserFields};

/// Which of the trusted key slots a `PublicKeySource` is asked to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySlot {
    Production,
    ProductionBackup,
    Development,
}

/// Reads the ACF blob to be validated.
pub trait AcfSource {
    fn read_acf(&self) -> Result<Vec<u8>, AcfError>;
}

/// Reads a trusted public key in `SubjectPublicKeyInfo` DER form.
pub trait PublicKeySource {
    fn read_public_key(&self, slot: KeySlot) -> Result<Vec<u8>, AcfError>;
}

/// Reads the device's own serial number. May return an empty or blank
/// string if the value has never been programmed; the core does not
/// normalize this itself (see `adapter::pam_authenticate`, which does).
pub trait SerialNumberSource {
    fn read_serial_number(&self) -> String;
}

/// Classifies the device as field-deployed or still in development.
pub trait FieldModeSource {
    fn read_field_mode(&self) -> Result<authority::FieldMode, AcfError>;
}

/// Persists the anti-replay counter. The core never locks this on the
/// caller's behalf — concurrent callers must serialize themselves.
pub trait ReplayStore {
    fn retrieve_replay_id(&self) -> Result<u64, AcfError>;
    fn store_replay_id(&self, id: u64) -> Result<(), AcfError>;
}

/// Carries out the effects of an `Install` action. `resetAdmin` and
/// `install_acf` must be safe to retry with the same ACF — the
/// orchestrator does not compensate them, only the replay counter.
pub trait InstallSink {
    fn reset_admin(&self, auth_code: &[u8]) -> Result<(), AcfError>;
    fn remove_acf(&self);
    fn install_acf(
        &self,
        blob: &[u8],
        acf_type: AcfType,
        fields: &AcfPayload,
    ) -> Result<(), AcfError>;
}

/// Imposes a delay after a denied authentication attempt.
pub trait FailDelay {
    fn fail_delay(&self, micros: u32);
}
