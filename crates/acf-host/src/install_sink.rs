//! A logging `InstallSink` suitable for a simulation CLI: it records what
//! it would have done rather than touching the admin account or the
//! filesystem.

use acf_core::{AcfError, AcfPayload, AcfType, InstallSink};

#[derive(Default)]
pub struct LoggingInstallSink;

impl InstallSink for LoggingInstallSink {
    fn reset_admin(&self, auth_code: &[u8]) -> Result<(), AcfError> {
        tracing::info!(auth_code_len = auth_code.len(), "would reset admin account");
        Ok(())
    }

    fn remove_acf(&self) {
        tracing::info!("would remove the consumed ACF from disk");
    }

    fn install_acf(
        &self,
        blob: &[u8],
        acf_type: AcfType,
        _fields: &AcfPayload,
    ) -> Result<(), AcfError> {
        tracing::info!(blob_len = blob.len(), ?acf_type, "would install ACF");
        Ok(())
    }
}
