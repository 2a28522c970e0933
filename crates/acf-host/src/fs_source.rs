//! Filesystem-backed `AcfSource` and `PublicKeySource`.

use acf_core::{AcfError, AcfSource, KeySlot, PublicKeySource};
use std::path::PathBuf;

pub struct FilesystemAcfSource {
    pub acf_path: PathBuf,
}

impl FilesystemAcfSource {
    pub fn new(acf_path: impl Into<PathBuf>) -> Self {
        Self {
            acf_path: acf_path.into(),
        }
    }
}

impl AcfSource for FilesystemAcfSource {
    fn read_acf(&self) -> Result<Vec<u8>, AcfError> {
        std::fs::read(&self.acf_path).map_err(|err| {
            AcfError::SystemError(format!("reading ACF file {:?}: {err}", self.acf_path))
        })
    }
}

pub struct FilesystemKeySource {
    pub production: PathBuf,
    pub production_backup: PathBuf,
    pub development: PathBuf,
}

impl PublicKeySource for FilesystemKeySource {
    fn read_public_key(&self, slot: KeySlot) -> Result<Vec<u8>, AcfError> {
        let path = match slot {
            KeySlot::Production => &self.production,
            KeySlot::ProductionBackup => &self.production_backup,
            KeySlot::Development => &self.development,
        };
        std::fs::read(path)
            .map_err(|err| AcfError::SystemError(format!("reading public key {path:?}: {err}")))
    }
}
