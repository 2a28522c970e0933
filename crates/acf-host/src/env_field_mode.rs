//! Field-mode classification via an environment variable — the faithful
//! Rust-native analogue of shelling out to a U-Boot environment reader on
//! a real BMC.

use acf_core::authority::FieldMode;
use acf_core::{AcfError, FieldModeSource};

pub struct EnvFieldModeSource {
    pub var_name: String,
}

impl EnvFieldModeSource {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl Default for EnvFieldModeSource {
    fn default() -> Self {
        Self::new("ACF_FIELD_MODE")
    }
}

impl FieldModeSource for EnvFieldModeSource {
    fn read_field_mode(&self) -> Result<FieldMode, AcfError> {
        let value = std::env::var(&self.var_name).unwrap_or_default();
        if value == "true" {
            Ok(FieldMode::Development)
        } else {
            Ok(FieldMode::Field)
        }
    }
}

pub struct StaticFieldModeSource(pub FieldMode);

impl FieldModeSource for StaticFieldModeSource {
    fn read_field_mode(&self) -> Result<FieldMode, AcfError> {
        Ok(self.0)
    }
}
