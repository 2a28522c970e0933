//! Collaborator configuration, built the way `freeq-server`'s
//! `ServerConfig` is: a `clap::Parser` struct whose fields can come from
//! either the command line or the environment.

use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct HostConfig {
    /// Path to the ACF blob to act on.
    #[arg(long, env = "ACF_PATH")]
    pub acf_path: String,

    /// Path to the production trusted public key (SubjectPublicKeyInfo DER).
    #[arg(long, env = "ACF_PRODUCTION_KEY_PATH")]
    pub production_key_path: String,

    /// Path to the production-backup trusted public key.
    #[arg(long, env = "ACF_PRODUCTION_BACKUP_KEY_PATH")]
    pub production_backup_key_path: String,

    /// Path to the development trusted public key, tried only outside field mode.
    #[arg(long, env = "ACF_DEVELOPMENT_KEY_PATH")]
    pub development_key_path: String,

    /// SQLite database file backing the anti-replay counter.
    #[arg(long, env = "ACF_REPLAY_DB_PATH", default_value = "acf-replay.sqlite3")]
    pub replay_db_path: String,

    /// Device serial number, when not sourced from D-Bus.
    #[arg(long, env = "ACF_SERIAL_NUMBER", default_value = "")]
    pub serial_number: String,

    /// `"true"` to report development field mode; anything else (or unset) is field mode.
    #[arg(long, env = "ACF_FIELD_MODE", default_value = "")]
    pub field_mode: String,
}
