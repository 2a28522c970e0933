use acf_core::{
    adapter, authorize, targeted_auth, KeySlot, PublicKeySource, ReplayStore, TargetedAction,
    UploadMode,
};
use acf_host::{
    EnvFieldModeSource, FilesystemAcfSource, FilesystemKeySource, HostConfig, LoggingInstallSink,
    SqliteReplayStore, StaticSerialNumberSource, ThreadSleepFailDelay,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "acf-cli")]
struct Cli {
    #[command(flatten)]
    host: HostConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Describe an ACF without authorizing it (extractACFMetadata).
    Describe,
    /// Run the upload-time replay check and print the value to persist.
    VerifyUpload {
        #[arg(long)]
        virtualization: bool,
        #[arg(long)]
        fail_if_replay_present: bool,
    },
    /// Authenticate with a password (checkAuthorizationAndGetAcfUserFields).
    Authenticate {
        #[arg(long)]
        password: String,
    },
    /// Run the full install/authenticate/verify orchestrator.
    Install {
        #[arg(long)]
        password: Option<String>,
    },
    /// Simulate the PAM adapter's key-try sequence end to end.
    PamSimulate {
        #[arg(long, default_value = "service")]
        user: String,
        #[arg(long)]
        password: String,
    },
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn init_logging() -> Result<()> {
    let json_logs = std::env::var("ACF_LOG_JSON").unwrap_or_default() == "1";
    let filter = EnvFilter::from_default_env().add_directive("acf_cli=info".parse()?);
    if json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

fn key_source(host: &HostConfig) -> FilesystemKeySource {
    FilesystemKeySource {
        production: host.production_key_path.clone().into(),
        production_backup: host.production_backup_key_path.clone().into(),
        development: host.development_key_path.clone().into(),
    }
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    tracing::info!(acf_path = %cli.host.acf_path, "acf-cli starting");

    let acf_bytes = std::fs::read(&cli.host.acf_path)
        .with_context(|| format!("reading ACF file {}", cli.host.acf_path))?;
    let replay_store = SqliteReplayStore::open(&cli.host.replay_db_path)
        .context("opening replay store")?;
    let keys = key_source(&cli.host);
    let serial = StaticSerialNumberSource(cli.host.serial_number.clone());
    let now = now_unix();

    match cli.command {
        Command::Describe => {
            let production_key = keys
                .read_public_key(KeySlot::Production)
                .context("reading production key")?;
            let metadata =
                authorize::extract_acf_metadata(&acf_bytes, &production_key, &serial.0, now)?;
            println!("{metadata:#?}");
        }
        Command::VerifyUpload {
            virtualization,
            fail_if_replay_present,
        } => {
            let production_key = keys
                .read_public_key(KeySlot::Production)
                .context("reading production key")?;
            let persisted = replay_store.retrieve_replay_id()?;
            let mode = if virtualization {
                UploadMode::Virtualization {
                    fail_if_replay_present,
                }
            } else {
                UploadMode::Bmc
            };
            let updated = authorize::verify_for_upload(
                &acf_bytes,
                &production_key,
                &serial.0,
                now,
                persisted,
                mode,
            )?;
            println!("replay id to persist: {updated}");
        }
        Command::Authenticate { password } => {
            let production_key = keys
                .read_public_key(KeySlot::Production)
                .context("reading production key")?;
            let persisted = replay_store.retrieve_replay_id()?;
            let fields = authorize::check_authorization_and_get_acf_user_fields(
                &acf_bytes,
                &production_key,
                &serial.0,
                now,
                Some(password.as_bytes()),
                persisted,
            )?;
            println!("{fields:#?}");
        }
        Command::Install { password } => {
            let production_key = keys
                .read_public_key(KeySlot::Production)
                .context("reading production key")?;
            let install_sink = LoggingInstallSink;
            let outcome = targeted_auth(
                &acf_bytes,
                TargetedAction::Install,
                password.as_deref().map(str::as_bytes),
                &production_key,
                &serial.0,
                now,
                &replay_store,
                &install_sink,
            )?;
            println!("{:#?}", outcome.user_fields);
        }
        Command::PamSimulate { user, password } => {
            let field_mode = EnvFieldModeSource::new("ACF_FIELD_MODE");
            let fail_delay = ThreadSleepFailDelay;
            match adapter::pam_authenticate(
                &user,
                password.as_bytes(),
                &acf_bytes,
                now,
                &serial,
                &keys,
                &field_mode,
                &fail_delay,
            ) {
                None => println!("user {user:?} ignored by this adapter"),
                Some(Ok(fields)) => println!("authenticated: {fields:#?}"),
                Some(Err(err)) => println!("denied: {err}"),
            }
        }
    }

    Ok(())
}
