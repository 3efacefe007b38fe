// Application catalog: window contents launched from icons and the start menu
pub mod apps;

// Clock, countdown and simulated sensors
pub mod clock;

// Persisted settings
pub mod config;

// Window manager: registry, z-order, drag, taskbar
pub mod desktop;

pub mod error;

// Pure window geometry
pub mod geometry;

// Terminal front end
pub mod host;

// Trial countdown and admin unlock
pub mod session;

// Window records and taskbar projection
pub mod state;

// In-memory Zenux filesystem
pub mod storage;

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use config::{ConfigService, ShellConfig};
pub use desktop::DesktopSession;
pub use error::ShellError;
pub use session::{GateState, SessionGate};

/// Log file location. The terminal owns stdout, so logs go to disk.
fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zenuxOS")
        .join("zenuxos.log")
}

fn init_logging(config: &ShellConfig) -> anyhow::Result<PathBuf> {
    let path = log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = File::create(&path).with_context(|| format!("opening {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("zenuxos_lib=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .init();
    Ok(path)
}

pub fn run() -> anyhow::Result<()> {
    let service = ConfigService::new();
    // Held until the subscriber exists so the warning reaches the log file
    let (config, load_error) = match service.try_load() {
        Ok(config) => (config, None),
        Err(e) => (ShellConfig::default(), Some(e)),
    };
    let log_file = init_logging(&config)?;
    info!(config = %service.path().display(), log = %log_file.display(), "[BOOT] zenuxOS starting");
    if let Some(e) = load_error {
        warn!("[CONFIG] {} unusable, using defaults: {}", service.path().display(), e);
    }

    if !service.path().exists() {
        if let Err(e) = service.save(&config) {
            warn!("[BOOT] could not write default config: {}", e);
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("building runtime")?;
    runtime.block_on(host::run(config))?;
    Ok(())
}
