use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const LOG_FILTER_VAR: &str = "ALLOCATUI_LOG";
const LOG_FILE_VAR: &str = "ALLOCATUI_LOG_FILE";
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "allocatui.log";

/// Runtime settings. Nothing here is budget state; budgets live only for the
/// lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) log_filter: String,
    pub(crate) log_file: PathBuf,
}

impl Config {
    pub(crate) fn load() -> Result<Self> {
        let data_dir = get_data_dir()?;
        Ok(Self::from_lookup(|key| std::env::var(key).ok(), &data_dir))
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>, data_dir: &Path) -> Self {
        let log_filter = lookup(LOG_FILTER_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let log_file = lookup(LOG_FILE_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|s| PathBuf::from(crate::run::shellexpand(&s)))
            .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));
        Self {
            log_filter,
            log_file,
        }
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "allocatui", "AllocaTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Send tracing output to the log file. The terminal belongs to the UI, so
/// nothing is ever written to stdout or stderr.
pub(crate) fn init_logging(config: &Config) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    if let Some(parent) = config.log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file: {}", config.log_file.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "allocatui started");
    Ok(())
}
