//! Logging setup.
//!
//! The TUI owns stdout while a session runs, so events go to a log file.
//! Nothing here installs a global subscriber: [`dispatch`] builds a
//! [`Dispatch`] that callers hand to the components that log, and each
//! component scopes it with `tracing::dispatcher::set_default`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{Dispatch, Level};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "SYNONYM_SHORTLIST_LOG";

/// Log file name inside the default log directory.
const LOG_FILENAME: &str = "synonym-shortlist.log";

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default level when `SYNONYM_SHORTLIST_LOG` is unset.
    pub level: Level,
    /// Log destination. `None` discards everything.
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_file: Some(default_log_file()),
        }
    }
}

/// `<cache dir>/synonym-shortlist/synonym-shortlist.log`.
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("synonym-shortlist")
        .join(LOG_FILENAME)
}

/// Build a dispatcher writing to the configured file.
///
/// The file is opened in append mode and its parent directory created.
pub fn dispatch(config: &LogConfig) -> io::Result<Dispatch> {
    let Some(path) = &config.log_file else {
        return Ok(Dispatch::none());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str().to_lowercase()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .finish();

    Ok(Dispatch::new(subscriber))
}

/// Like [`dispatch`], but a log file that cannot be opened turns logging
/// off instead of failing. The error comes back so the caller can warn.
pub fn dispatch_or_silent(config: &LogConfig) -> (Dispatch, Option<io::Error>) {
    match dispatch(config) {
        Ok(dispatch) => (dispatch, None),
        Err(e) => (Dispatch::none(), Some(e)),
    }
}

// ============================================================================
// TESTS
// ============================================================================
