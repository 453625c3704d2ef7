use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for tool operations (30 seconds).
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// File name of the note store when no override is given.
pub const DEFAULT_NOTES_FILE_NAME: &str = "notes.txt";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("STICKY_NOTES_TOOL_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
    #[error("cannot locate the running executable: {0}")]
    ExecutablePath(#[source] std::io::Error),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub notes_file: PathBuf,
    pub tool_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `STICKY_NOTES_FILE` (optional) — path of the notes file; defaults to
    ///   `notes.txt` next to the running executable
    /// - `STICKY_NOTES_TOOL_TIMEOUT_SECS` (optional, default 30) — max seconds per tool call
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("STICKY_NOTES_FILE").ok(),
            std::env::var("STICKY_NOTES_TOOL_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(
        notes_file: Option<String>,
        tool_timeout_secs: Option<String>,
    ) -> Result<Self, ConfigError> {
        let notes_file = match notes_file {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_notes_file()?,
        };

        let tool_timeout_secs = match tool_timeout_secs {
            Some(val) => match val.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(val)),
            },
            None => DEFAULT_TOOL_TIMEOUT_SECS,
        };

        Ok(Self {
            notes_file,
            tool_timeout: Duration::from_secs(tool_timeout_secs),
        })
    }

    /// Configuration for an explicit notes path with the default timeout.
    pub fn with_notes_file(notes_file: impl Into<PathBuf>) -> Self {
        Self {
            notes_file: notes_file.into(),
            tool_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
        }
    }
}

fn default_notes_file() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ExecutablePath)?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(DEFAULT_NOTES_FILE_NAME))
}
