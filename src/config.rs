//! Configuration loading and data model.
//!
//! Settings come from a single TOML file (`servcon.toml` next to the binary,
//! or an explicit `--config` path). Everything has a default; a missing
//! default-location file simply yields the default config.

use crate::console::settings::{
    DEFAULT_CHAR_LIMIT, DEFAULT_CONFIG_FILE, DEFAULT_HISTORY_CAPACITY, DEFAULT_LOG_FILE,
};
use crate::error::ConfigError;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

/// Top-level runtime configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub console: ConsoleSection,
    pub log: LogSection,
}

/// Input-line and history settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    /// Maximum characters on the input line; extra keystrokes are dropped.
    pub char_limit: usize,
    /// Retained history entries before the oldest is evicted.
    pub history_capacity: usize,
    /// Optional path for persisting history across sessions.
    pub history_file: Option<PathBuf>,
    /// Whether `&`-directive colour parsing is enabled at all.
    pub colours: bool,
}

/// Persistent log mirror settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Append-only file receiving one plain-text line per emitted message.
    pub file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console: ConsoleSection::default(),
            log: LogSection::default(),
        }
    }
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            char_limit: DEFAULT_CHAR_LIMIT,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_file: None,
            colours: true,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.console.char_limit == 0 {
            return Err(ConfigError::Invalid(
                "console.char_limit must be at least 1".into(),
            ));
        }
        if self.console.history_capacity == 0 {
            return Err(ConfigError::Invalid(
                "console.history_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from disk.
///
/// `path_override` is an explicit config file path (from --config); it must
/// exist. Without it, `servcon.toml` is tried and absence falls back to
/// defaults.
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from(path_override, |path| std::fs::read_to_string(path))
}

fn load_config_from<F>(path_override: Option<&str>, read_file: F) -> Result<Config, ConfigError>
where
    F: Fn(&Path) -> io::Result<String>,
{
    let text = match path_override {
        Some(path) => Some(read_file(Path::new(path))?),
        None => match read_file(Path::new(DEFAULT_CONFIG_FILE)) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        },
    };

    let config: Config = match text {
        Some(text) => toml::from_str(&text)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}
