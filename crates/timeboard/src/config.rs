//! Server configuration.
//!
//! Loads `timeboard.toml` (or the file named by `--config`), then applies
//! any explicitly given command-line overrides on top.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use timeboard_logging::LogFormat;
use tracing::warn;

/// The default config file name
pub const CONFIG_FILE_NAME: &str = "timeboard.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSONL export to serve. Empty means nothing is loaded.
    pub jsonl_path: PathBuf,
    pub port: u16,
    /// IANA name used to resolve "today" for default query ranges.
    pub timezone: String,
    /// Reload period in hours; 0 disables the scheduler.
    pub poll_interval_hours: u64,
    /// Built dashboard frontend served for non-API paths.
    pub frontend_dir: PathBuf,
    /// Also reload whenever the log file changes on disk.
    pub watch: bool,
    pub log_level: String,
    pub log_format: LogFormat,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jsonl_path: PathBuf::new(),
            port: 8080,
            timezone: "Australia/Sydney".to_string(),
            poll_interval_hours: 1,
            frontend_dir: PathBuf::from("./frontend/dist"),
            watch: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            log_dir: None,
        }
    }
}

/// Values given on the command line; `None` leaves the file value alone.
#[derive(Debug, Default)]
pub struct Overrides {
    pub jsonl_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub timezone: Option<String>,
    pub poll_interval_hours: Option<u64>,
    pub frontend_dir: Option<PathBuf>,
    pub watch: bool,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// Returns:
    /// - defaults if the file does not exist
    /// - `Err(...)` if the file exists but fails to parse (hard error)
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Where to look for the config file when `--config` is not given:
    /// the working directory first, then the user config directory.
    pub fn default_path() -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .map(|d| d.join("timeboard").join(CONFIG_FILE_NAME))
            .filter(|p| p.exists())
            .unwrap_or(local)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(path) = overrides.jsonl_path {
            self.jsonl_path = path;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(tz) = overrides.timezone {
            self.timezone = tz;
        }
        if let Some(hours) = overrides.poll_interval_hours {
            self.poll_interval_hours = hours;
        }
        if let Some(dir) = overrides.frontend_dir {
            self.frontend_dir = dir;
        }
        if overrides.watch {
            self.watch = true;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(format) = overrides.log_format {
            self.log_format = format;
        }
        self
    }

    /// The configured timezone, falling back to UTC for unknown names.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            warn!(timezone = %self.timezone, "unknown timezone, falling back to UTC");
            Tz::UTC
        })
    }
}
