//! Configuration types for the logger

use std::path::PathBuf;
use anyhow::{Context, Result};
use tracing::Level;

/// Presence of this variable (any value) switches diagnostics to debug level
pub const DEBUG_ENV: &str = "TYME_DEBUG";

/// Optional path of a log file receiving a copy of the diagnostics
pub const LOG_FILE_ENV: &str = "TYME_LOG_FILE";

/// Format of the log file: `full`, `compact` or `json` (default)
pub const LOG_FORMAT_ENV: &str = "TYME_LOG_FORMAT";

/// Main logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    pub level: String, // Will be converted to tracing::Level
}

impl LoggerConfig {
    /// Build the configuration from the process environment.
    ///
    /// `TYME_DEBUG` raises the level to `debug`, otherwise only warnings and
    /// errors are shown. `TYME_LOG_FILE` enables an additional log file,
    /// written as JSON unless `TYME_LOG_FORMAT` says otherwise.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if std::env::var_os(DEBUG_ENV).is_some() {
            config.level = "debug".to_string();
        }
        if let Some(path) = std::env::var_os(LOG_FILE_ENV).filter(|p| !p.is_empty()) {
            config.file.enable().with_path(path);
        }
        if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
            let format = format
                .parse::<LogFormat>()
                .with_context(|| format!("Invalid {LOG_FORMAT_ENV}"))?;
            config.file.with_format(format);
        }
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.parse_level()
            .with_context(|| format!("Invalid log level: {}", self.level))?;

        self.file.validate()
            .context("Invalid file configuration")?;

        if !self.console.enabled && !self.file.enabled {
            anyhow::bail!("At least one output (console or file) must be enabled");
        }

        Ok(())
    }

    /// Parse the log level string into a tracing::Level
    pub fn parse_level(&self) -> Result<Level> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" | "warning" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!("Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error", self.level),
        }
    }

    /// Override the level, keeping everything else
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "warn".to_string(),
        }
    }
}

/// Console (stderr) output configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output configuration
#[derive(Debug, Clone)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
}

impl FileConfig {
    /// Validate file configuration
    ///
    /// Pure check; the file itself is opened by `init_logger`.
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.path.as_os_str().is_empty() {
            anyhow::bail!("File path cannot be empty when file output is enabled");
        }
        Ok(())
    }

    /// Enable file output
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    /// Set file path
    pub fn with_path<P: Into<PathBuf>>(&mut self, path: P) -> &mut Self {
        self.path = path.into();
        self
    }

    /// Set log format
    pub fn with_format(&mut self, format: LogFormat) -> &mut Self {
        self.format = format;
        self
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("tyme.log"),
            append: true,
            format: LogFormat::Json,
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Invalid log format '{}'. Valid formats are: full, compact, json", s),
        }
    }
}

impl LogFormat {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}
