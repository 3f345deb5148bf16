//! crates/logging/src/config.rs
//! Startup configuration for the logging register.

use std::env;

use crate::level::{LogLevel, ParseLevelError};
use crate::state::{self, AtomicLoggingState, LoggingState};

/// Environment variable holding the minimum level (`debug`, `info`, `warn`, ...).
pub const LEVEL_ENV: &str = "LOGSTATE_LEVEL";

/// Environment variable toggling call-site prefixes (`1`, `true`, `yes`, `on`, ...).
pub const VERBOSE_ENV: &str = "LOGSTATE_VERBOSE";

/// Errors produced while reading configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A level value could not be parsed.
    #[error("invalid LOGSTATE_LEVEL: {0}")]
    InvalidLevel(#[from] ParseLevelError),

    /// A verbose flag was not a recognised boolean spelling.
    #[error("invalid LOGSTATE_VERBOSE: {0:?} (expected 1/0, true/false, yes/no or on/off)")]
    InvalidVerbose(String),
}

/// Desired level and verbosity, applied to a register in one step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggingConfig {
    /// Minimum level to emit.
    pub level: LogLevel,
    /// Whether to prefix lines with their call site.
    pub verbose: bool,
}

impl LoggingConfig {
    /// Creates a configuration from explicit values.
    #[must_use]
    pub const fn new(level: LogLevel, verbose: bool) -> Self {
        Self { level, verbose }
    }

    /// Maps a count of `-v` switches onto a configuration.
    ///
    /// | count | level   | verbose |
    /// |-------|---------|---------|
    /// | 0     | Warning | no      |
    /// | 1     | Info    | no      |
    /// | 2     | Debug   | no      |
    /// | 3+    | Debug   | yes     |
    #[must_use]
    pub const fn from_verbose_count(count: u8) -> Self {
        match count {
            0 => Self::new(LogLevel::Warning, false),
            1 => Self::new(LogLevel::Info, false),
            2 => Self::new(LogLevel::Debug, false),
            _ => Self::new(LogLevel::Debug, true),
        }
    }

    /// Reads [`LEVEL_ENV`] and [`VERBOSE_ENV`] from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_vars(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// ```
    /// use logging::{LogLevel, LoggingConfig};
    ///
    /// let config = LoggingConfig::from_env_vars(|key| match key {
    ///     "LOGSTATE_LEVEL" => Some("info".to_owned()),
    ///     "LOGSTATE_VERBOSE" => Some("yes".to_owned()),
    ///     _ => None,
    /// })?;
    /// assert_eq!(config, LoggingConfig::new(LogLevel::Info, true));
    /// # Ok::<(), logging::ConfigError>(())
    /// ```
    pub fn from_env_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(LEVEL_ENV) {
            config.level = value.parse()?;
        }
        if let Some(value) = lookup(VERBOSE_ENV) {
            config.verbose = parse_flag(&value)?;
        }
        Ok(config)
    }

    /// The register state this configuration describes.
    #[must_use]
    pub const fn state(&self) -> LoggingState {
        LoggingState::new(self.level, self.verbose)
    }

    /// Installs the configuration into the process-wide register and returns
    /// the state it replaced.
    pub fn apply(&self) -> LoggingState {
        self.apply_to(state::global())
    }

    /// Installs the configuration into `register` and returns the state it replaced.
    pub fn apply_to(&self, register: &AtomicLoggingState) -> LoggingState {
        register.set_state(self.state())
    }
}

impl From<LoggingState> for LoggingConfig {
    fn from(state: LoggingState) -> Self {
        Self::new(state.level, state.verbose)
    }
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidVerbose(value.to_owned())),
    }
}
