//! crates/logging/src/level.rs
//! Severity levels and the gating predicate shared by every emitter.

use std::fmt;
use std::str::FromStr;

/// Ordered severity of a log line.
///
/// Ordinals grow with importance, so `Debug < Info < Warning < Error < Fatal`.
/// The discriminants double as the packed representation stored in the
/// atomic register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum LogLevel {
    /// Developer diagnostics. Always rendered with the call-site prefix.
    Debug = 0,
    /// Informational progress messages.
    Info = 1,
    /// Conditions worth reviewing that do not stop the program. The default.
    #[default]
    Warning = 2,
    /// Failures the program recovers from.
    Error = 3,
    /// Unrecoverable failures. Emitting at this level terminates the process.
    Fatal = 4,
}

impl LogLevel {
    /// Every level in ascending order of severity.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Fatal,
    ];

    /// Returns the label used as the line prefix (`"Warning"`, `"Error"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Fatal => "Fatal",
        }
    }

    /// Returns the numeric ordinal of the level.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts an ordinal back into a level, returning `None` when out of range.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Debug),
            1 => Some(Self::Info),
            2 => Some(Self::Warning),
            3 => Some(Self::Error),
            4 => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Reports whether a line at this level passes a gate set to `reference`.
    ///
    /// See [`is_enabled_for_level`].
    #[must_use]
    pub const fn is_enabled_for(self, reference: Self) -> bool {
        is_enabled_for_level(self, reference)
    }

    /// Standard stream a line at this level is written to.
    #[must_use]
    pub const fn stream(self) -> Stream {
        match self {
            Self::Debug | Self::Info => Stream::Stdout,
            Self::Warning | Self::Error | Self::Fatal => Stream::Stderr,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name or ordinal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {input:?} (expected debug, info, warning, error, fatal or 0-4)")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let level = match token.to_ascii_lowercase().as_str() {
            "debug" | "0" => Self::Debug,
            "info" | "1" => Self::Info,
            "warning" | "warn" | "2" => Self::Warning,
            "error" | "err" | "3" => Self::Error,
            "fatal" | "4" => Self::Fatal,
            _ => {
                return Err(ParseLevelError {
                    input: token.to_owned(),
                });
            }
        };
        Ok(level)
    }
}

/// Destination stream for a rendered line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Reports whether `level` is enabled when the register holds `reference`.
///
/// A level is enabled when `reference <= level`. [`LogLevel::Fatal`] is
/// enabled for every reference level.
///
/// ```
/// use logging::{LogLevel, is_enabled_for_level};
///
/// assert!(is_enabled_for_level(LogLevel::Error, LogLevel::Warning));
/// assert!(!is_enabled_for_level(LogLevel::Debug, LogLevel::Info));
/// assert!(is_enabled_for_level(LogLevel::Fatal, LogLevel::Fatal));
/// ```
#[must_use]
pub const fn is_enabled_for_level(level: LogLevel, reference: LogLevel) -> bool {
    if matches!(level, LogLevel::Fatal) {
        return true;
    }
    reference.as_u8() <= level.as_u8()
}
