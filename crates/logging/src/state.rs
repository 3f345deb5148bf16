//! crates/logging/src/state.rs
//! Lock-free register bundling the severity level with the verbosity flag.
//!
//! Both fields live in a single [`AtomicU16`]: the level ordinal occupies the
//! low byte and the verbose flag the high byte. Every read therefore observes a
//! pair produced by one write, and single-field updates use a
//! compare-and-swap loop that re-reads the other field on contention instead of
//! overwriting it with a stale copy.

use std::sync::atomic::{AtomicU16, Ordering};

use crate::level::{LogLevel, is_enabled_for_level};

const LEVEL_MASK: u16 = 0x00ff;
const VERBOSE_BIT: u16 = 0x0100;

/// Snapshot of the logging register.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoggingState {
    /// Minimum severity that is emitted.
    pub level: LogLevel,
    /// Whether lines carry the `[file:line (function)]` prefix.
    pub verbose: bool,
}

impl LoggingState {
    /// State installed at process start: warnings and above, terse prefixes.
    pub const DEFAULT: Self = Self::new(LogLevel::Warning, false);

    /// Creates a snapshot from its parts.
    #[must_use]
    pub const fn new(level: LogLevel, verbose: bool) -> Self {
        Self { level, verbose }
    }

    /// Reports whether a line at `level` passes this state's gate.
    #[must_use]
    pub const fn is_enabled(self, level: LogLevel) -> bool {
        is_enabled_for_level(level, self.level)
    }

    /// Returns a copy with the level replaced.
    #[must_use]
    pub const fn with_level(self, level: LogLevel) -> Self {
        Self::new(level, self.verbose)
    }

    /// Returns a copy with the verbose flag replaced.
    #[must_use]
    pub const fn with_verbose(self, verbose: bool) -> Self {
        Self::new(self.level, verbose)
    }

    const fn to_bits(self) -> u16 {
        let verbose = if self.verbose { VERBOSE_BIT } else { 0 };
        self.level.as_u8() as u16 | verbose
    }

    const fn from_bits(bits: u16) -> Self {
        // Only `to_bits` writes the register, so the low byte is always a valid ordinal.
        let level = match LogLevel::from_u8((bits & LEVEL_MASK) as u8) {
            Some(level) => level,
            None => LogLevel::Fatal,
        };
        Self::new(level, bits & VERBOSE_BIT != 0)
    }
}

impl Default for LoggingState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Thread-safe register holding a [`LoggingState`].
///
/// The process-wide instance behind the free functions of this crate is
/// [`global`]; owning a separate register is useful for tests and embedders
/// that want isolated state.
///
/// # Examples
///
/// ```
/// use logging::{AtomicLoggingState, LogLevel, LoggingState};
///
/// let register = AtomicLoggingState::new(LoggingState::DEFAULT);
/// assert_eq!(register.set_level(LogLevel::Debug), LogLevel::Warning);
/// assert!(!register.set_verbose(true));
/// assert_eq!(register.state(), LoggingState::new(LogLevel::Debug, true));
/// ```
#[derive(Debug)]
pub struct AtomicLoggingState {
    bits: AtomicU16,
}

impl AtomicLoggingState {
    /// Creates a register initialised to `state`.
    #[must_use]
    pub const fn new(state: LoggingState) -> Self {
        Self {
            bits: AtomicU16::new(state.to_bits()),
        }
    }

    /// Loads the full state as one consistent pair.
    #[must_use]
    pub fn state(&self) -> LoggingState {
        LoggingState::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Replaces both fields at once and returns the previous pair.
    pub fn set_state(&self, state: LoggingState) -> LoggingState {
        LoggingState::from_bits(self.bits.swap(state.to_bits(), Ordering::AcqRel))
    }

    /// Returns the current level.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.state().level
    }

    /// Replaces the level, keeping whatever verbose flag is current, and
    /// returns the level that was in effect.
    pub fn set_level(&self, level: LogLevel) -> LogLevel {
        self.update(|current| current.with_level(level)).level
    }

    /// Returns the current verbose flag.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.state().verbose
    }

    /// Replaces the verbose flag, keeping whatever level is current, and
    /// returns the flag that was in effect.
    pub fn set_verbose(&self, verbose: bool) -> bool {
        self.update(|current| current.with_verbose(verbose)).verbose
    }

    /// Reports whether `level` passes the gate of the current state.
    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.state().is_enabled(level)
    }

    /// Compare-and-swap loop: rebuilds the desired pair from the freshest
    /// observed value until the swap lands. Returns the replaced state.
    fn update(&self, rebuild: impl Fn(LoggingState) -> LoggingState) -> LoggingState {
        let mut expected = self.bits.load(Ordering::Acquire);
        loop {
            let desired = rebuild(LoggingState::from_bits(expected)).to_bits();
            match self.bits.compare_exchange_weak(
                expected,
                desired,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(previous) => return LoggingState::from_bits(previous),
                // Another thread changed the other field; retry with its value.
                Err(observed) => expected = observed,
            }
        }
    }
}

impl Default for AtomicLoggingState {
    fn default() -> Self {
        Self::new(LoggingState::DEFAULT)
    }
}

static GLOBAL_STATE: AtomicLoggingState = AtomicLoggingState::new(LoggingState::DEFAULT);

/// Returns the process-wide register used by the emitters and macros.
#[must_use]
pub fn global() -> &'static AtomicLoggingState {
    &GLOBAL_STATE
}

/// Sets the process-wide level and returns the previous one.
pub fn set_level(level: LogLevel) -> LogLevel {
    GLOBAL_STATE.set_level(level)
}

/// Returns the process-wide level.
#[must_use]
pub fn level() -> LogLevel {
    GLOBAL_STATE.level()
}

/// Sets the process-wide verbose flag and returns the previous one.
pub fn set_verbose(verbose: bool) -> bool {
    GLOBAL_STATE.set_verbose(verbose)
}

/// Returns the process-wide verbose flag.
#[must_use]
pub fn verbose() -> bool {
    GLOBAL_STATE.verbose()
}

/// Replaces the process-wide level and verbose flag together.
pub fn set_state(level: LogLevel, verbose: bool) -> LoggingState {
    GLOBAL_STATE.set_state(LoggingState::new(level, verbose))
}

/// Returns the process-wide state as one consistent pair.
#[must_use]
pub fn state() -> LoggingState {
    GLOBAL_STATE.state()
}

/// Reports whether `level` passes the process-wide gate.
#[must_use]
pub fn is_enabled(level: LogLevel) -> bool {
    GLOBAL_STATE.is_enabled(level)
}
