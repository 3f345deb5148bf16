//! crates/logging/src/guard.rs
//! RAII override of the logging register.

use crate::level::LogLevel;
use crate::state::{self, AtomicLoggingState, LoggingState};

/// Guard that installs a state and restores the previous one when dropped.
///
/// Created by [`scoped_state`] or [`StateGuard::install`]. Restoration replaces
/// both fields at once, so single-field changes made by other threads while the
/// guard was alive are overwritten.
///
/// ```
/// use logging::{LogLevel, scoped_state, state};
///
/// let before = state();
/// {
///     let _guard = scoped_state(LogLevel::Debug, true);
///     assert_eq!(state().level, LogLevel::Debug);
/// }
/// assert_eq!(state(), before);
/// ```
#[must_use = "dropping the guard immediately restores the previous state"]
#[derive(Debug)]
pub struct StateGuard<'a> {
    register: Option<&'a AtomicLoggingState>,
    previous: LoggingState,
}

impl<'a> StateGuard<'a> {
    /// Installs `state` into `register` until the guard is dropped.
    pub fn install(register: &'a AtomicLoggingState, state: LoggingState) -> Self {
        let previous = register.set_state(state);
        Self {
            register: Some(register),
            previous,
        }
    }

    /// State that will be restored on drop.
    #[must_use]
    pub const fn previous_state(&self) -> LoggingState {
        self.previous
    }

    /// Keeps the override in place and discards the guard.
    pub fn persist(mut self) {
        self.register = None;
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if let Some(register) = self.register.take() {
            register.set_state(self.previous);
        }
    }
}

/// Overrides the process-wide state for the lifetime of the returned guard.
pub fn scoped_state(level: LogLevel, verbose: bool) -> StateGuard<'static> {
    StateGuard::install(state::global(), LoggingState::new(level, verbose))
}
