//! crates/logging/src/macros.rs
//! Leveled logging macros that capture the call site.
//!
//! Each macro reads the process-wide register once and only evaluates its
//! format arguments when the gate for its level is open. Format strings are
//! checked at compile time by `format_args!`.

/// Logs at an explicit [`LogLevel`](crate::LogLevel) through the process-wide register.
///
/// [`LogLevel::Fatal`](crate::LogLevel::Fatal) behaves like [`log_fatal!`](crate::log_fatal):
/// the line is always written and the process exits with status 1.
///
/// ```
/// logging::log_at!(logging::LogLevel::Error, "request {} failed", 17);
/// ```
#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {{
        let level: $crate::LogLevel = $level;
        let state = $crate::state();
        if level == $crate::LogLevel::Fatal {
            $crate::__private::terminate(
                state,
                &$crate::here!(),
                ::std::format_args!($($arg)+),
            );
        }
        if state.is_enabled(level) {
            $crate::__private::emit_line(
                level,
                state,
                &$crate::here!(),
                ::std::format_args!($($arg)+),
            );
        }
    }};
}

/// Logs a debug line. Debug lines always carry the call-site prefix.
///
/// ```
/// let attempts = 3;
/// logging::log_debug!("retrying after {attempts} attempts");
/// ```
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Debug, $($arg)+)
    };
}

/// Logs an info line to standard output.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Info, $($arg)+)
    };
}

/// Logs a warning line to standard error.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Warning, $($arg)+)
    };
}

/// Logs an error line to standard error.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Error, $($arg)+)
    };
}

/// Logs a fatal line to standard error and exits with status 1.
///
/// The line is written whatever the configured level is, and the process
/// terminates even if the write fails. The macro evaluates to `!`.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {
        $crate::__private::terminate(
            $crate::state(),
            &$crate::here!(),
            ::std::format_args!($($arg)+),
        )
    };
}
