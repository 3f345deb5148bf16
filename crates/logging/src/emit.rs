//! crates/logging/src/emit.rs
//! Gated formatting and writing of log lines.
//!
//! Every emission reads the register once, checks the gate, renders the whole
//! line into one buffer and hands it to the destination stream under that
//! stream's lock. Lines from concurrent threads therefore never interleave
//! below line granularity.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::process;

use crate::level::{LogLevel, Stream};
use crate::location::Location;
use crate::state::{self, AtomicLoggingState, LoggingState};

/// Exit status used after a fatal line.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Renders one complete line, including the trailing newline.
///
/// The location prefix is added when `state.verbose` is set or `level` is
/// [`LogLevel::Debug`]. Gating is the caller's concern.
///
/// ```
/// use logging::{LogLevel, LoggingState, Location, render_line};
///
/// let state = LoggingState::new(LogLevel::Warning, false);
/// let here = Location::new("main.rs", 3, Some("main"));
/// assert_eq!(
///     render_line(LogLevel::Error, state, &here, format_args!("code {}", 7)),
///     "Error: code 7\n",
/// );
/// assert_eq!(
///     render_line(LogLevel::Debug, state, &here, format_args!("x")),
///     "Debug: [main.rs:3 (main)]: x\n",
/// );
/// ```
#[must_use]
pub fn render_line(
    level: LogLevel,
    state: LoggingState,
    location: &Location,
    args: fmt::Arguments<'_>,
) -> String {
    let mut line = String::with_capacity(64);
    // Writing into a String cannot fail.
    let _ = if state.verbose || level == LogLevel::Debug {
        writeln!(line, "{level}: [{location}]: {args}")
    } else {
        writeln!(line, "{level}: {args}")
    };
    line
}

/// Emitter bound to a particular register.
///
/// [`Logger::global`] is what the free functions and macros use; tests can
/// bind a logger to an owned [`AtomicLoggingState`] and capture output with
/// [`Logger::log_to`].
#[derive(Copy, Clone, Debug)]
pub struct Logger<'a> {
    register: &'a AtomicLoggingState,
}

impl Logger<'static> {
    /// Logger backed by the process-wide register.
    #[must_use]
    pub fn global() -> Self {
        Self::new(state::global())
    }
}

impl<'a> Logger<'a> {
    /// Creates a logger that consults `register` for every call.
    #[must_use]
    pub const fn new(register: &'a AtomicLoggingState) -> Self {
        Self { register }
    }

    /// Returns the register this logger reads.
    #[must_use]
    pub const fn register(&self) -> &'a AtomicLoggingState {
        self.register
    }

    /// Gates and writes one line to `out`.
    ///
    /// Returns `Ok(false)` when the gate is closed, in which case nothing is
    /// formatted. A fatal line is written like any other; terminating is left
    /// to [`Logger::fatal`].
    pub fn log_to<W>(
        &self,
        out: &mut W,
        level: LogLevel,
        location: &Location,
        args: fmt::Arguments<'_>,
    ) -> io::Result<bool>
    where
        W: Write + ?Sized,
    {
        let state = self.register.state();
        if !state.is_enabled(level) {
            return Ok(false);
        }
        out.write_all(render_line(level, state, location, args).as_bytes())?;
        Ok(true)
    }

    /// Gates and writes one line to the level's standard stream.
    ///
    /// A fatal line terminates the process after it is written.
    pub fn log(&self, level: LogLevel, location: &Location, args: fmt::Arguments<'_>) {
        let state = self.register.state();
        if level == LogLevel::Fatal {
            terminate(state, location, args);
        }
        if state.is_enabled(level) {
            emit_line(level, state, location, args);
        }
    }

    /// Logs at [`LogLevel::Debug`].
    pub fn debug(&self, location: &Location, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, location, args);
    }

    /// Logs at [`LogLevel::Info`].
    pub fn info(&self, location: &Location, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, location, args);
    }

    /// Logs at [`LogLevel::Warning`].
    pub fn warning(&self, location: &Location, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warning, location, args);
    }

    /// Logs at [`LogLevel::Error`].
    pub fn error(&self, location: &Location, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, location, args);
    }

    /// Writes a fatal line to standard error and exits with
    /// [`FATAL_EXIT_CODE`]. The register's level is ignored.
    pub fn fatal(&self, location: &Location, args: fmt::Arguments<'_>) -> ! {
        terminate(self.register.state(), location, args)
    }
}

/// Writes an already-gated line to the level's standard stream.
///
/// Used by the macros after they have checked the gate against `state`, so the
/// format arguments are only evaluated for open gates. Write failures are
/// ignored: a closed standard stream must not take the host down.
#[doc(hidden)]
pub fn emit_line(
    level: LogLevel,
    state: LoggingState,
    location: &Location,
    args: fmt::Arguments<'_>,
) {
    let line = render_line(level, state, location, args);
    let _ = write_to_stream(level.stream(), line.as_bytes());
}

fn write_to_stream(stream: Stream, line: &[u8]) -> io::Result<()> {
    match stream {
        Stream::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(line)?;
            out.flush()
        }
        Stream::Stderr => {
            let mut err = io::stderr().lock();
            err.write_all(line)?;
            err.flush()
        }
    }
}

/// Writes the fatal line and exits regardless of whether the write succeeded.
#[doc(hidden)]
pub fn terminate(state: LoggingState, location: &Location, args: fmt::Arguments<'_>) -> ! {
    emit_line(LogLevel::Fatal, state, location, args);
    process::exit(FATAL_EXIT_CODE)
}

/// Logs at `level` through the process-wide register.
#[track_caller]
pub fn log(level: LogLevel, args: fmt::Arguments<'_>) {
    Logger::global().log(level, &Location::caller(), args);
}

/// Logs at [`LogLevel::Debug`] with an explicit location.
pub fn debug(location: &Location, args: fmt::Arguments<'_>) {
    Logger::global().debug(location, args);
}

/// Logs at [`LogLevel::Info`] with an explicit location.
pub fn info(location: &Location, args: fmt::Arguments<'_>) {
    Logger::global().info(location, args);
}

/// Logs at [`LogLevel::Warning`] with an explicit location.
pub fn warning(location: &Location, args: fmt::Arguments<'_>) {
    Logger::global().warning(location, args);
}

/// Logs at [`LogLevel::Error`] with an explicit location.
pub fn error(location: &Location, args: fmt::Arguments<'_>) {
    Logger::global().error(location, args);
}

/// Writes a fatal line and terminates the process.
pub fn fatal(location: &Location, args: fmt::Arguments<'_>) -> ! {
    Logger::global().fatal(location, args)
}
