//! crates/logging/src/tracing_bridge.rs
//! Routes `tracing` events through the logging register.
//!
//! [`LogStateLayer`] is a `tracing-subscriber` layer that maps each event's
//! level onto a [`LogLevel`], applies the register's gate and writes the
//! event's `message` field with the same line format as the native emitters.
//! The event's file and line become the location; there is no function name.
//!
//! | tracing level  | log level |
//! |----------------|-----------|
//! | TRACE, DEBUG   | Debug     |
//! | INFO           | Info      |
//! | WARN           | Warning   |
//! | ERROR          | Error     |
//!
//! Tracing events never terminate the process.
//!
//! ```rust,ignore
//! logging::init_tracing()?;
//! tracing::warn!("cache at {}%", 93);
//! ```

use std::io::{self, Write};

use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::emit::render_line;
use crate::level::{LogLevel, Stream};
use crate::location::Location;
use crate::state::{self, AtomicLoggingState};

/// Writer factory that picks stdout or stderr from the event level.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardStreams;

/// Writer handed out by [`StandardStreams`].
#[derive(Debug)]
pub enum StreamWriter {
    /// Writes to standard output.
    Stdout(io::Stdout),
    /// Writes to standard error.
    Stderr(io::Stderr),
}

impl Write for StreamWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::Stderr(err) => err.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // Stdout/Stderr hold their lock for the whole call.
        match self {
            Self::Stdout(out) => out.write_all(buf),
            Self::Stderr(err) => err.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::Stderr(err) => err.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for StandardStreams {
    type Writer = StreamWriter;

    fn make_writer(&'a self) -> Self::Writer {
        StreamWriter::Stdout(io::stdout())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        match map_level(*meta.level()).stream() {
            Stream::Stdout => StreamWriter::Stdout(io::stdout()),
            Stream::Stderr => StreamWriter::Stderr(io::stderr()),
        }
    }
}

/// Tracing layer gated by an [`AtomicLoggingState`].
#[derive(Debug)]
pub struct LogStateLayer<W = StandardStreams> {
    register: &'static AtomicLoggingState,
    make_writer: W,
}

impl LogStateLayer {
    /// Layer bound to the process-wide register, writing to the standard streams.
    #[must_use]
    pub fn global() -> Self {
        Self::new(state::global())
    }

    /// Layer bound to `register`, writing to the standard streams.
    #[must_use]
    pub const fn new(register: &'static AtomicLoggingState) -> Self {
        Self {
            register,
            make_writer: StandardStreams,
        }
    }
}

impl<W> LogStateLayer<W> {
    /// Replaces the writer factory, for example to capture output.
    #[must_use]
    pub fn with_writer<W2>(self, make_writer: W2) -> LogStateLayer<W2>
    where
        W2: for<'w> MakeWriter<'w> + 'static,
    {
        LogStateLayer {
            register: self.register,
            make_writer,
        }
    }
}

/// Maps a tracing level onto the closest log level.
#[must_use]
pub const fn map_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE | Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warning,
        Level::ERROR => LogLevel::Error,
    }
}

impl<S, W> Layer<S> for LogStateLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = map_level(*metadata.level());
        let state = self.register.state();
        if !state.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };

        let location = Location::new(
            metadata.file().unwrap_or("<unknown>"),
            metadata.line().unwrap_or(0),
            None,
        );
        let line = render_line(level, state, &location, format_args!("{message}"));
        let mut writer = self.make_writer.make_writer_for(metadata);
        let _ = writer.write_all(line.as_bytes());
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber consisting of [`LogStateLayer::global`].
///
/// Fails when another global subscriber is already installed.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LogStateLayer::global())
        .try_init()
}

#[cfg(test)]
mod tests;
