use super::*;
use crate::state::LoggingState;
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("capture lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(Arc::clone(&self.0))
    }
}

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().expect("capture lock").clone()).expect("utf-8")
    }
}

fn leaked(state: LoggingState) -> &'static AtomicLoggingState {
    Box::leak(Box::new(AtomicLoggingState::new(state)))
}

fn run_with(register: &'static AtomicLoggingState, body: impl FnOnce()) -> String {
    let capture = Capture::default();
    let layer = LogStateLayer::new(register).with_writer(capture.clone());
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, body);
    capture.text()
}

#[test]
fn level_mapping() {
    assert_eq!(map_level(Level::TRACE), LogLevel::Debug);
    assert_eq!(map_level(Level::DEBUG), LogLevel::Debug);
    assert_eq!(map_level(Level::INFO), LogLevel::Info);
    assert_eq!(map_level(Level::WARN), LogLevel::Warning);
    assert_eq!(map_level(Level::ERROR), LogLevel::Error);
}

#[test]
fn default_gate_drops_info_and_keeps_warnings() {
    let output = run_with(leaked(LoggingState::DEFAULT), || {
        tracing::info!("hidden");
        tracing::warn!("cache at {}%", 93);
        tracing::error!("lost connection");
    });
    assert_eq!(output, "Warning: cache at 93%\nError: lost connection\n");
}

#[test]
fn verbose_state_uses_event_location() {
    let output = run_with(leaked(LoggingState::new(LogLevel::Info, true)), || {
        tracing::info!("ready");
    });
    assert!(output.starts_with("Info: ["), "{output}");
    assert!(output.contains("tests.rs:"), "{output}");
    assert!(output.ends_with("]: ready\n"), "{output}");
    assert!(!output.contains('('), "tracing events carry no function name: {output}");
}

#[test]
fn events_without_message_are_skipped() {
    let output = run_with(leaked(LoggingState::new(LogLevel::Debug, false)), || {
        tracing::error!(code = 7);
    });
    assert!(output.is_empty());
}

#[test]
fn gate_is_read_per_event() {
    let register = leaked(LoggingState::DEFAULT);
    let output = run_with(register, || {
        tracing::info!("first");
        register.set_level(LogLevel::Info);
        tracing::info!("second");
    });
    assert_eq!(output, "Info: second\n");
}
