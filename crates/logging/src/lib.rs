#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a process-wide leveled logger. A single lock-free register
//! holds the minimum [`LogLevel`] and a verbose flag; five emitters (debug,
//! info, warning, error, fatal) consult it, format one line and write it to
//! standard output or standard error.
//!
//! # Design
//!
//! - [`AtomicLoggingState`] packs both fields into one atomic word. Reads
//!   always see a pair written together; [`set_level`] and [`set_verbose`]
//!   run a compare-and-swap loop that preserves the other field's latest
//!   value.
//! - Every emission reads the register once. A closed gate returns before
//!   anything is formatted; the macros do not even evaluate their arguments.
//! - Debug and info go to stdout, warning, error and fatal to stderr. Each line
//!   is rendered into one buffer and written under the stream lock.
//! - [`log_fatal!`] and [`fatal`] bypass the gate, write their line and exit
//!   with status 1.
//!
//! # Line format
//!
//! ```text
//! Warning: disk nearly full                          terse
//! Info: [src/main.rs:12 (demo::run)]: ready          verbose, or any debug line
//! Error: [src/main.rs:40]: failed                    function name unknown
//! ```
//!
//! # Examples
//!
//! ```
//! use logging::{LogLevel, log_error, log_info, set_level, set_verbose};
//!
//! set_level(LogLevel::Info);
//! set_verbose(false);
//! log_info!("listening on port {}", 8080);
//! log_error!("request {} failed", 17);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`LogLevel`], [`LoggingState`]
//!   and [`LoggingConfig`].
//! - `tracing`: a `tracing-subscriber` layer that routes `tracing` events
//!   through the register.

mod config;
mod emit;
mod guard;
mod level;
mod location;
mod macros;
mod state;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{ConfigError, LEVEL_ENV, LoggingConfig, VERBOSE_ENV};
pub use emit::{
    FATAL_EXIT_CODE, Logger, debug, error, fatal, info, log, render_line, warning,
};
pub use guard::{StateGuard, scoped_state};
pub use level::{LogLevel, ParseLevelError, Stream, is_enabled_for_level};
pub use location::Location;
pub use state::{
    AtomicLoggingState, LoggingState, global, is_enabled, level, set_level, set_state,
    set_verbose, state, verbose,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{
    LogStateLayer, StandardStreams, StreamWriter, init_tracing, map_level,
};

#[doc(hidden)]
pub mod __private {
    pub use crate::emit::{emit_line, terminate};
    pub use crate::location::trim_function_name;
}
