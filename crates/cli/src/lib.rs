#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `logstate-demo` front-end. It configures the
//! process-wide logging register from the environment and command-line
//! switches, then runs demonstration rounds that exercise every emitter.
//!
//! # Design
//!
//! [`run`] accepts an argument iterator together with handles for standard
//! output and error. Banners and diagnostics about the command line go to
//! those handles; log lines always go to the real standard streams because
//! that is where the emitters write.
//!
//! Configuration precedence, lowest first: defaults, `LOGSTATE_LEVEL` and
//! `LOGSTATE_VERBOSE`, `-v` count, `--level`.
//!
//! # Errors
//!
//! Argument and environment errors are written to the error handle and yield
//! exit status `1`. `--fatal` ends the process from inside [`run`] with status
//! `1` after writing its line.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["logstate-demo", "--help"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().contains("--level"));
//! ```

mod demo;

use std::env;
use std::ffi::OsString;
use std::io::Write;

use clap::{Arg, ArgAction, Command, error::ErrorKind};
use logging::{LogLevel, LoggingConfig, log_debug, log_fatal};

pub use demo::{SWEEP_LEVELS, emit_round, sweep};

const PROGRAM: &str = "logstate-demo";

/// Iterations each stress worker performs.
const STRESS_ITERATIONS: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
struct ParsedArgs {
    level: Option<LogLevel>,
    verbose_count: u8,
    sweep: bool,
    threads: usize,
    fatal: bool,
    tracing: bool,
}

fn clap_command() -> Command {
    Command::new(PROGRAM)
        .about("Exercise the process-wide leveled logger.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .help("Minimum level to emit: debug, info, warning, error or fatal.")
                .value_parser(clap::value_parser!(LogLevel)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase verbosity; repeat for more (-vvv adds call sites).")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("sweep")
                .long("sweep")
                .help("Run a round for every level with and without call sites.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("N")
                .help("Race N threads updating the level and verbosity while logging.")
                .value_parser(clap::value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("tracing")
                .long("tracing")
                .help("Route tracing events through the logger and emit a few.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("fatal")
                .long("fatal")
                .help("Finish with a fatal line and exit status 1.")
                .action(ArgAction::SetTrue),
        )
}

fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM));
    }

    let matches = clap_command().try_get_matches_from(args)?;
    Ok(ParsedArgs {
        level: matches.get_one::<LogLevel>("level").copied(),
        verbose_count: matches.get_count("verbose"),
        sweep: matches.get_flag("sweep"),
        threads: matches.get_one::<usize>("threads").copied().unwrap_or(0),
        fatal: matches.get_flag("fatal"),
        tracing: matches.get_flag("tracing"),
    })
}

fn resolve_config(parsed: &ParsedArgs, base: LoggingConfig) -> LoggingConfig {
    let mut config = if parsed.verbose_count > 0 {
        LoggingConfig::from_verbose_count(parsed.verbose_count)
    } else {
        base
    };
    if let Some(level) = parsed.level {
        config.level = level;
    }
    config
}

/// Runs the demo with configuration read from the process environment.
///
/// Returns the exit status. With `--fatal` the function does not return.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    run_with_env(arguments, |key| env::var(key).ok(), stdout, stderr)
}

/// Runs the demo with configuration variables supplied by `lookup`.
pub fn run_with_env<I, S, F, Out, Err>(
    arguments: I,
    lookup: F,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    F: Fn(&str) -> Option<String>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return report_clap_error(&error, stdout, stderr),
    };

    let base = match LoggingConfig::from_env_vars(lookup) {
        Ok(config) => config,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM}: {error}");
            return 1;
        }
    };
    let config = resolve_config(&parsed, base);
    config.apply();

    if parsed.tracing {
        if let Err(error) = logging::init_tracing() {
            log_debug!("tracing subscriber not installed: {error}");
        }
    }

    let outcome = if parsed.sweep {
        demo::sweep(stdout)
    } else {
        demo::round(stdout)
    };
    if let Err(error) = outcome {
        let _ = writeln!(stderr, "{PROGRAM}: failed to write banner: {error}");
        return 1;
    }
    config.apply();

    if parsed.threads > 0 {
        demo::stress(parsed.threads, STRESS_ITERATIONS);
        config.apply();
    }

    if parsed.tracing {
        tracing::info!("tracing info routed through the register");
        tracing::warn!("tracing warning routed through the register");
    }

    if parsed.fatal {
        log_fatal!("Test {}", 42);
    }
    0
}

fn report_clap_error<Out, Err>(error: &clap::Error, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(stdout, "{error}");
            0
        }
        _ => {
            let _ = write!(stderr, "{error}");
            1
        }
    }
}
