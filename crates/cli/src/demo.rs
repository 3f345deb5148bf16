//! crates/cli/src/demo.rs
//! Demonstration rounds exercising every emitter.

use std::io::{self, Write};
use std::thread;

use logging::{
    LogLevel, LoggingState, log_debug, log_error, log_info, log_warning, set_level, set_verbose,
    state,
};

/// Levels visited by a sweep, noisiest first.
pub const SWEEP_LEVELS: [LogLevel; 4] = [
    LogLevel::Debug,
    LogLevel::Info,
    LogLevel::Warning,
    LogLevel::Error,
];

const BANNER_RULE: &str = "=========================";

fn answer() -> i32 {
    42
}

fn product(x: i32, y: i32) -> i32 {
    x * y
}

/// Emits the eleven demo lines across debug, info, warning and error.
pub fn emit_round() {
    let x = 42;
    log_debug!("Test 1");
    log_debug!("Test {}", 2);
    log_debug!("Test {} with a value of {}", 3, x);

    log_info!("Test 4");
    log_info!("Test {}", 5);

    log_warning!("Test 6");
    log_warning!("Test {} test", 7);

    log_warning!("Test 8: {}", answer());
    log_warning!("Test 9: {}", product(2, 3));

    log_error!("Test 10");
    log_error!("Test {} test", 11);
}

/// Writes the banner describing the current register state.
pub fn write_banner<W: Write + ?Sized>(out: &mut W, current: LoggingState) -> io::Result<()> {
    writeln!(out, "{BANNER_RULE}")?;
    writeln!(
        out,
        "Testing with level: {} and verbosity {}",
        current.level.as_u8(),
        current.verbose
    )?;
    out.flush()
}

/// Runs one banner plus round for the current state.
pub fn round<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    write_banner(out, state())?;
    emit_round();
    Ok(())
}

/// Runs a round for every verbosity and sweep level.
pub fn sweep<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    for verbose in [false, true] {
        set_verbose(verbose);
        for level in SWEEP_LEVELS {
            set_level(level);
            round(out)?;
        }
    }
    Ok(())
}

/// Runs `threads` workers that race level and verbose updates while emitting.
///
/// Even-numbered workers cycle the level, odd-numbered workers toggle
/// verbosity; all of them emit a line per iteration.
pub fn stress(threads: usize, iterations: usize) {
    thread::scope(|scope| {
        for worker in 0..threads {
            scope.spawn(move || {
                for iteration in 0..iterations {
                    if worker % 2 == 0 {
                        set_level(SWEEP_LEVELS[iteration % SWEEP_LEVELS.len()]);
                    } else {
                        set_verbose(iteration % 2 == 0);
                    }
                    log_info!("worker {worker} iteration {iteration}");
                    log_error!("worker {worker} iteration {iteration}");
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_reports_ordinal_and_flag() {
        let mut out = Vec::new();
        write_banner(&mut out, LoggingState::new(LogLevel::Info, true)).expect("vec write");
        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            "=========================\nTesting with level: 1 and verbosity true\n"
        );
    }

    #[test]
    fn helpers_match_demo_values() {
        assert_eq!(answer(), 42);
        assert_eq!(product(2, 3), 6);
    }
}
