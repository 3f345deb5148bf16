//! crates/logging/src/location.rs
//! Call-site information rendered in verbose prefixes.

use std::fmt;

/// Source position of a log call.
///
/// The macros fill in all three fields. Callers of the plain emit functions
/// can rely on [`Location::caller`], which has no function name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    file: &'static str,
    line: u32,
    function: Option<&'static str>,
}

impl Location {
    /// Creates a location from explicit parts.
    #[must_use]
    pub const fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Captures the file and line of the calling code.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let caller = std::panic::Location::caller();
        Self::new(caller.file(), caller.line(), None)
    }

    /// Source file path.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// One-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Enclosing function path, when known.
    #[must_use]
    pub const fn function(&self) -> Option<&'static str> {
        self.function
    }
}

/// Renders `file:line (function)`, dropping the function part when unknown.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.function {
            Some(function) => write!(f, "{}:{} ({function})", self.file, self.line),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

/// Strips the probe suffix appended by [`function_name!`](crate::function_name)
/// and any closure frames, leaving the path of the enclosing function.
#[doc(hidden)]
#[must_use]
pub fn trim_function_name(probe: &'static str) -> &'static str {
    let mut name = probe.strip_suffix("::__probe").unwrap_or(probe);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

/// Expands to the path of the enclosing function as a `&'static str`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __probe() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::__private::trim_function_name(__type_name_of(__probe))
    }};
}

/// Expands to a [`Location`] for the macro's call site.
#[macro_export]
macro_rules! here {
    () => {
        $crate::Location::new(
            ::std::file!(),
            ::std::line!(),
            ::std::option::Option::Some($crate::function_name!()),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_function_when_known() {
        let location = Location::new("src/main.rs", 12, Some("demo::run"));
        assert_eq!(location.to_string(), "src/main.rs:12 (demo::run)");
    }

    #[test]
    fn display_omits_missing_function() {
        let location = Location::new("src/main.rs", 7, None);
        assert_eq!(location.to_string(), "src/main.rs:7");
    }

    #[test]
    fn caller_reports_this_file() {
        let location = Location::caller();
        assert!(location.file().ends_with("location.rs"));
        assert!(location.function().is_none());
    }

    #[test]
    fn function_name_names_enclosing_function() {
        let name = crate::function_name!();
        assert!(name.ends_with("tests::function_name_names_enclosing_function"), "{name}");
    }

    #[test]
    fn function_name_skips_closure_frames() {
        let name = (|| crate::function_name!())();
        assert!(name.ends_with("tests::function_name_skips_closure_frames"), "{name}");
    }

    #[test]
    fn here_captures_file_line_and_function() {
        let line = line!() + 1;
        let location = crate::here!();
        assert_eq!(location.line(), line);
        assert!(location.file().ends_with("location.rs"));
        assert!(location.function().is_some_and(|f| f.ends_with("here_captures_file_line_and_function")));
    }
}
