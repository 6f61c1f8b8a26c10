//! Call-site capture
//!
//! Every public logging method is `#[track_caller]`, as is every internal
//! function between it and [`SourceLocation::caller`]. The location reported is
//! therefore the first caller outside that chain, whatever convenience method
//! was used. Adding a function to the chain without the attribute would make it
//! report that function instead; `tests/integration_tests.rs` checks the line.

use std::fmt;
use std::panic::Location;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
}

impl SourceLocation {
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }

    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Path of the source file as given by the compiler
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Base name of the source file
    pub fn file_name(&self) -> &'static str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name(), self.line)
    }
}
