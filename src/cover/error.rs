//! Error types for cover selection

use std::fmt;
use std::io;

use crate::term::Pattern;

/// A required minterm that no prime implicant covers
///
/// The prime implicant engine always produces a complete set, so this error
/// signals an internal inconsistency rather than bad input. It carries the
/// coverage matrix as it stood when the problem was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageError {
    /// The uncovered minterm
    pub minterm: u32,
    /// Remaining matrix columns: each required minterm and its covering patterns
    pub matrix: Vec<(u32, Vec<Pattern>)>,
}

impl CoverageError {
    /// Render the matrix snapshot one column per line
    pub fn matrix_dump(&self) -> String {
        self.matrix
            .iter()
            .map(|(minterm, rows)| {
                let rows: Vec<String> = rows.iter().map(|p| p.to_string()).collect();
                format!("{}: [{}]", minterm, rows.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for CoverageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Required minterm {} is not covered by any prime implicant ({} columns in coverage matrix)",
            self.minterm,
            self.matrix.len()
        )
    }
}

impl std::error::Error for CoverageError {}

impl From<CoverageError> for io::Error {
    fn from(err: CoverageError) -> Self {
        io::Error::other(err)
    }
}
