//! Error types for the Quine-McCluskey minimizer
//!
//! This module provides error types that can be distinguished programmatically.
//! Input validation failures are reported as [`MalformedInputError`], internal
//! coverage inconsistencies as [`CoverageError`], and [`MinimizeError`] unifies
//! both for callers that drive the whole pipeline.

use std::fmt;
use std::io;
use std::sync::Arc;

// Re-export stage-specific errors so everything is reachable from one place
pub use crate::cover::error::CoverageError;
pub use crate::pla::error::{FormatError, ReadError, WriteError};

/// Errors raised by the term generator for an invalid function description
///
/// These are caller errors: retrying with the same input always fails again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    /// The function has no inputs
    NoInputs,
    /// The function has more inputs than the configured limit
    TooManyInputs {
        /// Number of inputs requested
        count: usize,
        /// Largest accepted number of inputs
        max: usize,
    },
    /// Two inputs share the same name
    DuplicateInput {
        /// The repeated name
        name: Arc<str>,
    },
    /// A pattern's length doesn't match the number of inputs
    PatternLength {
        /// The offending pattern
        pattern: Arc<str>,
        /// Number of inputs
        expected: usize,
        /// Number of symbols in the pattern
        actual: usize,
    },
    /// A pattern contains a character outside `{0, 1, -}`
    InvalidCharacter {
        /// The offending pattern
        pattern: Arc<str>,
        /// The invalid character
        character: char,
        /// Position of the character (spaces not counted)
        position: usize,
    },
    /// An output column is not `0`, `1` or `-`
    InvalidOutput {
        /// The invalid output value
        value: char,
    },
}

impl fmt::Display for MalformedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedInputError::NoInputs => write!(f, "Function has no inputs"),
            MalformedInputError::TooManyInputs { count, max } => write!(
                f,
                "Function has {} inputs, more than the supported maximum of {}",
                count, max
            ),
            MalformedInputError::DuplicateInput { name } => {
                write!(f, "Input '{}' is declared more than once", name)
            }
            MalformedInputError::PatternLength {
                pattern,
                expected,
                actual,
            } => write!(
                f,
                "Pattern '{}' has {} symbols but the function has {} inputs",
                pattern, actual, expected
            ),
            MalformedInputError::InvalidCharacter {
                pattern,
                character,
                position,
            } => write!(
                f,
                "Invalid character '{}' at position {} in pattern '{}'",
                character, position, pattern
            ),
            MalformedInputError::InvalidOutput { value } => write!(
                f,
                "Invalid output value '{}' (expected 0, 1 or -)",
                value
            ),
        }
    }
}

impl std::error::Error for MalformedInputError {}

impl From<MalformedInputError> for io::Error {
    fn from(err: MalformedInputError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// Errors from running the complete minimization pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimizeError {
    /// The function description was rejected
    Input(MalformedInputError),
    /// The coverage selector found an uncoverable minterm
    Coverage(CoverageError),
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizeError::Input(e) => write!(f, "Malformed input: {}", e),
            MinimizeError::Coverage(e) => write!(f, "Coverage failure: {}", e),
        }
    }
}

impl std::error::Error for MinimizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MinimizeError::Input(e) => Some(e),
            MinimizeError::Coverage(e) => Some(e),
        }
    }
}

impl From<MalformedInputError> for MinimizeError {
    fn from(err: MalformedInputError) -> Self {
        MinimizeError::Input(err)
    }
}

impl From<CoverageError> for MinimizeError {
    fn from(err: CoverageError) -> Self {
        MinimizeError::Coverage(err)
    }
}

impl From<MinimizeError> for io::Error {
    fn from(err: MinimizeError) -> Self {
        match err {
            MinimizeError::Input(e) => e.into(),
            MinimizeError::Coverage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pattern_length_display() {
        let err = MalformedInputError::PatternLength {
            pattern: Arc::from("011"),
            expected: 4,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("'011'"));
        assert!(msg.contains("3 symbols"));
        assert!(msg.contains("4 inputs"));
    }

    #[test]
    fn test_invalid_character_display() {
        let err = MalformedInputError::InvalidCharacter {
            pattern: Arc::from("0x1"),
            character: 'x',
            position: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("position 1"));
    }

    #[test]
    fn test_too_many_inputs_display() {
        let err = MalformedInputError::TooManyInputs { count: 40, max: 32 };
        assert!(err.to_string().contains("40 inputs"));
    }

    #[test]
    fn test_malformed_to_io_error() {
        let io_err: io::Error = MalformedInputError::NoInputs.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_minimize_error_source() {
        let err: MinimizeError = MalformedInputError::InvalidOutput { value: '2' }.into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("Malformed input"));
    }
}
