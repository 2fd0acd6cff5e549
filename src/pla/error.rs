//! Error types for PLA and BLIF parsing and writing

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::error::MalformedInputError;

/// Errors related to the structure of a PLA or BLIF file
///
/// These errors occur when a file is syntactically broken or uses a feature
/// outside the supported single-output subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No input count could be determined (no directive and no cubes)
    MissingInputDirective,
    /// Invalid value in `.i` directive
    InvalidInputDirective {
        /// The invalid value string
        value: Arc<str>,
    },
    /// Invalid value in `.o` directive
    InvalidOutputDirective {
        /// The invalid value string
        value: Arc<str>,
    },
    /// The file describes a number of outputs other than one
    UnsupportedOutputCount {
        /// Number of outputs found
        count: usize,
    },
    /// A `.names` block, `.type` or other directive outside the supported subset
    UnsupportedDirective {
        /// Line number (1-based)
        line: usize,
        /// The directive
        directive: Arc<str>,
    },
    /// BLIF file without a `.names` block
    MissingNames,
    /// A `.names` signal that was not declared in `.inputs`
    UndeclaredInput {
        /// Line number (1-based)
        line: usize,
        /// The signal name
        name: Arc<str>,
    },
    /// A `.names` output that is not declared in `.outputs`
    UndeclaredOutput {
        /// Line number (1-based)
        line: usize,
        /// The signal name
        name: Arc<str>,
    },
    /// A `.names` block mixing `1` and `0` output rows
    MixedOutputPolarity {
        /// Line number (1-based) of the first row of the other polarity
        line: usize,
    },
    /// A cube row that can't be split into inputs and output
    MalformedRow {
        /// Line number (1-based)
        line: usize,
        /// The row text
        content: Arc<str>,
    },
    /// Label count doesn't match dimension count
    LabelCountMismatch {
        /// Type of label ("input" or "output")
        label_type: Arc<str>,
        /// Expected number of labels
        expected: usize,
        /// Actual number of labels provided
        actual: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MissingInputDirective => {
                write!(f, "File missing .i directive and no cubes to infer from")
            }
            FormatError::InvalidInputDirective { value } => {
                write!(f, "Invalid .i directive value: '{}'", value)
            }
            FormatError::InvalidOutputDirective { value } => {
                write!(f, "Invalid .o directive value: '{}'", value)
            }
            FormatError::UnsupportedOutputCount { count } => write!(
                f,
                "Only single-output functions are supported, found {} outputs",
                count
            ),
            FormatError::UnsupportedDirective { line, directive } => {
                write!(f, "Unsupported directive '{}' at line {}", directive, line)
            }
            FormatError::MissingNames => write!(f, "BLIF file has no .names block"),
            FormatError::UndeclaredInput { line, name } => write!(
                f,
                "Signal '{}' at line {} is not declared in .inputs",
                name, line
            ),
            FormatError::UndeclaredOutput { line, name } => write!(
                f,
                "Signal '{}' at line {} is not declared in .outputs",
                name, line
            ),
            FormatError::MixedOutputPolarity { line } => write!(
                f,
                "Row at line {} mixes ON-set and OFF-set rows in one .names block",
                line
            ),
            FormatError::MalformedRow { line, content } => {
                write!(f, "Malformed cube row at line {}: '{}'", line, content)
            }
            FormatError::LabelCountMismatch {
                label_type,
                expected,
                actual,
            } => write!(
                f,
                "{} label count ({}) doesn't match {} count ({})",
                label_type, actual, label_type, expected
            ),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<FormatError> for io::Error {
    fn from(err: FormatError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Errors that can occur when reading a function from PLA or BLIF data
#[derive(Debug)]
pub enum ReadError {
    /// File structure error
    Format(FormatError),
    /// A row with an invalid output value
    Row {
        /// Line number (1-based)
        line: usize,
        /// What was wrong with the row
        source: MalformedInputError,
    },
    /// The rows don't form a valid function description
    Input(MalformedInputError),
    /// IO error during reading
    Io(io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Format(e) => write!(f, "Format error: {}", e),
            ReadError::Row { line, source } => write!(f, "Line {}: {}", line, source),
            ReadError::Input(e) => write!(f, "Malformed input: {}", e),
            ReadError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Format(e) => Some(e),
            ReadError::Row { source, .. } => Some(source),
            ReadError::Input(e) => Some(e),
            ReadError::Io(e) => Some(e),
        }
    }
}

impl From<FormatError> for ReadError {
    fn from(err: FormatError) -> Self {
        ReadError::Format(err)
    }
}

impl From<MalformedInputError> for ReadError {
    fn from(err: MalformedInputError) -> Self {
        ReadError::Input(err)
    }
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::Io(err)
    }
}

impl From<ReadError> for io::Error {
    fn from(err: ReadError) -> Self {
        match err {
            // If it's already an IO error, return it directly
            ReadError::Io(e) => e,
            ReadError::Format(e) => e.into(),
            ReadError::Row { .. } => io::Error::new(io::ErrorKind::InvalidData, err),
            ReadError::Input(e) => e.into(),
        }
    }
}

/// Errors that can occur when writing PLA data
#[derive(Debug)]
pub enum WriteError {
    /// IO error during writing
    Io(io::Error),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for WriteError {
    fn from(err: io::Error) -> Self {
        WriteError::Io(err)
    }
}

impl From<WriteError> for io::Error {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Io(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_output_count() {
        let msg = FormatError::UnsupportedOutputCount { count: 3 }.to_string();
        assert!(msg.contains("3 outputs"));
    }

    #[test]
    fn test_malformed_row_display() {
        let err = FormatError::MalformedRow {
            line: 7,
            content: Arc::from("01"),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("'01'"));
    }

    #[test]
    fn test_blif_signal_errors_display() {
        let err = FormatError::UndeclaredOutput {
            line: 3,
            name: Arc::from("G"),
        };
        assert_eq!(err.to_string(), "Signal 'G' at line 3 is not declared in .outputs");
        let msg = FormatError::MixedOutputPolarity { line: 5 }.to_string();
        assert!(msg.contains("line 5"));
    }

    #[test]
    fn test_read_error_from_format_error() {
        let read_err: ReadError = FormatError::MissingNames.into();
        assert!(matches!(read_err, ReadError::Format(_)));
    }

    #[test]
    fn test_read_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let read_err: ReadError = io_err.into();
        assert!(matches!(read_err, ReadError::Io(_)));
    }

    #[test]
    fn test_row_error_display() {
        let err = ReadError::Row {
            line: 4,
            source: MalformedInputError::InvalidOutput { value: 'z' },
        };
        assert!(err.to_string().starts_with("Line 4:"));
    }

    #[test]
    fn test_read_error_to_io_error_preserves_io_error() {
        let original = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let io_err: io::Error = ReadError::Io(original).into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert_eq!(io_err.to_string(), "file not found");
    }

    #[test]
    fn test_format_error_to_io_error() {
        let io_err: io::Error = ReadError::Format(FormatError::MissingNames).into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_write_error_to_io_error() {
        let original = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let io_err: io::Error = WriteError::Io(original).into();
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
    }
}
