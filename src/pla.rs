//! PLA (Programmable Logic Array) format support
//!
//! Reading produces a single-output [`FunctionSpec`]; writing emits a minimized
//! [`Cover`] as an F-type PLA (`.i`, `.o 1`, `.ilb`, `.ob`, `.p`, rows, `.e`).

pub(crate) mod error;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::cover::labels::LabelManager;
use crate::cover::Cover;
use crate::error::{FormatError, MalformedInputError, ReadError, WriteError};
use crate::generator::FunctionSpec;
use crate::term::Category;

/// Trait for types that support PLA serialization (writing)
pub trait PLAWriter {
    /// Write to any `Write` implementation
    ///
    /// This is the core method; `to_pla_string` and `to_pla_file` delegate to it.
    /// `output_label` is written as the `.ob` directive when given.
    fn write_pla<W: Write>(&self, writer: &mut W, output_label: Option<&str>)
        -> Result<(), WriteError>;

    /// Convert to a PLA format string
    fn to_pla_string(&self, output_label: Option<&str>) -> Result<String, WriteError> {
        let mut buffer = Vec::new();
        self.write_pla(&mut buffer, output_label)?;
        String::from_utf8(buffer)
            .map_err(|e| WriteError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Write to a PLA file
    fn to_pla_file<P: AsRef<Path>>(
        &self,
        path: P,
        output_label: Option<&str>,
    ) -> Result<(), WriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pla(&mut writer, output_label)?;
        writer.flush()?;
        Ok(())
    }
}

impl PLAWriter for Cover {
    fn write_pla<W: Write>(
        &self,
        writer: &mut W,
        output_label: Option<&str>,
    ) -> Result<(), WriteError> {
        writeln!(writer, ".i {}", self.num_inputs())?;
        writeln!(writer, ".o 1")?;

        write!(writer, ".ilb")?;
        for label in self.input_labels() {
            write!(writer, " {}", label)?;
        }
        writeln!(writer)?;

        if let Some(label) = output_label {
            writeln!(writer, ".ob {}", label)?;
        }

        writeln!(writer, ".p {}", self.num_terms())?;
        for pattern in self.patterns() {
            writeln!(writer, "{} 1", pattern)?;
        }
        writeln!(writer, ".e")?;
        Ok(())
    }
}

/// Trait for types that can be parsed from PLA format
///
/// Convenience methods delegate to `from_pla_reader`.
pub trait PLAReader: Sized {
    /// Parse from any `BufRead` implementation
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, ReadError>;

    /// Parse from a PLA format string
    ///
    /// # Examples
    ///
    /// ```
    /// use qm_logic::FunctionSpec;
    /// use qm_logic::pla::PLAReader;
    ///
    /// let pla = ".i 2\n.o 1\n.ilb a b\n.ob f\n.p 1\n01 1\n.e\n";
    /// let spec = FunctionSpec::from_pla_string(pla).unwrap();
    /// assert_eq!(spec.inputs.len(), 2);
    /// assert_eq!(spec.output.as_ref(), "f");
    /// ```
    fn from_pla_string(s: &str) -> Result<Self, ReadError> {
        Self::from_pla_reader(io::Cursor::new(s.as_bytes()))
    }

    /// Load from a PLA file
    fn from_pla_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadError> {
        let file = File::open(path)?;
        Self::from_pla_reader(BufReader::new(file))
    }
}

/// Which output characters carry a term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaType {
    F,
    FD,
    FR,
    FDR,
}

impl PlaType {
    fn has_d(self) -> bool {
        matches!(self, PlaType::FD | PlaType::FDR)
    }
}

/// Map a PLA output character onto a row category
///
/// `1`/`4` are ON-set, `-`/`2` don't-care (only for types with a D set),
/// `0`/`3`/`~` carry nothing.
fn output_category(ch: char, pla_type: PlaType) -> Result<Option<Category>, MalformedInputError> {
    match ch {
        '1' | '4' => Ok(Some(Category::Minterm)),
        '-' | '2' if pla_type.has_d() => Ok(Some(Category::DontCare)),
        '-' | '2' | '0' | '3' | '~' => Ok(None),
        other => Category::from_output_char(other),
    }
}

fn parse_count(value: Option<&str>) -> Option<usize> {
    value.and_then(|s| s.parse().ok())
}

impl PLAReader for FunctionSpec {
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, ReadError> {
        let mut num_inputs: Option<usize> = None;
        // Default to FD to match the classic tools: '-' outputs are don't-cares
        let mut pla_type = PlaType::FD;
        let mut input_labels: Option<Vec<Arc<str>>> = None;
        let mut output_label: Option<Arc<str>> = None;
        let mut entries = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('.') {
                let parts: Vec<&str> = line.split_whitespace().collect();
                match parts.first().copied() {
                    Some(".i") => {
                        num_inputs = Some(parse_count(parts.get(1).copied()).ok_or_else(|| {
                            FormatError::InvalidInputDirective {
                                value: Arc::from(parts.get(1).copied().unwrap_or("")),
                            }
                        })?);
                    }
                    Some(".o") => {
                        let count = parse_count(parts.get(1).copied()).ok_or_else(|| {
                            FormatError::InvalidOutputDirective {
                                value: Arc::from(parts.get(1).copied().unwrap_or("")),
                            }
                        })?;
                        if count != 1 {
                            return Err(FormatError::UnsupportedOutputCount { count }.into());
                        }
                    }
                    Some(".type") => {
                        pla_type = match parts.get(1).copied() {
                            Some("f") => PlaType::F,
                            Some("fd") => PlaType::FD,
                            Some("fr") => PlaType::FR,
                            Some("fdr") => PlaType::FDR,
                            other => {
                                return Err(FormatError::UnsupportedDirective {
                                    line: line_no,
                                    directive: Arc::from(
                                        format!(".type {}", other.unwrap_or("")).as_str(),
                                    ),
                                }
                                .into())
                            }
                        };
                    }
                    Some(".ilb") => {
                        let labels: Vec<Arc<str>> =
                            parts.iter().skip(1).map(|s| Arc::from(*s)).collect();
                        if !labels.is_empty() {
                            input_labels = Some(labels);
                        }
                    }
                    Some(".ob") => {
                        let labels: Vec<&str> = parts.iter().skip(1).copied().collect();
                        if labels.len() != 1 {
                            return Err(FormatError::LabelCountMismatch {
                                label_type: Arc::from("output"),
                                expected: 1,
                                actual: labels.len(),
                            }
                            .into());
                        }
                        output_label = Some(Arc::from(labels[0]));
                    }
                    Some(".e") | Some(".end") => break,
                    _ => debug!("line {}: ignoring directive {}", line_no, line),
                }
                continue;
            }

            // Cube row: input columns, then the output part as the last
            // whitespace-separated token; '|' separates like whitespace
            let parts: Vec<&str> = line
                .split(|c: char| c.is_whitespace() || c == '|')
                .filter(|s| !s.is_empty())
                .collect();
            let (input_str, output_str) = match parts.as_slice() {
                [inputs @ .., output] if !inputs.is_empty() => (inputs.concat(), *output),
                // No separator: only splittable when the input width is known
                [row] => match num_inputs {
                    Some(ni) if row.chars().count() == ni + 1 => {
                        let split = row.char_indices().nth(ni).map_or(row.len(), |(i, _)| i);
                        (row[..split].to_string(), &row[split..])
                    }
                    _ => {
                        return Err(FormatError::MalformedRow {
                            line: line_no,
                            content: Arc::from(line),
                        }
                        .into())
                    }
                },
                _ => {
                    return Err(FormatError::MalformedRow {
                        line: line_no,
                        content: Arc::from(line),
                    }
                    .into())
                }
            };
            let mut outputs = output_str.chars();
            let out = match (outputs.next(), outputs.next()) {
                (Some(out), None) => out,
                _ => {
                    return Err(FormatError::UnsupportedOutputCount {
                        count: output_str.chars().count(),
                    }
                    .into())
                }
            };

            // Infer dimensions from the first cube if not specified
            let ni = *num_inputs.get_or_insert(input_str.chars().count());
            if input_str.chars().count() != ni {
                return Err(FormatError::MalformedRow {
                    line: line_no,
                    content: Arc::from(line),
                }
                .into());
            }

            let category = output_category(out, pla_type).map_err(|source| ReadError::Row {
                line: line_no,
                source,
            })?;
            if let Some(category) = category {
                let pattern: String = input_str
                    .chars()
                    .map(|c| match c {
                        '~' | 'x' | 'X' => '-',
                        c => c,
                    })
                    .collect();
                entries.push((pattern, category));
            }
        }

        let num_inputs = num_inputs.ok_or(FormatError::MissingInputDirective)?;

        let inputs = match input_labels {
            Some(labels) if labels.len() != num_inputs => {
                return Err(FormatError::LabelCountMismatch {
                    label_type: Arc::from("input"),
                    expected: num_inputs,
                    actual: labels.len(),
                }
                .into())
            }
            Some(labels) => labels,
            None => LabelManager::<'x'>::with_defaults(num_inputs).as_slice().to_vec(),
        };

        debug!(
            "read PLA with {} inputs and {} rows",
            num_inputs,
            entries.len()
        );

        Ok(FunctionSpec {
            inputs,
            output: output_label.unwrap_or_else(|| Arc::from("y0")),
            entries,
        })
    }
}
