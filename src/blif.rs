//! BLIF (Berkeley Logic Interchange Format) reader
//!
//! Supports the single-output subset: one `.names` block whose rows give the
//! ON-set (`1`) and don't-care set (`-`) of the function. A block of `0` rows
//! gives the OFF-set instead and is complemented over the declared inputs; a
//! block may not mix `1` and `0` rows.
//!
//! ```text
//! .model example
//! .inputs A B C D
//! .outputs F
//! .names A B C D F
//! 0001 1
//! 1001 1
//! .end
//! ```
//!
//! The function's inputs are the `.inputs` list; the `.names` block may use a
//! subset of them in any order. Inputs a row doesn't mention are unconstrained.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::cover::labels::LabelManager;
use crate::error::{FormatError, MalformedInputError, ReadError};
use crate::generator::{FunctionSpec, MAX_INPUTS};
use crate::term::{Category, Pattern};

/// Trait for types that can be parsed from BLIF
pub trait BlifReader: Sized {
    /// Parse from any `BufRead` implementation
    fn from_blif_reader<R: BufRead>(reader: R) -> Result<Self, ReadError>;

    /// Parse from a BLIF string
    ///
    /// # Examples
    ///
    /// ```
    /// use qm_logic::blif::BlifReader;
    /// use qm_logic::{FunctionSpec, Minimizable};
    ///
    /// let blif = ".inputs A B C D\n.outputs F\n.names A B C D F\n0001 1\n1001 1\n.end\n";
    /// let spec = FunctionSpec::from_blif_string(blif).unwrap();
    /// let cover = spec.minimize().unwrap();
    /// assert_eq!(cover.to_string(), "B'C'D");
    /// ```
    fn from_blif_string(s: &str) -> Result<Self, ReadError> {
        Self::from_blif_reader(io::Cursor::new(s.as_bytes()))
    }

    /// Load from a BLIF file
    fn from_blif_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadError> {
        let file = File::open(path)?;
        Self::from_blif_reader(BufReader::new(file))
    }
}

/// Join `\` continuation lines and strip comments
///
/// Returns `(line number of the first physical line, logical line)`.
fn logical_lines<R: BufRead>(reader: R) -> io::Result<Vec<(usize, String)>> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };
        let trimmed = content.trim_end();
        let (text, continued) = match trimmed.strip_suffix('\\') {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };
        let (start, mut acc) = pending.take().unwrap_or((idx + 1, String::new()));
        acc.push(' ');
        acc.push_str(text);
        if continued {
            pending = Some((start, acc));
        } else {
            lines.push((start, acc.trim().to_string()));
        }
    }
    if let Some((start, acc)) = pending {
        lines.push((start, acc.trim().to_string()));
    }
    Ok(lines)
}

struct Row {
    pattern: Vec<char>,
    /// `None` for an OFF-set (`0`) row
    category: Option<Category>,
}

/// ON-set rows of a block given by its OFF-set
///
/// Every index not matched by a `0` row is a minterm, or a don't-care when a
/// `-` row matches it.
fn complement_off_set(
    width: usize,
    rows: &[(String, Option<Category>)],
) -> Result<Vec<(String, Category)>, MalformedInputError> {
    if width > MAX_INPUTS {
        return Err(MalformedInputError::TooManyInputs {
            count: width,
            max: MAX_INPUTS,
        });
    }
    let mut off = Vec::new();
    let mut dont_care = Vec::new();
    for (pattern, category) in rows {
        let parsed: Pattern = pattern.parse()?;
        match category {
            None => off.push(parsed),
            Some(_) => dont_care.push(parsed),
        }
    }

    let mut entries = Vec::new();
    for index in 0..(1u64 << width) {
        let index = index as u32;
        if off.iter().any(|p| p.covers(index)) {
            continue;
        }
        let category = if dont_care.iter().any(|p| p.covers(index)) {
            Category::DontCare
        } else {
            Category::Minterm
        };
        entries.push((Pattern::from_index(index, width).to_string(), category));
    }
    debug!(
        "complemented {} OFF-set rows into {} ON-set rows",
        off.len(),
        entries.len()
    );
    Ok(entries)
}

impl BlifReader for FunctionSpec {
    fn from_blif_reader<R: BufRead>(reader: R) -> Result<Self, ReadError> {
        let mut declared: Option<Vec<Arc<str>>> = None;
        let mut outputs: Option<Vec<Arc<str>>> = None;
        // (.names line, inputs, output)
        let mut names: Option<(usize, Vec<Arc<str>>, Arc<str>)> = None;
        let mut rows = Vec::new();
        // Some(true) once a `1` row was seen, Some(false) for a `0` row
        let mut on_set: Option<bool> = None;

        for (line_no, line) in logical_lines(reader)? {
            if line.is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();

            if line.starts_with('.') {
                let signals = || parts.iter().skip(1).map(|s| Arc::from(*s));
                match parts[0] {
                    ".model" => {}
                    ".inputs" => declared.get_or_insert_with(Vec::new).extend(signals()),
                    ".outputs" => outputs.get_or_insert_with(Vec::new).extend(signals()),
                    ".names" => {
                        let mut signals: Vec<Arc<str>> = signals().collect();
                        if names.is_some() {
                            return Err(FormatError::UnsupportedDirective {
                                line: line_no,
                                directive: Arc::from("second .names block"),
                            }
                            .into());
                        }
                        let Some(output) = signals.pop() else {
                            return Err(FormatError::MalformedRow {
                                line: line_no,
                                content: Arc::from(line.as_str()),
                            }
                            .into());
                        };
                        names = Some((line_no, signals, output));
                    }
                    ".end" | ".e" => break,
                    other => {
                        return Err(FormatError::UnsupportedDirective {
                            line: line_no,
                            directive: Arc::from(other),
                        }
                        .into())
                    }
                }
                continue;
            }

            let Some((_, columns, _)) = &names else {
                return Err(FormatError::MalformedRow {
                    line: line_no,
                    content: Arc::from(line.as_str()),
                }
                .into());
            };
            let (pattern, output) = match parts.as_slice() {
                [pattern, output] => (*pattern, *output),
                _ => {
                    return Err(FormatError::MalformedRow {
                        line: line_no,
                        content: Arc::from(line.as_str()),
                    }
                    .into())
                }
            };
            let pattern: Vec<char> = pattern.chars().collect();
            let mut out = output.chars();
            let (Some(out), None) = (out.next(), out.next()) else {
                return Err(FormatError::MalformedRow {
                    line: line_no,
                    content: Arc::from(line.as_str()),
                }
                .into());
            };
            if pattern.len() != columns.len() {
                return Err(FormatError::MalformedRow {
                    line: line_no,
                    content: Arc::from(line.as_str()),
                }
                .into());
            }
            let category = Category::from_output_char(out).map_err(|source| ReadError::Row {
                line: line_no,
                source,
            })?;
            let polarity = match category {
                Some(Category::Minterm) => Some(true),
                Some(Category::DontCare) => None,
                None => Some(false),
            };
            if let Some(polarity) = polarity {
                if on_set.is_some_and(|seen| seen != polarity) {
                    return Err(FormatError::MixedOutputPolarity { line: line_no }.into());
                }
                on_set = Some(polarity);
            }
            rows.push(Row { pattern, category });
        }

        let (names_line, columns, output) = names.ok_or(FormatError::MissingNames)?;
        if let Some(outputs) = &outputs {
            if outputs.len() != 1 {
                return Err(FormatError::UnsupportedOutputCount {
                    count: outputs.len(),
                }
                .into());
            }
            if outputs[0] != output {
                return Err(FormatError::UndeclaredOutput {
                    line: names_line,
                    name: output,
                }
                .into());
            }
        }

        let inputs = declared.unwrap_or_else(|| columns.clone());
        let labels = LabelManager::<'x'>::from_names(&inputs)?;
        let mut positions = Vec::with_capacity(columns.len());
        for name in &columns {
            let position = labels
                .find_position(name)
                .ok_or_else(|| FormatError::UndeclaredInput {
                    line: names_line,
                    name: Arc::clone(name),
                })?;
            positions.push(position);
        }

        let rows = rows
            .into_iter()
            .map(|row| {
                let mut pattern = vec!['-'; inputs.len()];
                for (&position, &ch) in positions.iter().zip(&row.pattern) {
                    pattern[position] = ch;
                }
                (pattern.into_iter().collect::<String>(), row.category)
            })
            .collect::<Vec<_>>();
        let entries = if on_set == Some(false) {
            complement_off_set(inputs.len(), &rows)?
        } else {
            rows.into_iter()
                .filter_map(|(pattern, category)| category.map(|c| (pattern, c)))
                .collect()
        };
        debug!(
            "parsed BLIF: {} inputs, output {}, {} rows",
            inputs.len(),
            output,
            entries.len()
        );

        Ok(FunctionSpec {
            inputs,
            output,
            entries,
        })
    }
}
