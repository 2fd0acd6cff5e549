//! Term generator
//!
//! Turns a function description (input names plus `(pattern, category)` rows)
//! into the flat, de-duplicated list of dash-free terms the prime implicant
//! engine starts from.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::{debug, warn};

use crate::cover::labels::LabelManager;
use crate::error::MalformedInputError;
use crate::term::{Category, Pattern, Term, Trit};

/// Widest function a term index can address
pub const MAX_INPUTS: usize = 32;

/// Width above which prime implicant generation gets expensive
pub(crate) const PRACTICAL_INPUTS: usize = 20;

/// Initial terms of a function together with its input names
///
/// Produced by [`generate_terms`] and consumed by [`crate::minimize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermList {
    inputs: Arc<[Arc<str>]>,
    terms: Vec<Term>,
    required: BTreeSet<u32>,
}

impl TermList {
    /// Build a term list from already constructed terms
    ///
    /// The required set is the union of the terms' covered minterms. Useful for
    /// feeding a set of implicants back into the engine.
    pub fn from_terms<S: AsRef<str>>(
        inputs: &[S],
        terms: impl IntoIterator<Item = Term>,
    ) -> Result<Self, MalformedInputError> {
        let inputs = check_inputs(inputs, MAX_INPUTS)?;
        let width = inputs.len();
        let terms: Vec<Term> = terms.into_iter().collect();
        for term in &terms {
            if term.pattern().width() != width {
                return Err(MalformedInputError::PatternLength {
                    pattern: Arc::from(term.pattern().to_string().as_str()),
                    expected: width,
                    actual: term.pattern().width(),
                });
            }
        }
        let required = terms
            .iter()
            .flat_map(|t| t.covered_minterms().iter().copied())
            .collect();
        Ok(TermList {
            inputs,
            terms,
            required,
        })
    }

    /// Input names in column order
    pub fn inputs(&self) -> &[Arc<str>] {
        &self.inputs
    }

    pub(crate) fn shared_inputs(&self) -> Arc<[Arc<str>]> {
        Arc::clone(&self.inputs)
    }

    /// Number of inputs (pattern width)
    pub fn width(&self) -> usize {
        self.inputs.len()
    }

    /// The initial terms, ordered by minterm index
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Minterms the final cover must include
    pub fn required_minterms(&self) -> &BTreeSet<u32> {
        &self.required
    }

    /// Whether the description has no rows at all
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn check_inputs<S: AsRef<str>>(
    inputs: &[S],
    max_inputs: usize,
) -> Result<Arc<[Arc<str>]>, MalformedInputError> {
    if inputs.is_empty() {
        return Err(MalformedInputError::NoInputs);
    }
    let max = max_inputs.min(MAX_INPUTS);
    if inputs.len() > max {
        return Err(MalformedInputError::TooManyInputs {
            count: inputs.len(),
            max,
        });
    }
    Ok(LabelManager::<'x'>::from_names(inputs)?.into_shared())
}

/// Generate the initial term list of a function
///
/// Each entry is a pattern over `{0, 1, -}` (spaces are ignored) and its
/// [`Category`]. A dash stands for both values, so such a row contributes
/// every minterm it spans. An index listed both as minterm and as don't-care
/// is a minterm. An empty entry list is valid and describes constant 0.
///
/// # Examples
///
/// ```
/// use qm_logic::{generate_terms, Category};
///
/// let terms = generate_terms(
///     &["A", "B", "C", "D"],
///     &[("0001", Category::Minterm), ("1001", Category::Minterm)],
/// )
/// .unwrap();
/// assert_eq!(terms.terms().len(), 2);
/// assert!(terms.required_minterms().contains(&9));
/// ```
pub fn generate_terms<S, P>(
    inputs: &[S],
    entries: &[(P, Category)],
) -> Result<TermList, MalformedInputError>
where
    S: AsRef<str>,
    P: AsRef<str>,
{
    generate_terms_bounded(inputs, entries, MAX_INPUTS)
}

pub(crate) fn generate_terms_bounded<S, P>(
    inputs: &[S],
    entries: &[(P, Category)],
    max_inputs: usize,
) -> Result<TermList, MalformedInputError>
where
    S: AsRef<str>,
    P: AsRef<str>,
{
    let inputs = check_inputs(inputs, max_inputs)?;
    let width = inputs.len();
    if width > PRACTICAL_INPUTS {
        warn!(
            "{} inputs: prime implicant generation may take exponential time and memory",
            width
        );
    }

    // index -> required
    let mut rows: BTreeMap<u32, bool> = BTreeMap::new();
    for (raw, category) in entries {
        let raw = raw.as_ref();
        let pattern: Pattern = raw.parse()?;
        if pattern.width() != width {
            return Err(MalformedInputError::PatternLength {
                pattern: Arc::from(raw),
                expected: width,
                actual: pattern.width(),
            });
        }
        let indices = if pattern.trits().contains(&Trit::Dash) {
            pattern.minterms()
        } else {
            vec![index_of(&pattern)]
        };
        for index in indices {
            let required = rows.entry(index).or_insert(false);
            *required |= *category == Category::Minterm;
        }
    }

    let terms: Vec<Term> = rows
        .iter()
        .map(|(&index, &required)| {
            let category = if required {
                Category::Minterm
            } else {
                Category::DontCare
            };
            Term::from_row(index, width, category)
        })
        .collect();
    let required: BTreeSet<u32> = rows
        .iter()
        .filter(|(_, &required)| required)
        .map(|(&index, _)| index)
        .collect();

    debug!(
        "generated {} terms ({} minterms, {} don't-cares) from {} rows over {} inputs",
        terms.len(),
        required.len(),
        terms.len() - required.len(),
        entries.len(),
        width
    );

    Ok(TermList {
        inputs,
        terms,
        required,
    })
}

fn index_of(pattern: &Pattern) -> u32 {
    pattern
        .trits()
        .iter()
        .fold(0, |acc, t| (acc << 1) | u32::from(*t == Trit::One))
}

/// A single-output function as produced by the file readers
///
/// Holds the input names, the output name and the rows in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Input names in column order
    pub inputs: Vec<Arc<str>>,
    /// Name of the single output
    pub output: Arc<str>,
    /// Rows as `(pattern, category)`; OFF-set rows are not kept
    pub entries: Vec<(String, Category)>,
}

impl FunctionSpec {
    /// Generate the term list of this function
    pub fn to_terms(&self) -> Result<TermList, MalformedInputError> {
        generate_terms(&self.inputs, &self.entries)
    }

    pub(crate) fn to_terms_bounded(&self, max_inputs: usize) -> Result<TermList, MalformedInputError> {
        generate_terms_bounded(&self.inputs, &self.entries, max_inputs)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    const ABCD: [&str; 4] = ["A", "B", "C", "D"];

    #[test]
    fn test_basic_generation() {
        let list = generate_terms(
            &ABCD,
            &[("0001", Category::Minterm), ("1001", Category::Minterm)],
        )
        .unwrap();
        assert_eq!(list.width(), 4);
        let patterns: Vec<String> = list.terms().iter().map(|t| t.to_string()).collect();
        assert_eq!(patterns, vec!["0001", "1001"]);
        assert_eq!(list.required_minterms(), &BTreeSet::from([1, 9]));
        assert!(list.terms().iter().all(|t| t.is_required()));
    }

    #[test]
    fn test_dont_care_not_required() {
        let list = generate_terms(
            &["a", "b"],
            &[("01", Category::Minterm), ("11", Category::DontCare)],
        )
        .unwrap();
        assert_eq!(list.required_minterms(), &BTreeSet::from([1]));
        let dc = &list.terms()[1];
        assert_eq!(dc.pattern().to_string(), "11");
        assert!(!dc.is_required());
        assert!(dc.covered_minterms().is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let list = generate_terms(
            &["a", "b"],
            &[
                ("01", Category::DontCare),
                ("01", Category::Minterm),
                ("01", Category::Minterm),
            ],
        )
        .unwrap();
        assert_eq!(list.terms().len(), 1);
        assert!(list.terms()[0].is_required());
    }

    #[test]
    fn test_dash_rows_expand() {
        let list = generate_terms(&["a", "b", "c"], &[("1-1", Category::Minterm)]).unwrap();
        assert_eq!(list.required_minterms(), &BTreeSet::from([5, 7]));
        assert_eq!(list.terms().len(), 2);
    }

    #[test]
    fn test_spaces_ignored() {
        let list = generate_terms(&ABCD, &[("00 01", Category::Minterm)]).unwrap();
        assert_eq!(list.required_minterms(), &BTreeSet::from([1]));
    }

    #[test]
    fn test_empty_function() {
        let list = generate_terms::<_, &str>(&["a", "b", "c"], &[]).unwrap();
        assert!(list.is_empty());
        assert!(list.required_minterms().is_empty());
    }

    #[test]
    fn test_no_inputs() {
        let inputs: [&str; 0] = [];
        let err = generate_terms(&inputs, &[("", Category::Minterm)]).unwrap_err();
        assert_eq!(err, MalformedInputError::NoInputs);
    }

    #[test]
    fn test_wrong_length() {
        let err = generate_terms(&ABCD, &[("001", Category::Minterm)]).unwrap_err();
        assert!(matches!(
            err,
            MalformedInputError::PatternLength {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_alphabet() {
        let err = generate_terms(&ABCD, &[("00a1", Category::Minterm)]).unwrap_err();
        assert!(matches!(
            err,
            MalformedInputError::InvalidCharacter { character: 'a', .. }
        ));
    }

    #[test]
    fn test_input_limit() {
        let names: Vec<String> = (0..5).map(|i| format!("i{}", i)).collect();
        let err = generate_terms_bounded::<_, &str>(&names, &[], 4).unwrap_err();
        assert_eq!(err, MalformedInputError::TooManyInputs { count: 5, max: 4 });

        let names: Vec<String> = (0..33).map(|i| format!("i{}", i)).collect();
        let err = generate_terms_bounded::<_, &str>(&names, &[], 64).unwrap_err();
        assert_eq!(err, MalformedInputError::TooManyInputs { count: 33, max: 32 });
    }

    #[test]
    fn test_duplicate_input_names() {
        let err = generate_terms::<_, &str>(&["a", "a"], &[]).unwrap_err();
        assert!(matches!(err, MalformedInputError::DuplicateInput { .. }));
    }

    #[test]
    fn test_function_spec_to_terms() {
        let spec = FunctionSpec {
            inputs: vec![Arc::from("a"), Arc::from("b")],
            output: Arc::from("f"),
            entries: vec![("1-".to_string(), Category::Minterm)],
        };
        let list = spec.to_terms().unwrap();
        assert_eq!(list.required_minterms(), &BTreeSet::from([2, 3]));
    }
}
