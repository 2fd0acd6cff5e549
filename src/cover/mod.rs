//! Cover types for minimized Boolean functions
//!
//! This module provides the [`Cover`] type, the result of minimization: an
//! ordered list of prime implicants whose union covers every required
//! minterm. It also holds the coverage matrix and the selection strategies
//! that build covers.

// Module declarations
pub(crate) mod error;
pub(crate) mod labels;
mod matrix;
mod minimizable;
pub(crate) mod select;

// Public re-exports
pub use minimizable::Minimizable;
pub use select::SelectionReason;

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::term::{Pattern, Term};

/// Statistics gathered while producing a cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverStats {
    /// Distinct terms handed to the prime implicant engine
    pub initial_terms: usize,
    /// Merge generations until the fixpoint
    pub generations: usize,
    /// Prime implicants found
    pub prime_implicants: usize,
    /// Essential prime implicants in the cover
    pub essential: usize,
    /// Prime implicants added after essential extraction
    pub reduction: usize,
}

/// A minimized sum-of-products cover of a single-output function
///
/// Terms are kept in selection order: essential implicants first, then the
/// ones picked by the reduction step. Two runs on the same input produce
/// identical covers.
///
/// # Examples
///
/// ```
/// use qm_logic::{generate_terms, minimize, Category};
///
/// let terms = generate_terms(
///     &["A", "B", "C", "D"],
///     &[("0001", Category::Minterm), ("1001", Category::Minterm)],
/// )
/// .unwrap();
/// let cover = minimize(&terms).unwrap();
///
/// assert_eq!(cover.num_terms(), 1);
/// assert_eq!(cover.terms()[0].pattern().to_string(), "-001");
/// assert_eq!(cover.to_string(), "B'C'D");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cover {
    inputs: Arc<[Arc<str>]>,
    terms: Vec<Term>,
    reasons: Vec<SelectionReason>,
    stats: CoverStats,
}

impl Cover {
    pub(crate) fn new(
        inputs: Arc<[Arc<str>]>,
        selected: Vec<(Term, SelectionReason)>,
        stats: CoverStats,
    ) -> Self {
        let (terms, reasons) = selected.into_iter().unzip();
        Cover {
            inputs,
            terms,
            reasons,
            stats,
        }
    }

    /// Get the number of inputs
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Input labels, aligned with pattern positions
    pub fn input_labels(&self) -> &[Arc<str>] {
        &self.inputs
    }

    /// Get the number of product terms
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Product terms in selection order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Iterate over terms together with the reason each was selected
    pub fn selections(&self) -> impl Iterator<Item = (&Term, SelectionReason)> + '_ {
        self.terms.iter().zip(self.reasons.iter().copied())
    }

    /// Iterate over terms as cube inputs (`None` for a dash)
    pub fn cubes_iter(&self) -> impl Iterator<Item = Vec<Option<bool>>> + '_ {
        self.terms
            .iter()
            .map(|t| t.pattern().trits().iter().map(|t| t.as_option()).collect())
    }

    /// Patterns of the product terms
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.terms.iter().map(|t| t.pattern())
    }

    /// Statistics of the run that produced this cover
    pub fn stats(&self) -> &CoverStats {
        &self.stats
    }

    /// Whether the cover is empty (the function is constant 0)
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether the cover is the single all-dash term (constant 1)
    pub fn is_tautology(&self) -> bool {
        self.terms.len() == 1 && self.terms[0].pattern().literal_count() == 0
    }

    /// Total number of literals over all product terms
    pub fn literal_count(&self) -> usize {
        self.terms.iter().map(|t| t.pattern().literal_count()).sum()
    }

    /// Union of the true minterms covered by the product terms
    pub fn covered_minterms(&self) -> BTreeSet<u32> {
        self.terms
            .iter()
            .flat_map(|t| t.covered_minterms().iter().copied())
            .collect()
    }

    /// Evaluate the cover on a minterm index
    pub fn evaluate(&self, index: u32) -> bool {
        self.terms.iter().any(|t| t.pattern().covers(index))
    }
}
