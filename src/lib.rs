//! # Quine-McCluskey Logic Minimizer
//!
//! This crate minimizes single-output Boolean functions, given as minterms and
//! don't-care terms over N inputs, into a sum-of-products cover using the
//! Quine-McCluskey algorithm.
//!
//! ## Overview
//!
//! Minimization runs as three stages, each consuming the previous one's output:
//!
//! 1. **Term generation** ([`generate_terms`]) validates the function
//!    description and builds the initial dash-free terms.
//! 2. **Prime implicant generation** ([`prime_implicants`]) merges terms that
//!    differ in one position until a fixpoint is reached.
//! 3. **Cover selection** ([`minimize`]) extracts essential prime implicants
//!    and covers the remaining minterms greedily (or exhaustively, on request).
//!
//! ```
//! use qm_logic::{generate_terms, minimize, Category};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let terms = generate_terms(
//!     &["A", "B", "C", "D"],
//!     &[("0001", Category::Minterm), ("1001", Category::Minterm)],
//! )?;
//! let cover = minimize(&terms)?;
//!
//! assert_eq!(cover.to_string(), "B'C'D");
//! # Ok(())
//! # }
//! ```
//!
//! ## Rendering
//!
//! A [`Cover`] displays as a sum of products using the default
//! [`SopFormat`]. Pass an explicit format to pick the output label, the
//! complement notation and the literal order:
//!
//! ```
//! use qm_logic::{generate_terms, minimize, Category, ComplementStyle, SopFormat};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let terms = generate_terms(
//!     &["a", "b"],
//!     &[("01", Category::Minterm), ("00", Category::Minterm)],
//! )?;
//! let cover = minimize(&terms)?;
//!
//! let format = SopFormat {
//!     output_label: Some("f".into()),
//!     complement: ComplementStyle::Prefix,
//!     and_separator: " * ".into(),
//!     ..SopFormat::default()
//! };
//! assert_eq!(cover.to_sop(&format), "f = ~a");
//! # Ok(())
//! # }
//! ```
//!
//! ## File Formats
//!
//! The [`blif`] module reads the single-output BLIF subset, the [`pla`]
//! module reads and writes single-output PLA files.
//!
//! ## Limits
//!
//! Prime implicant generation is exponential in the number of inputs in the
//! worst case. [`MinimizerConfig::max_inputs`] bounds the accepted width
//! (20 by default) and no width beyond 32 is representable. The greedy
//! reduction step is deterministic but not guaranteed to find a globally
//! minimum cover; [`CoverStrategy::Exact`] does, at exponential cost.

// Public modules
pub mod blif;
pub mod cover;
pub mod display;
pub mod error;
pub mod generator;
pub mod pla;
pub mod primes;
pub mod term;

// Re-export high-level public API
pub use cover::{Cover, CoverStats, Minimizable, SelectionReason};
pub use display::{ComplementStyle, LiteralOrder, SopFormat};
pub use error::{CoverageError, MalformedInputError, MinimizeError};
pub use generator::{generate_terms, FunctionSpec, TermList, MAX_INPUTS};
pub use primes::{prime_implicants, PrimeImplicants};
pub use term::{Category, Pattern, Term, Trit};

use log::info;

/// How minterms left after essential extraction get covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverStrategy {
    /// Repeatedly pick the implicant covering most remaining minterms,
    /// lowest pattern on ties
    #[default]
    Greedy,
    /// Branch and bound for the fewest implicants, then fewest literals
    Exact,
}

/// Configuration for the minimizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizerConfig {
    /// Reduction step used after essential extraction
    pub strategy: CoverStrategy,
    /// Widest function accepted by [`Minimizer::generate_terms`]
    pub max_inputs: usize,
}

impl Default for MinimizerConfig {
    fn default() -> Self {
        MinimizerConfig {
            strategy: CoverStrategy::Greedy,
            max_inputs: 20,
        }
    }
}

impl MinimizerConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// Runs the minimization pipeline with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Minimizer {
    config: MinimizerConfig,
}

impl Minimizer {
    pub fn new(config: MinimizerConfig) -> Self {
        Minimizer { config }
    }

    pub fn config(&self) -> &MinimizerConfig {
        &self.config
    }

    /// Generate terms, rejecting functions wider than `max_inputs`
    pub fn generate_terms<S, P>(
        &self,
        inputs: &[S],
        entries: &[(P, Category)],
    ) -> Result<TermList, MalformedInputError>
    where
        S: AsRef<str>,
        P: AsRef<str>,
    {
        generator::generate_terms_bounded(inputs, entries, self.config.max_inputs)
    }

    /// Prime implicants of a term list
    pub fn prime_implicants(&self, terms: &TermList) -> PrimeImplicants {
        prime_implicants(terms.terms().iter().cloned())
    }

    /// Minimize a term list into a cover
    ///
    /// An empty required set yields the empty cover.
    pub fn minimize(&self, terms: &TermList) -> Result<Cover, CoverageError> {
        let primes = self.prime_implicants(terms);
        let selection =
            cover::select::select(primes.as_slice(), terms.required_minterms(), self.config.strategy)?;

        let stats = CoverStats {
            initial_terms: terms.terms().len(),
            generations: primes.generations(),
            prime_implicants: primes.len(),
            essential: selection.count(SelectionReason::Essential),
            reduction: selection.rows.len() - selection.count(SelectionReason::Essential),
        };
        info!(
            "{} terms -> {} prime implicants -> {} in cover ({} essential)",
            stats.initial_terms,
            stats.prime_implicants,
            selection.rows.len(),
            stats.essential
        );

        let selected = selection
            .rows
            .iter()
            .map(|&(row, reason)| (primes.as_slice()[row].clone(), reason))
            .collect();
        Ok(Cover::new(terms.shared_inputs(), selected, stats))
    }
}

/// Minimize a term list with the default configuration
///
/// Composes the prime implicant engine and the cover selector. Fails only on
/// an internal coverage inconsistency.
pub fn minimize(terms: &TermList) -> Result<Cover, CoverageError> {
    Minimizer::default().minimize(terms)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<TermList>();
        assert_send_sync::<PrimeImplicants>();
        assert_send_sync::<Cover>();
        assert_send_sync::<Minimizer>();
        assert_send_sync::<MinimizeError>();
    }

    #[test]
    fn test_default_config() {
        let config = MinimizerConfig::new();
        assert_eq!(config.strategy, CoverStrategy::Greedy);
        assert_eq!(config.max_inputs, 20);
    }

    #[test]
    fn test_minimizer_respects_max_inputs() {
        let minimizer = Minimizer::new(MinimizerConfig {
            max_inputs: 2,
            ..MinimizerConfig::default()
        });
        let err = minimizer
            .generate_terms(&["a", "b", "c"], &[("000", Category::Minterm)])
            .unwrap_err();
        assert_eq!(err, MalformedInputError::TooManyInputs { count: 3, max: 2 });
    }

    #[test]
    fn test_stats() {
        let terms = generate_terms(
            &["a", "b", "c"],
            &[
                ("000", Category::Minterm),
                ("001", Category::Minterm),
                ("011", Category::DontCare),
            ],
        )
        .unwrap();
        let cover = minimize(&terms).unwrap();
        assert_eq!(cover.stats().initial_terms, 3);
        assert_eq!(cover.stats().prime_implicants, 2);
        assert_eq!(cover.stats().essential, 1);
        assert_eq!(cover.stats().reduction, 0);
        assert_eq!(cover.to_string(), "a'b'");
    }
}
