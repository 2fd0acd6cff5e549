//! Minimizable trait for function descriptions
//!
//! This module provides the public [`Minimizable`] trait, a uniform interface
//! for turning anything that describes a function into a minimized [`Cover`].

use super::Cover;
use crate::error::{MalformedInputError, MinimizeError};
use crate::generator::{FunctionSpec, TermList};
use crate::{CoverStrategy, Minimizer, MinimizerConfig};

/// Types that can be minimized into a [`Cover`]
///
/// All methods take `&self` and leave the original untouched.
///
/// # Examples
///
/// ```
/// use qm_logic::{generate_terms, Category, Minimizable};
///
/// # fn main() -> Result<(), qm_logic::MinimizeError> {
/// let terms = generate_terms(
///     &["a", "b", "c"],
///     &[
///         ("000", Category::Minterm),
///         ("001", Category::Minterm),
///         ("010", Category::Minterm),
///         ("101", Category::Minterm),
///         ("110", Category::Minterm),
///         ("111", Category::Minterm),
///     ],
/// )?;
///
/// let greedy = terms.minimize()?;
/// let exact = terms.minimize_exact()?;
/// assert!(exact.num_terms() <= greedy.num_terms());
/// # Ok(())
/// # }
/// ```
pub trait Minimizable {
    /// Minimize with the default configuration (greedy reduction)
    fn minimize(&self) -> Result<Cover, MinimizeError> {
        self.minimize_with_config(&MinimizerConfig::default())
    }

    /// Minimize with a custom configuration
    ///
    /// This is the method implementations must provide.
    fn minimize_with_config(&self, config: &MinimizerConfig) -> Result<Cover, MinimizeError>;

    /// Minimize with the exhaustive reduction step
    ///
    /// Exponential in the number of minterms left after essential extraction.
    fn minimize_exact(&self) -> Result<Cover, MinimizeError> {
        let config = MinimizerConfig {
            strategy: CoverStrategy::Exact,
            ..MinimizerConfig::default()
        };
        self.minimize_with_config(&config)
    }
}

impl Minimizable for TermList {
    fn minimize_with_config(&self, config: &MinimizerConfig) -> Result<Cover, MinimizeError> {
        if self.width() > config.max_inputs {
            return Err(MalformedInputError::TooManyInputs {
                count: self.width(),
                max: config.max_inputs,
            }
            .into());
        }
        Ok(Minimizer::new(config.clone()).minimize(self)?)
    }
}

impl Minimizable for FunctionSpec {
    fn minimize_with_config(&self, config: &MinimizerConfig) -> Result<Cover, MinimizeError> {
        let terms = self.to_terms_bounded(config.max_inputs)?;
        Ok(Minimizer::new(config.clone()).minimize(&terms)?)
    }
}
