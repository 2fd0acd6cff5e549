//! Sum-of-products rendering for covers
//!
//! Every term becomes one product: a `0` at position i emits the complemented
//! literal of input i, a `1` emits the plain literal and a `-` emits nothing.
//! Notation is configured through [`SopFormat`].

use std::fmt;

use crate::cover::Cover;
use crate::term::{Term, Trit};

/// How a complemented literal is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplementStyle {
    /// `a'`
    #[default]
    Postfix,
    /// `~a`
    Prefix,
}

/// Order of literals inside one product term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralOrder {
    /// Input order
    #[default]
    Positional,
    /// Plain literals first, then complemented ones (input order within each)
    TrueThenComplement,
    /// Complemented literals first, then plain ones (input order within each)
    ComplementThenTrue,
}

/// Formatting options for sum-of-products output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SopFormat {
    /// Prefix the expression with `label = ` when set
    pub output_label: Option<String>,
    pub literal_order: LiteralOrder,
    pub complement: ComplementStyle,
    /// Placed between literals of a product
    pub and_separator: String,
    /// Placed between products
    pub or_separator: String,
}

impl Default for SopFormat {
    fn default() -> Self {
        SopFormat {
            output_label: None,
            literal_order: LiteralOrder::Positional,
            complement: ComplementStyle::Postfix,
            and_separator: String::new(),
            or_separator: " + ".to_string(),
        }
    }
}

impl SopFormat {
    /// Default notation with an output label
    pub fn labeled(label: impl Into<String>) -> Self {
        SopFormat {
            output_label: Some(label.into()),
            ..SopFormat::default()
        }
    }

    fn literal<L: AsRef<str>>(&self, label: L, complemented: bool) -> String {
        let label = label.as_ref();
        match (complemented, self.complement) {
            (false, _) => label.to_string(),
            (true, ComplementStyle::Postfix) => format!("{}'", label),
            (true, ComplementStyle::Prefix) => format!("~{}", label),
        }
    }

    /// Render one term as a product; the all-dash term renders as `1`
    pub fn product<L: AsRef<str>>(&self, term: &Term, labels: &[L]) -> String {
        let mut literals: Vec<(&L, bool)> = term
            .pattern()
            .trits()
            .iter()
            .zip(labels)
            .filter_map(|(trit, label)| match trit {
                Trit::Zero => Some((label, true)),
                Trit::One => Some((label, false)),
                Trit::Dash => None,
            })
            .collect();
        match self.literal_order {
            LiteralOrder::Positional => {}
            // stable sorts keep input order within each class
            LiteralOrder::TrueThenComplement => literals.sort_by_key(|&(_, c)| c),
            LiteralOrder::ComplementThenTrue => literals.sort_by_key(|&(_, c)| !c),
        }
        if literals.is_empty() {
            return "1".to_string();
        }
        literals
            .into_iter()
            .map(|(label, complemented)| self.literal(label, complemented))
            .collect::<Vec<_>>()
            .join(&self.and_separator)
    }

    /// Render a whole cover; the empty cover renders as `0`
    pub fn render(&self, cover: &Cover) -> String {
        let sum = if cover.is_empty() {
            "0".to_string()
        } else {
            cover
                .terms()
                .iter()
                .map(|t| self.product(t, cover.input_labels()))
                .collect::<Vec<_>>()
                .join(&self.or_separator)
        };
        match &self.output_label {
            Some(label) => format!("{} = {}", label, sum),
            None => sum,
        }
    }
}

impl Cover {
    /// Render as a sum of products with the given format
    pub fn to_sop(&self, format: &SopFormat) -> String {
        format.render(self)
    }
}

/// Sum-of-products with the default [`SopFormat`]
impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SopFormat::default().render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_terms;
    use crate::minimize;
    use crate::term::{Category, Pattern};
    use std::collections::BTreeSet;

    fn term(pattern: &str) -> Term {
        let pattern: Pattern = pattern.parse().unwrap();
        Term::new(pattern, BTreeSet::new())
    }

    const ABCD: [&str; 4] = ["A", "B", "C", "D"];

    #[test]
    fn test_positional_postfix() {
        let format = SopFormat::default();
        assert_eq!(format.product(&term("-001"), &ABCD), "B'C'D");
        assert_eq!(format.product(&term("1-0-"), &ABCD), "AC'");
    }

    #[test]
    fn test_prefix_with_separator() {
        let format = SopFormat {
            complement: ComplementStyle::Prefix,
            and_separator: " & ".to_string(),
            ..SopFormat::default()
        };
        assert_eq!(format.product(&term("-001"), &ABCD), "~B & ~C & D");
    }

    #[test]
    fn test_literal_orders() {
        let mut format = SopFormat::default();
        format.literal_order = LiteralOrder::TrueThenComplement;
        assert_eq!(format.product(&term("0101"), &ABCD), "BDA'C'");
        format.literal_order = LiteralOrder::ComplementThenTrue;
        assert_eq!(format.product(&term("0101"), &ABCD), "A'C'BD");
    }

    #[test]
    fn test_all_dash_is_one() {
        assert_eq!(SopFormat::default().product(&term("--"), &["a", "b"]), "1");
    }

    #[test]
    fn test_constant_covers() {
        let empty = generate_terms::<_, &str>(&["a", "b", "c"], &[]).unwrap();
        let cover = minimize(&empty).unwrap();
        assert_eq!(cover.to_string(), "0");
        assert_eq!(cover.to_sop(&SopFormat::labeled("F")), "F = 0");

        let all = generate_terms(
            &["a", "b"],
            &[
                ("00", Category::Minterm),
                ("01", Category::Minterm),
                ("10", Category::Minterm),
                ("11", Category::Minterm),
            ],
        )
        .unwrap();
        assert_eq!(minimize(&all).unwrap().to_string(), "1");
    }

    #[test]
    fn test_sum_of_products() {
        let terms = generate_terms(
            &["a", "b"],
            &[("01", Category::Minterm), ("10", Category::Minterm)],
        )
        .unwrap();
        let cover = minimize(&terms).unwrap();
        assert_eq!(cover.to_sop(&SopFormat::labeled("y")), "y = a'b + ab'");
    }
}
