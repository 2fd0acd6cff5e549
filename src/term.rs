//! Term types for Quine-McCluskey minimization
//!
//! This module provides the core term-related types shared by every stage:
//! - [`Trit`]: One pattern symbol (`0`, `1` or `-`)
//! - [`Pattern`]: A fixed-width sequence of trits
//! - [`Term`]: A pattern together with the true minterms it covers
//! - [`Category`]: Distinguishes minterm rows from don't-care rows

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::MalformedInputError;
use crate::generator::MAX_INPUTS;

/// A single symbol of a term pattern
///
/// The derived ordering (`Zero < One < Dash`) is the ordering used for
/// deterministic tie-breaking between implicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Trit {
    /// Input must be 0 (complemented literal)
    Zero,
    /// Input must be 1 (true literal)
    One,
    /// Input is unconstrained (no literal)
    Dash,
}

impl Trit {
    /// Parse a pattern character
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Trit::Zero),
            '1' => Some(Trit::One),
            '-' => Some(Trit::Dash),
            _ => None,
        }
    }

    /// The pattern character for this symbol
    pub fn as_char(self) -> char {
        match self {
            Trit::Zero => '0',
            Trit::One => '1',
            Trit::Dash => '-',
        }
    }

    /// Convert to the cube-style representation (`None` for a dash)
    pub fn as_option(self) -> Option<bool> {
        match self {
            Trit::Zero => Some(false),
            Trit::One => Some(true),
            Trit::Dash => None,
        }
    }
}

impl From<bool> for Trit {
    fn from(value: bool) -> Self {
        if value {
            Trit::One
        } else {
            Trit::Zero
        }
    }
}

/// A fixed-width pattern over `{0, 1, -}`
///
/// Position 0 is the most significant bit and corresponds to the first input.
/// Patterns are cheap to clone (shared slice).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern(Arc<[Trit]>);

impl Pattern {
    /// Create a pattern from trits
    pub fn new(trits: impl Into<Arc<[Trit]>>) -> Self {
        Pattern(trits.into())
    }

    /// Build the dash-free pattern of a minterm index over `width` inputs
    ///
    /// # Examples
    ///
    /// ```
    /// use qm_logic::Pattern;
    ///
    /// assert_eq!(Pattern::from_index(9, 4).to_string(), "1001");
    /// ```
    pub fn from_index(index: u32, width: usize) -> Self {
        (0..width)
            .map(|pos| Trit::from(bit(index, width - 1 - pos)))
            .collect()
    }

    /// Number of positions
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Symbols of this pattern
    pub fn trits(&self) -> &[Trit] {
        &self.0
    }

    /// Count of `One` symbols (dashes excluded), the QM grouping key
    pub fn ones(&self) -> usize {
        self.0.iter().filter(|&&t| t == Trit::One).count()
    }

    /// Count of `Dash` symbols
    pub fn dashes(&self) -> usize {
        self.0.iter().filter(|&&t| t == Trit::Dash).count()
    }

    /// Number of literals the pattern renders to
    pub fn literal_count(&self) -> usize {
        self.width() - self.dashes()
    }

    /// Combine two patterns that differ in exactly one `0`/`1` position
    ///
    /// Returns `None` unless the widths agree, every other position is
    /// identical (dashes included) and the single differing position holds a
    /// `0` in one pattern and a `1` in the other.
    ///
    /// # Examples
    ///
    /// ```
    /// use qm_logic::Pattern;
    ///
    /// let a: Pattern = "0001".parse().unwrap();
    /// let b: Pattern = "1001".parse().unwrap();
    /// assert_eq!(a.combine(&b).unwrap().to_string(), "-001");
    ///
    /// let c: Pattern = "-001".parse().unwrap();
    /// assert!(a.combine(&c).is_none());
    /// ```
    pub fn combine(&self, other: &Pattern) -> Option<Pattern> {
        if self.width() != other.width() {
            return None;
        }
        let mut differing = None;
        for (pos, (a, b)) in self.0.iter().zip(other.0.iter()).enumerate() {
            if a == b {
                continue;
            }
            if *a == Trit::Dash || *b == Trit::Dash || differing.is_some() {
                return None;
            }
            differing = Some(pos);
        }
        let pos = differing?;
        let mut trits = self.0.to_vec();
        trits[pos] = Trit::Dash;
        Some(Pattern::new(trits))
    }

    /// Whether the pattern spans the given minterm index
    pub fn covers(&self, index: u32) -> bool {
        let width = self.width();
        self.0.iter().enumerate().all(|(pos, t)| {
            let set = bit(index, width - 1 - pos);
            match t {
                Trit::Zero => !set,
                Trit::One => set,
                Trit::Dash => true,
            }
        })
    }

    /// Every minterm index spanned by the pattern, ascending
    ///
    /// A pattern with k dashes yields exactly 2^k indices. Positions above
    /// bit 31 only admit a 0, so a `1` there spans no index.
    pub fn minterms(&self) -> Vec<u32> {
        let (high, low) = self.0.split_at(self.width().saturating_sub(u32::BITS as usize));
        if high.contains(&Trit::One) {
            return Vec::new();
        }
        let mut indices = vec![0u32];
        for t in low {
            indices = match t {
                Trit::Zero => indices.into_iter().map(|i| i << 1).collect(),
                Trit::One => indices.into_iter().map(|i| (i << 1) | 1).collect(),
                Trit::Dash => indices
                    .into_iter()
                    .flat_map(|i| [i << 1, (i << 1) | 1])
                    .collect(),
            };
        }
        indices.sort_unstable();
        indices
    }
}

/// Bit `shift` of `index`; bits beyond the index width are 0
fn bit(index: u32, shift: usize) -> bool {
    u32::try_from(shift)
        .ok()
        .and_then(|shift| index.checked_shr(shift))
        .map_or(false, |v| v & 1 == 1)
}

impl FromIterator<Trit> for Pattern {
    fn from_iter<I: IntoIterator<Item = Trit>>(iter: I) -> Self {
        Pattern(iter.into_iter().collect())
    }
}

impl std::str::FromStr for Pattern {
    type Err = MalformedInputError;

    /// Parse a pattern, skipping space separators
    ///
    /// Patterns wider than [`MAX_INPUTS`] are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern: Pattern = s
            .chars()
            .filter(|c| *c != ' ')
            .enumerate()
            .map(|(position, character)| {
                Trit::from_char(character).ok_or(MalformedInputError::InvalidCharacter {
                    pattern: Arc::from(s),
                    character,
                    position,
                })
            })
            .collect::<Result<_, _>>()?;
        if pattern.width() > MAX_INPUTS {
            return Err(MalformedInputError::TooManyInputs {
                count: pattern.width(),
                max: MAX_INPUTS,
            });
        }
        Ok(pattern)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in self.0.iter() {
            write!(f, "{}", t.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({})", self)
    }
}

/// Category of a row in a function description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Output must be 1 (ON-set)
    Minterm,
    /// Output is unconstrained
    DontCare,
}

impl Category {
    /// Interpret an output column character
    ///
    /// `1` is a minterm, `-` a don't-care and `0` an OFF-set row, which
    /// carries no term and yields `Ok(None)`. Anything else is malformed.
    pub fn from_output_char(ch: char) -> Result<Option<Self>, MalformedInputError> {
        match ch {
            '1' => Ok(Some(Category::Minterm)),
            '-' => Ok(Some(Category::DontCare)),
            '0' => Ok(None),
            other => Err(MalformedInputError::InvalidOutput { value: other }),
        }
    }
}

/// A pattern with the true minterms it covers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub(crate) pattern: Pattern,
    pub(crate) covered: BTreeSet<u32>,
    pub(crate) required: bool,
}

impl Term {
    pub(crate) fn new(pattern: Pattern, covered: BTreeSet<u32>) -> Self {
        let required = !covered.is_empty();
        Term {
            pattern,
            covered,
            required,
        }
    }

    /// A dash-free term for a single row
    pub(crate) fn from_row(index: u32, width: usize, category: Category) -> Self {
        let covered = match category {
            Category::Minterm => BTreeSet::from([index]),
            Category::DontCare => BTreeSet::new(),
        };
        Term::new(Pattern::from_index(index, width), covered)
    }

    /// Get the pattern of this term
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Get the true minterms covered by this term (don't-cares excluded)
    pub fn covered_minterms(&self) -> &BTreeSet<u32> {
        &self.covered
    }

    /// Whether the term traces back to at least one true minterm
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Merge two terms whose patterns combine
    ///
    /// Coverage is the union of both inputs and the required flag their OR.
    pub fn combine(&self, other: &Term) -> Option<Term> {
        let pattern = self.pattern.combine(&other.pattern)?;
        Some(Term {
            pattern,
            covered: self.covered.union(&other.covered).copied().collect(),
            required: self.required || other.required,
        })
    }

    /// Fold another term with an identical pattern into this one
    pub(crate) fn absorb(&mut self, other: Term) {
        debug_assert_eq!(self.pattern, other.pattern);
        self.covered.extend(other.covered);
        self.required |= other.required;
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}
