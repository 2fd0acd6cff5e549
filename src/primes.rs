//! Prime implicant generation
//!
//! Tabulation step of Quine-McCluskey. Each generation is an immutable set of
//! terms keyed by pattern. The next generation is the set of all successful
//! merges between terms whose `1` counts differ by exactly one; a term that
//! takes part in no merge is prime.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::term::{Pattern, Term};

/// Prime implicants of a function, ordered by pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeImplicants {
    primes: Vec<Term>,
    generations: usize,
}

impl PrimeImplicants {
    /// The prime implicants, ordered by pattern (`0 < 1 < -`)
    pub fn as_slice(&self) -> &[Term] {
        &self.primes
    }

    /// Number of merge generations it took to reach the fixpoint
    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Patterns of the prime implicants
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.primes.iter().map(|t| t.pattern())
    }

    pub fn into_vec(self) -> Vec<Term> {
        self.primes
    }
}

type Generation = BTreeMap<Pattern, Term>;

/// Collapse terms with identical patterns
fn dedup(terms: impl IntoIterator<Item = Term>) -> Generation {
    let mut generation = Generation::new();
    for term in terms {
        match generation.get_mut(term.pattern()) {
            Some(existing) => existing.absorb(term),
            None => {
                generation.insert(term.pattern().clone(), term);
            }
        }
    }
    generation
}

/// Merge one generation
///
/// Returns the next generation and the set of patterns that took part in at
/// least one merge.
fn step(generation: &Generation) -> (Generation, BTreeSet<Pattern>) {
    let mut groups: BTreeMap<usize, Vec<&Term>> = BTreeMap::new();
    for term in generation.values() {
        groups.entry(term.pattern().ones()).or_default().push(term);
    }

    let mut merged = Vec::new();
    let mut participants = BTreeSet::new();
    for (ones, lower) in &groups {
        let Some(upper) = groups.get(&(ones + 1)) else {
            continue;
        };
        for a in lower {
            for b in upper {
                if let Some(term) = a.combine(b) {
                    participants.insert(a.pattern().clone());
                    participants.insert(b.pattern().clone());
                    merged.push(term);
                }
            }
        }
    }
    (dedup(merged), participants)
}

/// Compute every prime implicant of a set of terms
///
/// Identical patterns in the input are merged before the first pass. The
/// result is the de-duplicated union of the unmerged terms of every
/// generation. Running this again on its own output returns the same set.
///
/// # Examples
///
/// ```
/// use qm_logic::{generate_terms, prime_implicants, Category};
///
/// let terms = generate_terms(
///     &["A", "B", "C", "D"],
///     &[("0001", Category::Minterm), ("1001", Category::Minterm)],
/// )
/// .unwrap();
/// let primes = prime_implicants(terms.terms().iter().cloned());
/// let patterns: Vec<String> = primes.patterns().map(|p| p.to_string()).collect();
/// assert_eq!(patterns, vec!["-001"]);
/// ```
pub fn prime_implicants(terms: impl IntoIterator<Item = Term>) -> PrimeImplicants {
    let mut generation = dedup(terms);
    let mut primes = Generation::new();
    let mut generations = 0;

    while !generation.is_empty() {
        let (next, participants) = step(&generation);
        debug!(
            "generation {}: {} terms, {} merged, {} new implicants",
            generations,
            generation.len(),
            participants.len(),
            next.len()
        );
        for (pattern, term) in generation {
            if participants.contains(&pattern) {
                continue;
            }
            match primes.get_mut(&pattern) {
                Some(existing) => existing.absorb(term),
                None => {
                    primes.insert(pattern, term);
                }
            }
        }
        generation = next;
        generations += 1;
    }

    debug!(
        "found {} prime implicants in {} generations",
        primes.len(),
        generations
    );

    PrimeImplicants {
        primes: primes.into_values().collect(),
        generations,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use test_log::test;

    use super::*;
    use crate::generator::generate_terms;
    use crate::term::Category;

    fn primes_of(width: usize, minterms: &[u32], dont_cares: &[u32]) -> Vec<String> {
        let names: Vec<String> = (0..width).map(|i| format!("x{}", i)).collect();
        let entries: Vec<(String, Category)> = minterms
            .iter()
            .map(|&m| (Pattern::from_index(m, width).to_string(), Category::Minterm))
            .chain(
                dont_cares
                    .iter()
                    .map(|&d| (Pattern::from_index(d, width).to_string(), Category::DontCare)),
            )
            .collect();
        let list = generate_terms(&names, &entries).unwrap();
        prime_implicants(list.terms().iter().cloned())
            .patterns()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_single_merge() {
        assert_eq!(primes_of(4, &[1, 9], &[]), vec!["-001"]);
    }

    #[test]
    fn test_tautology() {
        assert_eq!(primes_of(2, &[0, 1, 2, 3], &[]), vec!["--"]);
    }

    #[test]
    fn test_tautology_with_dont_cares() {
        assert_eq!(primes_of(3, &[0, 7], &[1, 2, 3, 4, 5, 6]), vec!["---"]);
    }

    #[test]
    fn test_empty() {
        let primes = prime_implicants(Vec::new());
        assert!(primes.is_empty());
        assert_eq!(primes.generations(), 0);
    }

    #[test]
    fn test_no_merges_possible() {
        // XOR: no adjacent minterms
        assert_eq!(primes_of(2, &[1, 2], &[]), vec!["01", "10"]);
    }

    #[test]
    fn test_classic_textbook_function() {
        // f(A,B,C,D) = sum m(4,8,10,11,12,15) + d(9,14)
        let primes = primes_of(4, &[4, 8, 10, 11, 12, 15], &[9, 14]);
        assert_eq!(primes, vec!["10--", "1-1-", "1--0", "-100"]);
    }

    #[test]
    fn test_cyclic_function_primes() {
        // f = sum m(0,1,2,5,6,7): every prime covers two minterms
        let primes = primes_of(3, &[0, 1, 2, 5, 6, 7], &[]);
        assert_eq!(primes, vec!["00-", "0-0", "11-", "1-1", "-01", "-10"]);
    }

    #[test]
    fn test_coverage_tracks_true_minterms_only() {
        let list = generate_terms(
            &["a", "b"],
            &[("00", Category::Minterm), ("01", Category::DontCare)],
        )
        .unwrap();
        let primes = prime_implicants(list.terms().iter().cloned());
        assert_eq!(primes.len(), 1);
        let prime = &primes.as_slice()[0];
        assert_eq!(prime.pattern().to_string(), "0-");
        assert_eq!(prime.covered_minterms(), &BTreeSet::from([0]));
        assert!(prime.is_required());
    }

    #[test]
    fn test_dont_care_only_prime_is_not_required() {
        let list = generate_terms(
            &["a", "b"],
            &[("00", Category::Minterm), ("11", Category::DontCare)],
        )
        .unwrap();
        let primes = prime_implicants(list.terms().iter().cloned());
        let flags: Vec<(String, bool)> = primes
            .as_slice()
            .iter()
            .map(|t| (t.to_string(), t.is_required()))
            .collect();
        assert_eq!(
            flags,
            vec![("00".to_string(), true), ("11".to_string(), false)]
        );
    }

    #[test]
    fn test_fixpoint() {
        let list = generate_terms(
            &["a", "b", "c", "d"],
            &[
                ("0100", Category::Minterm),
                ("1000", Category::Minterm),
                ("1010", Category::Minterm),
                ("1011", Category::Minterm),
                ("1100", Category::Minterm),
                ("1111", Category::Minterm),
                ("1001", Category::DontCare),
                ("1110", Category::DontCare),
            ],
        )
        .unwrap();
        let first = prime_implicants(list.terms().iter().cloned());
        let second = prime_implicants(first.as_slice().iter().cloned());
        assert_eq!(first.as_slice(), second.as_slice());
        assert_eq!(second.generations(), 1);
    }

    #[test]
    fn test_generation_count() {
        let list = generate_terms(
            &["a", "b"],
            &[
                ("00", Category::Minterm),
                ("01", Category::Minterm),
                ("10", Category::Minterm),
                ("11", Category::Minterm),
            ],
        )
        .unwrap();
        // 4 singletons -> 4 pairs -> 1 quad -> empty
        assert_eq!(prime_implicants(list.terms().iter().cloned()).generations(), 3);
    }
}
