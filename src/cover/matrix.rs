//! Coverage matrix between prime implicants and required minterms

use std::collections::{BTreeMap, BTreeSet};

use log::error;

use super::error::CoverageError;
use crate::term::{Pattern, Term};

/// Required minterm -> rows (indices into the prime implicant slice) covering it
///
/// Only required minterms get a column; don't-cares never anchor an
/// essential implicant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CoverageMatrix {
    columns: BTreeMap<u32, BTreeSet<usize>>,
}

impl CoverageMatrix {
    /// Build the matrix, failing if some required minterm has no covering row
    pub(crate) fn build(primes: &[Term], required: &BTreeSet<u32>) -> Result<Self, CoverageError> {
        let mut columns: BTreeMap<u32, BTreeSet<usize>> =
            required.iter().map(|&m| (m, BTreeSet::new())).collect();
        for (row, prime) in primes.iter().enumerate() {
            for minterm in prime.covered_minterms() {
                if let Some(rows) = columns.get_mut(minterm) {
                    rows.insert(row);
                }
            }
        }
        let matrix = CoverageMatrix { columns };

        if let Some((&minterm, _)) = matrix.columns.iter().find(|(_, rows)| rows.is_empty()) {
            let err = CoverageError {
                minterm,
                matrix: matrix.snapshot(primes),
            };
            error!("{}\n{}", err, err.matrix_dump());
            return Err(err);
        }
        Ok(matrix)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }

    /// Uncovered minterms, ascending
    pub(crate) fn minterms(&self) -> impl Iterator<Item = u32> + '_ {
        self.columns.keys().copied()
    }

    pub(crate) fn rows_covering(&self, minterm: u32) -> Option<&BTreeSet<usize>> {
        self.columns.get(&minterm)
    }

    /// The lowest minterm covered by exactly one row, with that row
    pub(crate) fn next_essential(&self) -> Option<(u32, usize)> {
        self.columns.iter().find_map(|(&minterm, rows)| {
            if rows.len() == 1 {
                rows.first().map(|&row| (minterm, row))
            } else {
                None
            }
        })
    }

    /// Number of remaining columns each row covers
    pub(crate) fn row_weights(&self) -> BTreeMap<usize, usize> {
        let mut weights = BTreeMap::new();
        for rows in self.columns.values() {
            for &row in rows {
                *weights.entry(row).or_insert(0) += 1;
            }
        }
        weights
    }

    /// Drop every column the given prime covers
    ///
    /// Returns the minterms that were removed.
    pub(crate) fn remove_covered_by(&mut self, prime: &Term) -> Vec<u32> {
        let mut removed = Vec::new();
        for minterm in prime.covered_minterms() {
            if self.columns.remove(minterm).is_some() {
                removed.push(*minterm);
            }
        }
        removed
    }

    pub(crate) fn snapshot(&self, primes: &[Term]) -> Vec<(u32, Vec<Pattern>)> {
        self.columns
            .iter()
            .map(|(&minterm, rows)| {
                let patterns = rows
                    .iter()
                    .map(|&row| primes[row].pattern().clone())
                    .collect();
                (minterm, patterns)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::prime_implicants;
    use crate::term::Category;

    fn primes(width: usize, minterms: &[u32]) -> Vec<Term> {
        prime_implicants(
            minterms
                .iter()
                .map(|&m| Term::from_row(m, width, Category::Minterm)),
        )
        .into_vec()
    }

    #[test]
    fn test_build_columns() {
        let primes = primes(4, &[1, 9]);
        let matrix = CoverageMatrix::build(&primes, &BTreeSet::from([1, 9])).unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.rows_covering(9), Some(&BTreeSet::from([0])));
        assert_eq!(matrix.next_essential(), Some((1, 0)));
    }

    #[test]
    fn test_missing_minterm_is_coverage_error() {
        let primes = primes(3, &[0, 1]);
        let err = CoverageMatrix::build(&primes, &BTreeSet::from([0, 1, 6])).unwrap_err();
        assert_eq!(err.minterm, 6);
        assert_eq!(err.matrix.len(), 3);
        assert_eq!(err.matrix[2], (6, vec![]));
    }

    #[test]
    fn test_remove_and_weights() {
        // 000, 001, 011 -> primes 00-, 0-1
        let primes = primes(3, &[0, 1, 3]);
        let mut matrix = CoverageMatrix::build(&primes, &BTreeSet::from([0, 1, 3])).unwrap();
        let weights = matrix.row_weights();
        assert_eq!(weights.values().sum::<usize>(), 4);
        let removed = matrix.remove_covered_by(&primes[0]);
        assert_eq!(removed, vec![0, 1]);
        assert_eq!(matrix.minterms().collect::<Vec<_>>(), vec![3]);
    }
}
