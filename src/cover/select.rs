//! Cover selection: essential extraction followed by greedy or exact reduction

use std::collections::BTreeSet;

use log::{debug, trace};

use super::error::CoverageError;
use super::matrix::CoverageMatrix;
use crate::term::Term;
use crate::CoverStrategy;

/// Why a prime implicant was put in the cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// Sole coverer of some required minterm
    Essential,
    /// Picked by the greedy reduction step
    Greedy,
    /// Part of the exhaustive minimum cover of the remainder
    Exact,
}

/// Rows of the prime implicant slice chosen for the cover, in selection order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Selection {
    pub(crate) rows: Vec<(usize, SelectionReason)>,
}

impl Selection {
    fn push(&mut self, row: usize, reason: SelectionReason) {
        self.rows.push((row, reason));
    }

    pub(crate) fn count(&self, reason: SelectionReason) -> usize {
        self.rows.iter().filter(|(_, r)| *r == reason).count()
    }
}

/// Select a cover of `required` from `primes`
///
/// `primes` must be ordered by pattern; row index order is then the
/// tie-break order.
pub(crate) fn select(
    primes: &[Term],
    required: &BTreeSet<u32>,
    strategy: CoverStrategy,
) -> Result<Selection, CoverageError> {
    let mut matrix = CoverageMatrix::build(primes, required)?;
    let mut selection = Selection::default();

    while let Some((minterm, row)) = matrix.next_essential() {
        let removed = matrix.remove_covered_by(&primes[row]);
        debug!(
            "essential {} (sole coverer of {}), covers {:?}",
            primes[row].pattern(),
            minterm,
            removed
        );
        selection.push(row, SelectionReason::Essential);
    }

    if matrix.is_empty() {
        return Ok(selection);
    }
    debug!(
        "{} minterms left after essential extraction: {:?}",
        matrix.len(),
        matrix.minterms().collect::<Vec<_>>()
    );

    match strategy {
        CoverStrategy::Greedy => greedy(primes, &mut matrix, &mut selection),
        CoverStrategy::Exact => exact(primes, &matrix, &mut selection),
    }
    Ok(selection)
}

/// Repeatedly take the row covering most remaining columns, lowest row on ties
fn greedy(primes: &[Term], matrix: &mut CoverageMatrix, selection: &mut Selection) {
    while !matrix.is_empty() {
        let weights = matrix.row_weights();
        let mut best: Option<(usize, usize)> = None;
        for (&row, &weight) in &weights {
            if best.map_or(true, |(_, w)| weight > w) {
                best = Some((row, weight));
            }
        }
        // Every column has at least one row, so a non-empty matrix has a best row
        let Some((row, weight)) = best else {
            break;
        };
        matrix.remove_covered_by(&primes[row]);
        debug!("greedy pick {} covering {} minterms", primes[row].pattern(), weight);
        selection.push(row, SelectionReason::Greedy);
    }
}

/// Cost of a candidate cover: fewer implicants, then fewer literals, then
/// lexicographically lowest rows
fn cost(primes: &[Term], rows: &[usize]) -> (usize, usize, Vec<usize>) {
    let literals = rows.iter().map(|&r| primes[r].pattern().literal_count()).sum();
    let mut sorted = rows.to_vec();
    sorted.sort_unstable();
    (rows.len(), literals, sorted)
}

/// Branch and bound over the remaining columns
///
/// Exponential in the number of remaining columns.
fn exact(primes: &[Term], matrix: &CoverageMatrix, selection: &mut Selection) {
    let mut best: Option<Vec<usize>> = None;
    let mut chosen = Vec::new();
    let mut nodes = 0usize;
    search(primes, matrix, &mut chosen, &mut best, &mut nodes);
    debug!("exact search visited {} nodes", nodes);

    let mut rows = best.unwrap_or_default();
    rows.sort_unstable();
    for row in rows {
        debug!("exact pick {}", primes[row].pattern());
        selection.push(row, SelectionReason::Exact);
    }
}

fn search(
    primes: &[Term],
    matrix: &CoverageMatrix,
    chosen: &mut Vec<usize>,
    best: &mut Option<Vec<usize>>,
    nodes: &mut usize,
) {
    *nodes += 1;
    if matrix.is_empty() {
        let better = match best {
            Some(current) => cost(primes, chosen) < cost(primes, current),
            None => true,
        };
        if better {
            trace!("new best cover {:?}", chosen);
            *best = Some(chosen.clone());
        }
        return;
    }
    // At least one more row is needed
    if let Some(current) = best {
        if chosen.len() + 1 > current.len() {
            return;
        }
    }

    // Branch on the most constrained column
    let Some(column) = matrix
        .minterms()
        .min_by_key(|&m| matrix.rows_covering(m).map_or(usize::MAX, |rows| rows.len()))
    else {
        return;
    };
    let candidates: Vec<usize> = matrix
        .rows_covering(column)
        .map(|rows| rows.iter().copied().collect())
        .unwrap_or_default();

    for row in candidates {
        let mut reduced = matrix.clone();
        reduced.remove_covered_by(&primes[row]);
        chosen.push(row);
        search(primes, &reduced, chosen, best, nodes);
        chosen.pop();
    }
}
