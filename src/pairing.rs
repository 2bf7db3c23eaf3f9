//! Canonical sample-pair enumeration.
//!
//! The distance backend emits one row per pair and the graph code consumes
//! assignment streams in lockstep, so both sides share this one definition
//! of pair order. Any disagreement would silently miswire every edge.

use super::*;

/// Pairs of one list against itself, row-major over the upper triangle,
/// optionally including the diagonal.
pub fn self_pairs(n: usize, diagonal: bool) -> impl Iterator<Item = (usize, usize)> {
    let skip = usize::from(!diagonal);
    (0..n).flat_map(move |i| (i + skip..n).map(move |j| (i, j)))
}

/// Every (reference, query) pair, grouped by query.
pub fn cross_pairs(refs: usize, queries: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..queries).flat_map(move |q| (0..refs).map(move |r| (r, q)))
}

/// Number of pairs yielded by [`self_pairs`].
pub const fn self_pair_count(n: usize, diagonal: bool) -> usize {
    match (n, diagonal) {
        (0, _) => 0,
        (n, true) => n * (n + 1) / 2,
        (n, false) => n * (n - 1) / 2,
    }
}

/// Number of pairs yielded by [`cross_pairs`].
pub const fn cross_pair_count(refs: usize, queries: usize) -> usize {
    refs * queries
}

/// Whether a stream over `n` samples includes the diagonal, inferred from
/// its length. Any other length is a miswired stream.
pub fn includes_diagonal(samples: usize, assignments: usize) -> Result<bool> {
    if assignments == self_pair_count(samples, true) {
        Ok(true)
    } else if assignments == self_pair_count(samples, false) {
        Ok(false)
    } else {
        Err(Error::Assignments {
            pairs: self_pair_count(samples, false),
            found: assignments,
        })
    }
}
