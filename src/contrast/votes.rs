//! Per-intensity buckets of edge pairs.
//!
//! A pair votes for both of its endpoint levels when its span reaches the
//! contrast threshold. Levels taking part in many strong local contrasts end
//! up with large buckets, which later widens their share of the tone curve.
use super::pairs::{ContrastPair, PairGraph, PairId};
use crate::types::{VoteVector, LEVELS};

/// `true` when the pair spans at least `threshold` levels.
///
/// A zero-span pair never qualifies, including at `threshold == 0`.
#[inline]
pub fn is_edge_pair(pair: &ContrastPair, threshold: u32) -> bool {
    pair.span() > 0 && pair.span() >= threshold
}

/// Edge-pair ids grouped by the intensity levels they touch.
#[derive(Clone, Debug)]
pub struct IntensityBuckets {
    buckets: Vec<Vec<PairId>>,
    edge_pairs: usize,
}

impl IntensityBuckets {
    /// Collect every edge pair of `graph` into `bucket[low]` and `bucket[high]`.
    pub fn accumulate(graph: &PairGraph, threshold: u32) -> Self {
        let mut buckets = vec![Vec::new(); LEVELS];
        let mut edge_pairs = 0usize;
        for (i, pair) in graph.pairs().iter().enumerate() {
            if !is_edge_pair(pair, threshold) {
                continue;
            }
            let id = PairId::from_index(i);
            buckets[pair.low() as usize].push(id);
            buckets[pair.high() as usize].push(id);
            edge_pairs += 1;
        }
        Self {
            buckets,
            edge_pairs,
        }
    }

    #[inline]
    pub fn bucket(&self, level: u8) -> &[PairId] {
        &self.buckets[level as usize]
    }

    /// Number of distinct edge pairs (each sits in two buckets).
    pub fn edge_pair_count(&self) -> usize {
        self.edge_pairs
    }

    /// Levels with at least one edge pair, ascending.
    pub fn occupied_levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .map(|(k, _)| k as u8)
    }

    pub fn is_empty(&self) -> bool {
        self.edge_pairs == 0
    }
}

/// Sum of the coverage vectors of `ids`.
///
/// Accumulated through a difference array so each pair costs O(1) instead of
/// one pass over all levels; the result equals the explicit coverage sum.
pub fn vote_vector(graph: &PairGraph, ids: &[PairId]) -> VoteVector {
    let mut delta = [0i64; LEVELS + 1];
    for &id in ids {
        let pair = graph.pair(id);
        delta[pair.low() as usize] += 1;
        delta[pair.high() as usize + 1] -= 1;
    }
    let mut votes = VoteVector::zeros();
    let mut running = 0i64;
    for (k, d) in delta.iter().take(LEVELS).enumerate() {
        running += d;
        votes[k] = running as u64;
    }
    votes
}
