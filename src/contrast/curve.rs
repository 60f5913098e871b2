//! Monotonic transform curves over the 256 intensity levels.
use super::pairs::{PairGraph, PairId};
use super::votes::{vote_vector, IntensityBuckets};
use crate::enhancer::EnhanceError;
use crate::types::{normalized, VoteVector, LEVELS, MAX_INTENSITY};
use nalgebra::SVector;
use serde::Serialize;

/// Lookup curve mapping level `k` to a normalised output in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransformCurve(SVector<f32, LEVELS>);

impl TransformCurve {
    /// `curve[k] = k / 255`.
    pub fn identity() -> Self {
        Self(SVector::from_fn(|k, _| normalized(k)))
    }

    pub fn from_values(values: SVector<f32, LEVELS>) -> Self {
        Self(values)
    }

    /// Normalised cumulative distribution of a vote vector.
    ///
    /// Fails with `EmptyEvidence` when the votes sum to zero.
    pub fn from_votes(votes: &VoteVector) -> Result<Self, EnhanceError> {
        let total: u64 = votes.iter().sum();
        if total == 0 {
            return Err(EnhanceError::EmptyEvidence { level: None });
        }
        let total = total as f64;
        let mut running = 0u64;
        let mut out = SVector::<f32, LEVELS>::zeros();
        for (k, &v) in votes.iter().enumerate() {
            running += v;
            out[k] = (running as f64 / total) as f32;
        }
        Ok(Self(out))
    }

    /// Curve of a single intensity bucket.
    pub fn from_pairs(graph: &PairGraph, ids: &[PairId]) -> Result<Self, EnhanceError> {
        if ids.is_empty() {
            return Err(EnhanceError::EmptyEvidence { level: None });
        }
        Self::from_votes(&vote_vector(graph, ids))
    }

    #[inline]
    pub fn get(&self, level: u8) -> f32 {
        self.0[level as usize]
    }

    pub fn values(&self) -> &SVector<f32, LEVELS> {
        &self.0
    }

    pub fn as_slice(&self) -> &[f32] {
        self.0.as_slice()
    }

    pub fn is_non_decreasing(&self) -> bool {
        self.as_slice().windows(2).all(|w| w[0] <= w[1])
    }

    /// Output level for each input level: `round(curve[k] * 255)`.
    pub fn to_lut(&self) -> [u8; LEVELS] {
        let mut lut = [0u8; LEVELS];
        for (dst, &v) in lut.iter_mut().zip(self.as_slice()) {
            *dst = (v * MAX_INTENSITY as f32)
                .round()
                .clamp(0.0, MAX_INTENSITY as f32) as u8;
        }
        lut
    }
}

/// Per-level curves for every occupied intensity bucket.
#[derive(Clone, Debug, Default)]
pub struct LevelCurves {
    entries: Vec<(u8, TransformCurve)>,
}

impl LevelCurves {
    pub fn new(entries: Vec<(u8, TransformCurve)>) -> Self {
        Self { entries }
    }

    /// One curve per occupied bucket; empty buckets are skipped.
    pub fn build(graph: &PairGraph, buckets: &IntensityBuckets) -> Result<Self, EnhanceError> {
        let levels: Vec<u8> = buckets.occupied_levels().collect();
        let entries = level_curves(graph, buckets, &levels)?;
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u8, TransformCurve)> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, level: u8) -> Option<&TransformCurve> {
        self.entries
            .iter()
            .find(|(k, _)| *k == level)
            .map(|(_, c)| c)
    }
}

fn level_curve(
    graph: &PairGraph,
    buckets: &IntensityBuckets,
    level: u8,
) -> Result<(u8, TransformCurve), EnhanceError> {
    TransformCurve::from_pairs(graph, buckets.bucket(level))
        .map(|curve| (level, curve))
        .map_err(|_| EnhanceError::EmptyEvidence { level: Some(level) })
}

#[cfg(not(feature = "parallel"))]
fn level_curves(
    graph: &PairGraph,
    buckets: &IntensityBuckets,
    levels: &[u8],
) -> Result<Vec<(u8, TransformCurve)>, EnhanceError> {
    levels
        .iter()
        .map(|&level| level_curve(graph, buckets, level))
        .collect()
}

#[cfg(feature = "parallel")]
fn level_curves(
    graph: &PairGraph,
    buckets: &IntensityBuckets,
    levels: &[u8],
) -> Result<Vec<(u8, TransformCurve)>, EnhanceError> {
    use rayon::prelude::*;

    levels
        .par_iter()
        .map(|&level| level_curve(graph, buckets, level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageU8;

    #[test]
    fn identity_lut_is_identity() {
        let lut = TransformCurve::identity().to_lut();
        for (k, &v) in lut.iter().enumerate() {
            assert_eq!(v as usize, k);
        }
    }

    #[test]
    fn empty_votes_are_rejected() {
        assert_eq!(
            TransformCurve::from_votes(&VoteVector::zeros()),
            Err(EnhanceError::EmptyEvidence { level: None })
        );
    }

    #[test]
    fn full_span_pairs_give_linear_ramp() {
        let data = [0u8, 255, 255, 0];
        let graph = PairGraph::build(&ImageU8::gray(2, 2, &data)).unwrap();
        let buckets = IntensityBuckets::accumulate(&graph, 10);
        for level in [0u8, 255] {
            let curve = TransformCurve::from_pairs(&graph, buckets.bucket(level)).unwrap();
            for k in 0..LEVELS {
                let expected = (k + 1) as f32 / 256.0;
                assert!(
                    (curve.get(k as u8) - expected).abs() < 1e-6,
                    "level {level} k={k}: {} vs {expected}",
                    curve.get(k as u8)
                );
            }
        }
    }

    #[test]
    fn level_curves_cover_only_occupied_buckets() {
        let data = [10u8, 10, 60, 60, 10, 10, 60, 60];
        let graph = PairGraph::build(&ImageU8::gray(4, 2, &data)).unwrap();
        let buckets = IntensityBuckets::accumulate(&graph, 10);
        let levels = LevelCurves::build(&graph, &buckets).unwrap();
        assert_eq!(levels.len(), 2);
        assert!(levels.get(10).is_some());
        assert!(levels.get(60).is_some());
        assert!(levels.get(11).is_none());
        let c = levels.get(10).unwrap();
        assert_eq!(c.get(9), 0.0);
        let ramp_step = 1.0 / 51.0;
        assert!((c.get(10) - ramp_step).abs() < 1e-6);
    }

    #[test]
    fn curves_are_monotonic_and_end_at_one() {
        let data: Vec<u8> = (0..100).map(|i| ((i * i * 7) % 256) as u8).collect();
        let graph = PairGraph::build(&ImageU8::gray(10, 10, &data)).unwrap();
        let buckets = IntensityBuckets::accumulate(&graph, 10);
        for level in buckets.occupied_levels() {
            let c = TransformCurve::from_pairs(&graph, buckets.bucket(level)).unwrap();
            assert!(c.is_non_decreasing());
            assert!(c.get(0) >= 0.0);
            assert!((c.get(255) - 1.0).abs() < 1e-6);
        }
    }
}
