mod common;

use common::init_logger;
use common::synthetic_image::{checkerboard_u8, ramp_u8, square_on_background_u8};
use contrast_division::contrast::pairs::expected_pair_count;
use contrast_division::contrast::{
    is_edge_pair, IntensityBuckets, LevelCurves, PairGraph, Region, RegionBounds, RegionCurves,
    TransformCurve,
};
use contrast_division::image::ImageU8;
use contrast_division::{ContrastEnhancer, EnhanceParams};

/// Deterministic pseudo-random texture.
fn noise_u8(width: usize, height: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

#[test]
fn every_relation_is_stored_once() {
    init_logger();
    for (w, h) in [(1, 1), (1, 7), (7, 1), (5, 4), (33, 17)] {
        let buffer = noise_u8(w, h, 7);
        let graph = PairGraph::build(&ImageU8::gray(w, h, &buffer)).unwrap();
        assert_eq!(graph.pairs().len(), expected_pair_count(w, h), "{w}x{h}");
    }
}

#[test]
fn level_curves_are_cumulative_distributions() {
    init_logger();
    let buffer = noise_u8(40, 30, 99);
    let graph = PairGraph::build(&ImageU8::gray(40, 30, &buffer)).unwrap();
    let buckets = IntensityBuckets::accumulate(&graph, 10);
    let levels = LevelCurves::build(&graph, &buckets).unwrap();
    assert!(!levels.is_empty());
    for (level, curve) in levels.iter() {
        assert!(curve.is_non_decreasing(), "level {level}");
        assert!((curve.get(255) - 1.0).abs() < 1e-5, "level {level}");
        assert!(curve.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
        // The curve only rises inside spans of pairs touching this level.
        let lowest_low = buckets
            .bucket(*level)
            .iter()
            .map(|&id| graph.pair(id).low())
            .min()
            .unwrap();
        if lowest_low > 0 {
            assert_eq!(curve.get(lowest_low - 1), 0.0);
        }
    }
}

#[test]
fn buckets_only_hold_edge_pairs() {
    init_logger();
    let buffer = noise_u8(25, 25, 3);
    let graph = PairGraph::build(&ImageU8::gray(25, 25, &buffer)).unwrap();
    let threshold = 40;
    let buckets = IntensityBuckets::accumulate(&graph, threshold);
    for level in buckets.occupied_levels() {
        for &id in buckets.bucket(level) {
            let pair = graph.pair(id);
            assert!(is_edge_pair(pair, threshold));
            assert!(pair.low() == level || pair.high() == level);
        }
    }
    let expected = graph
        .pairs()
        .iter()
        .filter(|p| is_edge_pair(p, threshold))
        .count();
    assert_eq!(buckets.edge_pair_count(), expected);
}

#[test]
fn raising_the_threshold_never_adds_edges() {
    init_logger();
    let buffer = noise_u8(30, 20, 12345);
    let graph = PairGraph::build(&ImageU8::gray(30, 20, &buffer)).unwrap();
    let mut previous = usize::MAX;
    for threshold in [0, 1, 10, 50, 120, 255, 256] {
        let edges = IntensityBuckets::accumulate(&graph, threshold).edge_pair_count();
        assert!(edges <= previous, "threshold {threshold}");
        previous = edges;
    }
    assert_eq!(previous, 0);
}

#[test]
fn region_averages_respect_inclusive_bounds() {
    init_logger();
    let buffer = ramp_u8(64, 8, 0, 252);
    let graph = PairGraph::build(&ImageU8::gray(64, 8, &buffer)).unwrap();
    let buckets = IntensityBuckets::accumulate(&graph, 1);
    let levels = LevelCurves::build(&graph, &buckets).unwrap();
    let bounds = RegionBounds::from_fractions(252, [1.0 / 3.0, 2.0 / 3.0]);
    assert_eq!(bounds, RegionBounds { lower: 84, upper: 168 });

    let regions = RegionCurves::average(&levels, &bounds);
    let count = |pred: &dyn Fn(u8) -> bool| levels.iter().filter(|(k, _)| pred(*k)).count();
    assert_eq!(regions.contributing[0], count(&|k| k <= 84));
    assert_eq!(regions.contributing[1], count(&|k| (84..=168).contains(&k)));
    assert_eq!(regions.contributing[2], count(&|k| k >= 168));
}

fn region_curves_of(w: usize, h: usize, buffer: &[u8]) -> RegionCurves {
    let graph = PairGraph::build(&ImageU8::gray(w, h, buffer)).unwrap();
    let buckets = IntensityBuckets::accumulate(&graph, 10);
    let levels = LevelCurves::build(&graph, &buckets).unwrap();
    let max = buffer.iter().copied().max().unwrap();
    RegionCurves::average(&levels, &RegionBounds::from_fractions(max, [1.0 / 3.0, 2.0 / 3.0]))
}

#[test]
fn region_averages_are_cumulative_distributions() {
    init_logger();
    let regions = region_curves_of(40, 30, &noise_u8(40, 30, 77));
    for region in Region::ALL {
        assert!(!regions.used_fallback(region), "{region:?}");
        let curve = regions.curve(region);
        assert!(curve.is_non_decreasing(), "{region:?}");
        assert!(curve.get(0) >= 0.0, "{region:?}");
        assert!((curve.get(255) - 1.0).abs() < 1e-5, "{region:?}");
    }

    // Levels 100 and 140 of a max of 140 both sit above the upper bound 93.
    let regions = region_curves_of(32, 32, &square_on_background_u8(32, 32, 100, 140));
    assert_eq!(regions.contributing, [0, 0, 2]);
    for region in [Region::Dark, Region::Mid] {
        assert!(regions.used_fallback(region));
        assert_eq!(*regions.curve(region), TransformCurve::identity());
    }
    let bright = regions.curve(Region::Bright);
    assert!(bright.is_non_decreasing());
    assert!((bright.get(255) - 1.0).abs() < 1e-5);
}

#[test]
fn final_curve_stays_in_unit_range() {
    init_logger();
    let images = [
        (32, 32, noise_u8(32, 32, 5)),
        (48, 16, checkerboard_u8(48, 16, 3)),
        (40, 40, square_on_background_u8(40, 40, 10, 250)),
        (64, 4, ramp_u8(64, 4, 20, 90)),
    ];
    for sigmas in [[3.0, 1.0, 0.5], [0.05, 0.05, 0.05], [10.0, 10.0, 10.0]] {
        let enhancer = ContrastEnhancer::new(
            EnhanceParams::default()
                .with_sigmas(sigmas)
                .with_blend_weight(1.0),
        );
        for (w, h, buffer) in &images {
            let curve = enhancer
                .transform_curve(&ImageU8::gray(*w, *h, buffer))
                .unwrap();
            assert!(curve
                .as_slice()
                .iter()
                .all(|v| v.is_finite() && (0.0..=1.0).contains(v)));
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    init_logger();
    let buffer = noise_u8(97, 61, 2024);
    let image = ImageU8::gray(97, 61, &buffer);
    let enhancer = ContrastEnhancer::default();
    let first = enhancer.enhance_with_diagnostics(&image).unwrap();
    let second = enhancer.enhance_with_diagnostics(&image).unwrap();
    assert_eq!(first.image, second.image);
    assert_eq!(first.report.curve, second.report.curve);
    assert_eq!(
        first.report.evidence.edge_pairs,
        second.report.evidence.edge_pairs
    );
}
