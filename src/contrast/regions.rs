//! Dark / mid / bright decomposition and Gaussian-weighted recombination.
//!
//! Regions are inclusive level ranges derived from the observed maximum
//! intensity: dark `[0, lower]`, mid `[lower, upper]`, bright `[upper, 255]`.
//! A level equal to a boundary belongs to both neighbouring regions.
use super::curve::{LevelCurves, TransformCurve};
use crate::types::{normalized, LEVELS};
use nalgebra::SVector;
use serde::Serialize;

/// Added to the weight sum before dividing.
const WEIGHT_EPS: f64 = 1e-10;

/// Peak positions (normalised intensity) of the dark, mid and bright weights.
pub const REGION_CENTERS: [f64; 3] = [0.0, 0.5, 1.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    Dark,
    Mid,
    Bright,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Dark, Region::Mid, Region::Bright];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Absolute level boundaries of the three regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBounds {
    pub lower: u8,
    pub upper: u8,
}

impl RegionBounds {
    /// `floor(max_intensity * fraction)` for each fraction.
    ///
    /// Fractions are expected in `[0, 1]` with `fractions[0] <= fractions[1]`;
    /// validation happens in `EnhanceParams::validate`.
    pub fn from_fractions(max_intensity: u8, fractions: [f32; 2]) -> Self {
        let cut = |f: f32| (max_intensity as f32 * f).floor().clamp(0.0, 255.0) as u8;
        Self {
            lower: cut(fractions[0]),
            upper: cut(fractions[1]),
        }
    }

    #[inline]
    pub fn contains(&self, region: Region, level: u8) -> bool {
        match region {
            Region::Dark => level <= self.lower,
            Region::Mid => level >= self.lower && level <= self.upper,
            Region::Bright => level >= self.upper,
        }
    }
}

/// Averaged curve of each region plus how many levels fed it.
#[derive(Clone, Debug)]
pub struct RegionCurves {
    pub curves: [TransformCurve; 3],
    pub contributing: [usize; 3],
}

impl RegionCurves {
    /// Average the per-level curves falling into each region.
    ///
    /// A region without contributing levels uses the identity curve.
    pub fn average(levels: &LevelCurves, bounds: &RegionBounds) -> Self {
        let mut sums = [SVector::<f32, LEVELS>::zeros(); 3];
        let mut contributing = [0usize; 3];
        for (level, curve) in levels.iter() {
            for region in Region::ALL {
                if bounds.contains(region, *level) {
                    sums[region.index()] += curve.values();
                    contributing[region.index()] += 1;
                }
            }
        }
        let curves = [0, 1, 2].map(|r| {
            if contributing[r] == 0 {
                TransformCurve::identity()
            } else {
                TransformCurve::from_values(sums[r] / contributing[r] as f32)
            }
        });
        Self {
            curves,
            contributing,
        }
    }

    #[inline]
    pub fn curve(&self, region: Region) -> &TransformCurve {
        &self.curves[region.index()]
    }

    pub fn used_fallback(&self, region: Region) -> bool {
        self.contributing[region.index()] == 0
    }
}

/// Unnormalised bump peaking at 1.0 for `x == center`.
#[inline]
pub fn gaussian_weight(center: f64, sigma: f64, x: f64) -> f64 {
    let d = center - x;
    (-(d * d) / (sigma * sigma / 4.0)).exp()
}

/// Weight curves for the dark, mid and bright regions.
pub fn region_weights(sigmas: [f32; 3]) -> [SVector<f32, LEVELS>; 3] {
    [0, 1, 2].map(|r| {
        SVector::from_fn(|k, _| {
            gaussian_weight(REGION_CENTERS[r], sigmas[r] as f64, normalized(k) as f64) as f32
        })
    })
}

/// Recombine region curves and mix the result with the identity.
///
/// Cross terms all route through the mid and bright curves; the result is
/// clamped to `[0, 1]` but not forced to be monotonic.
pub fn blend_regions(regions: &RegionCurves, sigmas: [f32; 3], blend_weight: f32) -> TransformCurve {
    let [w0, w1, w2] = region_weights(sigmas);
    let [r0, r1, r2] = [
        regions.curve(Region::Dark),
        regions.curve(Region::Mid),
        regions.curve(Region::Bright),
    ];
    let out = SVector::<f32, LEVELS>::from_fn(|k, _| {
        let (a, b, c) = (w0[k], w1[k], w2[k]);
        let (d, m, br) = (r0.values()[k], r1.values()[k], r2.values()[k]);
        let numer = a * d + b * m + c * br + a * b * m / 3.0 + a * c * br / 3.0 + b * c * br / 3.0;
        let denom = (a + b + c) as f64 + WEIGHT_EPS;
        let blended = (numer as f64 / denom) as f32;
        let mixed = blend_weight * blended + (1.0 - blend_weight) * normalized(k);
        mixed.clamp(0.0, 1.0)
    });
    TransformCurve::from_values(out)
}
