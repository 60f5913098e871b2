//! Parameters of the enhancement pipeline.
//!
//! Defaults: threshold 10, blend weight 0.8,
//! sigmas `[3, 1, 0.5]` and region fractions `[1/3, 2/3]`. Larger blend
//! weights give brighter, stronger results; the remainder comes from the
//! identity curve.

use super::EnhanceError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceParams {
    /// Minimum `high - low` span for a neighbour pair to count as an edge.
    pub threshold: u32,
    /// Share of the computed curve in the final curve, in `[0, 1]`.
    pub blend_weight: f32,
    /// Widths of the dark, mid and bright weight bumps.
    pub sigmas: [f32; 3],
    /// Region cut points as fractions of the observed maximum intensity.
    pub region_bounds: [f32; 2],
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            threshold: 10,
            blend_weight: 0.8,
            sigmas: [3.0, 1.0, 0.5],
            region_bounds: [1.0 / 3.0, 2.0 / 3.0],
        }
    }
}

impl EnhanceParams {
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_blend_weight(mut self, blend_weight: f32) -> Self {
        self.blend_weight = blend_weight;
        self
    }

    pub fn with_sigmas(mut self, sigmas: [f32; 3]) -> Self {
        self.sigmas = sigmas;
        self
    }

    pub fn with_region_bounds(mut self, region_bounds: [f32; 2]) -> Self {
        self.region_bounds = region_bounds;
        self
    }

    /// Reject configurations that would produce NaNs or empty regions.
    pub fn validate(&self) -> Result<(), EnhanceError> {
        if !(0.0..=1.0).contains(&self.blend_weight) {
            return Err(EnhanceError::InvalidParameter {
                name: "blend_weight",
                value: self.blend_weight,
            });
        }
        const SIGMA_NAMES: [&str; 3] = ["sigmas[dark]", "sigmas[mid]", "sigmas[bright]"];
        for (name, sigma) in SIGMA_NAMES.into_iter().zip(self.sigmas) {
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(EnhanceError::InvalidParameter { name, value: sigma });
            }
        }
        let [lower, upper] = self.region_bounds;
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(lower) || !in_unit(upper) || lower > upper {
            return Err(EnhanceError::DegenerateRegion { lower, upper });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EnhanceParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let p = EnhanceParams::default().with_region_bounds([0.7, 0.3]);
        assert_eq!(
            p.validate(),
            Err(EnhanceError::DegenerateRegion {
                lower: 0.7,
                upper: 0.3
            })
        );
        let p = EnhanceParams::default().with_region_bounds([0.2, 1.5]);
        assert!(matches!(
            p.validate(),
            Err(EnhanceError::DegenerateRegion { .. })
        ));
    }

    #[test]
    fn rejects_bad_scalars() {
        let p = EnhanceParams::default().with_blend_weight(1.2);
        assert!(matches!(
            p.validate(),
            Err(EnhanceError::InvalidParameter {
                name: "blend_weight",
                ..
            })
        ));
        let p = EnhanceParams::default().with_sigmas([3.0, 0.0, 0.5]);
        assert!(matches!(
            p.validate(),
            Err(EnhanceError::InvalidParameter {
                name: "sigmas[mid]",
                ..
            })
        ));
        let p = EnhanceParams::default().with_sigmas([f32::NAN, 1.0, 0.5]);
        assert!(p.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p: EnhanceParams = serde_json::from_str(r#"{ "threshold": 4 }"#).unwrap();
        assert_eq!(p.threshold, 4);
        assert_eq!(p.sigmas, [3.0, 1.0, 0.5]);
        assert_eq!(p.blend_weight, 0.8);
    }
}
