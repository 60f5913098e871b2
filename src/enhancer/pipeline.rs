//! Enhancement pipeline driving the contrast stages end-to-end.
//!
//! [`ContrastEnhancer`] takes a single-channel image, builds its pair graph,
//! accumulates edge votes per intensity, turns them into per-level curves,
//! averages those over the dark/mid/bright regions, blends the regions into
//! one curve and remaps the channel through it.
//!
//! Typical usage:
//! ```no_run
//! use contrast_division::{ContrastEnhancer, EnhanceParams};
//! use contrast_division::image::ImageU8;
//!
//! # fn example(gray: ImageU8) -> Result<(), contrast_division::EnhanceError> {
//! let enhancer = ContrastEnhancer::new(EnhanceParams::default());
//! let enhanced = enhancer.enhance_with_diagnostics(&gray)?;
//! println!("edge pairs: {}", enhanced.report.evidence.edge_pairs);
//! # Ok(())
//! # }
//! ```
use super::params::EnhanceParams;
use super::EnhanceError;
use crate::color::{replace_value, value_channel};
use crate::contrast::pairs::validate_channel;
use crate::contrast::{
    apply_curve, blend_regions, IntensityBuckets, LevelCurves, PairGraph, Region, RegionBounds,
    RegionCurves, TransformCurve,
};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    CurveSink, EnhancementReport, EvidenceStage, InputDescriptor, RegionStage, TimingBreakdown,
};
use crate::image::{GrayImageU8, ImageU8, ImageView, RgbImageU8};
use log::{debug, warn};
use std::time::Instant;

/// Output channel together with the diagnostics of the call.
#[derive(Clone, Debug)]
pub struct Enhanced {
    pub image: GrayImageU8,
    pub report: EnhancementReport,
}

/// Colour output together with the diagnostics of its value channel.
#[derive(Clone, Debug)]
pub struct EnhancedRgb {
    pub image: RgbImageU8,
    pub report: EnhancementReport,
}

/// Final curve plus the stage reports that produced it.
struct CurveOutcome {
    curve: TransformCurve,
    input: InputDescriptor,
    evidence: EvidenceStage,
    regions: Option<RegionStage>,
}

/// Stateless driver; every call owns its intermediate structures.
#[derive(Clone, Debug, Default)]
pub struct ContrastEnhancer {
    params: EnhanceParams,
}

impl ContrastEnhancer {
    /// Create an enhancer. Parameters are validated on every call.
    pub fn new(params: EnhanceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EnhanceParams {
        &self.params
    }

    /// Compute the final transform curve without remapping the image.
    pub fn transform_curve(&self, gray: &ImageU8) -> Result<TransformCurve, EnhanceError> {
        let mut timings = TimingBreakdown::default();
        self.compute_curve(gray, &mut timings).map(|o| o.curve)
    }

    /// Enhance a single-channel image.
    pub fn enhance(&self, gray: &ImageU8) -> Result<GrayImageU8, EnhanceError> {
        self.run(gray, None).map(|e| e.image)
    }

    /// Enhance and return the per-stage report.
    pub fn enhance_with_diagnostics(&self, gray: &ImageU8) -> Result<Enhanced, EnhanceError> {
        self.run(gray, None)
    }

    /// Enhance and hand the final curve to `sink` before remapping.
    ///
    /// A failing sink is logged and otherwise ignored.
    pub fn enhance_with_sink(
        &self,
        gray: &ImageU8,
        sink: &mut dyn CurveSink,
    ) -> Result<Enhanced, EnhanceError> {
        self.run(gray, Some(sink))
    }

    /// Enhance the value channel of an RGB image, keeping hue and saturation.
    pub fn enhance_rgb(&self, rgb: &RgbImageU8) -> Result<RgbImageU8, EnhanceError> {
        self.enhance_rgb_with_sink(rgb, None).map(|e| e.image)
    }

    pub fn enhance_rgb_with_sink(
        &self,
        rgb: &RgbImageU8,
        sink: Option<&mut dyn CurveSink>,
    ) -> Result<EnhancedRgb, EnhanceError> {
        let value = value_channel(rgb);
        let Enhanced { image, report } = self.run(&value.as_view(), sink)?;
        let image = replace_value(rgb, &value, &image)?;
        Ok(EnhancedRgb { image, report })
    }

    fn run(
        &self,
        gray: &ImageU8,
        sink: Option<&mut dyn CurveSink>,
    ) -> Result<Enhanced, EnhanceError> {
        debug!(
            "ContrastEnhancer::run start w={} h={} threshold={}",
            gray.w, gray.h, self.params.threshold
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let outcome = self.compute_curve(gray, &mut timings)?;

        if let Some(sink) = sink {
            if let Err(err) = sink.accept(&outcome.curve) {
                warn!("ContrastEnhancer::run curve sink failed: {err}");
            }
        }

        let image = timings.time("apply", || apply_curve(gray, &outcome.curve))?;
        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "ContrastEnhancer::run done edges={} total_ms={:.3}",
            outcome.evidence.edge_pairs, timings.total_ms
        );

        let report = EnhancementReport {
            input: outcome.input,
            evidence: outcome.evidence,
            regions: outcome.regions,
            curve_monotonic: outcome.curve.is_non_decreasing(),
            curve: outcome.curve,
            timings,
        };
        Ok(Enhanced { image, report })
    }

    fn compute_curve(
        &self,
        gray: &ImageU8,
        timings: &mut TimingBreakdown,
    ) -> Result<CurveOutcome, EnhanceError> {
        self.params.validate()?;
        validate_channel(gray)?;

        let max_intensity = gray
            .rows()
            .map(|row| row.iter().copied().max().unwrap_or(0))
            .max()
            .unwrap_or(0);
        let input = InputDescriptor {
            width: gray.w,
            height: gray.h,
            max_intensity,
        };

        let graph = timings.time("pairs", || PairGraph::build(gray))?;
        let threshold = self.params.threshold;
        let buckets = timings.time("votes", || IntensityBuckets::accumulate(&graph, threshold));
        let evidence = EvidenceStage {
            threshold,
            pairs_total: graph.pairs().len(),
            edge_pairs: buckets.edge_pair_count(),
            occupied_levels: buckets.occupied_levels().count(),
        };
        debug!(
            "ContrastEnhancer pairs={} edges={} occupied_levels={}",
            evidence.pairs_total, evidence.edge_pairs, evidence.occupied_levels
        );

        if buckets.is_empty() {
            debug!("ContrastEnhancer no edge pairs -> identity curve");
            return Ok(CurveOutcome {
                curve: TransformCurve::identity(),
                input,
                evidence,
                regions: None,
            });
        }

        let levels = timings.time("level_curves", || LevelCurves::build(&graph, &buckets))?;
        drop(buckets);
        drop(graph);

        let region_start = Instant::now();
        let bounds = RegionBounds::from_fractions(max_intensity, self.params.region_bounds);
        let regions = RegionCurves::average(&levels, &bounds);
        let curve = blend_regions(&regions, self.params.sigmas, self.params.blend_weight);
        timings.push("regions", elapsed_ms(region_start));

        let identity_fallback = Region::ALL.map(|r| regions.used_fallback(r));
        debug!(
            "ContrastEnhancer bounds={}/{} contributing={:?} fallback={:?}",
            bounds.lower, bounds.upper, regions.contributing, identity_fallback
        );

        Ok(CurveOutcome {
            curve,
            input,
            evidence,
            regions: Some(RegionStage {
                bounds,
                contributing: regions.contributing,
                identity_fallback,
                sigmas: self.params.sigmas,
                blend_weight: self.params.blend_weight,
            }),
        })
    }
}
