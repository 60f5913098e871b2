use super::TimingBreakdown;
use crate::contrast::{RegionBounds, TransformCurve};
use serde::Serialize;

/// Shape of the channel handed to the enhancer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub max_intensity: u8,
}

/// Pair graph and vote statistics.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceStage {
    pub threshold: u32,
    pub pairs_total: usize,
    pub edge_pairs: usize,
    /// Levels whose bucket holds at least one edge pair.
    pub occupied_levels: usize,
}

/// Region partition and how many level curves fed each average.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStage {
    pub bounds: RegionBounds,
    pub contributing: [usize; 3],
    /// `true` where the region had no evidence and used the identity curve.
    pub identity_fallback: [bool; 3],
    pub sigmas: [f32; 3],
    pub blend_weight: f32,
}

/// Everything an enhancement call computed besides the output pixels.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementReport {
    pub input: InputDescriptor,
    pub evidence: EvidenceStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<RegionStage>,
    pub curve: TransformCurve,
    pub curve_monotonic: bool,
    pub timings: TimingBreakdown,
}

impl EnhancementReport {
    /// Short human-readable summary used by the CLI.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "input: {}x{} (max intensity {})",
                self.input.width, self.input.height, self.input.max_intensity
            ),
            format!(
                "pairs: {} total, {} edges (threshold {}), {} occupied levels",
                self.evidence.pairs_total,
                self.evidence.edge_pairs,
                self.evidence.threshold,
                self.evidence.occupied_levels
            ),
        ];
        match &self.regions {
            Some(r) => lines.push(format!(
                "regions: bounds {}/{}, levels dark={} mid={} bright={}",
                r.bounds.lower,
                r.bounds.upper,
                r.contributing[0],
                r.contributing[1],
                r.contributing[2]
            )),
            None => lines.push("regions: no edge evidence, identity curve".to_string()),
        }
        lines.push(format!(
            "curve: monotonic={} total_ms={:.3}",
            self.curve_monotonic, self.timings.total_ms
        ));
        lines
    }
}
