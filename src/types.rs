use nalgebra::SVector;

/// 8-bit channel value.
pub type Intensity = u8;

pub const MAX_INTENSITY: Intensity = 255;

/// Number of representable intensity levels.
pub const LEVELS: usize = MAX_INTENSITY as usize + 1;

/// Per-level indicator vector of a single contrast pair.
pub type CoverageVector = SVector<u32, LEVELS>;

/// Per-level vote totals accumulated over a set of contrast pairs.
pub type VoteVector = SVector<u64, LEVELS>;

/// Normalised intensity `k / 255` for level `k`.
#[inline]
pub fn normalized(level: usize) -> f32 {
    level as f32 / MAX_INTENSITY as f32
}
