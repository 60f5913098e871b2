//! Contrast pairs between 8-connected neighbours and the graph that owns them.
//!
//! Every undirected neighbour edge is stored exactly once in an arena
//! (`PairGraph::pairs`). Pixels refer to their eight edges through `PairId`
//! indices, so the arena may grow or move without invalidating references.
//!
//! Slot layout around a pixel `*`:
//!
//! ```text
//! 1 2 3
//! 0 * 4
//! 7 6 5
//! ```
//!
//! Slots 4..=7 are "forward": the pixel creates those pairs itself. Slots
//! 0..=3 alias the opposite forward slot of the neighbour that created them.
use crate::enhancer::EnhanceError;
use crate::image::ImageU8;
use crate::types::{CoverageVector, Intensity};

/// Unordered pair of neighbouring intensities reduced to `(low, high)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContrastPair {
    low: Intensity,
    high: Intensity,
}

impl ContrastPair {
    /// Pair standing in for a missing neighbour (image border).
    pub const NONE: ContrastPair = ContrastPair { low: 0, high: 0 };

    #[inline]
    pub fn new(a: Intensity, b: Intensity) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    #[inline]
    pub fn low(&self) -> Intensity {
        self.low
    }

    #[inline]
    pub fn high(&self) -> Intensity {
        self.high
    }

    #[inline]
    pub fn span(&self) -> u32 {
        u32::from(self.high - self.low)
    }

    /// Indicator vector with ones at every level in `[low, high]`.
    pub fn coverage(&self) -> CoverageVector {
        let (lo, hi) = (self.low as usize, self.high as usize);
        CoverageVector::from_fn(|k, _| u32::from((lo..=hi).contains(&k)))
    }
}

/// Stable arena index of a contrast pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PairId(u32);

impl PairId {
    /// Reserved index resolving to [`ContrastPair::NONE`].
    pub const NONE: PairId = PairId(u32::MAX);

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize);
        PairId(index as u32)
    }

    #[inline]
    pub fn index(self) -> Option<usize> {
        (self != PairId::NONE).then_some(self.0 as usize)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == PairId::NONE
    }
}

/// Compass slot of a neighbour pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Direction {
    Left = 0,
    UpLeft = 1,
    Up = 2,
    UpRight = 3,
    Right = 4,
    DownRight = 5,
    Down = 6,
    DownLeft = 7,
}

impl Direction {
    pub const ALL: [Direction; NUM_NEIGHBORS] = [
        Direction::Left,
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
    ];

    /// Directions whose pair a pixel creates itself, in arena order.
    pub const FORWARD: [Direction; 4] = [
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
    ];

    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        Direction::ALL[(self.slot() + 4) % NUM_NEIGHBORS]
    }

    /// `(dx, dy)` offset of the neighbour.
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::Up => (0, -1),
            Direction::UpRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::Down => (0, 1),
            Direction::DownLeft => (-1, 1),
        }
    }
}

pub const NUM_NEIGHBORS: usize = 8;

/// Eight neighbour slots of one pixel.
pub type NeighborSet = [PairId; NUM_NEIGHBORS];

const EMPTY_SET: NeighborSet = [PairId::NONE; NUM_NEIGHBORS];

/// Deduplicated contrast pairs of an image plus per-pixel neighbour slots.
#[derive(Clone, Debug)]
pub struct PairGraph {
    width: usize,
    height: usize,
    pairs: Vec<ContrastPair>,
    neighbors: Vec<NeighborSet>,
}

impl PairGraph {
    /// Build the pair graph of a single-channel image.
    pub fn build(img: &ImageU8) -> Result<Self, EnhanceError> {
        validate_channel(img)?;
        let (w, h) = (img.w, img.h);
        let expected = expected_pair_count(w, h);
        if expected >= u32::MAX as usize {
            return Err(EnhanceError::invalid_input(format!(
                "{w}x{h} image needs {expected} pairs, more than 32-bit ids allow"
            )));
        }

        let mut neighbors = vec![EMPTY_SET; w * h];
        let rows = build_forward_rows(img, &mut neighbors);
        let mut pairs = Vec::with_capacity(expected);
        for row in rows {
            pairs.extend(row);
        }
        debug_assert_eq!(pairs.len(), expected);

        link_backward_slots(w, h, &mut neighbors);

        Ok(Self {
            width: w,
            height: h,
            pairs,
            neighbors,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All unique pairs, in row-major creation order.
    pub fn pairs(&self) -> &[ContrastPair] {
        &self.pairs
    }

    /// Resolve an id; the sentinel resolves to [`ContrastPair::NONE`].
    #[inline]
    pub fn pair(&self, id: PairId) -> &ContrastPair {
        match id.index() {
            Some(i) => &self.pairs[i],
            None => &ContrastPair::NONE,
        }
    }

    #[inline]
    pub fn neighbors(&self, x: usize, y: usize) -> &NeighborSet {
        &self.neighbors[y * self.width + x]
    }

    #[inline]
    pub fn neighbor(&self, x: usize, y: usize, dir: Direction) -> PairId {
        self.neighbors(x, y)[dir.slot()]
    }

    /// Number of non-sentinel forward slots; equals `pairs().len()`.
    pub fn forward_slot_count(&self) -> usize {
        self.neighbors
            .iter()
            .map(|set| {
                Direction::FORWARD
                    .iter()
                    .filter(|d| !set[d.slot()].is_none())
                    .count()
            })
            .sum()
    }
}

/// `(W-1)H + (H-1)W + 2(H-1)(W-1)` for a `w × h` grid.
pub fn expected_pair_count(w: usize, h: usize) -> usize {
    if w == 0 || h == 0 {
        return 0;
    }
    (w - 1) * h + (h - 1) * w + 2 * (h - 1) * (w - 1)
}

pub(crate) fn validate_channel(img: &ImageU8) -> Result<(), EnhanceError> {
    if img.channels != 1 {
        return Err(EnhanceError::invalid_input(format!(
            "expected a single-channel image, got {} channels",
            img.channels
        )));
    }
    if img.w == 0 || img.h == 0 {
        return Err(EnhanceError::invalid_input(format!(
            "image has zero area ({}x{})",
            img.w, img.h
        )));
    }
    if !img.is_well_formed() {
        return Err(EnhanceError::invalid_input(format!(
            "buffer of {} bytes too short for {}x{} with stride {}",
            img.data.len(),
            img.w,
            img.h,
            img.stride
        )));
    }
    Ok(())
}

/// First arena index owned by row `y`. Every row except the last creates
/// `(W-1) + (W-1) + W + (W-1) = 4W - 3` pairs.
#[inline]
fn row_offset(w: usize, y: usize) -> usize {
    y * (4 * w - 3)
}

/// Create the forward pairs of row `y`, writing their ids into `slots`.
fn forward_row(img: &ImageU8, y: usize, slots: &mut [NeighborSet]) -> Vec<ContrastPair> {
    let (w, h) = (img.w, img.h);
    let mut next = row_offset(w, y);
    let mut out = Vec::with_capacity(4 * w);
    for (x, set) in slots.iter_mut().enumerate() {
        let v = img.get(x, y);
        for dir in Direction::FORWARD {
            let (dx, dy) = dir.offset();
            let nx = x as isize + dx;
            let ny = y + dy as usize;
            if nx < 0 || nx as usize >= w || ny >= h {
                continue;
            }
            out.push(ContrastPair::new(v, img.get(nx as usize, ny)));
            set[dir.slot()] = PairId::from_index(next);
            next += 1;
        }
    }
    out
}

#[cfg(not(feature = "parallel"))]
fn build_forward_rows(img: &ImageU8, neighbors: &mut [NeighborSet]) -> Vec<Vec<ContrastPair>> {
    neighbors
        .chunks_mut(img.w)
        .enumerate()
        .map(|(y, slots)| forward_row(img, y, slots))
        .collect()
}

#[cfg(feature = "parallel")]
fn build_forward_rows(img: &ImageU8, neighbors: &mut [NeighborSet]) -> Vec<Vec<ContrastPair>> {
    use rayon::prelude::*;

    neighbors
        .par_chunks_mut(img.w)
        .enumerate()
        .map(|(y, slots)| forward_row(img, y, slots))
        .collect()
}

/// Point each backward slot at the forward pair its neighbour created.
/// Runs after every forward slot of the image has been written.
fn link_backward_slots(w: usize, h: usize, neighbors: &mut [NeighborSet]) {
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            for dir in [
                Direction::Left,
                Direction::UpLeft,
                Direction::Up,
                Direction::UpRight,
            ] {
                let (dx, dy) = dir.offset();
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx as usize >= w {
                    continue;
                }
                let n_idx = ny as usize * w + nx as usize;
                neighbors[idx][dir.slot()] = neighbors[n_idx][dir.opposite().slot()];
            }
        }
    }
}
