//! Edge-aware tone curve construction.
//!
//! Stages, leaf first:
//!
//! - [`pairs`] – deduplicated contrast pairs between 8-connected neighbours,
//!   stored in an index-addressed arena with per-pixel neighbour slots.
//! - [`votes`] – buckets of edge pairs (span ≥ threshold) per intensity level.
//! - [`curve`] – normalised cumulative vote curves, one per occupied level.
//! - [`regions`] – dark/mid/bright averages blended with Gaussian weights.
//! - [`apply`] – lookup-table remapping of the channel.
//!
//! Compared to plain histogram equalisation the votes come from local
//! contrasts instead of pixel counts, so flat areas do not dominate the curve.

pub mod apply;
pub mod curve;
pub mod pairs;
pub mod regions;
pub mod votes;

pub use apply::apply_curve;
pub use curve::{LevelCurves, TransformCurve};
pub use pairs::{ContrastPair, Direction, NeighborSet, PairGraph, PairId};
pub use regions::{blend_regions, Region, RegionBounds, RegionCurves};
pub use votes::{is_edge_pair, vote_vector, IntensityBuckets};
