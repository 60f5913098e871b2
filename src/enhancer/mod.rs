//! High-level enhancement entry point.
//!
//! [`ContrastEnhancer`] validates [`EnhanceParams`], runs the stages from
//! [`crate::contrast`] and returns the remapped channel, optionally with an
//! [`crate::diagnostics::EnhancementReport`]. Colour images go through the
//! value channel bridge in [`crate::color`].

mod error;
pub mod params;
mod pipeline;

pub use error::EnhanceError;
pub use params::EnhanceParams;
pub use pipeline::{ContrastEnhancer, Enhanced, EnhancedRgb};
