#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod color;
pub mod config;
pub mod diagnostics;
pub mod enhancer;
pub mod image;
pub mod types;

// Stage-level building blocks; usable on their own but less stable.
pub mod contrast;

// --- High-level re-exports -------------------------------------------------

// Main entry points: enhancer, parameters and errors.
pub use crate::enhancer::{ContrastEnhancer, EnhanceError, EnhanceParams, Enhanced, EnhancedRgb};

// Result-side types callers usually inspect.
pub use crate::contrast::TransformCurve;
pub use crate::diagnostics::{CurveSink, EnhancementReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use contrast_division::prelude::*;
///
/// # fn main() {
/// let (w, h) = (64usize, 48usize);
/// let gray: Vec<u8> = (0..w * h).map(|i| (i % w * 4) as u8).collect();
/// let img = ImageU8::gray(w, h, &gray);
///
/// let enhancer = ContrastEnhancer::new(EnhanceParams {
///     threshold: 8,
///     ..Default::default()
/// });
///
/// let out = enhancer.enhance_with_diagnostics(&img).unwrap();
/// for line in out.report.summary_lines() {
///     println!("{line}");
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayImageU8, ImageU8, RgbImageU8};
    pub use crate::{ContrastEnhancer, EnhanceError, EnhanceParams, TransformCurve};
}
