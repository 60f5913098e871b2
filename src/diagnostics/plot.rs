//! Line-graph rendering of curves for visual inspection.
//!
//! Graph colours rotate through a fixed palette using a small piece of
//! process-wide state. It lives here only; the enhancement pipeline never
//! reads it, so plotting cannot change results. Call [`reset_graph_color`] to
//! restart the rotation, or [`set_custom_graph_color`] to force the colour of
//! the next graph.
use crate::contrast::TransformCurve;
use crate::image::io::save_rgb_plot;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Margin between the image edge and the plotting area.
pub const BORDER: u32 = 20;
const DEFAULT_HEIGHT: u32 = 220;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GREY: Rgb<u8> = Rgb([200, 200, 200]);

const PALETTE: [Rgb<u8>; 9] = [
    Rgb([60, 60, 255]),  // light blue
    Rgb([60, 255, 60]),  // light green
    Rgb([255, 60, 40]),  // light red
    Rgb([0, 210, 210]),  // blue-green
    Rgb([180, 210, 0]),  // red-green
    Rgb([210, 0, 180]),  // red-blue
    Rgb([0, 0, 185]),    // dark blue
    Rgb([0, 185, 0]),    // dark green
    Rgb([185, 0, 0]),    // dark red
];

/// Rotating graph colour state with a one-shot custom override.
#[derive(Debug, Default)]
pub struct GraphColors {
    count: AtomicUsize,
    custom: Mutex<Option<Rgb<u8>>>,
}

impl GraphColors {
    pub const fn new() -> Self {
        Self {
            count: AtomicUsize::new(0),
            custom: Mutex::new(None),
        }
    }

    /// A pending custom colour, else the next palette entry. After the nine
    /// palette colours one grey graph is drawn and the rotation starts over.
    pub fn next_color(&self) -> Rgb<u8> {
        if let Ok(mut custom) = self.custom.lock() {
            if let Some(color) = custom.take() {
                return color;
            }
        }
        let n = self.count.fetch_add(1, Ordering::Relaxed) % (PALETTE.len() + 1);
        PALETTE.get(n).copied().unwrap_or(GREY)
    }

    /// Restart at palette entry `index` and drop any custom colour.
    pub fn reset(&self, index: usize) {
        self.count.store(index, Ordering::Relaxed);
        if let Ok(mut custom) = self.custom.lock() {
            *custom = None;
        }
    }

    /// Use `color` for the next graph only.
    pub fn set_custom(&self, color: [u8; 3]) {
        if let Ok(mut custom) = self.custom.lock() {
            *custom = Some(Rgb(color));
        }
    }
}

static GRAPH_COLORS: GraphColors = GraphColors::new();

pub fn next_graph_color() -> Rgb<u8> {
    GRAPH_COLORS.next_color()
}

pub fn reset_graph_color(index: usize) {
    GRAPH_COLORS.reset(index);
}

pub fn set_custom_graph_color(color: [u8; 3]) {
    GRAPH_COLORS.set_custom(color);
}

/// Layout of a float line graph.
///
/// A size of `0` picks a default: `len + 2 * BORDER` wide, `220` high. When
/// both `min` and `max` are zero the range is taken from the data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePlot {
    pub width: u32,
    pub height: u32,
    pub min: f32,
    pub max: f32,
}

impl Default for CurvePlot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            min: 0.0,
            max: 0.0,
        }
    }
}

impl CurvePlot {
    /// Square `[0, 1]` plot with two pixels per sample.
    pub fn for_curve(len: usize) -> Self {
        let side = len as u32 * 2 + 2 * BORDER;
        Self {
            width: side,
            height: side,
            min: 0.0,
            max: 1.0,
        }
    }

    /// Draw `values` onto a fresh white canvas.
    pub fn render(&self, values: &[f32]) -> RgbImage {
        let (w, h) = self.resolved_size(values.len());
        let mut canvas = RgbImage::from_pixel(w, h, WHITE);
        self.render_into(values, &mut canvas);
        canvas
    }

    /// Draw `values` on top of an existing canvas, e.g. to overlay graphs.
    pub fn render_into(&self, values: &[f32], canvas: &mut RgbImage) {
        let n = values.len();
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        let b = BORDER as f32;
        let s = (h - 2.0 * b).max(1.0);
        let xscale = if n > 1 { (w - 2.0 * b) / (n - 1) as f32 } else { 1.0 };
        let color = next_graph_color();

        let (mut min_v, mut max_v) = (self.min, self.max);
        if min_v.abs() < 1e-7 && max_v.abs() < 1e-7 {
            for &v in values {
                min_v = min_v.min(v);
                max_v = max_v.max(v);
            }
        }
        let mut diff = max_v - min_v;
        if diff == 0.0 {
            diff = 1e-8;
        }
        let fscale = s / diff;

        let y0 = (min_v * fscale).round();
        let axis_y = h - (b - y0);
        draw_line_segment_mut(canvas, (b, axis_y), (w - b, axis_y), BLACK);
        draw_line_segment_mut(canvas, (b, h - b), (b, h - (b + s)), BLACK);

        let mut prev = (b, axis_y);
        for (i, &v) in values.iter().enumerate() {
            let y = ((v - min_v) * fscale).round();
            let x = (i as f32 * xscale).round();
            let next = (b + x, h - (b + y));
            draw_line_segment_mut(canvas, prev, next, color);
            prev = next;
        }
    }

    fn resolved_size(&self, len: usize) -> (u32, u32) {
        let w = if self.width <= BORDER {
            len as u32 + 2 * BORDER
        } else {
            self.width
        };
        let h = if self.height <= BORDER {
            DEFAULT_HEIGHT
        } else {
            self.height
        };
        (w, h)
    }
}

/// Receiver of the final curve of an enhancement call.
///
/// Errors are reported back to the enhancer, which logs them and carries on.
pub trait CurveSink {
    fn accept(&mut self, curve: &TransformCurve) -> Result<(), String>;
}

impl<F> CurveSink for F
where
    F: FnMut(&TransformCurve) -> Result<(), String>,
{
    fn accept(&mut self, curve: &TransformCurve) -> Result<(), String> {
        self(curve)
    }
}

/// Renders the curve and writes it as an image file.
#[derive(Clone, Debug)]
pub struct CurvePlotSink {
    pub path: PathBuf,
    pub plot: CurvePlot,
}

impl CurvePlotSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            plot: CurvePlot::for_curve(crate::types::LEVELS),
        }
    }
}

impl CurveSink for CurvePlotSink {
    fn accept(&mut self, curve: &TransformCurve) -> Result<(), String> {
        let graph = self.plot.render(curve.as_slice());
        save_rgb_plot(&graph, &self.path)
    }
}
