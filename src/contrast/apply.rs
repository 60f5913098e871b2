//! Remap a channel through a transform curve.
use super::curve::TransformCurve;
use super::pairs::validate_channel;
use crate::enhancer::EnhanceError;
use crate::image::{GrayImageU8, ImageU8, ImageView};

/// `dst = round(curve[src] * 255)` for every pixel.
pub fn apply_curve(src: &ImageU8, curve: &TransformCurve) -> Result<GrayImageU8, EnhanceError> {
    validate_channel(src)?;
    let lut = curve.to_lut();
    let mut dst = GrayImageU8::zeros(src.w, src.h);
    remap_rows(src, &mut dst, &lut);
    Ok(dst)
}

#[cfg(not(feature = "parallel"))]
fn remap_rows(src: &ImageU8, dst: &mut GrayImageU8, lut: &[u8; 256]) {
    use crate::image::ImageViewMut;

    for y in 0..src.h {
        let row_in = src.row(y);
        for (out, &v) in dst.row_mut(y).iter_mut().zip(row_in) {
            *out = lut[v as usize];
        }
    }
}

#[cfg(feature = "parallel")]
fn remap_rows(src: &ImageU8, dst: &mut GrayImageU8, lut: &[u8; 256]) {
    use rayon::prelude::*;

    dst.data_mut()
        .par_chunks_mut(src.w)
        .enumerate()
        .for_each(|(y, row_out)| {
            for (o, &v) in row_out.iter_mut().zip(src.row(y)) {
                *o = lut[v as usize];
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LEVELS;
    use nalgebra::SVector;

    #[test]
    fn identity_round_trips_every_level() {
        let data: Vec<u8> = (0..=255u8).collect();
        let src = ImageU8::gray(16, 16, &data);
        let out = apply_curve(&src, &TransformCurve::identity()).unwrap();
        assert_eq!(out.data(), &data[..]);
    }

    #[test]
    fn respects_stride() {
        // 2x2 image with one padding byte per row.
        let data = [10u8, 20, 99, 30, 40, 99];
        let src = ImageU8 {
            w: 2,
            h: 2,
            stride: 3,
            channels: 1,
            data: &data,
        };
        let inverted =
            TransformCurve::from_values(SVector::<f32, LEVELS>::from_fn(|k, _| {
                1.0 - k as f32 / 255.0
            }));
        let out = apply_curve(&src, &inverted).unwrap();
        assert_eq!(out.data(), &[245, 235, 225, 215]);
    }

    #[test]
    fn every_row_is_remapped() {
        let data: Vec<u8> = (0..15u8).map(|v| v * 10).collect();
        let src = ImageU8::gray(3, 5, &data);
        let inverted =
            TransformCurve::from_values(SVector::<f32, LEVELS>::from_fn(|k, _| {
                1.0 - k as f32 / 255.0
            }));
        let out = apply_curve(&src, &inverted).unwrap();
        let expected: Vec<u8> = data.iter().map(|&v| 255 - v).collect();
        assert_eq!(out.data(), expected.as_slice());
    }
}
