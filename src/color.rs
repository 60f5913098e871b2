//! Value-channel bridge between RGB images and the single-channel core.
//!
//! The value channel is the HSV `V = max(R, G, B)`. Replacing `V` while
//! keeping hue and saturation fixed scales all three channels by the same
//! factor `v_new / v_old`, so no round trip through HSV is needed.
use crate::enhancer::EnhanceError;
use crate::image::{GrayImageU8, RgbImageU8};

/// `max(R, G, B)` per pixel.
pub fn value_channel(rgb: &RgbImageU8) -> GrayImageU8 {
    let mut out = GrayImageU8::zeros(rgb.width(), rgb.height());
    for (dst, px) in out.data_mut().iter_mut().zip(rgb.data().chunks_exact(3)) {
        *dst = px[0].max(px[1]).max(px[2]);
    }
    out
}

/// Rebuild an RGB image whose value channel becomes `value`.
///
/// `original_value` must be the value channel of `rgb`. A black pixel has no
/// hue, so it turns into the neutral grey `(v, v, v)`.
pub fn replace_value(
    rgb: &RgbImageU8,
    original_value: &GrayImageU8,
    value: &GrayImageU8,
) -> Result<RgbImageU8, EnhanceError> {
    let dims = (rgb.width(), rgb.height());
    for (name, img) in [("original value", original_value), ("value", value)] {
        if (img.width(), img.height()) != dims {
            return Err(EnhanceError::invalid_input(format!(
                "{name} channel is {}x{}, colour image is {}x{}",
                img.width(),
                img.height(),
                dims.0,
                dims.1
            )));
        }
    }

    let mut data = Vec::with_capacity(rgb.data().len());
    for ((px, &v_old), &v_new) in rgb
        .data()
        .chunks_exact(3)
        .zip(original_value.data())
        .zip(value.data())
    {
        if v_old == 0 {
            data.extend_from_slice(&[v_new; 3]);
            continue;
        }
        let scale = v_new as f32 / v_old as f32;
        data.extend(
            px.iter()
                .map(|&c| (c as f32 * scale).round().clamp(0.0, 255.0) as u8),
        );
    }
    RgbImageU8::new(dims.0, dims.1, data)
        .ok_or_else(|| EnhanceError::invalid_input("rebuilt RGB buffer has wrong size"))
}
