#![allow(dead_code)]

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let cx = (x / cell) as i32;
            let cy = (y / cell) as i32;
            let sum = cx + cy;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img[y * width + x] = val;
        }
    }
    img
}

/// Horizontal ramp from `lo` to `hi` (inclusive) across the width.
pub fn ramp_u8(width: usize, height: usize, lo: u8, hi: u8) -> Vec<u8> {
    assert!(width > 1 && height > 0, "ramp needs at least two columns");
    assert!(lo <= hi, "ramp must be non-decreasing");

    let span = (hi - lo) as usize;
    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            img[y * width + x] = lo + (x * span / (width - 1)) as u8;
        }
    }
    img
}

/// Low-contrast background with a brighter centred square.
pub fn square_on_background_u8(width: usize, height: usize, bg: u8, fg: u8) -> Vec<u8> {
    let mut img = vec![bg; width * height];
    for y in height / 4..3 * height / 4 {
        for x in width / 4..3 * width / 4 {
            img[y * width + x] = fg;
        }
    }
    img
}

/// Interleaved RGB image whose channels are scaled copies of `gray`.
pub fn tinted_rgb_u8(gray: &[u8], tint: [f32; 3]) -> Vec<u8> {
    gray.iter()
        .flat_map(|&v| tint.map(|t| (v as f32 * t).round().clamp(0.0, 255.0) as u8))
        .collect()
}
