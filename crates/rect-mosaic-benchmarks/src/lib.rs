#![warn(missing_docs)]
//! # rect-mosaic-benchmarks
//!
//! Deterministic fixtures for the timing smoke tests in `tests/`.

use rect_mosaic_core::Image;

/// Builds a `width` x `height` image with a repeating diagonal pattern.
pub fn patterned_image(width: u32, height: u32) -> Image {
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let value = ((x + y) % 251) as u8;
            rgba.extend_from_slice(&[value, value.wrapping_mul(3), 255 - value, 255]);
        }
    }
    Image {
        width,
        height,
        rgba,
    }
}
