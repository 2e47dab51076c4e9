#![warn(missing_docs)]
//! # rect-mosaic-engine
//!
//! ## Purpose
//! Pixelates rectangular regions of an image with an adjustable block size
//! and blend intensity.
//!
//! ## Responsibilities
//! - Partition a region into `block_size x block_size` blocks anchored at the
//!   region's top-left corner.
//! - Sample each block's representative color from its top-left pixel.
//! - Blend every in-region pixel toward the representative color.
//!
//! ## Data flow
//! Selection or resolved template rectangle -> [`apply_mosaic`] -> new
//! [`Image`] pushed onto edit history or written by the batch processor.
//!
//! ## Ownership and lifetimes
//! The input image is borrowed and never mutated; every call returns an
//! owned copy, so earlier history snapshots are unaffected.
//!
//! ## Error model
//! The engine has no failure path. A missing rectangle, a rectangle outside
//! the image, a zero block size, or an out-of-range intensity all degrade to
//! well-defined results instead of errors.

use rect_mosaic_core::{Image, MosaicParams, PixelRect};

/// Applies a mosaic to `rect` and returns the resulting image.
///
/// # Parameters
/// - `image`: Source image; left untouched.
/// - `rect`: Region in image-pixel space. `None` returns an unchanged copy.
/// - `block_size`: Block edge in pixels; `0` is treated as `1`.
/// - `intensity`: Blend factor. `>= 1` writes the block color, `<= 0` keeps
///   the original pixel, values in between blend every channel linearly.
///
/// # Semantics
/// Blocks are laid out from the top-left corner of `rect`. Trailing blocks
/// may be partial; every block is clipped to `rect` and to the image. The
/// representative color is the block's top-left pixel (not an average).
pub fn apply_mosaic(image: &Image, rect: Option<PixelRect>, block_size: u32, intensity: f32) -> Image {
    let mut output = image.clone();
    if let Some(rect) = rect {
        mosaic_in_place(&mut output, rect, block_size, intensity);
    }
    output
}

/// Applies a mosaic using the block size and intensity held by `params`.
pub fn apply_mosaic_with(image: &Image, rect: Option<PixelRect>, params: &MosaicParams) -> Image {
    apply_mosaic(image, rect, params.block_size(), params.intensity())
}

/// Applies a mosaic to each rectangle in order on a single working copy.
///
/// Later rectangles see the output of earlier ones, so overlapping regions
/// compose with the last write winning.
pub fn apply_mosaic_regions(image: &Image, rects: &[PixelRect], params: &MosaicParams) -> Image {
    let mut output = image.clone();
    for rect in rects {
        mosaic_in_place(&mut output, *rect, params.block_size(), params.intensity());
    }
    output
}

fn mosaic_in_place(image: &mut Image, rect: PixelRect, block_size: u32, intensity: f32) {
    let Some(clipped) = rect.clip_to(image.width, image.height) else {
        return;
    };

    let step = i64::from(block_size.max(1));
    let blend = Blend::from_intensity(intensity);
    if matches!(blend, Blend::Original) {
        return;
    }

    let clip_left = i64::from(clipped.x);
    let clip_top = i64::from(clipped.y);
    let clip_right = clipped.right();
    let clip_bottom = clipped.bottom();

    // Invariant:
    // - The grid stays anchored at the unclipped origin so a region that
    //   starts outside the image keeps the same block boundaries.
    let first_row = grid_start(i64::from(rect.y), clip_top, step);
    let first_col = grid_start(i64::from(rect.x), clip_left, step);

    let mut block_top = first_row;
    while block_top < clip_bottom {
        let y0 = block_top.max(clip_top);
        let y1 = (block_top + step).min(clip_bottom);

        let mut block_left = first_col;
        while block_left < clip_right {
            let x0 = block_left.max(clip_left);
            let x1 = (block_left + step).min(clip_right);

            // Coordinates are inside the clipped rect, which lies within
            // [0, u32::MAX) on both axes.
            if let Some(mosaic_color) = image.pixel(x0 as u32, y0 as u32) {
                for py in y0..y1 {
                    for px in x0..x1 {
                        let (px, py) = (px as u32, py as u32);
                        if let Some(original) = image.pixel(px, py) {
                            image.set_pixel(px, py, blend.apply(original, mosaic_color));
                        }
                    }
                }
            }

            block_left += step;
        }
        block_top += step;
    }
}

/// First block edge at or before `clip_start` on a grid anchored at `origin`.
fn grid_start(origin: i64, clip_start: i64, step: i64) -> i64 {
    origin + (clip_start - origin).div_euclid(step) * step
}

#[derive(Debug, Clone, Copy)]
enum Blend {
    Original,
    Mosaic,
    Mix(f32),
}

impl Blend {
    fn from_intensity(intensity: f32) -> Self {
        if intensity.is_nan() || intensity <= 0.0 {
            Blend::Original
        } else if intensity >= 1.0 {
            Blend::Mosaic
        } else {
            Blend::Mix(intensity)
        }
    }

    fn apply(self, original: [u8; 4], mosaic: [u8; 4]) -> [u8; 4] {
        match self {
            Blend::Original => original,
            Blend::Mosaic => mosaic,
            Blend::Mix(intensity) => {
                let mut out = [0_u8; 4];
                for channel in 0..4 {
                    let mixed = f32::from(original[channel]) * (1.0 - intensity)
                        + f32::from(mosaic[channel]) * intensity;
                    // Float-to-int `as` truncates and saturates into [0, 255].
                    out[channel] = mixed as u8;
                }
                out
            }
        }
    }
}
