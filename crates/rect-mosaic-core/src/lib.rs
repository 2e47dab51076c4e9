#![warn(missing_docs)]
//! # rect-mosaic-core
//!
//! ## Purpose
//! Defines the pure data model shared across the `rect-mosaic` workspace.
//!
//! ## Responsibilities
//! - Represent decoded RGBA images with explicit deep-copy semantics.
//! - Represent rectangles in image-pixel space and in proportional space.
//! - Hold mosaic parameters and the clamping rules for block size/intensity.
//!
//! ## Data flow
//! The codec layer decodes files into [`Image`]. Selections and templates
//! produce [`PixelRect`] values, and [`MosaicParams`] carries the user-chosen
//! block size and intensity into the transform engine.
//!
//! ## Ownership and lifetimes
//! [`Image`] owns its pixel buffer (`Vec<u8>`). Cloning an image always
//! produces an independent buffer, which is what keeps edit history
//! snapshots isolated from later edits.
//!
//! ## Error model
//! Shape validation failures return [`CoreError`]. Rectangle clipping reports
//! empty intersections as `None` rather than as errors.
//!
//! ## Example
//! ```rust
//! use rect_mosaic_core::{Image, PixelRect};
//!
//! let image = Image::filled(4, 4, [10, 20, 30, 255]);
//! let clipped = PixelRect::new(-2, -2, 4, 4).clip_to(image.width, image.height);
//! assert_eq!(clipped, Some(PixelRect::new(0, 0, 2, 2)));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default mosaic block size in pixels.
pub const DEFAULT_BLOCK_SIZE: u32 = 15;
/// Smallest block size accepted by [`MosaicParams`].
pub const MIN_BLOCK_SIZE: u32 = 2;
/// Largest block size accepted by [`MosaicParams`].
pub const MAX_BLOCK_SIZE: u32 = 100;

/// Lowest step of the 1-10 intensity scale.
pub const MIN_INTENSITY_LEVEL: u8 = 1;
/// Highest step of the 1-10 intensity scale.
pub const MAX_INTENSITY_LEVEL: u8 = 10;
/// Default step of the 1-10 intensity scale.
pub const DEFAULT_INTENSITY_LEVEL: u8 = 5;

/// Default number of snapshots kept by an edit history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Decoded image held as row-major RGBA bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Raw RGBA pixel buffer (`width * height * 4` bytes).
    pub rgba: Vec<u8>,
}

impl Image {
    /// Constructs a validated image.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidImageShape`] when the pixel buffer length is
    /// not exactly `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CoreError> {
        let expected_len = required_rgba_len(width, height)?;
        if rgba.len() != expected_len {
            return Err(CoreError::InvalidImageShape {
                expected: expected_len,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Creates an image with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let mut rgba = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            rgba.extend_from_slice(&color);
        }

        Self {
            width,
            height,
            rgba,
        }
    }

    /// Returns `true` when the image has zero area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let mut color = [0_u8; 4];
        color.copy_from_slice(&self.rgba[offset..offset + 4]);
        Some(color)
    }

    /// Writes `color` at `(x, y)`.
    ///
    /// Returns `false` and leaves the image untouched when the coordinate lies
    /// outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.rgba[offset..offset + 4].copy_from_slice(&color);
                true
            }
            None => false,
        }
    }

    /// Returns the full-image rectangle.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, clamp_to_i32(self.width), clamp_to_i32(self.height))
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }
}

/// Integer rectangle in image-pixel coordinates.
///
/// Coordinates are signed because template resolution and display mapping may
/// yield rectangles that start before the image origin; consumers clip with
/// [`PixelRect::clip_to`] before touching pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl PixelRect {
    /// Creates a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a normalized rectangle from two corners given in any order.
    ///
    /// `(x1, y1)` and `(x2, y2)` are edge coordinates, so the result spans
    /// `min..max` on each axis.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let left = x1.min(x2);
        let top = y1.min(y2);
        Self::new(
            left,
            top,
            x1.max(x2).saturating_sub(left),
            y1.max(y2).saturating_sub(top),
        )
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Returns `true` when either side is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns `true` when `(px, py)` lies inside the rectangle.
    pub fn contains(&self, px: i64, py: i64) -> bool {
        px >= i64::from(self.x) && px < self.right() && py >= i64::from(self.y) && py < self.bottom()
    }

    /// Intersects the rectangle with `[0, width) x [0, height)`.
    ///
    /// Returns `None` when the intersection has zero area.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<PixelRect> {
        if self.is_empty() {
            return None;
        }

        let left = i64::from(self.x).max(0);
        let top = i64::from(self.y).max(0);
        let right = self.right().min(i64::from(width));
        let bottom = self.bottom().min(i64::from(height));

        if right <= left || bottom <= top {
            return None;
        }

        // All four values now lie within [0, u32::MAX] and the source fields
        // were i32, so the narrowing below cannot overflow.
        Some(PixelRect::new(
            left as i32,
            top as i32,
            (right - left) as i32,
            (bottom - top) as i32,
        ))
    }
}

/// Rectangle expressed as fractions of image width and height.
///
/// Values are conventionally in `[0, 1]` but are not validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProportionalRect {
    /// Left edge as a fraction of image width.
    pub x: f64,
    /// Top edge as a fraction of image height.
    pub y: f64,
    /// Width as a fraction of image width.
    pub w: f64,
    /// Height as a fraction of image height.
    pub h: f64,
}

impl ProportionalRect {
    /// Creates a proportional rectangle.
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Resolves to pixel space with `floor(value * dimension)` per field.
    ///
    /// No clipping is performed.
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> PixelRect {
        let width = f64::from(image_width);
        let height = f64::from(image_height);
        PixelRect::new(
            floor_to_i32(self.x * width),
            floor_to_i32(self.y * height),
            floor_to_i32(self.w * width),
            floor_to_i32(self.h * height),
        )
    }
}

/// Block size and blend intensity used for one mosaic application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosaicParams {
    block_size: u32,
    intensity: f32,
}

impl MosaicParams {
    /// Creates parameters with block size clamped to
    /// `[MIN_BLOCK_SIZE, MAX_BLOCK_SIZE]` and intensity clamped to `[0, 1]`.
    pub fn new(block_size: u32, intensity: f32) -> Self {
        Self {
            block_size: clamp_block_size(block_size),
            intensity: clamp_intensity(intensity),
        }
    }

    /// Creates parameters from the 1-10 intensity scale (`level / 10`).
    pub fn with_intensity_level(block_size: u32, level: u8) -> Self {
        Self::new(block_size, intensity_from_level(level))
    }

    /// Block size in pixels.
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Blend intensity in `[0, 1]`.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Replaces the block size, clamping it to the configured range.
    pub fn set_block_size(&mut self, block_size: u32) {
        self.block_size = clamp_block_size(block_size);
    }

    /// Replaces the intensity, clamping it to `[0, 1]`.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = clamp_intensity(intensity);
    }

    /// Replaces the intensity from the 1-10 scale.
    pub fn set_intensity_level(&mut self, level: u8) {
        self.intensity = intensity_from_level(level);
    }
}

impl Default for MosaicParams {
    fn default() -> Self {
        Self::with_intensity_level(DEFAULT_BLOCK_SIZE, DEFAULT_INTENSITY_LEVEL)
    }
}

/// Clamps a block size to `[MIN_BLOCK_SIZE, MAX_BLOCK_SIZE]`.
pub fn clamp_block_size(block_size: u32) -> u32 {
    block_size.clamp(MIN_BLOCK_SIZE, MAX_BLOCK_SIZE)
}

/// Maps a 1-10 intensity level to `[0.1, 1.0]`.
pub fn intensity_from_level(level: u8) -> f32 {
    f32::from(level.clamp(MIN_INTENSITY_LEVEL, MAX_INTENSITY_LEVEL)) / 10.0
}

fn clamp_intensity(intensity: f32) -> f32 {
    if intensity.is_nan() {
        return 0.0;
    }
    intensity.clamp(0.0, 1.0)
}

fn floor_to_i32(value: f64) -> i32 {
    // `as` saturates for out-of-range floats and maps NaN to 0.
    value.floor() as i32
}

fn clamp_to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Error type for core model validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pixel buffer does not match declared geometry.
    #[error("invalid image shape: expected {expected} bytes, got {actual}")]
    InvalidImageShape {
        /// Expected RGBA byte count.
        expected: usize,
        /// Actual RGBA byte count.
        actual: usize,
    },
    /// Image dimensions overflow addressable memory.
    #[error("image dimensions overflow: {width}x{height}")]
    DimensionOverflow {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
}

fn required_rgba_len(width: u32, height: u32) -> Result<usize, CoreError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or(CoreError::DimensionOverflow { width, height })
}
