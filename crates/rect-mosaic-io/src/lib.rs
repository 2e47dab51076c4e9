#![warn(missing_docs)]
//! # rect-mosaic-io
//!
//! ## Purpose
//! Image codec boundary: decodes raster files into [`Image`] and encodes
//! images back to disk.
//!
//! ## Responsibilities
//! - Decode PNG, JPEG, BMP and GIF files into RGBA buffers.
//! - Encode images using the format implied by the output extension.
//! - Provide the extension policy used by open/save flows.
//!
//! ## Data flow
//! File path -> [`load_image`] -> [`Image`] -> edit/batch pipeline ->
//! [`save_image`] -> file path.
//!
//! ## Ownership and lifetimes
//! Decoded images own their pixel buffers; no codec state outlives a call.
//!
//! ## Error model
//! Decode, encode and filesystem failures return [`ImageIoError`] carrying
//! the offending path. Load and save are whole-file operations: there is no
//! partial result.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use rect_mosaic_core::Image;
use thiserror::Error;

/// Extensions accepted when opening images.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Extensions offered when saving an edited image.
pub const SUPPORTED_SAVE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Extension appended when a save path lacks a supported one.
pub const FALLBACK_SAVE_EXTENSION: &str = "png";

/// Decodes the image at `path` into RGBA.
///
/// # Errors
/// Returns [`ImageIoError::Decode`] when the file is missing, unreadable or
/// not a decodable image, and [`ImageIoError::Shape`] if the decoded buffer
/// is inconsistent.
pub fn load_image(path: impl AsRef<Path>) -> Result<Image, ImageIoError> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|source| ImageIoError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    Image::new(width, height, decoded.into_raw()).map_err(|error| ImageIoError::Shape {
        path: path.to_path_buf(),
        detail: error.to_string(),
    })
}

/// Encodes `image` to `path` using the format implied by its extension.
///
/// JPEG output has no alpha channel, so transparency is dropped there.
///
/// # Errors
/// Returns [`ImageIoError::UnsupportedFormat`] for unknown extensions and
/// [`ImageIoError::Encode`] when encoding or writing fails.
pub fn save_image(image: &Image, path: impl AsRef<Path>) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)
        .map_err(|_| ImageIoError::UnsupportedFormat(path.to_path_buf()))?;

    let buffer = RgbaImage::from_raw(image.width, image.height, image.rgba.clone()).ok_or_else(|| {
        ImageIoError::Shape {
            path: path.to_path_buf(),
            detail: "pixel buffer does not match image dimensions".to_string(),
        }
    })?;

    let encoded = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(buffer)
            .to_rgb8()
            .save_with_format(path, format),
        _ => buffer.save_with_format(path, format),
    };

    encoded.map_err(|source| ImageIoError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns `true` when `path` has an extension listed in
/// [`SUPPORTED_IMAGE_EXTENSIONS`] (case-insensitive).
pub fn is_supported_image_path(path: impl AsRef<Path>) -> bool {
    has_extension_in(path.as_ref(), SUPPORTED_IMAGE_EXTENSIONS)
}

/// Appends `.png` unless `path` already ends with a supported save
/// extension.
pub fn ensure_save_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if has_extension_in(path, SUPPORTED_SAVE_EXTENSIONS) {
        return path.to_path_buf();
    }

    let mut raw = path.as_os_str().to_os_string();
    raw.push(".");
    raw.push(FALLBACK_SAVE_EXTENSION);
    PathBuf::from(raw)
}

/// Suggested file name for saving an edit of `source`.
///
/// Uses `<stem>.jpg`, or `output.jpg` when there is no usable source.
pub fn default_save_name(source: Option<&Path>) -> String {
    source
        .and_then(|path| path.file_stem())
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| "output.jpg".to_string(), |stem| format!("{stem}.jpg"))
}

fn has_extension_in(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            allowed
                .iter()
                .any(|candidate| extension.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

/// Error type for image decode/encode.
#[derive(Debug, Error)]
pub enum ImageIoError {
    /// File could not be opened or decoded.
    #[error("failed to load image '{}': {source}", path.display())]
    Decode {
        /// Input path.
        path: PathBuf,
        /// Codec or filesystem error.
        source: image::ImageError,
    },
    /// File could not be encoded or written.
    #[error("failed to save image '{}': {source}", path.display())]
    Encode {
        /// Output path.
        path: PathBuf,
        /// Codec or filesystem error.
        source: image::ImageError,
    },
    /// Output extension does not name a known image format.
    #[error("unsupported image format for '{}'", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Pixel buffer and dimensions disagree.
    #[error("invalid image buffer for '{}': {detail}", path.display())]
    Shape {
        /// Path being processed.
        path: PathBuf,
        /// Shape mismatch detail.
        detail: String,
    },
}
