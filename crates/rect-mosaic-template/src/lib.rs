#![warn(missing_docs)]
//! # rect-mosaic-template
//!
//! ## Purpose
//! Stores reusable mosaic regions as proportional rectangles so that one
//! template applies to images of any resolution.
//!
//! ## Responsibilities
//! - Keep an ordered list of [`ProportionalRect`] values.
//! - Resolve the list to pixel rectangles for a concrete image size.
//! - Persist the list to and from a JSON document.
//!
//! ## Data flow
//! Selections on a reference image -> [`RegionTemplate::from_pixel_rects`] ->
//! [`RegionTemplate::save`]. Later, [`RegionTemplate::load`] ->
//! [`RegionTemplate::resolve`] -> mosaic engine, once per batch image.
//!
//! ## Ownership and lifetimes
//! A template owns its rectangles. It is read-only while a batch runs and can
//! be shared by reference.
//!
//! ## Error model
//! Missing, unreadable and malformed documents all classify as data format
//! failures ([`TemplateError::is_data_format`]); only a failed write does not.
//! Templates holding NaN or infinite values are refused before anything is
//! written. Loading builds the template only after the whole document parsed,
//! so a failed load never leaves a partially populated template behind.
//!
//! ## Document format
//! ```json
//! { "rects": [ { "x": 0.25, "y": 0.25, "w": 0.5, "h": 0.5 } ] }
//! ```
//! Values are not range checked. Out-of-range fractions resolve to
//! out-of-bounds pixel rectangles, which the engine clips.

use std::fs;
use std::path::{Path, PathBuf};

use rect_mosaic_core::{PixelRect, ProportionalRect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered set of proportional mosaic regions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionTemplate {
    #[serde(default)]
    rects: Vec<ProportionalRect>,
}

impl RegionTemplate {
    /// Creates an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a template holding `rects` in the given order.
    pub fn from_rects(rects: Vec<ProportionalRect>) -> Self {
        Self { rects }
    }

    /// Builds a template from pixel rectangles drawn on a reference image.
    ///
    /// Each field is divided by the matching reference dimension. A zero
    /// dimension yields `0.0` for the fields on that axis.
    pub fn from_pixel_rects(rects: &[PixelRect], image_width: u32, image_height: u32) -> Self {
        let ratio = |value: i32, dimension: u32| {
            if dimension == 0 {
                0.0
            } else {
                f64::from(value) / f64::from(dimension)
            }
        };

        Self {
            rects: rects
                .iter()
                .map(|rect| {
                    ProportionalRect::new(
                        ratio(rect.x, image_width),
                        ratio(rect.y, image_height),
                        ratio(rect.width, image_width),
                        ratio(rect.height, image_height),
                    )
                })
                .collect(),
        }
    }

    /// Appends one region. Values are stored as given.
    pub fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.rects.push(ProportionalRect::new(x, y, w, h));
    }

    /// Removes every region.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Stored regions in application order.
    pub fn rects(&self) -> &[ProportionalRect] {
        &self.rects
    }

    /// Number of stored regions.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` when the template holds no regions.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Resolves every region against an image size.
    ///
    /// # Semantics
    /// Each field becomes `floor(fraction * dimension)`. Order is preserved and
    /// no clipping is applied.
    pub fn resolve(&self, image_width: u32, image_height: u32) -> Vec<PixelRect> {
        self.rects
            .iter()
            .map(|rect| rect.to_pixels(image_width, image_height))
            .collect()
    }

    /// Serializes the template as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`TemplateError::NonFinite`] when a stored value is NaN or
    /// infinite (JSON has no encoding for them), and
    /// [`TemplateError::DataFormat`] when JSON encoding fails.
    pub fn to_json_string(&self) -> Result<String, TemplateError> {
        if let Some(index) = self.rects.iter().position(|rect| !is_finite_rect(rect)) {
            return Err(TemplateError::NonFinite { index });
        }
        serde_json::to_string_pretty(self).map_err(TemplateError::DataFormat)
    }

    /// Parses a template from JSON text.
    ///
    /// A document without a `rects` field yields an empty template.
    ///
    /// # Errors
    /// Returns [`TemplateError::DataFormat`] for malformed JSON or records
    /// missing any of `x`, `y`, `w`, `h`.
    pub fn from_json_str(raw: &str) -> Result<Self, TemplateError> {
        serde_json::from_str(raw).map_err(TemplateError::DataFormat)
    }

    /// Writes the template to `path`.
    ///
    /// Nothing is written when the template cannot be encoded.
    ///
    /// # Errors
    /// Returns [`TemplateError::NonFinite`] or [`TemplateError::DataFormat`]
    /// when encoding fails and [`TemplateError::Write`] when the file cannot
    /// be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TemplateError> {
        let path = path.as_ref();
        let encoded = self.to_json_string()?;
        fs::write(path, encoded).map_err(|source| TemplateError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a template from `path`.
    ///
    /// # Errors
    /// Returns [`TemplateError::Unreadable`] when the document is missing or
    /// cannot be read, and [`TemplateError::DataFormat`] when its contents do
    /// not parse. Both report `true` from [`TemplateError::is_data_format`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| TemplateError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

fn is_finite_rect(rect: &ProportionalRect) -> bool {
    [rect.x, rect.y, rect.w, rect.h]
        .iter()
        .all(|value| value.is_finite())
}

/// Error type for template persistence.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template document is missing or could not be read.
    #[error("template document '{}' cannot be read: {source}", path.display())]
    Unreadable {
        /// Offending path.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },
    /// Template document is malformed.
    #[error("template document is malformed: {0}")]
    DataFormat(#[from] serde_json::Error),
    /// Rectangle holds a NaN or infinite value that JSON cannot carry.
    #[error("template rect #{index} holds a non-finite value")]
    NonFinite {
        /// Position of the rectangle in the template.
        index: usize,
    },
    /// Template file could not be written.
    #[error("template file '{}' cannot be written: {source}", path.display())]
    Write {
        /// Offending path.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },
}

impl TemplateError {
    /// Returns `true` when the document itself is missing, unreadable or
    /// malformed, as opposed to a failed write.
    pub fn is_data_format(&self) -> bool {
        !matches!(self, TemplateError::Write { .. })
    }
}
