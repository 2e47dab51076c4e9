#![warn(missing_docs)]
//! # rect-mosaic-batch
//!
//! ## Purpose
//! Applies a [`RegionTemplate`] to many image files and writes the results to
//! an output directory.
//!
//! ## Responsibilities
//! - Resolve the template against each image's own dimensions.
//! - Apply the mosaic once per template rectangle, in template order.
//! - Name outputs `<stem><suffix>.<ext>` inside the output directory.
//! - Isolate per-file failures so one bad input never aborts the batch.
//!
//! ## Data flow
//! Input paths + template -> [`batch_apply`] -> load -> resolve -> mosaic ->
//! save -> [`BatchReport`].
//!
//! ## Ownership and lifetimes
//! The template is borrowed read-only for the whole run. Each image is owned
//! by its loop iteration and dropped after it is written.
//!
//! ## Error model
//! Only failing to create the output directory is fatal
//! ([`BatchError::OutputDir`]). Load and save failures are logged at `warn`,
//! recorded in [`BatchReport::failures`], and processing continues.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rect_mosaic_core::DEFAULT_BLOCK_SIZE;
use rect_mosaic_engine::apply_mosaic;
use rect_mosaic_io::{load_image, save_image};
use rect_mosaic_template::RegionTemplate;
use thiserror::Error;

/// Suffix inserted before the extension of every output file.
pub const DEFAULT_BATCH_SUFFIX: &str = "_mosaic";

/// Blend intensity used for batch runs unless overridden.
pub const DEFAULT_BATCH_INTENSITY: f32 = 0.5;

/// Settings shared by every file in one batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    /// Mosaic block size in pixels; `0` behaves like `1`.
    pub block_size: u32,
    /// Blend intensity passed to the engine.
    pub intensity: f32,
    /// Text inserted between the file stem and its extension.
    pub suffix: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            intensity: DEFAULT_BATCH_INTENSITY,
            suffix: DEFAULT_BATCH_SUFFIX.to_string(),
        }
    }
}

/// One input that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Input path as given by the caller.
    pub input: PathBuf,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Successfully written output paths, in input order.
    pub outputs: Vec<PathBuf>,
    /// Inputs skipped because loading or saving failed.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Returns `true` when every input was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies `template` to every image in `image_paths`.
///
/// # Parameters
/// - `image_paths`: Inputs, processed in order.
/// - `template`: Proportional regions, resolved per image.
/// - `output_dir`: Destination directory; created when absent.
/// - `options`: Block size, intensity and output suffix.
///
/// # Returns
/// A [`BatchReport`] whose `outputs` lists every written file.
///
/// # Errors
/// Returns [`BatchError::OutputDir`] when the output directory cannot be
/// created. Per-file failures never surface as errors.
pub fn batch_apply<P: AsRef<Path>>(
    image_paths: &[P],
    template: &RegionTemplate,
    output_dir: impl AsRef<Path>,
    options: &BatchOptions,
) -> Result<BatchReport, BatchError> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).map_err(|source| BatchError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut report = BatchReport::default();
    for input in image_paths {
        let input = input.as_ref();
        match process_one(input, template, output_dir, options) {
            Ok(output) => {
                debug!("wrote '{}'", output.display());
                report.outputs.push(output);
            }
            Err(reason) => {
                warn!("skipping '{}': {reason}", input.display());
                report.failures.push(BatchFailure {
                    input: input.to_path_buf(),
                    reason,
                });
            }
        }
    }

    info!(
        "batch finished: {} written, {} skipped, output dir '{}'",
        report.outputs.len(),
        report.failures.len(),
        output_dir.display()
    );
    Ok(report)
}

/// Output location for `input`: `<output_dir>/<stem><suffix>.<ext>`.
///
/// Returns `None` when `input` has no file name.
pub fn batch_output_path(input: &Path, output_dir: &Path, suffix: &str) -> Option<PathBuf> {
    let stem = input.file_stem()?.to_string_lossy();
    let name = match input.extension() {
        Some(extension) => format!("{stem}{suffix}.{}", extension.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    Some(output_dir.join(name))
}

fn process_one(
    input: &Path,
    template: &RegionTemplate,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<PathBuf, String> {
    let output = batch_output_path(input, output_dir, &options.suffix)
        .ok_or_else(|| "input path has no file name".to_string())?;

    let mut image = load_image(input).map_err(|error| error.to_string())?;

    // Invariant:
    // - Rectangles apply in template order on the progressively mutated
    //   image, so later overlapping regions overwrite earlier ones.
    for rect in template.resolve(image.width, image.height) {
        image = apply_mosaic(&image, Some(rect), options.block_size, options.intensity);
    }

    save_image(&image, &output).map_err(|error| error.to_string())?;
    Ok(output)
}

/// Batch-level error type.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Output directory could not be created.
    #[error("cannot create output directory '{}': {source}", path.display())]
    OutputDir {
        /// Requested directory.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },
}
