#![warn(missing_docs)]
//! # rect-mosaic-app
//!
//! ## Purpose
//! Wires the mosaic engine, region templates, edit session, batch processor
//! and image codecs into the `rect-mosaic` command line tool.
//!
//! ## Responsibilities
//! - Initialize logging and read runtime configuration from the environment.
//! - Parse rectangle arguments and expand input glob patterns.
//! - Run single-file edits through an [`EditorSession`].
//! - Build interactive sessions sized by the history capacity setting.
//! - Create, resolve and batch-apply region templates.
//!
//! ## Data flow
//! CLI arguments -> argument parsing -> session or batch pipeline -> codec
//! save -> exit status.
//!
//! ## Ownership and lifetimes
//! Every command builds its own session or template and drops it on return;
//! no state survives between commands.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`]. Per-file batch failures are
//! not errors; they are reported through [`BatchReport`].

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rect_mosaic_batch::{BatchError, BatchOptions, BatchReport, batch_apply};
use rect_mosaic_core::{DEFAULT_HISTORY_CAPACITY, MosaicParams, PixelRect, ProportionalRect};
use rect_mosaic_history::HistoryError;
use rect_mosaic_io::{ImageIoError, ensure_save_extension, load_image, save_image};
use rect_mosaic_session::EditorSession;
use rect_mosaic_template::{RegionTemplate, TemplateError};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("RECT_MOSAIC_VERSION");

/// Environment variable holding the `env_logger` filter.
pub const LOG_ENV_VAR: &str = "RECT_MOSAIC_LOG";

/// Environment variable overriding the undo history capacity.
pub const HISTORY_CAPACITY_ENV_VAR: &str = "RECT_MOSAIC_HISTORY_CAPACITY";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Installs the process-wide logger.
///
/// Lines are formatted as `timestamp | LEVEL | target | message`. The filter
/// defaults to `info` and can be overridden through [`LOG_ENV_VAR`]. Calling
/// this more than once is harmless.
pub fn init_logger() {
    let env = env_logger::Env::default().filter_or(LOG_ENV_VAR, "info");
    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} | {:<5} | {} | {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}

/// Reads the history capacity from [`HISTORY_CAPACITY_ENV_VAR`].
///
/// Semantics:
/// - Unset => [`DEFAULT_HISTORY_CAPACITY`].
/// - Positive integer => that value.
/// - Zero or unparsable => [`DEFAULT_HISTORY_CAPACITY`], with a warning.
pub fn history_capacity_from_env() -> usize {
    match std::env::var(HISTORY_CAPACITY_ENV_VAR) {
        Ok(value) => match value.trim().parse::<usize>() {
            Ok(capacity) if capacity > 0 => capacity,
            _ => {
                warn!(
                    "ignoring {HISTORY_CAPACITY_ENV_VAR}={value:?}; using {DEFAULT_HISTORY_CAPACITY}"
                );
                DEFAULT_HISTORY_CAPACITY
            }
        },
        Err(_) => DEFAULT_HISTORY_CAPACITY,
    }
}

/// Creates an interactive editing session whose undo depth comes from
/// [`history_capacity_from_env`].
///
/// # Errors
/// Returns [`AppError::History`] if the session cannot be created.
pub fn new_editor_session() -> Result<EditorSession, AppError> {
    Ok(EditorSession::new(history_capacity_from_env())?)
}

/// Parses a pixel rectangle written as `x,y,w,h`.
///
/// # Errors
/// Returns [`AppError::InvalidArgument`] when there are not exactly four
/// integer fields.
pub fn parse_rect_arg(raw: &str) -> Result<PixelRect, AppError> {
    let [x, y, width, height] = split_four(raw, |field| field.parse::<i32>().ok())?;
    Ok(PixelRect::new(x, y, width, height))
}

/// Parses a proportional rectangle written as `x,y,w,h` (fractions).
///
/// # Errors
/// Returns [`AppError::InvalidArgument`] when there are not exactly four
/// finite numeric fields.
pub fn parse_proportional_arg(raw: &str) -> Result<ProportionalRect, AppError> {
    let [x, y, w, h] = split_four(raw, |field| {
        field.parse::<f64>().ok().filter(|value| value.is_finite())
    })?;
    Ok(ProportionalRect::new(x, y, w, h))
}

fn split_four<T: Copy + Default>(
    raw: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<[T; 4], AppError> {
    let invalid = || AppError::InvalidArgument(format!("expected x,y,w,h but got '{raw}'"));

    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(invalid());
    }

    let mut values = [T::default(); 4];
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = parse(field).ok_or_else(invalid)?;
    }
    Ok(values)
}

/// Expands input arguments into file paths.
///
/// An argument naming an existing file is used as-is; anything else is
/// treated as a glob pattern. Duplicates are dropped while keeping the first
/// occurrence's position. Patterns matching nothing are logged and skipped.
pub fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for pattern in patterns {
        let literal = PathBuf::from(pattern);
        if literal.is_file() {
            if seen.insert(literal.clone()) {
                paths.push(literal);
            }
            continue;
        }

        match glob::glob(pattern) {
            Ok(entries) => {
                let mut matched = false;
                for path in entries.flatten() {
                    matched = true;
                    if path.is_file() && seen.insert(path.clone()) {
                        paths.push(path);
                    }
                }
                if !matched {
                    warn!("no files match '{pattern}'");
                }
            }
            Err(error) => warn!("invalid glob pattern '{pattern}': {error}"),
        }
    }

    paths
}

/// Applies the mosaic to each of `rects` in `input` and writes `output`.
///
/// Rectangles are applied in order through an [`EditorSession`] without
/// clipping, so block grids match [`run_batch`] output; rectangles that miss
/// the image entirely are skipped. `output` gets a `.png` extension
/// unless it already has a supported save extension.
///
/// # Returns
/// The path actually written.
///
/// # Errors
/// Returns [`AppError::ImageIo`] when decoding or encoding fails.
pub fn apply_to_file(
    input: &Path,
    output: &Path,
    rects: &[PixelRect],
    params: &MosaicParams,
) -> Result<PathBuf, AppError> {
    let image = load_image(input)?;
    // One-shot edits never undo, so only the latest state is kept.
    let mut session = EditorSession::new(1)?;
    session.open(image, Some(input.to_path_buf()));
    session.set_params(*params);

    let mut applied = 0_usize;
    for rect in rects {
        if session.select(*rect).is_some() && session.apply_mosaic() {
            applied += 1;
        } else {
            warn!("region {rect:?} lies outside the image; skipped");
        }
    }

    let output = ensure_save_extension(output);
    if let Some(image) = session.image() {
        save_image(image, &output)?;
    }
    info!(
        "applied {applied} of {} region(s) to '{}', wrote '{}'",
        rects.len(),
        input.display(),
        output.display()
    );
    Ok(output)
}

/// Loads the template at `template_path` and applies it to `inputs`.
///
/// # Errors
/// Returns [`AppError::NoInputs`] when `inputs` is empty,
/// [`AppError::Template`] when the template cannot be loaded and
/// [`AppError::Batch`] when the output directory cannot be created.
pub fn run_batch(
    inputs: &[PathBuf],
    template_path: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport, AppError> {
    if inputs.is_empty() {
        return Err(AppError::NoInputs);
    }

    let template = RegionTemplate::load(template_path)?;
    info!(
        "applying {} region(s) from '{}' to {} file(s)",
        template.len(),
        template_path.display(),
        inputs.len()
    );
    Ok(batch_apply(inputs, &template, output_dir, options)?)
}

/// Writes a new template holding `rects` to `path`.
///
/// # Errors
/// Returns [`AppError::Template`] when the file cannot be written.
pub fn create_template(path: &Path, rects: &[ProportionalRect]) -> Result<RegionTemplate, AppError> {
    let template = RegionTemplate::from_rects(rects.to_vec());
    template.save(path)?;
    info!("saved {} region(s) to '{}'", template.len(), path.display());
    Ok(template)
}

/// Loads the template at `path` and resolves it for a `width` x `height`
/// image.
///
/// # Errors
/// Returns [`AppError::Template`] when the template cannot be loaded.
pub fn resolve_template(path: &Path, width: u32, height: u32) -> Result<Vec<PixelRect>, AppError> {
    Ok(RegionTemplate::load(path)?.resolve(width, height))
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Command line value could not be parsed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// No input file was found for a batch run.
    #[error("no input files found")]
    NoInputs,
    /// Template load/save error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    /// Batch-level failure.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),
    /// Image decode/encode error.
    #[error("image error: {0}")]
    ImageIo(#[from] ImageIoError),
    /// History configuration error.
    #[error("history error: {0}")]
    History(#[from] HistoryError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument parsing helpers.

    use super::*;

    #[test]
    fn rect_arg_accepts_spaces_and_negatives() {
        assert_eq!(
            parse_rect_arg("-5, 10,20 ,30").expect("rect should parse"),
            PixelRect::new(-5, 10, 20, 30)
        );
    }

    #[test]
    fn rect_arg_rejects_wrong_arity_and_garbage() {
        for raw in ["1,2,3", "1,2,3,4,5", "a,b,c,d", "1.5,2,3,4", ""] {
            assert!(
                matches!(parse_rect_arg(raw), Err(AppError::InvalidArgument(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn proportional_arg_parses_fractions() {
        assert_eq!(
            parse_proportional_arg("0.25,0.25,0.5,0.5").expect("rect should parse"),
            ProportionalRect::new(0.25, 0.25, 0.5, 0.5)
        );
        assert!(parse_proportional_arg("0.1,NaN,0.2,0.2").is_err());
        assert!(parse_proportional_arg("0.1,inf,0.2,0.2").is_err());
    }
}
