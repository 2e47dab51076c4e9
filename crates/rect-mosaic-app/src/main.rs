#![warn(missing_docs)]
//! # rect-mosaic binary
//!
//! Command line entry point for rect-mosaic.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::error;
use rect_mosaic_app::{
    AppError, app_version, apply_to_file, create_template, init_logger, parse_proportional_arg,
    parse_rect_arg, resolve_inputs, resolve_template, run_batch,
};
use rect_mosaic_batch::{BatchOptions, DEFAULT_BATCH_SUFFIX};
use rect_mosaic_core::{
    DEFAULT_BLOCK_SIZE, DEFAULT_INTENSITY_LEVEL, MAX_INTENSITY_LEVEL, MIN_INTENSITY_LEVEL,
    MosaicParams, PixelRect, ProportionalRect, intensity_from_level,
};

#[derive(Parser, Debug)]
#[command(name = "rect-mosaic", version = app_version(), about = "Rectangular mosaic (pixelation) tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pixelate rectangles of one image.
    Apply {
        /// Input image.
        #[arg(short, long)]
        input: PathBuf,
        /// Output image; `.png` is appended unless it ends in .png/.jpg/.jpeg.
        #[arg(short, long)]
        output: PathBuf,
        /// Region in pixels as x,y,w,h (repeatable).
        #[arg(long = "rect", required = true, value_parser = parse_pixel_rect)]
        rects: Vec<PixelRect>,
        #[command(flatten)]
        mosaic: MosaicArgs,
    },
    /// Apply a region template to many images.
    Batch {
        /// Input files or glob patterns (repeatable).
        #[arg(short, long = "input", required = true)]
        inputs: Vec<String>,
        /// Region template JSON file.
        #[arg(long)]
        template: PathBuf,
        /// Directory receiving the processed images.
        #[arg(long)]
        output_dir: PathBuf,
        /// Text inserted before each output extension.
        #[arg(long, default_value = DEFAULT_BATCH_SUFFIX)]
        suffix: String,
        /// Block size in pixels.
        #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: u32,
        /// Blend intensity level; half strength when omitted.
        #[arg(long, value_parser = intensity_level_parser())]
        intensity: Option<u8>,
    },
    /// Create or inspect region templates.
    #[command(subcommand)]
    Template(TemplateCommand),
    /// Print the version.
    Version,
}

#[derive(Subcommand, Debug)]
enum TemplateCommand {
    /// Write a template from proportional rectangles.
    New {
        /// Template file to write.
        #[arg(short, long)]
        output: PathBuf,
        /// Region as x,y,w,h fractions of the image size (repeatable).
        #[arg(long = "rect", value_parser = parse_fraction_rect)]
        rects: Vec<ProportionalRect>,
    },
    /// Print the pixel rectangles a template yields for an image size.
    Resolve {
        /// Template file to read.
        template: PathBuf,
        /// Image width in pixels.
        #[arg(long)]
        width: u32,
        /// Image height in pixels.
        #[arg(long)]
        height: u32,
    },
}

#[derive(Args, Debug)]
struct MosaicArgs {
    /// Block size in pixels (clamped to 2-100).
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u32,
    /// Blend intensity level.
    #[arg(long, default_value_t = DEFAULT_INTENSITY_LEVEL, value_parser = intensity_level_parser())]
    intensity: u8,
}

fn intensity_level_parser() -> clap::builder::RangedI64ValueParser<u8> {
    clap::value_parser!(u8).range(i64::from(MIN_INTENSITY_LEVEL)..=i64::from(MAX_INTENSITY_LEVEL))
}

fn parse_pixel_rect(raw: &str) -> Result<PixelRect, String> {
    parse_rect_arg(raw).map_err(|error| error.to_string())
}

fn parse_fraction_rect(raw: &str) -> Result<ProportionalRect, String> {
    parse_proportional_arg(raw).map_err(|error| error.to_string())
}

/// CLI entry point.
fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, AppError> {
    match command {
        Command::Apply {
            input,
            output,
            rects,
            mosaic,
        } => {
            let params = MosaicParams::with_intensity_level(mosaic.block_size, mosaic.intensity);
            let written = apply_to_file(&input, &output, &rects, &params)?;
            println!("{}", written.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Batch {
            inputs,
            template,
            output_dir,
            suffix,
            block_size,
            intensity,
        } => {
            let mut options = BatchOptions {
                block_size,
                suffix,
                ..BatchOptions::default()
            };
            if let Some(level) = intensity {
                options.intensity = intensity_from_level(level);
            }

            let report = run_batch(&resolve_inputs(&inputs), &template, &output_dir, &options)?;
            for output in &report.outputs {
                println!("{}", output.display());
            }
            for failure in &report.failures {
                eprintln!("skipped {}: {}", failure.input.display(), failure.reason);
            }
            Ok(if report.is_complete() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Template(TemplateCommand::New { output, rects }) => {
            create_template(&output, &rects)?;
            println!("{}", output.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Template(TemplateCommand::Resolve {
            template,
            width,
            height,
        }) => {
            for rect in resolve_template(&template, width, height)? {
                println!("{},{},{},{}", rect.x, rect.y, rect.width, rect.height);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Version => {
            println!("rect-mosaic {}", app_version());
            Ok(ExitCode::SUCCESS)
        }
    }
}
