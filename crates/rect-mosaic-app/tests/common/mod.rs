//! Shared fixtures for app integration tests.

use std::path::{Path, PathBuf};

use rect_mosaic_core::Image;
use rect_mosaic_io::save_image;

/// Creates a deterministic gradient image so every block differs.
#[allow(dead_code)]
pub fn fixture_image(width: u32, height: u32) -> Image {
    let mut image = Image::filled(width, height, [0, 0, 0, 255]);
    for y in 0..height {
        for x in 0..width {
            image.set_pixel(x, y, [(x * 7 % 256) as u8, (y * 11 % 256) as u8, 128, 255]);
        }
    }
    image
}

/// Writes the gradient fixture as PNG under `dir` and returns its path.
#[allow(dead_code)]
pub fn write_fixture_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    save_image(&fixture_image(width, height), &path).expect("fixture png should be written");
    path
}
