//! Integration tests for single-file mosaic application.

mod common;

use std::path::Path;

use rect_mosaic_app::{AppError, apply_to_file};
use rect_mosaic_core::{MosaicParams, PixelRect};
use rect_mosaic_engine::apply_mosaic_with;
use rect_mosaic_io::load_image;

#[test]
fn apply_to_file_tests_matches_engine_output() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let input = common::write_fixture_png(dir.path(), "in.png", 64, 48);
    let params = MosaicParams::with_intensity_level(8, 10);
    let rects = [PixelRect::new(0, 0, 32, 24), PixelRect::new(40, 30, 16, 16)];

    let written = apply_to_file(&input, &dir.path().join("out.png"), &rects, &params)
        .expect("apply should succeed");

    let mut expected = common::fixture_image(64, 48);
    for rect in rects {
        expected = apply_mosaic_with(&expected, Some(rect), &params);
    }
    let actual = load_image(&written).expect("output should decode");
    assert_eq!(actual, expected);
}

#[test]
fn apply_to_file_tests_keeps_grid_of_rect_starting_off_image() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let input = common::write_fixture_png(dir.path(), "in.png", 40, 40);
    let params = MosaicParams::with_intensity_level(15, 10);
    let rect = PixelRect::new(-5, -5, 30, 30);

    let written = apply_to_file(&input, &dir.path().join("out.png"), &[rect], &params)
        .expect("apply should succeed");

    let expected = apply_mosaic_with(&common::fixture_image(40, 40), Some(rect), &params);
    let actual = load_image(&written).expect("output should decode");
    // The second block column starts at x = 10, so x = 12 repeats pixel (10, 0).
    assert_eq!(actual.pixel(12, 0), common::fixture_image(40, 40).pixel(10, 0));
    assert_eq!(actual, expected);
}

#[test]
fn apply_to_file_tests_appends_png_to_unknown_extension() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let input = common::write_fixture_png(dir.path(), "in.png", 20, 20);

    let written = apply_to_file(
        &input,
        &dir.path().join("result"),
        &[PixelRect::new(0, 0, 10, 10)],
        &MosaicParams::default(),
    )
    .expect("apply should succeed");

    assert_eq!(written, dir.path().join("result.png"));
    assert!(written.is_file());
}

#[test]
fn apply_to_file_tests_skips_regions_outside_image() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let input = common::write_fixture_png(dir.path(), "in.png", 20, 20);

    let written = apply_to_file(
        &input,
        &dir.path().join("out.png"),
        &[PixelRect::new(100, 100, 10, 10)],
        &MosaicParams::default(),
    )
    .expect("apply should succeed");

    let actual = load_image(&written).expect("output should decode");
    assert_eq!(actual, common::fixture_image(20, 20));
}

#[test]
fn apply_to_file_tests_reports_missing_input() {
    let error = apply_to_file(
        Path::new("/definitely/not/here.png"),
        Path::new("/tmp/unused.png"),
        &[],
        &MosaicParams::default(),
    )
    .expect_err("missing input should fail");
    assert!(matches!(error, AppError::ImageIo(_)));
}
