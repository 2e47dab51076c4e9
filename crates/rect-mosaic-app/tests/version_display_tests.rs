//! Integration tests for the embedded application version.

use rect_mosaic_app::{APP_VERSION, app_version};

#[test]
fn version_display_tests_embeds_first_line_of_version_file() {
    let version_file = include_str!("../../../VERSION");
    let first_line = version_file.lines().next().expect("VERSION should not be empty");
    assert_eq!(app_version(), first_line.trim());
}

#[test]
fn version_display_tests_exposes_semver_triplet() {
    let parts: Vec<&str> = APP_VERSION.split('.').collect();
    assert_eq!(parts.len(), 3, "version should be MAJOR.MINOR.PATCH");
    assert!(
        parts.iter().all(|part| part.parse::<u64>().is_ok()),
        "version parts should be numeric"
    );
}
