#![warn(missing_docs)]
//! # rect-mosaic-contract-tests
//!
//! Locates the frozen JSON contracts shared by the template format and its
//! fixtures. The validation itself lives in this crate's `tests/`.

use std::path::PathBuf;

/// Root `contracts/` directory of the workspace.
pub fn contracts_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../contracts"))
}

/// Path of the region template schema.
pub fn template_schema_path() -> PathBuf {
    contracts_dir().join("template.schema.json")
}

/// Path of a named file under `contracts/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    contracts_dir().join("fixtures").join(name)
}
