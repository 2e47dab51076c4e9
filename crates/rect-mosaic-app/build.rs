use std::env;
use std::fs;
use std::path::PathBuf;

const VERSION_ENV: &str = "RECT_MOSAIC_VERSION";

fn main() {
    let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR"));
    let version_file = manifest_dir
        .ancestors()
        .nth(2)
        .map(|workspace_root| workspace_root.join("VERSION"))
        .expect("app crate lives two levels below the workspace root");

    println!("cargo:rerun-if-changed={}", version_file.display());

    let contents = fs::read_to_string(&version_file)
        .unwrap_or_else(|error| panic!("cannot read {}: {error}", version_file.display()));
    let version = contents.lines().next().unwrap_or_default().trim();
    if version.is_empty() || version.split('.').count() != 3 {
        panic!("{} must start with a MAJOR.MINOR.PATCH line", version_file.display());
    }

    println!("cargo:rustc-env={VERSION_ENV}={version}");
}
