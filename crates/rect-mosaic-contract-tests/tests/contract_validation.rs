//! Validates template documents against the frozen JSON schema.

use std::path::Path;

use jsonschema::JSONSchema;
use rect_mosaic_contract_tests::{fixture_path, template_schema_path};
use rect_mosaic_template::RegionTemplate;
use serde_json::Value;

fn load_json(path: &Path) -> Value {
    let raw = std::fs::read_to_string(path).expect("json file should be readable");
    serde_json::from_str(&raw).expect("json file should be valid")
}

fn compile_validator(schema_path: &Path) -> JSONSchema {
    let schema = load_json(schema_path);
    JSONSchema::compile(&schema).expect("schema should compile")
}

#[test]
fn template_fixture_matches_schema() {
    let validator = compile_validator(&template_schema_path());
    let fixture = load_json(&fixture_path("template.valid.json"));
    assert!(
        validator.is_valid(&fixture),
        "template fixture should validate against schema"
    );
}

#[test]
fn invalid_template_fixture_is_rejected() {
    let validator = compile_validator(&template_schema_path());
    let fixture = load_json(&fixture_path("template.invalid.json"));
    assert!(
        !validator.is_valid(&fixture),
        "invalid template fixture should fail schema validation"
    );
}

#[test]
fn valid_fixture_loads_as_template() {
    let template =
        RegionTemplate::load(fixture_path("template.valid.json")).expect("fixture should load");
    assert_eq!(template.len(), 2);
}

#[test]
fn saved_template_matches_schema() {
    let validator = compile_validator(&template_schema_path());
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("regions.json");

    let mut template = RegionTemplate::new();
    template.add_rect(0.1, 0.2, 0.3, 0.4);
    template.add_rect(0.5, 0.5, 0.25, 0.25);
    template.save(&path).expect("template should save");

    assert!(
        validator.is_valid(&load_json(&path)),
        "saved template should validate against schema"
    );
}
