//! Shared helpers for the integration tests

use std::fs;
use std::path::PathBuf;
use wikitex_babel::{convert_str, ConvertOptions};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

pub fn convert(source: &str) -> String {
    convert_str(source, &ConvertOptions::default())
}
