//! Fixture loading utilities for integration tests.
//!
//! For assertion helpers, use `linport::testing`.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[allow(unused_imports)]
pub use linport::testing::{reference_tolerance, DEFAULT_TOLERANCE, DEFAULT_TOLERANCE_F64};

// =============================================================================
// Test Case Loading
// =============================================================================

/// Base directory for test cases.
pub fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases")
}

/// Directory for legacy Arduino headers.
pub fn legacy_dir() -> PathBuf {
    test_cases_dir().join("legacy")
}

/// Directory for upstream model exports.
pub fn upstream_dir() -> PathBuf {
    test_cases_dir().join("upstream")
}

/// Feature rows and expected outputs for one model.
///
/// Expected values are computed in f64 from the f32-narrowed coefficients
/// and features.
#[derive(Debug, Deserialize)]
pub struct PredictCases {
    pub num_features: usize,
    pub features: Vec<Vec<f32>>,
    pub expected: Vec<f64>,
}

/// Load a JSON file and deserialize it.
pub fn load_cases(path: &Path) -> PredictCases {
    let file =
        File::open(path).unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()));
    serde_json::from_reader(file)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}
