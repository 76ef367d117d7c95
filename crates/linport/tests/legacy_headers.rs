//! Legacy Eloquent header import tests.

#![cfg(feature = "std")]

mod common;

use linport::compat::eloquent::{self, LegacyParseError};
use linport::export::{render, ExportConfig, Target};
use linport::testing::assert_slice_approx_eq;
use linport::{LinearModel, LinearModelPredict, ModelError};
use rstest::rstest;

use common::{legacy_dir, DEFAULT_TOLERANCE};

fn read(name: &str) -> Result<eloquent::LegacyHeader, LegacyParseError> {
    eloquent::read_path(legacy_dir().join(name))
}

#[test]
fn consistent_header_imports() {
    let header = read("irrigation.h").unwrap();
    assert_eq!(header.class_name.as_deref(), Some("LinearRegression"));
    assert_eq!(header.coefficients.len(), 9);
    assert_eq!(header.va_start_arity, Some(9));
    assert_eq!(header.loop_bound, Some(9));

    let descriptor = header.to_descriptor().unwrap();
    assert_slice_approx_eq(
        descriptor.weights(),
        &[-1.10044053, -8.97775527, 0.0, -1.23552997, -7.72430131, 0.0, 0.0, -3.19941472, 0.20131996],
        DEFAULT_TOLERANCE,
        "irrigation.h weights",
    );
    let model: LinearModel<9> = descriptor.to_fixed().unwrap();
    let mut x = [0.0; 9];
    x[1] = 1.0;
    assert!((model.predict(&x) - -1.90548388).abs() < 1e-5);
}

#[test]
fn negative_zero_noise_is_kept() {
    let header = read("irrigation.h").unwrap();
    assert!(header.coefficients[2].is_sign_negative());
    assert_eq!(header.coefficients[2], 0.0);
    assert!(header.coefficients[5].is_sign_positive());

    // Either sign contributes nothing
    let descriptor = header.to_descriptor().unwrap();
    let y = descriptor.predict(&[0.0, 0.0, 1e6, 0.0, 0.0, 1e6, 0.0, 0.0, 0.0]).unwrap();
    assert_eq!(y.to_bits(), descriptor.intercept().to_bits());
}

#[rstest]
#[case("regressor_drift.h", 10, 9)]
fn arity_drift_is_rejected(#[case] name: &str, #[case] declared: usize, #[case] actual: usize) {
    let header = read(name).unwrap();
    assert_eq!(header.coefficients.len(), actual);
    assert_eq!(header.intercept, 2.72852233676976);

    let err = header.to_descriptor().unwrap_err();
    assert!(
        matches!(err, LegacyParseError::Model(ModelError::ArityMismatch { declared: d, actual: a }) if d == declared && a == actual),
        "unexpected error: {err}"
    );
}

#[test]
fn unfilled_template_is_rejected() {
    let err = read("template.h").unwrap_err();
    assert!(matches!(err, LegacyParseError::UnfilledTemplate(ref token) if token == "COEF_0"));
}

#[test]
fn missing_file_is_io_error() {
    let err = read("does-not-exist.h").unwrap_err();
    assert!(matches!(err, LegacyParseError::Io(_)));
}

/// Regenerating a legacy header gives a fixed-shape class with the same weights.
#[rstest]
#[case(Target::Rust)]
#[case(Target::Arduino)]
fn regenerate_legacy_header(#[case] target: Target) {
    let descriptor = read("irrigation.h").unwrap().to_descriptor().unwrap();
    let config = ExportConfig::builder().target(target).precision(8).build().unwrap();
    let source = render(&descriptor, &config);

    assert!(source.contains("-8.97775555"));
    assert!(source.contains("7.07227135"));
    assert!(!source.contains("va_start"));
    assert!(!source.contains("va_arg"));
    match target {
        Target::Rust => assert!(source.contains("pub const N_FEATURES: usize = 9;")),
        Target::Arduino => assert!(source.contains("class LinearRegression {")),
    }
}
