//! Testing utilities for linport.
//!
//! Assertion helpers and a double-precision reference predictor, used by the
//! unit tests, the integration tests and by downstream crates that want to
//! check a generated artifact against the training-time prediction.
//!
//! ```
//! use linport::{assert_approx_eq, LinearModel, LinearModelPredict};
//! use linport::testing::{reference_predict, DEFAULT_TOLERANCE_F64};
//!
//! let model = LinearModel::new([0.5, 0.3], 0.1);
//! let x = [2.0, 3.0];
//! assert_approx_eq!(
//!     model.predict(&x) as f64,
//!     reference_predict(model.weights(), model.intercept(), &x),
//!     DEFAULT_TOLERANCE_F64
//! );
//! ```

use crate::inference::LinearModelPredict;
use crate::repr::LinearModel;

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons of predictions that are O(1).
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Same tolerance as f64 for comparisons against reference values.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-5;

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two float values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// # Examples
///
/// ```
/// # use linport::assert_approx_eq;
/// assert_approx_eq!(1.0f32, 1.0001f32, 0.001);
/// ```
///
/// # Panics
///
/// Panics if the absolute difference exceeds tolerance.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val = $left;
        let right_val = $right;
        let tol = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val = $left;
        let right_val = $right;
        let tol = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two slices of f32 values are approximately equal element-wise.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance.
pub fn assert_slice_approx_eq(actual: &[f32], expected: &[f32], tolerance: f32, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance,
            "{context}[{i}]: {a} ≠ {e} (diff={diff}, tolerance={tolerance})"
        );
    }
}

// =============================================================================
// Reference Predictor
// =============================================================================

/// Double-precision reference: `intercept + Σ weights[i] * features[i]`.
///
/// Weights and features are widened from `f32` first, so the only difference
/// to [`LinearModelPredict::predict`] is accumulator precision.
///
/// # Panics
///
/// Panics if `weights` and `features` differ in length.
pub fn reference_predict(weights: &[f32], intercept: f32, features: &[f32]) -> f64 {
    assert_eq!(weights.len(), features.len(), "reference_predict: length mismatch");
    let sum: f64 = weights
        .iter()
        .zip(features)
        .map(|(&w, &x)| w as f64 * x as f64)
        .sum();
    intercept as f64 + sum
}

/// Tolerance for comparing an `f32` prediction to [`reference_predict`].
///
/// Single-precision rounding error grows with the magnitude of the terms, so
/// the absolute bound [`DEFAULT_TOLERANCE_F64`] is scaled by
/// `1 + |intercept| + Σ |weights[i] * features[i]|`.
pub fn reference_tolerance(weights: &[f32], intercept: f32, features: &[f32]) -> f64 {
    let magnitude: f64 = weights
        .iter()
        .zip(features)
        .map(|(&w, &x)| (w as f64 * x as f64).abs())
        .sum();
    DEFAULT_TOLERANCE_F64 * (1.0 + (intercept as f64).abs() + magnitude)
}

/// Assert that `model.predict(features)` matches the f64 reference.
///
/// # Panics
///
/// Panics if the prediction is outside [`reference_tolerance`].
pub fn assert_matches_reference<const N: usize>(
    model: &LinearModel<N>,
    features: &[f32; N],
    context: &str,
) {
    let actual = model.predict(features) as f64;
    let expected = reference_predict(model.weights(), model.intercept(), features);
    let tolerance = reference_tolerance(model.weights(), model.intercept(), features);
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: predict = {actual}, reference = {expected} (diff={diff:e}, tolerance={tolerance:e})"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq_macro() {
        assert_approx_eq!(1.0f32, 1.0001f32, 0.001);
        assert_approx_eq!(0.0f32, 0.0f32, 1e-10);
        assert_approx_eq!(-1.5f64, -1.5001f64, 0.001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.0f32, 2.0f32, 0.1);
    }

    #[test]
    fn test_assert_approx_eq_with_message() {
        assert_approx_eq!(1.0f32, 1.0001f32, 0.001, "feature {}", 3);
    }

    #[test]
    fn test_slice_approx_eq() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [1.0001f32, 2.0001, 3.0001];
        assert_slice_approx_eq(&a, &b, 0.001, "test");
    }

    #[test]
    fn test_reference_predict() {
        let y = reference_predict(&[0.5, -2.0], 1.0, &[2.0, 0.25]);
        assert_eq!(y, 1.5);
    }

    #[test]
    fn test_reference_tolerance_scales() {
        let small = reference_tolerance(&[1.0], 0.0, &[1.0]);
        let large = reference_tolerance(&[10.0], 100.0, &[10.0]);
        assert_eq!(small, 2e-5);
        assert!(large > small * 50.0);
    }

    #[test]
    fn test_assert_matches_reference() {
        let model = LinearModel::new([-1.10044053, -8.97775527, 0.0], 7.07227139);
        assert_matches_reference(&model, &[0.3, 0.7, 123.0], "three features");
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_reference_predict_length_mismatch() {
        reference_predict(&[1.0, 2.0], 0.0, &[1.0]);
    }
}
