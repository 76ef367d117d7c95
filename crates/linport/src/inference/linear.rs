//! Linear model prediction.
//!
//! Provides the inference entry point for [`LinearModel`](crate::repr::LinearModel).

use crate::error::ModelError;
use crate::repr::LinearModel;

/// Extension trait for LinearModel prediction.
///
/// The feature vector is a `&[f32; N]` with the same `N` as the weight table,
/// so an under- or over-sized vector is a type error rather than a run-time
/// fault.
pub trait LinearModelPredict<const N: usize> {
    /// Weighted sum of the features, without the intercept.
    ///
    /// Accumulates in `f32`, index 0 upward, one multiply-add per feature.
    fn dot(&self, features: &[f32; N]) -> f32;

    /// Predict for a single feature vector.
    ///
    /// Returns `dot(features) + intercept`.
    fn predict(&self, features: &[f32; N]) -> f32;

    /// Predict from a slice whose length is only known at run time.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ArityMismatch`] if `features.len() != N`.
    fn try_predict(&self, features: &[f32]) -> Result<f32, ModelError>;
}

impl<const N: usize> LinearModelPredict<N> for LinearModel<N> {
    #[inline]
    fn dot(&self, features: &[f32; N]) -> f32 {
        weighted_sum(self.weights(), features)
    }

    #[inline]
    fn predict(&self, features: &[f32; N]) -> f32 {
        self.dot(features) + self.intercept()
    }

    fn try_predict(&self, features: &[f32]) -> Result<f32, ModelError> {
        let features: &[f32; N] = features
            .try_into()
            .map_err(|_| ModelError::ArityMismatch { declared: N, actual: features.len() })?;
        Ok(self.predict(features))
    }
}

/// Accumulate `Σ features[i] * weights[i]` over the common prefix, index 0 upward.
///
/// Shared by the fixed-arity engine and host-side descriptors so both round
/// identically. Zero weights are not skipped: the cost is the same for every input.
#[inline]
pub(crate) fn weighted_sum(weights: &[f32], features: &[f32]) -> f32 {
    let mut sum = 0.0f32;
    for (&value, &weight) in features.iter().zip(weights) {
        sum += value * weight;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TWO_FEATURES: LinearModel<2> = LinearModel::new([0.62817052, -1.00612540], 3.06666667);

    #[test]
    fn predict_two_features() {
        let output = TWO_FEATURES.predict(&[1.0, 1.0]);
        assert_abs_diff_eq!(output, 2.68871179, epsilon = 1e-5);
    }

    #[test]
    fn dot_excludes_intercept() {
        let model = LinearModel::new([0.5, 0.3], 0.1);
        assert_abs_diff_eq!(model.dot(&[2.0, 3.0]), 1.9, epsilon = 1e-6);
        assert_abs_diff_eq!(model.predict(&[2.0, 3.0]), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_vector_returns_intercept_exactly() {
        let model = LinearModel::new([-1.10044053, -8.97775527, 0.0], 7.07227139);
        assert_eq!(model.predict(&[0.0; 3]), 7.07227139);
    }

    #[test]
    fn predict_is_idempotent() {
        let x = [0.25, -4.0];
        let first = TWO_FEATURES.predict(&x);
        let second = TWO_FEATURES.predict(&x);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn accumulation_order_is_fixed() {
        // Ascending order: (1e8 + 1) - 1e8 rounds to 0 in f32
        let model = LinearModel::new([1.0, 1.0, 1.0], 0.0);
        assert_eq!(model.predict(&[1e8, 1.0, -1e8]), 0.0);
    }

    #[test]
    fn try_predict_checks_length() {
        assert_abs_diff_eq!(TWO_FEATURES.try_predict(&[1.0, 1.0]).unwrap(), 2.68871179, epsilon = 1e-5);

        let err = TWO_FEATURES.try_predict(&[1.0]).unwrap_err();
        assert_eq!(err, ModelError::ArityMismatch { declared: 2, actual: 1 });

        let err = TWO_FEATURES.try_predict(&[1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(err, ModelError::ArityMismatch { declared: 2, actual: 3 });
    }
}
