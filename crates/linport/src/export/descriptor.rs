//! Validated, host-side model descriptor.

use crate::error::{InvalidModelKind, ModelError};
use crate::inference::weighted_sum;
use crate::repr::{check_finite, LinearModel};

use super::TrainedModel;

/// A validated linear model whose arity is derived from its coefficient list.
///
/// This is the input of the artifact generator. There is no separate feature
/// count field: [`n_features`](Self::n_features) is `weights.len()`.
///
/// # Example
///
/// ```
/// use linport::export::{ModelDescriptor, TrainedModel};
/// use linport::LinearModelPredict;
///
/// let trained = TrainedModel::new(vec![0.62817052, -1.00612540], 3.06666667);
/// let descriptor = ModelDescriptor::from_trained(&trained).unwrap();
/// assert_eq!(descriptor.n_features(), 2);
///
/// let model = descriptor.to_fixed::<2>().unwrap();
/// assert!((model.predict(&[1.0, 1.0]) - 2.68871179).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    weights: Vec<f32>,
    intercept: f32,
    feature_names: Option<Vec<String>>,
}

impl ModelDescriptor {
    /// Create a descriptor from single-precision coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidModel`] if `weights` is empty or any value
    /// is not finite.
    pub fn new(weights: Vec<f32>, intercept: f32) -> Result<Self, ModelError> {
        if weights.is_empty() {
            return Err(InvalidModelKind::Empty.into());
        }
        check_finite(&weights, intercept)?;
        if weights.iter().all(|&w| w == 0.0) {
            log::warn!("all {} weights are zero; the model predicts a constant", weights.len());
        }
        Ok(Self { weights, intercept, feature_names: None })
    }

    /// Validate an upstream export and narrow it to `f32`.
    ///
    /// # Errors
    ///
    /// - [`ModelError::InvalidModel`] if the coefficient list is empty, or a
    ///   value is not finite once narrowed to `f32`
    /// - [`ModelError::ArityMismatch`] if feature names are present and their
    ///   count differs from the coefficient count
    pub fn from_trained(trained: &TrainedModel) -> Result<Self, ModelError> {
        let weights = trained.coef.iter().map(|&w| w as f32).collect();
        let descriptor = Self::new(weights, trained.intercept as f32)?;
        let descriptor = match &trained.feature_names {
            Some(names) => descriptor.with_feature_names(names.clone())?,
            None => descriptor,
        };
        log::debug!(
            "validated model: {} features, intercept {}",
            descriptor.n_features(),
            descriptor.intercept
        );
        Ok(descriptor)
    }

    /// Attach feature names.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ArityMismatch`] if `names.len() != n_features()`.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self, ModelError> {
        if names.len() != self.weights.len() {
            return Err(ModelError::ArityMismatch {
                declared: names.len(),
                actual: self.weights.len(),
            });
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    /// Number of input features (always `weights().len()`).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Coefficients in training feature order.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Bias term.
    #[inline]
    pub fn intercept(&self) -> f32 {
        self.intercept
    }

    /// Feature names, if the export carried them.
    #[inline]
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// Convert to a fixed-arity [`LinearModel`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ArityMismatch`] if `N != n_features()`.
    pub fn to_fixed<const N: usize>(&self) -> Result<LinearModel<N>, ModelError> {
        LinearModel::try_from_slice(&self.weights, self.intercept)
    }

    /// Host-side prediction, bit-identical to the generated artifact's `predict`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ArityMismatch`] if `features.len() != n_features()`.
    pub fn predict(&self, features: &[f32]) -> Result<f32, ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::ArityMismatch {
                declared: self.weights.len(),
                actual: features.len(),
            });
        }
        Ok(weighted_sum(&self.weights, features) + self.intercept)
    }
}

impl<const N: usize> From<LinearModel<N>> for ModelDescriptor {
    fn from(model: LinearModel<N>) -> Self {
        let (weights, intercept) = model.into_parts();
        Self { weights: weights.to_vec(), intercept, feature_names: None }
    }
}
