//! Fixed-arity linear model descriptor.

use approx::{AbsDiffEq, RelativeEq};

use crate::error::{InvalidModelKind, ModelError};

/// Linear regression model (weights + intercept) with a compile-time arity.
///
/// The feature count is the const generic `N`. It sizes the weight table and
/// bounds the prediction loop, so a descriptor cannot disagree with itself:
///
/// ```text
/// weights[i]  → coefficient of feature i, i in 0..N
/// intercept   → added once per prediction
/// ```
///
/// Descriptors are meant to live in a `static` or `const` of the generated
/// artifact. There is no mutation API.
///
/// # Example
///
/// ```
/// use linport::LinearModel;
///
/// // N is inferred from the array literal
/// const MODEL: LinearModel<3> = LinearModel::new([0.5, -0.25, 0.0], 1.5);
///
/// assert_eq!(MODEL.n_features(), 3);
/// assert_eq!(MODEL.weight(1), -0.25);
/// assert_eq!(MODEL.intercept(), 1.5);
/// ```
///
/// An empty model is rejected when the artifact is built:
///
/// ```compile_fail
/// use linport::LinearModel;
///
/// static EMPTY: LinearModel<0> = LinearModel::new([], 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel<const N: usize> {
    weights: [f32; N],
    intercept: f32,
}

impl<const N: usize> LinearModel<N> {
    /// Number of input features, as an associated constant.
    pub const N_FEATURES: usize = N;

    /// Create a descriptor from a weight table and an intercept.
    ///
    /// Fails to compile for `N == 0`.
    pub const fn new(weights: [f32; N], intercept: f32) -> Self {
        const { assert!(N > 0, "a linear model needs at least one feature") };
        Self { weights, intercept }
    }

    /// Create a descriptor from a run-time coefficient slice.
    ///
    /// # Errors
    ///
    /// - [`InvalidModelKind::Empty`] if `weights` is empty
    /// - [`ModelError::ArityMismatch`] if `weights.len() != N`
    /// - [`InvalidModelKind::NonFiniteWeight`] / [`InvalidModelKind::NonFiniteIntercept`]
    ///   for NaN or infinite values
    pub fn try_from_slice(weights: &[f32], intercept: f32) -> Result<Self, ModelError> {
        if weights.is_empty() {
            return Err(InvalidModelKind::Empty.into());
        }
        let table: [f32; N] = weights
            .try_into()
            .map_err(|_| ModelError::ArityMismatch { declared: N, actual: weights.len() })?;
        check_finite(&table, intercept)?;
        Ok(Self::new(table, intercept))
    }

    /// Number of input features.
    #[inline]
    pub const fn n_features(&self) -> usize {
        N
    }

    /// Get the coefficient of a feature.
    ///
    /// # Panics
    ///
    /// Panics if `feature >= N`.
    #[inline]
    pub const fn weight(&self, feature: usize) -> f32 {
        self.weights[feature]
    }

    /// The full weight table, in training feature order.
    #[inline]
    pub const fn weights(&self) -> &[f32; N] {
        &self.weights
    }

    /// The bias term.
    #[inline]
    pub const fn intercept(&self) -> f32 {
        self.intercept
    }

    /// Check that every weight and the intercept are finite.
    ///
    /// `new` cannot check this in a const context; generated artifacts are
    /// validated before any literal is written.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_finite(&self.weights, self.intercept)
    }

    /// Split into `(weights, intercept)`.
    #[inline]
    pub const fn into_parts(self) -> ([f32; N], f32) {
        (self.weights, self.intercept)
    }
}

/// Reject NaN/infinite coefficients.
pub(crate) fn check_finite(weights: &[f32], intercept: f32) -> Result<(), ModelError> {
    if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
        return Err(InvalidModelKind::NonFiniteWeight { index }.into());
    }
    if !intercept.is_finite() {
        return Err(InvalidModelKind::NonFiniteIntercept.into());
    }
    Ok(())
}

impl<const N: usize> AbsDiffEq for LinearModel<N> {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.intercept.abs_diff_eq(&other.intercept, epsilon)
            && self
                .weights
                .iter()
                .zip(other.weights.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const N: usize> RelativeEq for LinearModel<N> {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.intercept.relative_eq(&other.intercept, epsilon, max_relative)
            && self
                .weights
                .iter()
                .zip(other.weights.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
