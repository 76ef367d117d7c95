//! Linear model inference.
//!
//! - [`LinearModel`](crate::repr::LinearModel): Weight table storage
//! - [`LinearModelPredict`]: Prediction trait for single-vector inference
//!
//! # Evaluation Rule
//!
//! ```text
//! output = (Σ feature[i] × weight[i], i = 0..N) + intercept
//! ```
//!
//! The sum is accumulated in `f32`, starting from zero, index 0 upward. The
//! routine is pure, allocation-free and runs in the same number of steps for
//! every input.
//!
//! # Usage
//!
//! ```
//! use linport::repr::LinearModel;
//! use linport::inference::LinearModelPredict;
//!
//! let model = LinearModel::new([0.5, 0.3], 0.1);
//! let output = model.predict(&[2.0, 3.0]);
//! assert!((output - 2.0).abs() < 1e-6);
//! ```

mod linear;

pub use linear::LinearModelPredict;
#[cfg(feature = "std")]
pub(crate) use linear::weighted_sum;
