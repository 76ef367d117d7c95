//! linport: port trained linear regression models to microcontrollers.
//!
//! A trained model (coefficients + intercept) becomes a fixed-shape, allocation-free
//! inference artifact. The feature count of an artifact is a single const generic,
//! so the arity used to size the weight table is the same one used to iterate it.
//!
//! # Key Types
//!
//! - [`LinearModel`] - Immutable descriptor `{weights: [f32; N], intercept}`
//! - [`LinearModelPredict`] - The inference entry point
//! - [`ModelError`] - Construction-time errors
//!
//! # Exporting (requires `std`)
//!
//! Read an upstream export with [`export::TrainedModel`], validate it into an
//! [`export::ModelDescriptor`], then generate Rust or Arduino source with
//! [`export::render`]. Legacy Arduino headers can be imported through
//! [`compat::eloquent`].
//!
//! # Example
//!
//! ```
//! use linport::{LinearModel, LinearModelPredict};
//!
//! static MODEL: LinearModel<2> = LinearModel::new([0.62817052, -1.00612540], 3.06666667);
//!
//! let y = MODEL.predict(&[1.0, 1.0]);
//! assert!((y - 2.68871179).abs() < 1e-5);
//! ```
//!
//! Passing a vector of the wrong length does not compile:
//!
//! ```compile_fail
//! use linport::{LinearModel, LinearModelPredict};
//!
//! let model = LinearModel::new([0.5, 0.3], 0.1);
//! model.predict(&[1.0, 2.0, 3.0]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

// Re-export approx traits for users who want to compare models
pub use approx;

pub mod error;
pub mod inference;
pub mod repr;

#[cfg(feature = "std")]
pub mod compat;
#[cfg(feature = "std")]
pub mod export;
#[cfg(feature = "std")]
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use error::{InvalidModelKind, ModelError};
pub use inference::LinearModelPredict;
pub use repr::LinearModel;

#[cfg(feature = "std")]
pub use export::{ExportConfig, ModelDescriptor, Target, TrainedModel};
