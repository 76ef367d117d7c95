//! Canonical model representations.
//!
//! [`LinearModel`] is the descriptor baked into every artifact: a weight table
//! of exactly `N` coefficients plus an intercept.
//!
//! # Example
//!
//! ```
//! use linport::repr::LinearModel;
//!
//! // y = 0.5*x0 + 0.3*x1 + 0.1
//! let model = LinearModel::new([0.5, 0.3], 0.1);
//!
//! assert_eq!(model.weight(0), 0.5);
//! assert_eq!(model.weight(1), 0.3);
//! assert_eq!(model.intercept(), 0.1);
//! ```

mod linear;

pub use linear::LinearModel;
#[cfg(feature = "std")]
pub(crate) use linear::check_finite;
