//! Model contract errors.
//!
//! These are raised while a descriptor is being built, never from the
//! prediction hot path. Available without `std`.

/// Why a coefficient list was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidModelKind {
    /// The coefficient list has no entries.
    Empty,
    /// A weight is NaN or infinite (or overflows `f32`).
    NonFiniteWeight { index: usize },
    /// The intercept is NaN or infinite (or overflows `f32`).
    NonFiniteIntercept,
}

impl core::fmt::Display for InvalidModelKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "coefficient list is empty"),
            Self::NonFiniteWeight { index } => write!(f, "weight {index} is not finite"),
            Self::NonFiniteIntercept => write!(f, "intercept is not finite"),
        }
    }
}

/// Error type for descriptor construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The coefficient list is empty or malformed.
    #[error("invalid model: {0}")]
    InvalidModel(InvalidModelKind),

    /// A declared arity disagrees with the number of values supplied.
    #[error("arity mismatch: declared {declared} features, got {actual}")]
    ArityMismatch { declared: usize, actual: usize },
}

impl ModelError {
    /// Returns `true` for [`ModelError::InvalidModel`].
    pub fn is_invalid_model(&self) -> bool {
        matches!(self, Self::InvalidModel(_))
    }

    /// Returns `true` for [`ModelError::ArityMismatch`].
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, Self::ArityMismatch { .. })
    }
}

impl From<InvalidModelKind> for ModelError {
    fn from(kind: InvalidModelKind) -> Self {
        Self::InvalidModel(kind)
    }
}
