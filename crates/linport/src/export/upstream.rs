//! Reader for the training step's model export.
//!
//! The training collaborator is opaque; all it has to provide is an ordered
//! coefficient list and a scalar intercept, as JSON:
//!
//! ```json
//! {
//!   "coef_": [0.38659299, -0.84765902, 0.0],
//!   "intercept_": 2.72852234,
//!   "feature_names": ["temperatura", "humidade", "ano"]
//! }
//! ```
//!
//! `coef`/`coef_`/`weights` and `intercept`/`intercept_`/`bias` are accepted.
//! The intercept may also be a numeric string or a one-element array, and a
//! coefficient matrix with a single row is flattened.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Error type for reading an upstream model export.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Custom deserializers for exporter-specific formats
// =============================================================================

fn deserialize_intercept<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as SerdeError;

    let value = Value::deserialize(deserializer)?;
    // Normalize the value by unwrapping one-element arrays to a scalar
    let mut cur = value;
    loop {
        match cur {
            Value::Number(n) => {
                return n
                    .as_f64()
                    .ok_or_else(|| SerdeError::custom("invalid number"));
            }
            Value::String(s) => {
                return s.trim().parse::<f64>().map_err(|_| {
                    SerdeError::custom(format!("cannot parse intercept from string: {s}"))
                });
            }
            Value::Array(arr) => {
                if arr.len() != 1 {
                    return Err(SerdeError::custom(format!(
                        "intercept array must have exactly one element, got {}",
                        arr.len()
                    )));
                }
                cur = arr.into_iter().next().unwrap_or(Value::Null);
            }
            _ => {
                return Err(SerdeError::custom(
                    "intercept must be number, string, or array",
                ));
            }
        }
    }
}

fn deserialize_coef<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as SerdeError;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coef {
        Flat(Vec<f64>),
        Rows(Vec<Vec<f64>>),
    }

    match Coef::deserialize(deserializer)? {
        Coef::Flat(coef) => Ok(coef),
        Coef::Rows(mut rows) => {
            if rows.len() != 1 {
                return Err(SerdeError::custom(format!(
                    "only single-output models are supported, got {} coefficient rows",
                    rows.len()
                )));
            }
            Ok(rows.remove(0))
        }
    }
}

// =============================================================================
// TrainedModel
// =============================================================================

/// A trained linear model as exported by the training step.
///
/// Values are kept in `f64` as exported; narrowing to `f32` and validation
/// happen in [`ModelDescriptor::from_trained`](super::ModelDescriptor::from_trained).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    /// Ordered coefficients, one per feature.
    #[serde(alias = "coef_", alias = "weights", deserialize_with = "deserialize_coef")]
    pub coef: Vec<f64>,

    /// Bias term.
    #[serde(alias = "intercept_", alias = "bias", deserialize_with = "deserialize_intercept")]
    pub intercept: f64,

    /// Optional feature names, only used to annotate generated code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl TrainedModel {
    /// Create from coefficients and intercept.
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept, feature_names: None }
    }

    /// Attach feature names.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ReadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let model = Self::from_reader(BufReader::new(file))?;
        log::debug!(
            "read upstream model from {}: {} coefficients",
            path.display(),
            model.coef.len()
        );
        Ok(model)
    }
}
