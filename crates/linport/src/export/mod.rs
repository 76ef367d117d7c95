//! Artifact generation.
//!
//! The offline half of the pipeline: read what the training step exported,
//! validate it, and generate a fixed-shape inference artifact.
//!
//! ```text
//! TrainedModel (JSON, f64) ──from_trained──▶ ModelDescriptor (f32, validated)
//!                                                  │
//!                                     render(&descriptor, &ExportConfig)
//!                                                  ▼
//!                                     Rust module / Arduino header
//! ```
//!
//! # Example
//!
//! ```
//! use linport::export::{render, ExportConfig, ModelDescriptor, Target, TrainedModel};
//!
//! let trained = TrainedModel::from_json_str(r#"{"coef_": [0.5, -0.25], "intercept_": 1.5}"#)?;
//! let descriptor = ModelDescriptor::from_trained(&trained)?;
//!
//! let config = ExportConfig::builder().target(Target::Arduino).build()?;
//! let header = render(&descriptor, &config);
//! assert!(header.contains("class LinearRegression"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod codegen;
mod config;
mod descriptor;
mod upstream;

use std::path::Path;

pub use codegen::{render, Artifact};
pub use config::{ConfigError, ExportConfig, ExportConfigBuilder, Target};
pub use descriptor::ModelDescriptor;
pub use upstream::{ReadError, TrainedModel};

use crate::compat::eloquent::LegacyParseError;
use crate::error::ModelError;

/// Errors from the end-to-end export path.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Legacy(#[from] LegacyParseError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Render a descriptor and write it to `path`.
pub fn write_artifact(
    path: impl AsRef<Path>,
    descriptor: &ModelDescriptor,
    config: &ExportConfig,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    std::fs::write(path, render(descriptor, config))?;
    log::info!(
        "wrote {} artifact for {} features to {}",
        config.target,
        descriptor.n_features(),
        path.display()
    );
    Ok(())
}
