//! Source generation for inference artifacts.
//!
//! The generator is the only place coefficient literals are written. The
//! arity of an artifact is never a free literal: in Rust the array literal
//! must have exactly `N_FEATURES` entries or the artifact does not compile, and
//! in C++ `NUM_FEATURES` is computed from the size of the weight table.
//!
//! Rust artifacts look like:
//!
//! ```text
//! use linport::{LinearModel, LinearModelPredict};
//!
//! pub const N_FEATURES: usize = 2;
//!
//! pub static LINEAR_REGRESSION: LinearModel<N_FEATURES> = LinearModel::new(
//!     [
//!         0.6281705,
//!         -1.0061255,
//!     ],
//!     3.0666666,
//! );
//!
//! pub fn predict(features: &[f32; N_FEATURES]) -> f32 { .. }
//! ```

use std::fmt;

use super::config::screaming_snake_case;
use super::{ExportConfig, ModelDescriptor, Target};

const GENERATOR: &str = concat!("linport ", env!("CARGO_PKG_VERSION"));

/// A descriptor paired with its generation settings; `Display` writes the source.
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a> {
    descriptor: &'a ModelDescriptor,
    config: &'a ExportConfig,
}

impl<'a> Artifact<'a> {
    /// Pair a descriptor with a configuration.
    pub fn new(descriptor: &'a ModelDescriptor, config: &'a ExportConfig) -> Self {
        Self { descriptor, config }
    }

    /// Format one coefficient as a literal valid in both Rust and C++
    /// (before the C++ `f` suffix).
    fn literal(&self, value: f32) -> String {
        match self.config.precision {
            Some(precision) => format!("{value:.precision$}"),
            // Debug always keeps a decimal point or an exponent ("1.0", "1e-7")
            None => format!("{value:?}"),
        }
    }

    fn feature_comment(&self, index: usize) -> String {
        match self.descriptor.feature_names() {
            Some(names) => format!(" // {index}: {}", sanitize_comment(&names[index])),
            None => format!(" // {index}"),
        }
    }

    fn write_rust(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.descriptor;
        let c = self.config;
        let static_name = screaming_snake_case(&c.name);

        writeln!(f, "// @generated by {GENERATOR}. Do not edit.")?;
        writeln!(f, "//")?;
        writeln!(f, "// {}: linear regression over {} features.", c.name, d.n_features())?;
        writeln!(f)?;
        writeln!(f, "use {}::{{LinearModel, LinearModelPredict}};", c.crate_path)?;
        writeln!(f)?;
        writeln!(f, "/// Number of input features.")?;
        writeln!(f, "pub const N_FEATURES: usize = {};", d.n_features())?;
        writeln!(f)?;
        writeln!(f, "/// Trained coefficients and intercept.")?;
        writeln!(
            f,
            "pub static {static_name}: LinearModel<N_FEATURES> = LinearModel::new("
        )?;
        writeln!(f, "    [")?;
        for (index, &weight) in d.weights().iter().enumerate() {
            writeln!(f, "        {},{}", self.literal(weight), self.feature_comment(index))?;
        }
        writeln!(f, "    ],")?;
        writeln!(f, "    {},", self.literal(d.intercept()))?;
        writeln!(f, ");")?;
        writeln!(f)?;
        writeln!(f, "/// Predict from a feature vector of exactly `N_FEATURES` values.")?;
        writeln!(f, "#[inline]")?;
        writeln!(f, "pub fn predict(features: &[f32; N_FEATURES]) -> f32 {{")?;
        writeln!(f, "    {static_name}.predict(features)")?;
        writeln!(f, "}}")
    }

    fn write_arduino(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.descriptor;
        let c = self.config;
        let prefix = screaming_snake_case(&c.name);

        writeln!(f, "// @generated by {GENERATOR}. Do not edit.")?;
        writeln!(f, "#pragma once")?;
        writeln!(f)?;
        writeln!(f, "#include <stddef.h>")?;
        writeln!(f)?;
        writeln!(f, "namespace {} {{", c.namespace)?;
        writeln!(f, "    constexpr float {prefix}_WEIGHTS[] = {{")?;
        for (index, &weight) in d.weights().iter().enumerate() {
            writeln!(f, "        {}f,{}", self.literal(weight), self.feature_comment(index))?;
        }
        writeln!(f, "    }};")?;
        writeln!(f, "    constexpr float {prefix}_INTERCEPT = {}f;", self.literal(d.intercept()))?;
        writeln!(
            f,
            "    constexpr size_t {prefix}_NUM_FEATURES = sizeof({prefix}_WEIGHTS) / sizeof({prefix}_WEIGHTS[0]);"
        )?;
        writeln!(f)?;
        writeln!(f, "    class {} {{", c.name)?;
        writeln!(f, "        public:")?;
        writeln!(
            f,
            "            static constexpr size_t NUM_FEATURES = {prefix}_NUM_FEATURES;"
        )?;
        writeln!(
            f,
            "            static_assert(NUM_FEATURES == sizeof({prefix}_WEIGHTS) / sizeof({prefix}_WEIGHTS[0]), \"NUM_FEATURES must match the weight table\");"
        )?;
        writeln!(f)?;
        writeln!(f, "            float predict(const float (&x)[NUM_FEATURES]) const {{")?;
        writeln!(f, "                float dot = 0.0f;")?;
        writeln!(f, "                for (size_t i = 0; i < NUM_FEATURES; i++) {{")?;
        writeln!(f, "                    dot += x[i] * {prefix}_WEIGHTS[i];")?;
        writeln!(f, "                }}")?;
        writeln!(f, "                return dot + {prefix}_INTERCEPT;")?;
        writeln!(f, "            }}")?;
        writeln!(f, "    }};")?;
        writeln!(f, "}}")
    }
}

impl fmt::Display for Artifact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.config.target {
            Target::Rust => self.write_rust(f),
            Target::Arduino => self.write_arduino(f),
        }
    }
}

/// Generate artifact source for a validated descriptor.
pub fn render(descriptor: &ModelDescriptor, config: &ExportConfig) -> String {
    Artifact::new(descriptor, config).to_string()
}

/// Keep feature names on a single comment line.
fn sanitize_comment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}
