//! Importer for legacy `Eloquent::ML::Port::LinearRegression` headers.
//!
//! These headers pass the weights through a variadic `dot(float *x, ...)` and
//! declare the arity twice by hand, once in `va_start(w, K)` and once in the
//! loop bound `i < K`:
//!
//! ```text
//! float predict(float *x) {
//!     return dot(x, w0, w1, ..., wk) + intercept;
//! }
//! float dot(float *x, ...) {
//!     va_list w;
//!     va_start(w, K);
//!     for (uint16_t i = 0; i < K; i++) { ... }
//! }
//! ```
//!
//! [`parse`] extracts all of it without trusting either literal;
//! [`LegacyHeader::to_descriptor`] then rejects any disagreement with the
//! actual coefficient count.

use std::path::Path;

use crate::error::ModelError;
use crate::export::{ModelDescriptor, TrainedModel};

// =============================================================================
// Error types
// =============================================================================

/// Error type for legacy header import.
#[derive(Debug, thiserror::Error)]
pub enum LegacyParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing section: {0}")]
    MissingSection(&'static str),
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("template placeholder was never filled in: {0}")]
    UnfilledTemplate(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

// =============================================================================
// LegacyHeader
// =============================================================================

/// Everything a legacy header states about its model.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyHeader {
    /// Name of the generated class, if found.
    pub class_name: Option<String>,
    /// Coefficients passed to `dot(x, ...)`, in order.
    pub coefficients: Vec<f64>,
    /// Constant added after the `dot(...)` call.
    pub intercept: f64,
    /// Second argument of `va_start(w, K)`.
    pub va_start_arity: Option<usize>,
    /// Loop bound in `for (...; i < K; ...)`.
    pub loop_bound: Option<usize>,
}

impl LegacyHeader {
    /// Arity literals that disagree with the coefficient count, loop bound first.
    pub fn arity_drift(&self) -> Option<ModelError> {
        let actual = self.coefficients.len();
        [self.loop_bound, self.va_start_arity]
            .into_iter()
            .flatten()
            .find(|&declared| declared != actual)
            .map(|declared| ModelError::ArityMismatch { declared, actual })
    }

    /// Convert to an upstream model, rejecting arity drift.
    pub fn to_trained(&self) -> Result<TrainedModel, LegacyParseError> {
        if let Some(err) = self.arity_drift() {
            log::warn!(
                "legacy header {} disagrees with itself: {err}",
                self.class_name.as_deref().unwrap_or("<unnamed>")
            );
            return Err(err.into());
        }
        Ok(TrainedModel::new(self.coefficients.clone(), self.intercept))
    }

    /// Convert to a validated descriptor, rejecting arity drift.
    pub fn to_descriptor(&self) -> Result<ModelDescriptor, LegacyParseError> {
        Ok(ModelDescriptor::from_trained(&self.to_trained()?)?)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse a legacy header from source text.
pub fn parse(source: &str) -> Result<LegacyHeader, LegacyParseError> {
    let source = strip_comments(source);

    let call_start = source
        .find("return dot(")
        .ok_or(LegacyParseError::MissingSection("return dot(...)"))?
        + "return dot(".len();
    let call_len = source[call_start..]
        .find(')')
        .ok_or(LegacyParseError::MissingSection("closing ')' of dot(...)"))?;
    let args: Vec<&str> = source[call_start..call_start + call_len]
        .split(',')
        .map(str::trim)
        .collect();

    // First argument is the feature pointer
    let coefficients = args
        .iter()
        .skip(1)
        .filter(|arg| !arg.is_empty())
        .map(|arg| parse_f64("coefficient", arg))
        .collect::<Result<Vec<_>, _>>()?;

    let rest = &source[call_start + call_len + 1..];
    let statement_end = rest
        .find(';')
        .ok_or(LegacyParseError::MissingSection("end of return statement"))?;
    let intercept = match rest[..statement_end].trim().strip_prefix('+') {
        Some(value) => parse_f64("intercept", value.trim())?,
        None => return Err(LegacyParseError::MissingSection("intercept after dot(...)")),
    };

    let va_start_arity = match section(&source, "va_start(", ")") {
        Some(args) => match args.split(',').nth(1) {
            Some(arity) => Some(parse_usize("va_start", arity.trim())?),
            None => None,
        },
        None => None,
    };
    let loop_bound = match section(&source, "i <", ";") {
        Some(bound) => Some(parse_usize("loop bound", bound.trim())?),
        None => None,
    };

    let class_name = section(&source, "class ", "{")
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let header = LegacyHeader { class_name, coefficients, intercept, va_start_arity, loop_bound };
    log::debug!(
        "parsed legacy header: {} coefficients, va_start {:?}, loop bound {:?}",
        header.coefficients.len(),
        header.va_start_arity,
        header.loop_bound
    );
    Ok(header)
}

/// Read and parse a legacy header file.
pub fn read_path(path: impl AsRef<Path>) -> Result<LegacyHeader, LegacyParseError> {
    parse(&std::fs::read_to_string(path)?)
}

/// Text between the first `start` marker and the next `end` marker.
fn section<'a>(source: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = source.find(start)? + start.len();
    let len = source[from..].find(end)?;
    Some(&source[from..from + len])
}

/// Drop `// ...` line comments and `/* ... */` block comments.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    loop {
        let (start, is_block) = match (rest.find("//"), rest.find("/*")) {
            (Some(line), Some(block)) if block < line => (block, true),
            (Some(line), _) => (line, false),
            (None, Some(block)) => (block, true),
            (None, None) => {
                out.push_str(rest);
                return out;
            }
        };
        out.push_str(&rest[..start]);
        rest = if is_block {
            match rest[start + 2..].find("*/") {
                Some(close) => &rest[start + 2 + close + 2..],
                None => "",
            }
        } else {
            match rest[start..].find('\n') {
                Some(newline) => &rest[start + newline..],
                None => "",
            }
        };
    }
}

fn is_placeholder(token: &str) -> bool {
    token == "..."
        || token
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}

fn parse_f64(field: &'static str, token: &str) -> Result<f64, LegacyParseError> {
    if is_placeholder(token) {
        return Err(LegacyParseError::UnfilledTemplate(token.to_string()));
    }
    token
        .trim_end_matches(['f', 'F'])
        .parse()
        .map_err(|_| LegacyParseError::InvalidNumber { field, value: token.to_string() })
}

fn parse_usize(field: &'static str, token: &str) -> Result<usize, LegacyParseError> {
    if is_placeholder(token) {
        return Err(LegacyParseError::UnfilledTemplate(token.to_string()));
    }
    token
        .parse()
        .map_err(|_| LegacyParseError::InvalidNumber { field, value: token.to_string() })
}
