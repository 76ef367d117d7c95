//! Artifact generation configuration.

use std::fmt;
use std::str::FromStr;

use bon::Builder;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Fixed precision must produce a decimal point and stay within f64 digits.
    #[error("precision must be in 1..=17, got {0}")]
    InvalidPrecision(usize),
    /// A name that ends up in generated source is not an identifier.
    #[error("{field} must be an identifier, got {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },
    /// A name that is a keyword or collides with an item of the generated source.
    #[error("{field} {value:?} is reserved in generated source")]
    ReservedIdentifier { field: &'static str, value: String },
    /// Unknown target name.
    #[error("unknown target: {0} (expected rust|arduino)")]
    UnknownTarget(String),
}

// =============================================================================
// Target
// =============================================================================

/// Language of the generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// A Rust module with a `static LinearModel<N>` and a `predict` function.
    #[default]
    Rust,
    /// A header-only Arduino C++ class.
    Arduino,
}

impl Target {
    /// Conventional file extension for the target.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Rust => "rs",
            Self::Arduino => "h",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rust => write!(f, "rust"),
            Self::Arduino => write!(f, "arduino"),
        }
    }
}

impl FromStr for Target {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rust" | "rs" => Ok(Self::Rust),
            "arduino" | "cpp" | "c++" => Ok(Self::Arduino),
            _ => Err(ConfigError::UnknownTarget(s.to_string())),
        }
    }
}

// =============================================================================
// ExportConfig
// =============================================================================

/// Configuration for artifact generation.
///
/// # Example
///
/// ```
/// use linport::export::{ExportConfig, Target};
///
/// let config = ExportConfig::builder()
///     .target(Target::Arduino)
///     .precision(8)
///     .name("IrrigationModel")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.namespace, "Linport");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct ExportConfig {
    /// Output language. Default: [`Target::Rust`].
    #[builder(default)]
    pub target: Target,

    /// Digits after the decimal point for every literal.
    ///
    /// `None` (default) writes the shortest literal that parses back to the
    /// exact `f32` value.
    pub precision: Option<usize>,

    /// Name of the generated model (class name for Arduino, static name for Rust).
    /// Default: `LinearRegression`.
    #[builder(default = String::from("LinearRegression"), into)]
    pub name: String,

    /// Enclosing C++ namespace (Arduino only). Default: `Linport`.
    #[builder(default = String::from("Linport"), into)]
    pub namespace: String,

    /// Path of the runtime crate in generated Rust code. Default: `linport`.
    #[builder(default = String::from("linport"), into)]
    pub crate_path: String,
}

/// Custom finishing function that validates the config.
impl<S: export_config_builder::IsComplete> ExportConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is invalid:
    /// - `precision` outside `1..=17`
    /// - `name`, `namespace` not identifiers, Rust/C++ keywords, or (for
    ///   `name`) colliding with `N_FEATURES`, `NUM_FEATURES` or `predict`
    /// - `crate_path` not a `::`-separated path of identifiers
    pub fn build(self) -> Result<ExportConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

impl ExportConfig {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(precision) = self.precision {
            if !(1..=17).contains(&precision) {
                return Err(ConfigError::InvalidPrecision(precision));
            }
        }
        check_identifier("name", &self.name)?;
        check_identifier("namespace", &self.namespace)?;
        if GENERATED_ITEMS.contains(&self.name.as_str())
            || GENERATED_ITEMS.contains(&screaming_snake_case(&self.name).as_str())
        {
            return Err(ConfigError::ReservedIdentifier { field: "name", value: self.name.clone() });
        }
        if !self.crate_path.split("::").all(is_identifier) {
            return Err(ConfigError::InvalidIdentifier {
                field: "crate_path",
                value: self.crate_path.clone(),
            });
        }
        Ok(())
    }

    /// Conventional file name for the artifact: `linear_regression.rs` or
    /// `LinearRegression.h`.
    pub fn file_name(&self) -> String {
        let stem = match self.target {
            Target::Rust => screaming_snake_case(&self.name).to_ascii_lowercase(),
            Target::Arduino => self.name.clone(),
        };
        format!("{stem}.{}", self.target.extension())
    }
}

/// Items every generated artifact declares next to the model.
const GENERATED_ITEMS: &[&str] = &["N_FEATURES", "NUM_FEATURES", "predict"];

/// Keywords of either target language.
const KEYWORDS: &[&str] = &[
    // C++
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
    // Rust
    "as", "async", "await", "crate", "dyn", "fn", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "self", "Self", "super", "trait", "type", "unsafe", "use",
    "where", "abstract", "become", "box", "final", "macro", "override", "priv", "typeof",
    "unsized", "yield",
];

fn check_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if !is_identifier(value) {
        return Err(ConfigError::InvalidIdentifier { field, value: value.to_string() });
    }
    if KEYWORDS.contains(&value) {
        return Err(ConfigError::ReservedIdentifier { field, value: value.to_string() });
    }
    Ok(())
}

/// `LinearRegression` / `irrigation_model` → `LINEAR_REGRESSION` / `IRRIGATION_MODEL`.
pub(crate) fn screaming_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        out.push(c.to_ascii_uppercase());
    }
    out
}

/// ASCII identifier valid in both Rust and C++.
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    value != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.target, Target::Rust);
        assert_eq!(config.precision, None);
        assert_eq!(config.name, "LinearRegression");
        assert_eq!(config.namespace, "Linport");
        assert_eq!(config.crate_path, "linport");
    }

    #[test]
    fn builder_validates_precision() {
        let err = ExportConfig::builder().precision(0).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidPrecision(0));

        let err = ExportConfig::builder().precision(18).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidPrecision(18));

        assert!(ExportConfig::builder().precision(8).build().is_ok());
    }

    #[test]
    fn builder_validates_identifiers() {
        let err = ExportConfig::builder().name("9lives").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { field: "name", .. }));

        let err = ExportConfig::builder().namespace("Eloquent::ML").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { field: "namespace", .. }));

        assert!(ExportConfig::builder().crate_path("firmware::linport").build().is_ok());
        let err = ExportConfig::builder().crate_path("firmware::").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { field: "crate_path", .. }));
    }

    #[rstest]
    #[case("name", "n_features")]
    #[case("name", "N_FEATURES")]
    #[case("name", "NUM_FEATURES")]
    #[case("name", "predict")]
    #[case("name", "class")]
    #[case("name", "float")]
    #[case("namespace", "namespace")]
    #[case("namespace", "fn")]
    fn builder_rejects_reserved_names(#[case] field: &str, #[case] value: &str) {
        let builder = ExportConfig::builder();
        let err = match field {
            "name" => builder.name(value).build(),
            _ => builder.namespace(value).build(),
        }
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ReservedIdentifier {
                field: if field == "name" { "name" } else { "namespace" },
                value: value.to_string()
            }
        );
    }

    #[test]
    fn screaming_snake() {
        assert_eq!(screaming_snake_case("LinearRegression"), "LINEAR_REGRESSION");
        assert_eq!(screaming_snake_case("irrigation_model"), "IRRIGATION_MODEL");
        assert_eq!(screaming_snake_case("Model2D"), "MODEL2_D");
        assert_eq!(screaming_snake_case("nFeatures"), "N_FEATURES");
    }

    #[test]
    fn file_name_follows_target() {
        assert_eq!(ExportConfig::default().file_name(), "linear_regression.rs");

        let config = ExportConfig::builder()
            .target(Target::Arduino)
            .name("IrrigationModel")
            .build()
            .unwrap();
        assert_eq!(config.file_name(), "IrrigationModel.h");
    }

    #[test]
    fn target_from_str() {
        assert_eq!("rust".parse::<Target>().unwrap(), Target::Rust);
        assert_eq!("Arduino".parse::<Target>().unwrap(), Target::Arduino);
        assert_eq!(
            "python".parse::<Target>().unwrap_err(),
            ConfigError::UnknownTarget("python".to_string())
        );
        assert_eq!(Target::Arduino.extension(), "h");
        assert_eq!(Target::Rust.to_string(), "rust");
    }
}
