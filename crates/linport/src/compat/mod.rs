//! Importers for artifacts produced by other tools.
//!
//! - [`eloquent`]: hand-edited or `micromlgen`-style Arduino `LinearRegression`
//!   headers that bind their weights through a variadic call. Importing one
//!   checks it for arity drift and unfilled placeholders, and yields a
//!   [`ModelDescriptor`](crate::export::ModelDescriptor) that can be
//!   regenerated in the fixed-shape format.

pub mod eloquent;

pub use eloquent::{LegacyHeader, LegacyParseError};
