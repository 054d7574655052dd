//! Error types for variant value construction

use thiserror::Error;

#[cfg(feature = "miette")]
use miette::Diagnostic;

/// Errors raised when a variant value, or a collection of them, is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "miette", derive(Diagnostic))]
pub enum ValidationError {
    /// The string form does not have the expected number of `::` separated segments
    #[error("Invalid format: `{input}`, expected format: `{expected}`")]
    InvalidFormat {
        input: String,
        expected: &'static str,
    },

    /// A field does not match its character class
    #[error("Value `{value}` must match regex {pattern}")]
    PatternMismatch {
        value: String,
        pattern: &'static str,
    },

    /// Two properties of one description share the same `namespace :: feature`
    #[error("Duplicate value found: `{namespace} :: {feature}` in list")]
    DuplicateFeature { namespace: String, feature: String },

    /// A list that must not be empty is empty
    #[error("`{field}` must have at least one element")]
    EmptyList { field: &'static str },

    /// A list that must be unique contains the same value twice
    #[error("Duplicate value found: `{value}` in `{field}`")]
    DuplicateValue { field: &'static str, value: String },

    /// Descriptions were sorted before being filtered against the supported properties
    #[error(
        "Property `{property}` is not part of the priority list: filtering should be applied before sorting"
    )]
    #[cfg_attr(
        feature = "miette",
        diagnostic(help("run the descriptions through the filtering stages first"))
    )]
    UnfilteredInput { property: String },
}
