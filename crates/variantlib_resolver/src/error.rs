//! Error types for variant resolution

use thiserror::Error;
use variantlib_types::ValidationError;

#[cfg(feature = "miette")]
use miette::Diagnostic;

/// Errors that abort a resolution pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "miette", derive(Diagnostic))]
pub enum ResolverError {
    /// Malformed input: bad names, duplicate axes or unfiltered descriptions
    #[error(transparent)]
    #[cfg_attr(feature = "miette", diagnostic(transparent))]
    Validation(#[from] ValidationError),

    /// The priority setup is ambiguous; the operator has to fix the configuration
    #[error("The variant environment needs to be (re)configured: {0}")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(help("set `namespace_priorities` in your variants.toml"))
    )]
    Configuration(String),
}
