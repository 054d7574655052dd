//! Error type of the public API

use std::path::PathBuf;

use thiserror::Error;
use variantlib_config::ConfigError;
use variantlib_resolver::ResolverError;
use variantlib_types::{ProviderError, ValidationError};

#[cfg(feature = "miette")]
use miette::Diagnostic;

/// Errors returned by the public API
#[derive(Debug, Error)]
#[cfg_attr(feature = "miette", derive(Diagnostic))]
pub enum VariantError {
    #[error(transparent)]
    #[cfg_attr(feature = "miette", diagnostic(transparent))]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[cfg_attr(feature = "miette", diagnostic(transparent))]
    Resolver(#[from] ResolverError),

    #[error(transparent)]
    #[cfg_attr(feature = "miette", diagnostic(transparent))]
    Config(#[from] ConfigError),

    /// A provider failed; its error is passed through unchanged
    #[error("The variant provider for namespace `{namespace}` failed")]
    Provider {
        namespace: String,
        #[source]
        source: ProviderError,
    },

    /// A namespace is used but no provider is registered for it
    #[error("No variant provider is registered for namespace `{0}`")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(help("register a provider for this namespace or remove it from `namespace_priorities`"))
    )]
    MissingProvider(String),

    /// Failed to read a directory from disk
    #[error("Could not read directory ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
