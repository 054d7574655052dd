//! Error types for variant configuration files

use std::path::PathBuf;

use thiserror::Error;
use variantlib_types::ValidationError;

#[cfg(feature = "miette")]
use miette::Diagnostic;

/// Errors that can occur while loading a `variants.toml` file
#[derive(Debug, Error)]
#[cfg_attr(feature = "miette", derive(Diagnostic))]
pub enum ConfigError {
    /// Failed to read file from disk
    #[error("Could not open file ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unexpected keys
    #[error("Could not parse variant configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A namespace, feature or value does not match its pattern
    #[error(transparent)]
    #[cfg_attr(feature = "miette", diagnostic(transparent))]
    Validation(#[from] ValidationError),
}
