//! # variantlib_config
//!
//! Priority configuration for variant resolution.
//!
//! A `variants.toml` file is looked up in the current directory, the active
//! virtual environment, the user configuration directory and the system
//! configuration directory; the first one found is used. Priorities from
//! several sources can be merged with [`aggregate_priorities`].
//!
//! ```toml
//! namespace_priorities = ["nvidia", "x86_64"]
//!
//! [feature_priorities]
//! nvidia = ["sm_arch"]
//!
//! [property_priorities.x86_64]
//! level = ["v4", "v3", "v2"]
//! ```

pub mod aggregate;
pub mod configuration;
pub mod error;

pub use aggregate::{
    aggregate_feature_priorities, aggregate_namespace_priorities, aggregate_priorities,
    aggregate_property_priorities,
};
pub use configuration::{
    CONFIG_FILENAME, ConfigEnvironment, ConfigSearchPaths, VariantConfiguration,
};
pub use error::ConfigError;
