//! # variantlib
//!
//! Resolve, filter, rank and hash platform-specific package variants.
//!
//! A variant is a set of `namespace :: feature :: value` properties, for
//! example a CPU instruction-set level or a CUDA version. Providers report
//! which properties the running machine supports; this crate turns a catalogue
//! of published variants into the list the machine can use, most preferred
//! first and always ending with the null variant.
//!
//! The workspace is split into:
//!
//! - [`variantlib_types`]: properties, descriptions, hashes and provider configs
//! - [`variantlib_resolver`]: filtering, ranking, combination and ABI injection
//! - [`variantlib_config`]: `variants.toml` discovery and priority merging
//!
//! ## Example
//!
//! ```rust
//! use variantlib::{
//!     ForbiddenVariants, ProviderConfig, ProviderError, ProviderRegistry, VariantEnvironment,
//!     VariantFeatureConfig, VariantPriorities, VariantProvider, build_variant_catalogue,
//!     get_variant_hashes_by_priority,
//! };
//!
//! struct CpuProvider;
//!
//! impl VariantProvider for CpuProvider {
//!     fn get_all_configs(&self) -> Result<ProviderConfig, ProviderError> {
//!         let level = VariantFeatureConfig::new("level", ["v4", "v3", "v2"])?;
//!         Ok(ProviderConfig::new("x86_64", vec![level])?)
//!     }
//!
//!     fn get_supported_configs(&self) -> Result<ProviderConfig, ProviderError> {
//!         let level = VariantFeatureConfig::new("level", ["v3", "v2"])?;
//!         Ok(ProviderConfig::new("x86_64", vec![level])?)
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = ProviderRegistry::new();
//! registry.register("x86_64", CpuProvider)?;
//!
//! let namespaces = vec!["x86_64".to_string()];
//! let catalogue = build_variant_catalogue(&registry, &namespaces)?;
//! assert_eq!(catalogue.len(), 4);
//!
//! let priorities = VariantPriorities {
//!     namespace_priorities: namespaces,
//!     ..Default::default()
//! };
//! let hashes = get_variant_hashes_by_priority(
//!     catalogue.clone(),
//!     &registry,
//!     &[&priorities],
//!     &ForbiddenVariants::default(),
//!     &VariantEnvironment::default(),
//! )?;
//!
//! // v3, v2, then the null variant; v4 is not supported here
//! assert_eq!(hashes.len(), 3);
//! assert_eq!(hashes[0], catalogue[1].hexdigest());
//! assert_eq!(hashes[2], "00000000");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod console_utils;
pub mod environment;
pub mod error;
pub mod provider;

pub use api::{
    PropertyValidity, VariantValidationResult, build_variant_catalogue,
    get_variant_hashes_by_priority, validate_variant,
};
pub use console_utils::init_logging;
pub use environment::{VariantEnvironment, find_installed_distributions};
pub use error::VariantError;
pub use provider::ProviderRegistry;

pub use variantlib_config::{
    ConfigEnvironment, ConfigError, ConfigSearchPaths, VariantConfiguration, aggregate_priorities,
};
pub use variantlib_resolver::{
    Distribution, ForbiddenVariants, ResolverError, VARIANT_ABI_DEPENDENCY_ENV,
    VARIANT_ABI_DEPENDENCY_NAMESPACE, sort_and_filter_supported_variants,
};
pub use variantlib_types::{
    NULL_VARIANT_HASH, ProviderConfig, ProviderError, VARIANT_HASH_LEN, ValidationError,
    VariantDescription, VariantFeature, VariantFeatureConfig, VariantPriorities, VariantProperty,
    VariantProvider,
};

pub use variantlib_config;
pub use variantlib_resolver;
pub use variantlib_types;
