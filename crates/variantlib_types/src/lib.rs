//! # variantlib_types
//!
//! Immutable value types describing package variants.
//!
//! - [`VariantFeature`] and [`VariantProperty`]: `namespace :: feature [:: value]`
//! - [`VariantDescription`]: a canonical set of properties with a short content hash
//! - [`VariantPriorities`]: namespace, feature and value orderings
//! - [`ProviderConfig`] and the [`VariantProvider`] trait implemented by providers
//!
//! ## Example
//!
//! ```rust
//! use variantlib_types::{VariantDescription, VariantProperty};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cuda: VariantProperty = "nvidia :: cuda_version_lower_bound :: 12.8".parse()?;
//! let level: VariantProperty = "x86_64 :: level :: v3".parse()?;
//!
//! let a = VariantDescription::new([cuda.clone(), level.clone()])?;
//! let b = VariantDescription::new([level, cuda])?;
//!
//! // Identity does not depend on construction order
//! assert_eq!(a.hexdigest(), b.hexdigest());
//! assert_eq!(VariantDescription::null().hexdigest(), "00000000");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod priorities;
pub mod provider;
pub mod validation;
pub mod variant;

pub use error::ValidationError;
pub use priorities::{FeaturePriorities, PropertyPriorities, VariantPriorities};
pub use provider::{ProviderConfig, ProviderError, VariantFeatureConfig, VariantProvider};
pub use variant::{
    NULL_VARIANT_HASH, VARIANT_HASH_LEN, VariantDescription, VariantFeature, VariantProperty,
};
