//! # variantlib_resolver
//!
//! Pure functions turning a catalogue of variant descriptions into a
//! priority-ordered list of variants the current environment supports.
//!
//! - [`filtering`]: lazy, order-preserving filters over descriptions
//! - [`sorting`]: three-tier property ranking and description ranking
//! - [`pipeline`]: both of the above composed, null variant appended
//! - [`combination`]: enumeration of every description a set of axes allows
//! - [`abi_dependency`]: installed package versions as supported properties
//!
//! ## Example
//!
//! ```rust
//! use variantlib_resolver::{ForbiddenVariants, sort_and_filter_supported_variants};
//! use variantlib_types::{VariantDescription, VariantPriorities, VariantProperty};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let v3: VariantProperty = "x86_64 :: level :: v3".parse()?;
//! let v2: VariantProperty = "x86_64 :: level :: v2".parse()?;
//! let v4: VariantProperty = "x86_64 :: level :: v4".parse()?;
//!
//! let catalogue = vec![
//!     VariantDescription::new([v2.clone()])?,
//!     VariantDescription::new([v4])?,
//!     VariantDescription::new([v3.clone()])?,
//! ];
//!
//! let ranked = sort_and_filter_supported_variants(
//!     catalogue,
//!     &[v3.clone(), v2.clone()],
//!     &VariantPriorities::default(),
//!     &ForbiddenVariants::default(),
//! )?;
//!
//! assert_eq!(ranked.len(), 3);
//! assert!(ranked[0].contains(&v3));
//! assert!(ranked[1].contains(&v2));
//! assert!(ranked[2].is_null_variant());
//! # Ok(())
//! # }
//! ```

pub mod abi_dependency;
pub mod combination;
pub mod error;
pub mod filtering;
pub mod pipeline;
pub mod sorting;

pub use abi_dependency::{
    Distribution, VARIANT_ABI_DEPENDENCY_ENV, VARIANT_ABI_DEPENDENCY_NAMESPACE,
    inject_abi_dependency, parse_abi_dependency_overrides,
};
pub use combination::{VariantAxis, axes_from_provider_configs, compute_combinations};
pub use error::ResolverError;
pub use filtering::{
    filter_variants_by_features, filter_variants_by_namespaces, filter_variants_by_property,
    remove_duplicates,
};
pub use pipeline::{ForbiddenVariants, filter_variants, sort_and_filter_supported_variants};
pub use sorting::{sort_variant_properties, sort_variants_descriptions};
