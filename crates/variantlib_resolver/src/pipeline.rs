//! End-to-end resolution: filter candidates, then rank them

use variantlib_types::{
    ValidationError, VariantDescription, VariantFeature, VariantPriorities, VariantProperty,
};

use crate::error::ResolverError;
use crate::filtering::{
    filter_variants_by_features, filter_variants_by_namespaces, filter_variants_by_property,
    remove_duplicates,
};
use crate::sorting::{sort_variant_properties, sort_variants_descriptions};

/// Namespaces, features and properties explicitly rejected by the user.
///
/// Empty lists reject nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenVariants {
    pub namespaces: Vec<String>,
    pub features: Vec<VariantFeature>,
    pub properties: Vec<VariantProperty>,
}

impl ForbiddenVariants {
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty() && self.features.is_empty() && self.properties.is_empty()
    }
}

/// Keep the descriptions the environment supports and the user did not reject.
///
/// Duplicates are dropped first, then forbidden namespaces and features, and
/// finally every description using a property outside of `supported`.
pub fn filter_variants<'a, I>(
    descriptions: I,
    supported: &'a [VariantProperty],
    forbidden: &'a ForbiddenVariants,
) -> Result<impl Iterator<Item = VariantDescription> + 'a, ValidationError>
where
    I: IntoIterator<Item = VariantDescription> + 'a,
{
    let result = remove_duplicates(descriptions);
    let result = filter_variants_by_namespaces(result, &forbidden.namespaces)?;
    let result = filter_variants_by_features(result, &forbidden.features);
    Ok(filter_variants_by_property(
        result,
        supported,
        &forbidden.properties,
    ))
}

/// Filter and rank `descriptions`, most preferred first.
///
/// `supported` is ranked with `priorities` first; descriptions are then
/// ordered by the supported properties they contain. The null variant always
/// closes the result, whether or not it was among the candidates.
pub fn sort_and_filter_supported_variants(
    descriptions: Vec<VariantDescription>,
    supported: &[VariantProperty],
    priorities: &VariantPriorities,
    forbidden: &ForbiddenVariants,
) -> Result<Vec<VariantDescription>, ResolverError> {
    let filtered = filter_variants(descriptions, supported, forbidden)?.collect::<Vec<_>>();

    let sorted_supported = sort_variant_properties(supported, priorities)?;
    let mut result = sort_variants_descriptions(filtered, &sorted_supported)?;

    if !result.last().is_some_and(VariantDescription::is_null_variant) {
        result.push(VariantDescription::null());
    }
    Ok(result)
}
