//! Priority ranking of properties and of whole descriptions

use std::borrow::Cow;
use std::collections::HashSet;

use itertools::Itertools;
use variantlib_types::{
    FeaturePriorities, PropertyPriorities, ValidationError, VariantDescription, VariantPriorities,
    VariantProperty,
};

use crate::error::ResolverError;

/// Rank given to anything missing from a priority list; sorts last.
pub const MAX_RANK: usize = usize::MAX;

/// Position of the property's namespace in `namespace_priorities`.
pub fn namespace_rank(property: &VariantProperty, namespace_priorities: &[String]) -> usize {
    namespace_priorities
        .iter()
        .position(|namespace| namespace == property.namespace())
        .unwrap_or(MAX_RANK)
}

/// Position of the property's feature within its namespace's feature list.
pub fn feature_rank(property: &VariantProperty, feature_priorities: &FeaturePriorities) -> usize {
    feature_priorities
        .get(property.namespace())
        .and_then(|features| features.iter().position(|f| f == property.feature()))
        .unwrap_or(MAX_RANK)
}

/// Position of the property's value within its feature's value list.
pub fn property_rank(
    property: &VariantProperty,
    property_priorities: &PropertyPriorities,
) -> usize {
    property_priorities
        .get(property.namespace())
        .and_then(|features| features.get(property.feature()))
        .and_then(|values| values.iter().position(|v| v == property.value()))
        .unwrap_or(MAX_RANK)
}

/// Order properties by namespace, then feature, then value priority.
///
/// Each pass is a stable sort restricted to the groups formed by the previous
/// one, so a namespace's rank always dominates its features' ranks, which in
/// turn dominate value ranks.
///
/// Properties spanning several namespaces cannot be ordered without
/// `namespace_priorities`; that is a [`ResolverError::Configuration`].
pub fn sort_variant_properties(
    properties: &[VariantProperty],
    priorities: &VariantPriorities,
) -> Result<Vec<VariantProperty>, ResolverError> {
    let found_namespaces = properties
        .iter()
        .map(VariantProperty::namespace)
        .collect::<HashSet<_>>();

    let namespace_priorities: Cow<'_, [String]> = if priorities.namespace_priorities.is_empty() {
        if found_namespaces.len() > 1 {
            return Err(ResolverError::Configuration(format!(
                "no namespace priority is set to order the namespaces `{}`",
                found_namespaces.into_iter().sorted().join("`, `")
            )));
        }
        Cow::Owned(found_namespaces.into_iter().map(str::to_string).collect())
    } else {
        Cow::Borrowed(priorities.namespace_priorities.as_slice())
    };

    let mut sorted = properties.to_vec();

    // 1. namespaces
    sorted.sort_by_key(|p| namespace_rank(p, &namespace_priorities));

    // 2. features within each namespace
    for group in sorted.chunk_by_mut(|a, b| a.namespace() == b.namespace()) {
        group.sort_by_key(|p| feature_rank(p, &priorities.feature_priorities));
    }

    // 3. values within each feature
    for group in sorted.chunk_by_mut(|a, b| a.feature_key() == b.feature_key()) {
        group.sort_by_key(|p| property_rank(p, &priorities.property_priorities));
    }

    Ok(sorted)
}

/// Order descriptions by which of the ordered `property_priorities` they contain.
///
/// Each description maps to a tuple with one slot per priority entry: `1`
/// when the description contains that property, [`MAX_RANK`] otherwise.
/// Tuples compare lexicographically, so containing an earlier property beats
/// containing any number of later ones. The null variant is all [`MAX_RANK`]
/// and sorts last.
///
/// Every property of every description must appear in `property_priorities`;
/// descriptions have to be filtered against the supported properties first.
pub fn sort_variants_descriptions(
    mut descriptions: Vec<VariantDescription>,
    property_priorities: &[VariantProperty],
) -> Result<Vec<VariantDescription>, ValidationError> {
    let known = property_priorities.iter().collect::<HashSet<_>>();
    for description in &descriptions {
        if let Some(property) = description.properties().iter().find(|p| !known.contains(p)) {
            return Err(ValidationError::UnfilteredInput {
                property: property.to_string(),
            });
        }
    }

    descriptions.sort_by_cached_key(|description| rank_tuple(description, property_priorities));
    Ok(descriptions)
}

fn rank_tuple(
    description: &VariantDescription,
    property_priorities: &[VariantProperty],
) -> Vec<usize> {
    property_priorities
        .iter()
        .map(|property| {
            if description.contains(property) {
                1
            } else {
                MAX_RANK
            }
        })
        .collect()
}
