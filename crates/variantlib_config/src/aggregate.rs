//! Merging of priority lists coming from several sources
//!
//! Sources are given most important first: explicit arguments, then the
//! configuration file, then defaults shipped with a package. Lists are
//! concatenated and only the first occurrence of each entry is kept.

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use variantlib_types::VariantPriorities;

/// Concatenate `lists`, dropping entries already seen.
pub fn aggregate_namespace_priorities<'a, T>(lists: impl IntoIterator<Item = &'a [T]>) -> Vec<T>
where
    T: Clone + Eq + Hash + 'a,
{
    lists
        .into_iter()
        .flatten()
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Merge per-namespace feature lists; keys keep their first-seen position.
pub fn aggregate_feature_priorities<'a, K, T>(
    maps: impl IntoIterator<Item = &'a IndexMap<K, Vec<T>>>,
) -> IndexMap<K, Vec<T>>
where
    K: Clone + Eq + Hash + 'a,
    T: Clone + Eq + Hash + 'a,
{
    let mut merged: IndexMap<K, IndexSet<T>> = IndexMap::new();
    for map in maps {
        for (key, values) in map {
            merged
                .entry(key.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
    }
    merged
        .into_iter()
        .map(|(key, values)| (key, values.into_iter().collect()))
        .collect()
}

/// Merge per-namespace, per-feature value lists.
pub fn aggregate_property_priorities<'a, K, F, T>(
    maps: impl IntoIterator<Item = &'a IndexMap<K, IndexMap<F, Vec<T>>>>,
) -> IndexMap<K, IndexMap<F, Vec<T>>>
where
    K: Clone + Eq + Hash + 'a,
    F: Clone + Eq + Hash + 'a,
    T: Clone + Eq + Hash + 'a,
{
    let mut grouped: IndexMap<K, Vec<&'a IndexMap<F, Vec<T>>>> = IndexMap::new();
    for map in maps {
        for (key, features) in map {
            grouped.entry(key.clone()).or_default().push(features);
        }
    }
    grouped
        .into_iter()
        .map(|(key, features)| (key, aggregate_feature_priorities(features)))
        .collect()
}

/// Merge complete priority configurations, most important first.
pub fn aggregate_priorities<'a>(
    sources: impl IntoIterator<Item = &'a VariantPriorities>,
) -> VariantPriorities {
    let sources = sources.into_iter().collect::<Vec<_>>();
    VariantPriorities {
        namespace_priorities: aggregate_namespace_priorities(
            sources.iter().map(|s| s.namespace_priorities.as_slice()),
        ),
        feature_priorities: aggregate_feature_priorities(
            sources.iter().map(|s| &s.feature_priorities),
        ),
        property_priorities: aggregate_property_priorities(
            sources.iter().map(|s| &s.property_priorities),
        ),
    }
}
