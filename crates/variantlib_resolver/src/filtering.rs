//! Filters over sequences of variant descriptions
//!
//! Every filter keeps the first-seen order of its input and is lazy: nothing
//! is evaluated until the returned iterator is consumed. Inputs that need
//! validation are checked eagerly, before any description is produced.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use variantlib_types::{
    ValidationError, VariantDescription, VariantFeature, VariantProperty,
    validation::validate_namespace,
};

fn render(properties: &[&VariantProperty]) -> String {
    properties.iter().join(", ")
}

/// Drop every description whose content was already seen.
pub fn remove_duplicates<I>(descriptions: I) -> impl Iterator<Item = VariantDescription>
where
    I: IntoIterator<Item = VariantDescription>,
{
    let mut seen = HashSet::new();
    descriptions.into_iter().filter(move |description| {
        if seen.contains(description) {
            tracing::debug!(
                "Variant `{}` has been removed because it is a duplicate",
                description.hexdigest()
            );
            return false;
        }
        seen.insert(description.clone());
        true
    })
}

/// Drop descriptions using any of the forbidden namespaces (case-insensitive).
pub fn filter_variants_by_namespaces<I, S>(
    descriptions: I,
    forbidden_namespaces: &[S],
) -> Result<impl Iterator<Item = VariantDescription>, ValidationError>
where
    I: IntoIterator<Item = VariantDescription>,
    S: AsRef<str>,
{
    let forbidden = forbidden_namespaces
        .iter()
        .map(|namespace| {
            let namespace = namespace.as_ref().to_lowercase();
            validate_namespace(&namespace).map(|_| namespace)
        })
        .collect::<Result<HashSet<_>, _>>()?;

    Ok(descriptions.into_iter().filter(move |description| {
        let rejected = description
            .properties()
            .iter()
            .filter(|p| forbidden.contains(p.namespace()))
            .collect::<Vec<_>>();
        if rejected.is_empty() {
            return true;
        }
        tracing::debug!(
            "Variant `{}` has been rejected because one or many of the variant namespaces `[{}]` have been explicitly rejected",
            description.hexdigest(),
            render(&rejected)
        );
        false
    }))
}

/// Drop descriptions using any of the forbidden `namespace :: feature` axes.
pub fn filter_variants_by_features<I>(
    descriptions: I,
    forbidden_features: &[VariantFeature],
) -> impl Iterator<Item = VariantDescription>
where
    I: IntoIterator<Item = VariantDescription>,
{
    let mut forbidden: HashMap<String, HashSet<String>> = HashMap::new();
    for feature in forbidden_features {
        forbidden
            .entry(feature.namespace().to_string())
            .or_default()
            .insert(feature.feature().to_string());
    }

    descriptions.into_iter().filter(move |description| {
        let rejected = description
            .properties()
            .iter()
            .filter(|p| {
                forbidden
                    .get(p.namespace())
                    .is_some_and(|features| features.contains(p.feature()))
            })
            .collect::<Vec<_>>();
        if rejected.is_empty() {
            return true;
        }
        tracing::debug!(
            "Variant `{}` has been rejected because one or many of the variant features `[{}]` have been explicitly rejected",
            description.hexdigest(),
            render(&rejected)
        );
        false
    })
}

/// Keep only descriptions whose every property is allowed and none forbidden.
///
/// `allowed_properties` is a whitelist: a property missing from it is not
/// supported by the environment. `forbidden_properties` wins over `allowed_properties`.
pub fn filter_variants_by_property<I>(
    descriptions: I,
    allowed_properties: &[VariantProperty],
    forbidden_properties: &[VariantProperty],
) -> impl Iterator<Item = VariantDescription>
where
    I: IntoIterator<Item = VariantDescription>,
{
    let forbidden = forbidden_properties.iter().collect::<HashSet<_>>();
    let allowed = allowed_properties
        .iter()
        .filter(|p| !forbidden.contains(p))
        .cloned()
        .collect::<HashSet<_>>();

    descriptions.into_iter().filter(move |description| {
        let rejected = description
            .properties()
            .iter()
            .filter(|p| !allowed.contains(*p))
            .collect::<Vec<_>>();
        if rejected.is_empty() {
            return true;
        }
        tracing::debug!(
            "Variant `{}` has been rejected because the properties `[{}]` are not supported",
            description.hexdigest(),
            render(&rejected)
        );
        false
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn prop(s: &str) -> VariantProperty {
        s.parse().unwrap()
    }

    fn desc(props: &[&str]) -> VariantDescription {
        VariantDescription::new(props.iter().map(|p| prop(p))).unwrap()
    }

    fn hashes(descriptions: impl IntoIterator<Item = VariantDescription>) -> Vec<String> {
        descriptions
            .into_iter()
            .map(|d| d.hexdigest().to_string())
            .collect()
    }

    fn catalogue() -> Vec<VariantDescription> {
        vec![
            desc(&["omnicorp :: feat_a :: value"]),
            desc(&["omnicorp :: feat_b :: value", "tyrellcorp :: feat_a :: value"]),
            desc(&["tyrellcorp :: feat_b :: abcde"]),
            desc(&["tyrellcorp :: feat_b :: efgh", "umbrella :: feat_a :: value"]),
            VariantDescription::null(),
        ]
    }

    #[test]
    fn test_remove_duplicates() {
        let distinct = catalogue();
        // same content, distinct instances, interleaved
        let input = (0..3)
            .flat_map(|_| {
                distinct
                    .iter()
                    .map(|d| VariantDescription::new(d.properties().to_vec()).unwrap())
            })
            .collect::<Vec<_>>();
        assert_eq!(input.len(), distinct.len() * 3);

        let result = remove_duplicates(input).collect::<Vec<_>>();
        assert_eq!(result, distinct);
    }

    #[test]
    fn test_remove_duplicates_keeps_first_seen_order() {
        let catalogue = catalogue();
        let (a, b, c) = (&catalogue[0], &catalogue[1], &catalogue[2]);
        let input = vec![c.clone(), a.clone(), c.clone(), b.clone(), a.clone()];
        assert_eq!(
            remove_duplicates(input).collect::<Vec<_>>(),
            vec![c.clone(), a.clone(), b.clone()]
        );
    }

    #[test]
    fn test_filter_by_namespaces() {
        let result = filter_variants_by_namespaces(catalogue(), &["tyrellcorp"]).unwrap();
        assert_eq!(
            hashes(result),
            hashes([desc(&["omnicorp :: feat_a :: value"]), VariantDescription::null()])
        );
    }

    #[test]
    fn test_filter_by_namespaces_is_case_insensitive() {
        let lower = filter_variants_by_namespaces(catalogue(), &["umbrella"]).unwrap();
        let upper = filter_variants_by_namespaces(catalogue(), &["UMBRELLA"]).unwrap();
        assert_eq!(hashes(lower), hashes(upper));
    }

    #[test]
    fn test_filter_by_namespaces_validates_eagerly() {
        let result = filter_variants_by_namespaces(catalogue(), &["not a namespace"]);
        assert!(matches!(
            result,
            Err(ValidationError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_filter_by_namespaces_empty_is_identity() {
        let result = filter_variants_by_namespaces(catalogue(), &[] as &[&str]).unwrap();
        assert_eq!(result.collect::<Vec<_>>(), catalogue());
    }

    #[test]
    fn test_filter_by_features() {
        let forbidden = vec![VariantFeature::new("tyrellcorp", "feat_b").unwrap()];
        let result = filter_variants_by_features(catalogue(), &forbidden);
        assert_eq!(
            hashes(result),
            hashes([
                desc(&["omnicorp :: feat_a :: value"]),
                desc(&["omnicorp :: feat_b :: value", "tyrellcorp :: feat_a :: value"]),
                VariantDescription::null(),
            ])
        );
    }

    #[test]
    fn test_filter_by_property_is_a_whitelist() {
        let allowed = vec![
            prop("omnicorp :: feat_a :: value"),
            prop("tyrellcorp :: feat_b :: abcde"),
            prop("tyrellcorp :: feat_a :: value"),
        ];
        let result = filter_variants_by_property(catalogue(), &allowed, &[]);
        assert_eq!(
            hashes(result),
            hashes([
                desc(&["omnicorp :: feat_a :: value"]),
                desc(&["tyrellcorp :: feat_b :: abcde"]),
                VariantDescription::null(),
            ])
        );
    }

    #[test]
    fn test_filter_by_property_forbidden_wins() {
        let allowed = vec![
            prop("omnicorp :: feat_a :: value"),
            prop("tyrellcorp :: feat_b :: abcde"),
        ];
        let forbidden = vec![prop("tyrellcorp :: feat_b :: abcde")];
        let result = filter_variants_by_property(catalogue(), &allowed, &forbidden);
        assert_eq!(
            hashes(result),
            hashes([desc(&["omnicorp :: feat_a :: value"]), VariantDescription::null()])
        );
    }

    #[test]
    fn test_filter_by_property_is_idempotent() {
        let allowed = catalogue()
            .iter()
            .flat_map(|d| d.properties().to_vec())
            .filter(|p| p.namespace() != "umbrella")
            .collect::<Vec<_>>();
        let forbidden = vec![prop("omnicorp :: feat_b :: value")];

        let once = filter_variants_by_property(catalogue(), &allowed, &forbidden).collect::<Vec<_>>();
        let twice =
            filter_variants_by_property(once.clone(), &allowed, &forbidden).collect::<Vec<_>>();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }
}
