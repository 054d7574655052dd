//! Expose installed package versions as variant properties
//!
//! Every installed distribution `name==X.Y.Z` becomes three supported
//! properties in the [`VARIANT_ABI_DEPENDENCY_NAMESPACE`] namespace:
//! `name :: X`, `name :: X.Y` and `name :: X.Y.Z`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use variantlib_types::VariantProperty;

/// Namespace reserved for properties derived from installed distributions.
pub const VARIANT_ABI_DEPENDENCY_NAMESPACE: &str = "abi_dependency";

/// Environment variable holding comma-separated `name==version` overrides.
pub const VARIANT_ABI_DEPENDENCY_ENV: &str = "VARIANT_ABI_DEPENDENCY";

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").expect("valid name regex")
});

/// A complete PEP 440 version; only the release segment is captured.
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*v?(?:\d+!)?",
        r"(?P<release>\d+(?:\.\d+)*)",
        r"(?:[-_.]?(?:alpha|a|beta|b|preview|pre|c|rc)[-_.]?\d*)?",
        r"(?:-\d+|[-_.]?(?:post|rev|r)[-_.]?\d*)?",
        r"(?:[-_.]?dev[-_.]?\d*)?",
        r"(?:\+[a-z0-9]+(?:[-_.][a-z0-9]+)*)?\s*$",
    ))
    .expect("valid version regex")
});

/// An installed (or pretended to be installed) distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub name: String,
    pub version: String,
}

impl Distribution {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Lowercase the name and replace every non-alphanumeric character with `_`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// The `major`, `major.minor` and `major.minor.patch` prefixes of a version.
///
/// The local part (after `+`) is ignored and missing components count as `0`.
/// Components are kept as digit strings, without leading zeros. Returns `None`
/// unless the whole string is a valid version.
pub fn release_prefixes(version: &str) -> Option<[String; 3]> {
    let release = VERSION_REGEX.captures(version)?.name("release")?.as_str();

    let mut parts = ["0"; 3];
    for (part, segment) in parts.iter_mut().zip(release.split('.')) {
        *part = match segment.trim_start_matches('0') {
            "" => "0",
            digits => digits,
        };
    }
    let [major, minor, patch] = parts;
    Some([
        major.to_string(),
        format!("{major}.{minor}"),
        format!("{major}.{minor}.{patch}"),
    ])
}

/// Parse the value of [`VARIANT_ABI_DEPENDENCY_ENV`].
///
/// Malformed entries are logged and skipped.
pub fn parse_abi_dependency_overrides(raw: &str) -> Vec<Distribution> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let Some((name, version)) = entry.split_once("==") else {
                tracing::warn!(
                    "`{VARIANT_ABI_DEPENDENCY_ENV}`: ignoring `{entry}`, expected `name==version`"
                );
                return None;
            };
            let (name, version) = (name.trim(), version.trim());
            if !NAME_REGEX.is_match(name) {
                tracing::warn!(
                    "`{VARIANT_ABI_DEPENDENCY_ENV}`: ignoring `{entry}`, `{name}` is not a valid package name"
                );
                return None;
            }
            if release_prefixes(version).is_none() {
                tracing::warn!(
                    "`{VARIANT_ABI_DEPENDENCY_ENV}`: ignoring `{entry}`, `{version}` is not a valid version"
                );
                return None;
            }
            Some(Distribution::new(name, version))
        })
        .collect()
}

/// Append ABI-dependency properties to `supported_properties`.
///
/// Overrides come first and shadow installed distributions with the same
/// normalized name. Installed distributions follow, sorted by name. The
/// reserved namespace is added to the end of `namespace_priorities` if it is
/// not there yet.
pub fn inject_abi_dependency(
    supported_properties: &mut Vec<VariantProperty>,
    namespace_priorities: &mut Vec<String>,
    overrides: &[Distribution],
    installed: &[Distribution],
) {
    let mut installed = installed
        .iter()
        .map(|dist| (normalize_name(&dist.name), dist))
        .collect::<Vec<_>>();
    installed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut seen = HashSet::new();
    let entries = overrides
        .iter()
        .map(|dist| (normalize_name(&dist.name), dist))
        .chain(installed)
        .filter(|(name, _)| seen.insert(name.clone()));

    for (name, dist) in entries {
        let Some(prefixes) = release_prefixes(&dist.version) else {
            tracing::warn!(
                "Skipping `{}`: cannot read a release from version `{}`",
                dist.name,
                dist.version
            );
            continue;
        };
        for prefix in prefixes {
            match VariantProperty::new(VARIANT_ABI_DEPENDENCY_NAMESPACE, name.as_str(), prefix) {
                Ok(property) => supported_properties.push(property),
                Err(err) => {
                    tracing::warn!("Skipping `{}`: {err}", dist.name);
                    break;
                }
            }
        }
    }

    if !namespace_priorities
        .iter()
        .any(|namespace| namespace == VARIANT_ABI_DEPENDENCY_NAMESPACE)
    {
        namespace_priorities.push(VARIANT_ABI_DEPENDENCY_NAMESPACE.to_string());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tracing_test::traced_test;

    use super::*;

    fn rendered(properties: &[VariantProperty]) -> Vec<String> {
        properties.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_inject_abi_dependency() {
        let mut supported = vec![VariantProperty::new("foo", "bar", "baz").unwrap()];
        let mut namespaces = vec!["foo".to_string()];
        let installed = [
            Distribution::new("d", "1.2.3.4"),
            Distribution::new("a", "4"),
            Distribution::new("c", "7.2.3.post4"),
            Distribution::new("b", "4.3b1"),
        ];

        inject_abi_dependency(&mut supported, &mut namespaces, &[], &installed);

        assert_eq!(namespaces, ["foo", VARIANT_ABI_DEPENDENCY_NAMESPACE]);
        assert_eq!(
            rendered(&supported),
            [
                "foo :: bar :: baz",
                "abi_dependency :: a :: 4",
                "abi_dependency :: a :: 4.0",
                "abi_dependency :: a :: 4.0.0",
                "abi_dependency :: b :: 4",
                "abi_dependency :: b :: 4.3",
                "abi_dependency :: b :: 4.3.0",
                "abi_dependency :: c :: 7",
                "abi_dependency :: c :: 7.2",
                "abi_dependency :: c :: 7.2.3",
                "abi_dependency :: d :: 1",
                "abi_dependency :: d :: 1.2",
                "abi_dependency :: d :: 1.2.3",
            ]
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut supported = Vec::new();
        let mut namespaces = vec![VARIANT_ABI_DEPENDENCY_NAMESPACE.to_string()];
        let overrides = parse_abi_dependency_overrides("Torch==2.7.1+cu128, numpy==2.0");
        let installed = [
            Distribution::new("torch", "2.6.0"),
            Distribution::new("jax", "0.5"),
        ];

        inject_abi_dependency(&mut supported, &mut namespaces, &overrides, &installed);

        assert_eq!(namespaces, [VARIANT_ABI_DEPENDENCY_NAMESPACE]);
        assert_eq!(
            rendered(&supported),
            [
                "abi_dependency :: torch :: 2",
                "abi_dependency :: torch :: 2.7",
                "abi_dependency :: torch :: 2.7.1",
                "abi_dependency :: numpy :: 2",
                "abi_dependency :: numpy :: 2.0",
                "abi_dependency :: numpy :: 2.0.0",
                "abi_dependency :: jax :: 0",
                "abi_dependency :: jax :: 0.5",
                "abi_dependency :: jax :: 0.5.0",
            ]
        );
    }

    #[rstest]
    #[case("1.2.3+local.7", Some(["1", "1.2", "1.2.3"]))]
    #[case("2!3.1", Some(["3", "3.1", "3.1.0"]))]
    #[case("v10.04", Some(["10", "10.4", "10.4.0"]))]
    #[case("2025.1.rc1", Some(["2025", "2025.1", "2025.1.0"]))]
    #[case("1.0b2.post1.dev3", Some(["1", "1.0", "1.0.0"]))]
    #[case("1.0-1", Some(["1", "1.0", "1.0.0"]))]
    #[case(
        "99999999999999999999.1",
        Some(["99999999999999999999", "99999999999999999999.1", "99999999999999999999.1.0"])
    )]
    #[case("dev", None)]
    #[case("", None)]
    #[case("2.7.1garbage", None)]
    #[case("2.7.1garbage!!", None)]
    #[case("1..2", None)]
    #[case("1.0 beta", None)]
    #[case("1.0+", None)]
    fn test_release_prefixes(#[case] version: &str, #[case] expected: Option<[&str; 3]>) {
        assert_eq!(
            release_prefixes(version),
            expected.map(|prefixes| prefixes.map(String::from))
        );
    }

    #[rstest]
    #[case("Foo.Bar-baz", "foo_bar_baz")]
    #[case("typing_extensions", "typing_extensions")]
    #[case("PyYAML", "pyyaml")]
    fn test_normalize_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(normalize_name(name), expected);
    }

    #[test]
    #[traced_test]
    fn test_malformed_overrides_are_skipped() {
        let overrides = parse_abi_dependency_overrides(
            "numpy==2.0,, torch>=2.0 ,-bad-==1.0,scipy==latest,torch==2.7.1garbage!!,\
             jax==1..2,pandas==1.0 beta,big==99999999999999999999.1",
        );
        assert_eq!(
            overrides,
            [
                Distribution::new("numpy", "2.0"),
                Distribution::new("big", "99999999999999999999.1"),
            ]
        );
        assert!(logs_contain("ignoring `torch>=2.0`"));
        assert!(logs_contain("`-bad-` is not a valid package name"));
        assert!(logs_contain("`latest` is not a valid version"));
        assert!(logs_contain("`2.7.1garbage!!` is not a valid version"));
        assert!(logs_contain("`1..2` is not a valid version"));
        assert!(logs_contain("`1.0 beta` is not a valid version"));
    }
}
