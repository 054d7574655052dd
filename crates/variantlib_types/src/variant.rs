//! Variant identity: features, properties and descriptions
//!
//! A [`VariantDescription`] is the canonical, sorted set of
//! [`VariantProperty`] values that identifies one build variant. Its
//! [`hexdigest`](VariantDescription::hexdigest) is derived from that canonical
//! form only, so two descriptions built from the same properties in any order
//! share the same identifier.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;
use crate::validation::{split_segments, validate_feature, validate_namespace, validate_value};

/// Number of hexadecimal characters kept from the content hash.
///
/// 32 bits keeps the identifier short enough for filenames. Collisions become
/// plausible once a single package publishes tens of thousands of variants.
pub const VARIANT_HASH_LEN: usize = 8;

/// Hexdigest reserved for the null variant (a description without properties).
pub const NULL_VARIANT_HASH: &str = "00000000";

const _: () = assert!(NULL_VARIANT_HASH.len() == VARIANT_HASH_LEN);

/// A configurable axis: `namespace :: feature`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "FeatureFields")]
pub struct VariantFeature {
    namespace: String,
    feature: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FeatureFields {
    namespace: String,
    feature: String,
}

impl TryFrom<FeatureFields> for VariantFeature {
    type Error = ValidationError;

    fn try_from(fields: FeatureFields) -> Result<Self, Self::Error> {
        Self::new(fields.namespace, fields.feature)
    }
}

impl VariantFeature {
    pub fn new(
        namespace: impl Into<String>,
        feature: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let namespace = namespace.into();
        let feature = feature.into();
        validate_namespace(&namespace)?;
        validate_feature(&feature)?;
        Ok(Self { namespace, feature })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Borrowed `(namespace, feature)` key, used for set membership.
    pub fn key(&self) -> (&str, &str) {
        (&self.namespace, &self.feature)
    }
}

impl FromStr for VariantFeature {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [namespace, feature] = split_segments(s, "<namespace> :: <feature>")?;
        Self::new(namespace, feature)
    }
}

impl fmt::Display for VariantFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.namespace, self.feature)
    }
}

/// A concrete assignment: `namespace :: feature :: value`.
///
/// Ordering compares `(namespace, feature, value)` lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PropertyFields")]
pub struct VariantProperty {
    namespace: String,
    feature: String,
    value: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyFields {
    namespace: String,
    feature: String,
    value: String,
}

impl TryFrom<PropertyFields> for VariantProperty {
    type Error = ValidationError;

    fn try_from(fields: PropertyFields) -> Result<Self, Self::Error> {
        Self::new(fields.namespace, fields.feature, fields.value)
    }
}

impl VariantProperty {
    pub fn new(
        namespace: impl Into<String>,
        feature: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let namespace = namespace.into();
        let feature = feature.into();
        let value = value.into();
        validate_namespace(&namespace)?;
        validate_feature(&feature)?;
        validate_value(&value)?;
        Ok(Self {
            namespace,
            feature,
            value,
        })
    }

    /// Components that already passed validation elsewhere in this crate.
    pub(crate) fn from_validated(namespace: &str, feature: &str, value: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            feature: feature.to_string(),
            value: value.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Borrowed `(namespace, feature)` key, ignoring the value.
    pub fn feature_key(&self) -> (&str, &str) {
        (&self.namespace, &self.feature)
    }

    /// The axis this property assigns a value to.
    pub fn to_feature(&self) -> VariantFeature {
        VariantFeature {
            namespace: self.namespace.clone(),
            feature: self.feature.clone(),
        }
    }
}

impl FromStr for VariantProperty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [namespace, feature, value] =
            split_segments(s, "<namespace> :: <feature> :: <value>")?;
        Self::new(namespace, feature, value)
    }
}

impl fmt::Display for VariantProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {} :: {}", self.namespace, self.feature, self.value)
    }
}

/// The set of properties identifying one variant, kept in canonical order.
///
/// Invariants upheld by every constructor:
/// - properties are sorted by `(namespace, feature, value)`
/// - no two properties share a `namespace :: feature`
/// - `hexdigest` is derived from the sorted content only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<VariantProperty>", try_from = "Vec<VariantProperty>")]
pub struct VariantDescription {
    properties: Vec<VariantProperty>,
    hexdigest: String,
}

impl VariantDescription {
    /// Build a description from properties given in any order.
    ///
    /// Fails if two properties assign a value to the same feature, even when
    /// the values differ.
    pub fn new(
        properties: impl IntoIterator<Item = VariantProperty>,
    ) -> Result<Self, ValidationError> {
        let mut properties = properties.into_iter().collect::<Vec<_>>();
        properties.sort();

        if let Some(pair) = properties
            .windows(2)
            .find(|pair| pair[0].feature_key() == pair[1].feature_key())
        {
            return Err(ValidationError::DuplicateFeature {
                namespace: pair[1].namespace.clone(),
                feature: pair[1].feature.clone(),
            });
        }

        let hexdigest = hexdigest_of(&properties);
        Ok(Self {
            properties,
            hexdigest,
        })
    }

    /// The null variant: no properties, reserved hexdigest.
    pub fn null() -> Self {
        Self {
            properties: Vec::new(),
            hexdigest: NULL_VARIANT_HASH.to_string(),
        }
    }

    pub fn is_null_variant(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties in canonical order.
    pub fn properties(&self) -> &[VariantProperty] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains(&self, property: &VariantProperty) -> bool {
        self.properties.binary_search(property).is_ok()
    }

    /// Short content hash used as the public identifier of this variant.
    pub fn hexdigest(&self) -> &str {
        &self.hexdigest
    }

    /// Build a description from the `namespace -> feature -> value` layout
    /// used by index files.
    pub fn from_nested(
        nested: &BTreeMap<String, BTreeMap<String, String>>,
    ) -> Result<Self, ValidationError> {
        let properties = nested
            .iter()
            .flat_map(|(namespace, features)| {
                features
                    .iter()
                    .map(move |(feature, value)| VariantProperty::new(namespace, feature, value))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(properties)
    }

    pub fn to_nested(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut nested: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for property in &self.properties {
            nested
                .entry(property.namespace.clone())
                .or_default()
                .insert(property.feature.clone(), property.value.clone());
        }
        nested
    }

    pub fn pretty_print(&self) -> String {
        let mut result = format!(
            "{} Variant: `{}` {}",
            "#".repeat(30),
            self.hexdigest(),
            "#".repeat(29)
        );
        for property in &self.properties {
            result.push_str(&format!("\nVariant Property: {property}"));
        }
        result.push_str(&format!("\n{}\n", "#".repeat(80)));
        result
    }
}

impl Default for VariantDescription {
    fn default() -> Self {
        Self::null()
    }
}

impl From<VariantDescription> for Vec<VariantProperty> {
    fn from(description: VariantDescription) -> Self {
        description.properties
    }
}

impl TryFrom<Vec<VariantProperty>> for VariantDescription {
    type Error = ValidationError;

    fn try_from(properties: Vec<VariantProperty>) -> Result<Self, Self::Error> {
        Self::new(properties)
    }
}

fn hexdigest_of(sorted: &[VariantProperty]) -> String {
    if sorted.is_empty() {
        return NULL_VARIANT_HASH.to_string();
    }
    content_digest(sorted)
}

/// SHA-256 over `"<ns> :: <feature> :: <value>\n"` per property, truncated.
///
/// The trailing newline keeps `a :: b :: cx` + `d :: e :: f` apart from
/// `a :: b :: c` + `xd :: e :: f`.
fn content_digest(sorted: &[VariantProperty]) -> String {
    let mut hasher = Sha256::new();
    for property in sorted {
        hasher.update(property.to_string().as_bytes());
        hasher.update(b"\n");
    }
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(VARIANT_HASH_LEN);
    hex
}
