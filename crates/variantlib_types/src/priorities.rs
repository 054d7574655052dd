//! Priority orderings over namespaces, features and values

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{validate_feature, validate_namespace, validate_value};

/// Ordered feature names per namespace, most preferred first.
pub type FeaturePriorities = IndexMap<String, Vec<String>>;

/// Ordered values per namespace and feature, most preferred first.
pub type PropertyPriorities = IndexMap<String, IndexMap<String, Vec<String>>>;

/// The three independent priority orderings used to rank properties.
///
/// A namespace, feature or value without an entry ranks last; it is not an
/// error.
///
/// ```toml
/// namespace_priorities = ["nvidia", "x86_64"]
///
/// [feature_priorities]
/// nvidia = ["sm_arch", "cuda_version_lower_bound"]
///
/// [property_priorities.x86_64]
/// level = ["v4", "v3", "v2"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantPriorities {
    /// Namespaces, most preferred first.
    pub namespace_priorities: Vec<String>,

    /// Features within each namespace, most preferred first.
    pub feature_priorities: FeaturePriorities,

    /// Values within each `namespace :: feature`, most preferred first.
    pub property_priorities: PropertyPriorities,
}

impl VariantPriorities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.namespace_priorities.is_empty()
            && self.feature_priorities.is_empty()
            && self.property_priorities.is_empty()
    }

    /// Check every name against the namespace, feature and value patterns.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for namespace in &self.namespace_priorities {
            validate_namespace(namespace)?;
        }
        for (namespace, features) in &self.feature_priorities {
            validate_namespace(namespace)?;
            for feature in features {
                validate_feature(feature)?;
            }
        }
        for (namespace, features) in &self.property_priorities {
            validate_namespace(namespace)?;
            for (feature, values) in features {
                validate_feature(feature)?;
                for value in values {
                    validate_value(value)?;
                }
            }
        }
        Ok(())
    }
}
