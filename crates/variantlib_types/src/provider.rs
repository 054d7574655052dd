//! The contract between the resolver and variant providers
//!
//! A provider owns one namespace and reports two things: every value it can
//! ever describe, and the subset the current machine satisfies. How providers
//! are discovered and loaded is not this crate's concern.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{validate_feature, validate_namespace, validate_value};
use crate::variant::VariantProperty;

/// Errors reported by a provider implementation, passed through unchanged.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// One feature of a provider and its values, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FeatureConfigFields")]
pub struct VariantFeatureConfig {
    name: String,
    values: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FeatureConfigFields {
    name: String,
    values: Vec<String>,
}

impl TryFrom<FeatureConfigFields> for VariantFeatureConfig {
    type Error = ValidationError;

    fn try_from(fields: FeatureConfigFields) -> Result<Self, Self::Error> {
        Self::new(fields.name, fields.values)
    }
}

impl VariantFeatureConfig {
    pub fn new(
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let values = values.into_iter().map(Into::into).collect::<Vec<String>>();

        validate_feature(&name)?;
        if values.is_empty() {
            return Err(ValidationError::EmptyList { field: "values" });
        }
        let mut seen = HashSet::new();
        for value in &values {
            validate_value(value)?;
            if !seen.insert(value.as_str()) {
                return Err(ValidationError::DuplicateValue {
                    field: "values",
                    value: value.clone(),
                });
            }
        }

        Ok(Self { name, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Everything one provider reports for its namespace, features in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProviderConfigFields")]
pub struct ProviderConfig {
    namespace: String,
    configs: Vec<VariantFeatureConfig>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProviderConfigFields {
    namespace: String,
    configs: Vec<VariantFeatureConfig>,
}

impl TryFrom<ProviderConfigFields> for ProviderConfig {
    type Error = ValidationError;

    fn try_from(fields: ProviderConfigFields) -> Result<Self, Self::Error> {
        Self::new(fields.namespace, fields.configs)
    }
}

impl ProviderConfig {
    pub fn new(
        namespace: impl Into<String>,
        configs: Vec<VariantFeatureConfig>,
    ) -> Result<Self, ValidationError> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;
        if configs.is_empty() {
            return Err(ValidationError::EmptyList { field: "configs" });
        }
        let mut seen = HashSet::new();
        for config in &configs {
            if !seen.insert(config.name()) {
                return Err(ValidationError::DuplicateValue {
                    field: "configs",
                    value: config.name().to_string(),
                });
            }
        }
        Ok(Self { namespace, configs })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn configs(&self) -> &[VariantFeatureConfig] {
        &self.configs
    }

    pub fn get(&self, feature: &str) -> Option<&VariantFeatureConfig> {
        self.configs.iter().find(|config| config.name() == feature)
    }

    /// Every property described by this config, features and values in order.
    pub fn to_properties(&self) -> Vec<VariantProperty> {
        self.configs
            .iter()
            .flat_map(|config| {
                config.values().iter().map(|value| {
                    VariantProperty::from_validated(&self.namespace, config.name(), value)
                })
            })
            .collect()
    }

    pub fn pretty_print(&self) -> String {
        let mut result = format!(
            "{} Provider Config: `{}` {}",
            "#".repeat(20),
            self.namespace,
            "#".repeat(20)
        );
        for (idx, config) in self.configs.iter().enumerate() {
            result.push_str(&format!(
                "\n\t- Variant Config [{:03}]: {} :: {:?}",
                idx + 1,
                config.name(),
                config.values()
            ));
        }
        result.push_str(&format!("\n{}\n", "#".repeat(80)));
        result
    }
}

/// A source of variant properties for one namespace.
pub trait VariantProvider {
    /// Every feature and value this provider can describe.
    fn get_all_configs(&self) -> Result<ProviderConfig, ProviderError>;

    /// The features and values the current environment satisfies.
    fn get_supported_configs(&self) -> Result<ProviderConfig, ProviderError>;
}
