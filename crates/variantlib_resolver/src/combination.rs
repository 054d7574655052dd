//! Variant combination logic - enumerating every description the axes allow

use variantlib_types::{ProviderConfig, ValidationError, VariantDescription, VariantProperty};

use crate::error::ResolverError;

/// A single feature of a namespace together with its candidate values,
/// most preferred first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAxis {
    values: Vec<VariantProperty>,
}

impl VariantAxis {
    pub fn new(
        namespace: &str,
        feature: &str,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ValidationError> {
        let values = values
            .into_iter()
            .map(|value| VariantProperty::new(namespace, feature, value))
            .collect::<Result<Vec<_>, _>>()?;
        if values.is_empty() {
            return Err(ValidationError::EmptyList { field: "values" });
        }
        Ok(Self { values })
    }

    /// One axis per feature of the config, in the config's order.
    pub fn from_provider_config(config: &ProviderConfig) -> Vec<Self> {
        config
            .to_properties()
            .chunk_by(|a, b| a.feature() == b.feature())
            .map(|chunk| Self {
                values: chunk.to_vec(),
            })
            .collect()
    }

    pub fn namespace(&self) -> &str {
        self.values[0].namespace()
    }

    pub fn feature(&self) -> &str {
        self.values[0].feature()
    }

    pub fn values(&self) -> &[VariantProperty] {
        &self.values
    }
}

/// Order the axes of several providers by namespace priority.
///
/// Providers whose namespace is not listed are left out. With a single
/// provider and no priorities its namespace is used on its own.
pub fn axes_from_provider_configs(
    configs: &[ProviderConfig],
    namespace_priorities: &[String],
) -> Result<Vec<VariantAxis>, ResolverError> {
    if namespace_priorities.is_empty() {
        return match configs {
            [] => Ok(Vec::new()),
            [config] => Ok(VariantAxis::from_provider_config(config)),
            _ => Err(ResolverError::Configuration(
                "`namespace_priorities` is required to combine several providers".to_string(),
            )),
        };
    }

    for config in configs {
        if !namespace_priorities
            .iter()
            .any(|namespace| namespace == config.namespace())
        {
            tracing::warn!(
                "Namespace `{}` is missing from `namespace_priorities`, its features are ignored",
                config.namespace()
            );
        }
    }

    Ok(namespace_priorities
        .iter()
        .filter_map(|namespace| {
            configs
                .iter()
                .find(|config| config.namespace() == namespace)
        })
        .flat_map(VariantAxis::from_provider_config)
        .collect())
}

/// Recursively collect every combination starting with a value of `axes[0]`.
///
/// For each value, the combinations that extend into later axes come first,
/// the value on its own comes last.
fn find_combinations(
    axes: &[VariantAxis],
    current: &mut Vec<VariantProperty>,
    result: &mut Vec<Vec<VariantProperty>>,
) {
    let Some((axis, rest)) = axes.split_first() else {
        return;
    };

    for value in &axis.values {
        current.push(value.clone());
        for start in 0..rest.len() {
            find_combinations(&rest[start..], current, result);
        }
        result.push(current.clone());
        current.pop();
    }
}

/// Compute every description that picks at most one value per axis.
///
/// The output is ordered longest match first within each starting axis, and
/// by axis and value priority otherwise. The null variant is not part of the
/// result.
///
/// # Errors
///
/// Fails if two axes describe the same `namespace :: feature`.
pub fn compute_combinations(
    axes: &[VariantAxis],
) -> Result<Vec<VariantDescription>, ValidationError> {
    let mut combinations = Vec::new();
    for start in 0..axes.len() {
        find_combinations(&axes[start..], &mut Vec::new(), &mut combinations);
    }

    combinations
        .into_iter()
        .map(VariantDescription::new)
        .collect()
}
