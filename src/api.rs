//! High-level operations over a set of variant providers

use std::collections::BTreeSet;

use itertools::Itertools;
use variantlib_config::aggregate_priorities;
use variantlib_resolver::{
    ForbiddenVariants, ResolverError, axes_from_provider_configs, compute_combinations,
    inject_abi_dependency, sort_and_filter_supported_variants,
};
use variantlib_types::{ProviderConfig, VariantDescription, VariantPriorities, VariantProperty};

use crate::environment::VariantEnvironment;
use crate::error::VariantError;
use crate::provider::ProviderRegistry;

/// Every variant the registered providers can describe, most preferred first.
///
/// Namespaces are combined in `namespace_priorities` order and each must have
/// a registered provider. The null variant closes the catalogue.
pub fn build_variant_catalogue(
    registry: &ProviderRegistry,
    namespace_priorities: &[String],
) -> Result<Vec<VariantDescription>, VariantError> {
    if let Some(missing) = namespace_priorities
        .iter()
        .find(|namespace| !registry.contains(namespace))
    {
        return Err(VariantError::MissingProvider(missing.clone()));
    }

    let configs = registry.get_all_configs()?;
    let axes = axes_from_provider_configs(&configs, namespace_priorities)?;
    let mut catalogue = compute_combinations(&axes)?;
    catalogue.push(VariantDescription::null());

    tracing::info!(
        "Built a catalogue of {} variants from {} axes",
        catalogue.len(),
        axes.len()
    );
    Ok(catalogue)
}

/// Hexdigests of the published `variants` usable here, most preferred first.
///
/// `priority_sources` are merged most important first (explicit arguments,
/// configuration file, package defaults). Supported properties come from the
/// registry and from the ABI dependencies of `environment`.
pub fn get_variant_hashes_by_priority(
    variants: Vec<VariantDescription>,
    registry: &ProviderRegistry,
    priority_sources: &[&VariantPriorities],
    forbidden: &ForbiddenVariants,
    environment: &VariantEnvironment,
) -> Result<Vec<String>, VariantError> {
    let mut priorities = aggregate_priorities(priority_sources.iter().copied());
    priorities.validate()?;

    let mut supported = registry
        .get_supported_configs()?
        .iter()
        .flat_map(ProviderConfig::to_properties)
        .collect::<Vec<_>>();

    if priorities.namespace_priorities.is_empty() {
        priorities.namespace_priorities = default_namespace_priorities(&supported)?;
    }
    for namespace in &priorities.namespace_priorities {
        if !registry.contains(namespace) {
            tracing::warn!(
                "No variant provider is registered for namespace `{namespace}`, its variants are not supported"
            );
        }
    }
    for namespace in registry.namespaces() {
        if !priorities
            .namespace_priorities
            .iter()
            .any(|listed| listed == namespace)
        {
            tracing::warn!(
                "Namespace `{namespace}` has no entry in `namespace_priorities`, its properties rank after every listed namespace"
            );
        }
    }

    inject_abi_dependency(
        &mut supported,
        &mut priorities.namespace_priorities,
        &environment.overrides,
        &environment.installed,
    );

    let ranked = sort_and_filter_supported_variants(variants, &supported, &priorities, forbidden)?;
    Ok(ranked
        .iter()
        .map(|description| description.hexdigest().to_string())
        .collect())
}

/// The single namespace of `supported`; several namespaces need explicit priorities.
fn default_namespace_priorities(
    supported: &[VariantProperty],
) -> Result<Vec<String>, ResolverError> {
    let namespaces = supported
        .iter()
        .map(VariantProperty::namespace)
        .collect::<BTreeSet<_>>();
    if namespaces.len() > 1 {
        return Err(ResolverError::Configuration(format!(
            "no namespace priority is set to order the namespaces `{}`",
            namespaces.iter().join("`, `")
        )));
    }
    Ok(namespaces.into_iter().map(str::to_string).collect())
}

/// Whether a property is described by the providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValidity {
    /// The provider lists this feature and value.
    Valid,
    /// The provider owns the namespace but not this feature or value.
    Invalid,
    /// No provider owns the namespace.
    Unknown,
}

/// Per-property outcome of [`validate_variant`], in description order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantValidationResult {
    pub results: Vec<(VariantProperty, PropertyValidity)>,
}

impl VariantValidationResult {
    /// No property is invalid; unknown namespaces are tolerated if
    /// `allow_unknown_providers` is set.
    pub fn is_valid(&self, allow_unknown_providers: bool) -> bool {
        self.results.iter().all(|(_, validity)| match validity {
            PropertyValidity::Valid => true,
            PropertyValidity::Invalid => false,
            PropertyValidity::Unknown => allow_unknown_providers,
        })
    }

    /// Properties a provider declared invalid.
    pub fn invalid_properties(&self) -> Vec<&VariantProperty> {
        self.with_validity(PropertyValidity::Invalid)
    }

    /// Properties in a namespace no provider owns.
    pub fn unknown_properties(&self) -> Vec<&VariantProperty> {
        self.with_validity(PropertyValidity::Unknown)
    }

    fn with_validity(&self, wanted: PropertyValidity) -> Vec<&VariantProperty> {
        self.results
            .iter()
            .filter(|(_, validity)| *validity == wanted)
            .map(|(property, _)| property)
            .collect()
    }
}

/// Check every property of `description` against the providers' full configs.
pub fn validate_variant(
    description: &VariantDescription,
    all_configs: &[ProviderConfig],
) -> VariantValidationResult {
    let results = description
        .properties()
        .iter()
        .map(|property| {
            let validity = match all_configs
                .iter()
                .find(|config| config.namespace() == property.namespace())
            {
                None => PropertyValidity::Unknown,
                Some(config) => match config.get(property.feature()) {
                    Some(feature) if feature.values().iter().any(|v| v == property.value()) => {
                        PropertyValidity::Valid
                    }
                    _ => PropertyValidity::Invalid,
                },
            };
            (property.clone(), validity)
        })
        .collect();
    VariantValidationResult { results }
}
