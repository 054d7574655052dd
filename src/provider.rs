//! Registry of the variant providers available to a resolution

use std::fmt;

use variantlib_types::{
    ProviderConfig, ProviderError, ValidationError, VariantProvider,
    validation::validate_namespace,
};

use crate::error::VariantError;

/// Providers keyed by the namespace they own, in registration order.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<(String, Box<dyn VariantProvider>)>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("namespaces", &self.namespaces().collect::<Vec<_>>())
            .finish()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` as the owner of `namespace`.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        provider: impl VariantProvider + 'static,
    ) -> Result<(), ValidationError> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;
        if self.contains(&namespace) {
            return Err(ValidationError::DuplicateValue {
                field: "providers",
                value: namespace,
            });
        }
        self.providers.push((namespace, Box::new(provider)));
        Ok(())
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.providers.iter().any(|(ns, _)| ns == namespace)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|(namespace, _)| namespace.as_str())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Every feature and value of every provider.
    pub fn get_all_configs(&self) -> Result<Vec<ProviderConfig>, VariantError> {
        self.collect_configs(|provider| provider.get_all_configs())
    }

    /// The features and values every provider reports as supported here.
    pub fn get_supported_configs(&self) -> Result<Vec<ProviderConfig>, VariantError> {
        self.collect_configs(|provider| provider.get_supported_configs())
    }

    fn collect_configs(
        &self,
        query: impl Fn(&dyn VariantProvider) -> Result<ProviderConfig, ProviderError>,
    ) -> Result<Vec<ProviderConfig>, VariantError> {
        self.providers
            .iter()
            .map(|(namespace, provider)| {
                let config = query(provider.as_ref()).map_err(|source| VariantError::Provider {
                    namespace: namespace.clone(),
                    source,
                })?;
                if config.namespace() != namespace {
                    return Err(VariantError::Provider {
                        namespace: namespace.clone(),
                        source: format!(
                            "the provider returned a config for namespace `{}`",
                            config.namespace()
                        )
                        .into(),
                    });
                }
                tracing::debug!("{}", config.pretty_print());
                Ok(config)
            })
            .collect()
    }
}
