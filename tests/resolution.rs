use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use variantlib::{
    ConfigSearchPaths, ForbiddenVariants, ProviderConfig, ProviderError, ProviderRegistry,
    VariantConfiguration, VariantDescription, VariantEnvironment, VariantFeatureConfig,
    VariantPriorities, VariantProperty, VariantProvider, build_variant_catalogue,
    find_installed_distributions, get_variant_hashes_by_priority,
};

struct StaticProvider {
    namespace: &'static str,
    all: Vec<(&'static str, Vec<&'static str>)>,
    supported: Vec<(&'static str, Vec<&'static str>)>,
}

impl StaticProvider {
    fn config(
        &self,
        features: &[(&'static str, Vec<&'static str>)],
    ) -> Result<ProviderConfig, ProviderError> {
        let configs = features
            .iter()
            .map(|(name, values)| VariantFeatureConfig::new(*name, values.iter().copied()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ProviderConfig::new(self.namespace, configs)?)
    }
}

impl VariantProvider for StaticProvider {
    fn get_all_configs(&self) -> Result<ProviderConfig, ProviderError> {
        self.config(&self.all)
    }

    fn get_supported_configs(&self) -> Result<ProviderConfig, ProviderError> {
        self.config(&self.supported)
    }
}

#[fixture]
fn registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry
        .register(
            "x86_64",
            StaticProvider {
                namespace: "x86_64",
                all: vec![("level", vec!["v4", "v3", "v2", "v1"])],
                supported: vec![("level", vec!["v3", "v2", "v1"])],
            },
        )
        .unwrap();
    registry
        .register(
            "nvidia",
            StaticProvider {
                namespace: "nvidia",
                all: vec![("cuda_version_lower_bound", vec!["12.8", "12.6", "11.8"])],
                supported: vec![("cuda_version_lower_bound", vec!["12.6", "11.8"])],
            },
        )
        .unwrap();
    registry
}

fn description(properties: &[&str]) -> VariantDescription {
    VariantDescription::new(
        properties
            .iter()
            .map(|p| p.parse::<VariantProperty>().unwrap()),
    )
    .unwrap()
}

fn write_config(dir: &Path, content: &str) {
    fs_err::write(dir.join("variants.toml"), content).unwrap();
}

#[rstest]
fn test_configuration_file_drives_ranking(registry: ProviderRegistry) {
    let package_defaults = VariantPriorities {
        namespace_priorities: vec!["nvidia".to_string(), "x86_64".to_string()],
        ..Default::default()
    };
    let catalogue = build_variant_catalogue(&registry, &package_defaults.namespace_priorities)
        .unwrap();

    let local = TempDir::new().unwrap();
    write_config(
        local.path(),
        r#"
namespace_priorities = ["x86_64"]

[property_priorities.x86_64]
level = ["v2"]
"#,
    );
    let config = VariantConfiguration::load(&ConfigSearchPaths {
        local: Some(local.path().to_path_buf()),
        ..Default::default()
    })
    .unwrap();

    let hashes = get_variant_hashes_by_priority(
        catalogue,
        &registry,
        &[&config.priorities, &package_defaults],
        &ForbiddenVariants::default(),
        &VariantEnvironment::default(),
    )
    .unwrap();

    // x86_64 first, and v2 preferred over v3 within it
    assert_eq!(
        hashes[..3],
        [
            description(&["x86_64 :: level :: v2", "nvidia :: cuda_version_lower_bound :: 12.6"])
                .hexdigest(),
            description(&["x86_64 :: level :: v2", "nvidia :: cuda_version_lower_bound :: 11.8"])
                .hexdigest(),
            description(&["x86_64 :: level :: v2"]).hexdigest(),
        ]
    );
    // 4 x86_64 choices (v3, v2, v1, none) by 3 nvidia choices (12.6, 11.8, none)
    assert_eq!(hashes.len(), 12);
    assert_eq!(hashes.last().unwrap(), "00000000");
}

#[rstest]
fn test_forbidden_properties(registry: ProviderRegistry) {
    let priorities = VariantPriorities {
        namespace_priorities: vec!["nvidia".to_string(), "x86_64".to_string()],
        ..Default::default()
    };
    let catalogue = build_variant_catalogue(&registry, &priorities.namespace_priorities).unwrap();
    let forbidden = ForbiddenVariants {
        namespaces: vec![],
        features: vec!["nvidia :: cuda_version_lower_bound".parse().unwrap()],
        properties: vec!["x86_64 :: level :: v3".parse().unwrap()],
    };

    let hashes = get_variant_hashes_by_priority(
        catalogue,
        &registry,
        &[&priorities],
        &forbidden,
        &VariantEnvironment::default(),
    )
    .unwrap();

    assert_eq!(
        hashes,
        [
            description(&["x86_64 :: level :: v2"]).hexdigest(),
            description(&["x86_64 :: level :: v1"]).hexdigest(),
            "00000000",
        ]
    );
}

#[rstest]
fn test_abi_dependency_from_site_packages(registry: ProviderRegistry) {
    let site_packages = TempDir::new().unwrap();
    fs_err::create_dir_all(site_packages.path().join("torch-2.7.1.dist-info")).unwrap();
    // built directly so that VARIANT_ABI_DEPENDENCY in the outer environment is ignored
    let environment = VariantEnvironment {
        overrides: vec![],
        installed: find_installed_distributions(site_packages.path()).unwrap(),
    };
    assert_eq!(environment.installed.len(), 1);
    let priorities = VariantPriorities {
        namespace_priorities: vec!["x86_64".to_string(), "nvidia".to_string()],
        ..Default::default()
    };
    let published = vec![
        description(&["abi_dependency :: torch :: 2.6"]),
        description(&["abi_dependency :: torch :: 2.7"]),
        description(&["x86_64 :: level :: v1"]),
    ];

    let hashes = get_variant_hashes_by_priority(
        published,
        &registry,
        &[&priorities],
        &ForbiddenVariants::default(),
        &environment,
    )
    .unwrap();

    assert_eq!(
        hashes,
        [
            description(&["x86_64 :: level :: v1"]).hexdigest(),
            description(&["abi_dependency :: torch :: 2.7"]).hexdigest(),
            "00000000",
        ]
    );
}
