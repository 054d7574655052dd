//! Collect the ABI-dependency inputs from the running process
//!
//! The overrides come from [`VARIANT_ABI_DEPENDENCY_ENV`]; installed
//! distributions are read from the `<name>-<version>.dist-info` directories of
//! one or more site-packages directories.

use std::path::Path;

use variantlib_resolver::{
    Distribution, VARIANT_ABI_DEPENDENCY_ENV, parse_abi_dependency_overrides,
};

use crate::error::VariantError;

const DIST_INFO_SUFFIX: &str = ".dist-info";

/// Everything the ABI-dependency injector needs to know about this environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantEnvironment {
    /// Explicit `name==version` overrides, in the order given.
    pub overrides: Vec<Distribution>,
    /// Distributions found on disk.
    pub installed: Vec<Distribution>,
}

impl VariantEnvironment {
    /// Read the overrides variable and scan `site_packages` directories.
    pub fn from_env(site_packages: &[impl AsRef<Path>]) -> Result<Self, VariantError> {
        let overrides = std::env::var(VARIANT_ABI_DEPENDENCY_ENV)
            .map(|raw| parse_abi_dependency_overrides(&raw))
            .unwrap_or_default();

        let mut installed = Vec::new();
        for dir in site_packages {
            installed.extend(find_installed_distributions(dir.as_ref())?);
        }

        Ok(Self {
            overrides,
            installed,
        })
    }
}

/// List the distributions installed in a site-packages directory.
///
/// Entries are returned sorted by directory name. Directory names that do not
/// follow `<name>-<version>.dist-info` are skipped.
pub fn find_installed_distributions(
    site_packages: &Path,
) -> Result<Vec<Distribution>, VariantError> {
    let to_error = |source: std::io::Error| VariantError::Io {
        path: site_packages.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs_err::read_dir(site_packages).map_err(to_error)? {
        let entry = entry.map_err(to_error)?;
        if !entry.file_type().map_err(to_error)?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => tracing::debug!("Skipping non UTF-8 entry {name:?}"),
        }
    }
    names.sort();

    Ok(names
        .iter()
        .filter_map(|dir_name| {
            let stem = dir_name.strip_suffix(DIST_INFO_SUFFIX)?;
            let Some((name, version)) = stem.rsplit_once('-') else {
                tracing::warn!(
                    "Skipping `{dir_name}`: expected `<name>-<version>{DIST_INFO_SUFFIX}`"
                );
                return None;
            };
            Some(Distribution::new(name, version))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;

    /// Temporarily sets an environment variable for the duration of the test.
    fn with_env_var<F: FnOnce()>(key: &str, value: Option<&str>, f: F) {
        let original = std::env::var(key).ok();
        match value {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }
        f();
        match original {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }
    }

    fn site_packages(entries: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for entry in entries {
            fs_err::create_dir_all(dir.path().join(entry)).unwrap();
        }
        fs_err::write(dir.path().join("six.py"), "").unwrap();
        dir
    }

    #[test]
    fn test_find_installed_distributions() {
        let dir = site_packages(&[
            "numpy-2.2.1.dist-info",
            "numpy",
            "Jinja2-3.1.4.dist-info",
            "broken.dist-info",
            "torch-2.7.1+cu128.dist-info",
        ]);

        assert_eq!(
            find_installed_distributions(dir.path()).unwrap(),
            [
                Distribution::new("Jinja2", "3.1.4"),
                Distribution::new("numpy", "2.2.1"),
                Distribution::new("torch", "2.7.1+cu128"),
            ]
        );
    }

    #[test]
    fn test_missing_site_packages() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            find_installed_distributions(&missing),
            Err(VariantError::Io { path, .. }) if path == missing
        ));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        let dir = site_packages(&["numpy-2.2.1.dist-info"]);

        with_env_var(VARIANT_ABI_DEPENDENCY_ENV, Some("torch==2.7.1, bad"), || {
            let env = VariantEnvironment::from_env(&[dir.path()]).unwrap();
            assert_eq!(env.overrides, [Distribution::new("torch", "2.7.1")]);
            assert_eq!(env.installed, [Distribution::new("numpy", "2.2.1")]);
        });

        with_env_var(VARIANT_ABI_DEPENDENCY_ENV, None, || {
            let env = VariantEnvironment::from_env(&[] as &[&Path]).unwrap();
            assert_eq!(env, VariantEnvironment::default());
        });
    }
}
