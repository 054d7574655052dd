//! Discovery and loading of `variants.toml`

use std::fmt;
use std::path::{Path, PathBuf};

use variantlib_types::VariantPriorities;

use crate::error::ConfigError;

/// Name of the configuration file looked up in every location.
pub const CONFIG_FILENAME: &str = "variants.toml";

/// Directory name used below the user and system configuration directories.
pub const CONFIG_DIRNAME: &str = "variantlib";

/// Where a configuration file was found, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigEnvironment {
    Local,
    VirtualEnv,
    User,
    Global,
}

impl fmt::Display for ConfigEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigEnvironment::Local => "local",
            ConfigEnvironment::VirtualEnv => "virtualenv",
            ConfigEnvironment::User => "user",
            ConfigEnvironment::Global => "global",
        };
        f.write_str(name)
    }
}

/// Directories searched for [`CONFIG_FILENAME`].
///
/// A `None` entry is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSearchPaths {
    pub local: Option<PathBuf>,
    pub virtual_env: Option<PathBuf>,
    pub user: Option<PathBuf>,
    pub global: Option<PathBuf>,
}

impl ConfigSearchPaths {
    /// The standard locations: the current directory, `$VIRTUAL_ENV`, the
    /// user configuration directory and the system configuration directory.
    pub fn from_env() -> Self {
        Self {
            local: std::env::current_dir().ok(),
            virtual_env: std::env::var_os("VIRTUAL_ENV")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            user: dirs::config_dir().map(|dir| dir.join(CONFIG_DIRNAME)),
            global: global_config_dir(),
        }
    }

    /// Candidate files in lookup order.
    pub fn candidates(&self) -> impl Iterator<Item = (ConfigEnvironment, PathBuf)> + '_ {
        [
            (ConfigEnvironment::Local, &self.local),
            (ConfigEnvironment::VirtualEnv, &self.virtual_env),
            (ConfigEnvironment::User, &self.user),
            (ConfigEnvironment::Global, &self.global),
        ]
        .into_iter()
        .filter_map(|(env, dir)| dir.as_ref().map(|dir| (env, dir.join(CONFIG_FILENAME))))
    }
}

#[cfg(windows)]
fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("PROGRAMDATA").map(|dir| PathBuf::from(dir).join(CONFIG_DIRNAME))
}

#[cfg(target_os = "macos")]
fn global_config_dir() -> Option<PathBuf> {
    Some(PathBuf::from("/Library/Application Support").join(CONFIG_DIRNAME))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn global_config_dir() -> Option<PathBuf> {
    Some(PathBuf::from("/etc").join(CONFIG_DIRNAME))
}

#[cfg(not(any(unix, windows)))]
fn global_config_dir() -> Option<PathBuf> {
    None
}

/// Priorities read from a configuration file, and where they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantConfiguration {
    /// `None` when no configuration file exists.
    pub source: Option<(ConfigEnvironment, PathBuf)>,
    pub priorities: VariantPriorities,
}

impl VariantConfiguration {
    /// Load the first configuration file found in `paths`.
    ///
    /// Without any file the default, empty configuration is returned.
    pub fn load(paths: &ConfigSearchPaths) -> Result<Self, ConfigError> {
        for (env, path) in paths.candidates() {
            if !path.is_file() {
                continue;
            }
            tracing::info!("Loading {env} configuration file: {}", path.display());
            let priorities = Self::read_priorities(&path)?;
            return Ok(Self {
                source: Some((env, path)),
                priorities,
            });
        }

        tracing::debug!("No variant configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load the first configuration file found in the standard locations.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&ConfigSearchPaths::from_env())
    }

    /// Parse and validate a single configuration file.
    pub fn read_priorities(path: &Path) -> Result<VariantPriorities, ConfigError> {
        let content = fs_err::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let priorities: VariantPriorities =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        priorities.validate()?;
        Ok(priorities)
    }
}
