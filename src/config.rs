use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::project::{SdkKind, ELIXIR_SOURCE_EXTENSIONS, MIX_MANIFEST_FILE};

pub const PROJECT_CONFIG_FILE: &str = "mixrun.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {error}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("failed to parse {}: {error}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: toml::de::Error,
    },
    #[error("invalid test source pattern `{pattern}`: {error}")]
    InvalidGlob {
        pattern: String,
        #[source]
        error: globset::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default = "ProjectConfig::default_manifest")]
    pub manifest: String,
    #[serde(default)]
    pub sdk: Option<SdkKind>,
    #[serde(default = "ProjectConfig::default_test_sources")]
    pub test_sources: Vec<String>,
    #[serde(default = "ProjectConfig::default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    pub name: String,
    pub root: PathBuf,
    #[serde(default)]
    pub sdk: Option<SdkKind>,
}

impl ProjectConfig {
    fn default_manifest() -> String {
        MIX_MANIFEST_FILE.to_owned()
    }

    fn default_test_sources() -> Vec<String> {
        ["test", "test/**", "apps/*/test", "apps/*/test/**"]
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    fn default_source_extensions() -> Vec<String> {
        ELIXIR_SOURCE_EXTENSIONS
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    pub fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        debug!(path = %path.display(), "loaded project config");
        Self::parse(&raw, path)
    }

    /// `explicit` when given, else `<project_root>/mixrun.toml` when it exists,
    /// else defaults.
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = project_root.join(PROJECT_CONFIG_FILE);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        debug!(root = %project_root.display(), "no project config; using defaults");
        Ok(Self::default())
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            manifest: Self::default_manifest(),
            sdk: None,
            test_sources: Self::default_test_sources(),
            source_extensions: Self::default_source_extensions(),
            modules: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
