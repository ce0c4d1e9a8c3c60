use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::build::BuildConfig;
use crate::compose::ComposeProject;

/// File name looked up by [`BerthConfig::load`].
pub const CONFIG_FILE: &str = "berth.toml";

/// berth.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BerthConfig {
    /// Dockerfile model
    #[serde(default)]
    pub dockerfile: BuildConfig,
    /// docker-compose.yml model
    #[serde(default)]
    pub compose: ComposeProject,
}

impl BerthConfig {
    /// Load from berth.toml in `project_dir`, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from an explicit path. Unlike [`BerthConfig::load`], a missing
    /// file is an error.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Err(crate::Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ConfigLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
