//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::CuratorConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `config.yaml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<CuratorConfig, ApiError> {
        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ApiError::ConfigError(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Ok(MergeService::load(Some(path))?)
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                let local = default_path.is_file().then_some(default_path.as_path());
                Ok(MergeService::load(local)?)
            }
        }
    }

    /// Load configuration from a specific file without the global user file.
    pub fn load_from_file(path: &Path) -> Result<CuratorConfig, ApiError> {
        Ok(MergeService::load_from_file(path)?)
    }

    /// Create default configuration.
    pub fn default() -> CuratorConfig {
        CuratorConfig::default()
    }
}
