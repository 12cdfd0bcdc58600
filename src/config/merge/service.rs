//! MergeService: orchestrates sources, applies merge policy, deserializes to CuratorConfig.

use crate::config::sources::{environment, global_file, local_file};
use crate::config::CuratorConfig;
use config::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: global file (lowest) -> selected file -> environment (highest).
    pub fn load(path: Option<&Path>) -> Result<CuratorConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match path {
            Some(path) => local_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<CuratorConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = local_file::add_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
