//! Global user config: `<config dir>/curator/config.{yaml,toml,json}`, optional.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::PathBuf;

/// Base path of the global config file, without extension.
pub fn global_config_base() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "curator", "curator")
        .map(|dirs| dirs.config_dir().join("config"))
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(base) = global_config_base() else {
        return Ok(builder);
    };
    let name = base.to_string_lossy().into_owned();
    Ok(builder.add_source(File::with_name(&name).required(false)))
}
