//! Merge policy: defaults applied beneath every other source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder with the keys every configuration carries.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("agent_sources", Vec::<config::Value>::new())?
        .set_default("logging.level", "info")
}
