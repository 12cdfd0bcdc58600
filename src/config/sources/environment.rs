//! Environment overlay: `CURATOR__<SECTION>__<KEY>`.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, Map};

pub const ENV_PREFIX: &str = "CURATOR";
pub const ENV_SEPARATOR: &str = "__";

/// Environment source over the process environment, or over `vars` when given.
///
/// `CURATOR__FETCH__TIMEOUT_SECS=10` sets `fetch.timeout_secs`. Empty values
/// are ignored so an exported-but-blank variable keeps the file value.
pub fn environment_source(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .ignore_empty(true)
        .try_parsing(true)
        .source(vars)
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(environment_source(None)))
}
