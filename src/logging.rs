//! Logging System
//!
//! Structured logging through `tracing`. The active settings are layered:
//! `CURATOR_LOG*` environment variables, then command-line flags, then the
//! `logging` section of the config file.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const ENV_FILTER: &str = "CURATOR_LOG";
const ENV_FORMAT: &str = "CURATOR_LOG_FORMAT";
const ENV_OUTPUT: &str = "CURATOR_LOG_OUTPUT";
const ENV_FILE: &str = "CURATOR_LOG_FILE";
const ENV_MODULES: &str = "CURATOR_LOG_MODULES";

/// Event encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "invalid log format '{}' (expected 'text' or 'json')",
                other
            )),
        }
    }
}

/// Where events are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOutput {
    #[serde(rename = "stdout")]
    Stdout,
    #[default]
    #[serde(rename = "stderr")]
    Stderr,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "file+stderr")]
    FileAndStderr,
    #[serde(rename = "both")]
    Both,
}

impl LogOutput {
    fn writes_file(self) -> bool {
        matches!(self, Self::File | Self::FileAndStderr)
    }
}

impl FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            "file" => Ok(Self::File),
            "file+stderr" => Ok(Self::FileAndStderr),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "invalid log output '{}' (expected stdout, stderr, file, file+stderr or both)",
                other
            )),
        }
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::File => "file",
            Self::FileAndStderr => "file+stderr",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

/// `logging` section of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// trace, debug, info, warn, error or off
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Log file when `output` includes a file; unset means the platform state dir
    pub file: Option<PathBuf>,
    /// ANSI colors for text output on a terminal stream
    pub color: bool,
    /// Per-module level directives, e.g. `curator::fetch = "debug"`
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            format: LogFormat::Text,
            output: LogOutput::Stderr,
            file: None,
            color: true,
            modules: BTreeMap::new(),
        }
    }
}

/// Command-line logging flags; set values win over the config file.
#[derive(Debug, Clone, Default)]
pub struct LoggingOverrides {
    pub verbose: bool,
    pub level: Option<String>,
    pub format: Option<LogFormat>,
    pub output: Option<LogOutput>,
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn with_overrides(mut self, overrides: &LoggingOverrides) -> Self {
        if overrides.verbose {
            self.level = "debug".to_string();
        } else if let Some(level) = &overrides.level {
            self.level = level.clone();
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(file) = &overrides.file {
            self.file = Some(file.clone());
        }
        self
    }

    /// Apply `CURATOR_LOG_FORMAT` and `CURATOR_LOG_OUTPUT`.
    fn with_env(mut self) -> Result<Self, ApiError> {
        if let Some(format) = env_value(ENV_FORMAT) {
            self.format = format.parse().map_err(ApiError::ConfigError)?;
        }
        if let Some(output) = env_value(ENV_OUTPUT) {
            self.output = output.parse().map_err(ApiError::ConfigError)?;
        }
        Ok(self)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Log file path. Precedence: explicit path, `CURATOR_LOG_FILE`, configured
/// path, then `curator.log` in the platform state directory.
pub fn resolve_log_file_path(
    explicit: Option<PathBuf>,
    configured: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    let non_empty = |p: &PathBuf| !p.as_os_str().is_empty();
    if let Some(path) = explicit.filter(non_empty) {
        return Ok(path);
    }
    if let Some(path) = env_value(ENV_FILE) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = configured.filter(non_empty) {
        return Ok(path);
    }

    let dirs = directories::ProjectDirs::from("", "curator", "curator").ok_or_else(|| {
        ApiError::ConfigError("Could not determine a state directory for the log file".to_string())
    })?;
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.cache_dir());
    Ok(dir.join("curator.log"))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let init_failed = |e: tracing_subscriber::util::TryInitError| {
        ApiError::ConfigError(format!("Failed to initialize logging: {}", e))
    };

    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(init_failed);
    }

    let config = config.clone().with_env()?;
    let filter = build_env_filter(&config)?;
    let writer = build_writer(&config)?;
    let ansi = config.color && !config.output.writes_file();

    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer);
    let registry = Registry::default().with(filter);
    match config.format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Text => registry.with(layer.with_ansi(ansi)).try_init(),
    }
    .map_err(init_failed)
}

fn build_writer(config: &LoggingConfig) -> Result<BoxMakeWriter, ApiError> {
    let writer = match config.output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::Both => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        LogOutput::File | LogOutput::FileAndStderr => {
            let path = resolve_log_file_path(None, config.file.clone())?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    ApiError::ConfigError(format!(
                        "Failed to open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            let file = Arc::new(file);
            if config.output == LogOutput::FileAndStderr {
                BoxMakeWriter::new(file.and(std::io::stderr))
            } else {
                BoxMakeWriter::new(file)
            }
        }
    };
    Ok(writer)
}

/// `CURATOR_LOG` replaces everything; otherwise the base level plus module
/// directives from config and `CURATOR_LOG_MODULES`.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_FILTER) {
        return Ok(filter);
    }
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let env_modules = env_value(ENV_MODULES).unwrap_or_default();
    let env_directives = env_modules
        .split(',')
        .filter_map(|d| d.split_once('='))
        .map(|(module, level)| format!("{}={}", module.trim(), level.trim()));
    let config_directives = config
        .modules
        .iter()
        .map(|(module, level)| format!("{}={}", module, level));

    let mut filter = EnvFilter::new(&config.level);
    for directive in config_directives.chain(env_directives) {
        let parsed = directive.parse().map_err(|e| {
            ApiError::ConfigError(format!("Invalid log directive '{}': {}", directive, e))
        })?;
        filter = filter.add_directive(parsed);
    }
    Ok(filter)
}
