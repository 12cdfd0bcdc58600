//! CLI Tooling
//!
//! Command-line interface: generate the listing, validate configuration and
//! list configured sources.

use crate::aggregator::Aggregator;
use crate::config::{ConfigLoader, CuratorConfig, SourceConfig};
use crate::error::ApiError;
use crate::fetch::{ContentFetcher, ReqwestTransport, Transport};
use crate::logging::{LogFormat, LogOutput, LoggingOverrides};
use crate::render::{write_readme, ReadmeRenderer};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Curator CLI - Curated listing of agents published across repositories
#[derive(Parser)]
#[command(name = "curator")]
#[command(about = "Generate a curated README from agent repository sources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (default: ./config.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<LogOutput>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn logging_overrides(&self) -> LoggingOverrides {
        LoggingOverrides {
            verbose: self.verbose,
            level: self.log_level.clone(),
            format: self.log_format,
            output: self.log_output,
            file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate README.md from configured sources
    GenerateReadme {
        /// Output file path (default: generation.output_file)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Fetch and aggregate without writing output
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate configuration file format and source accessibility
    ValidateConfig {
        /// Also fetch every enabled source
        #[arg(long)]
        check_sources: bool,
    },
    /// List configured sources
    ListSources {
        /// Output format (table or json)
        #[arg(long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },
}

/// CLI context holding loaded configuration and the HTTP transport.
pub struct CliContext {
    config: CuratorConfig,
    transport: Arc<dyn Transport>,
}

impl CliContext {
    /// Load configuration and build the HTTP transport.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        let transport = Arc::new(ReqwestTransport::new(&config.fetch.user_agent)?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: CuratorConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::GenerateReadme { output, dry_run } => {
                self.generate_readme(output.clone(), *dry_run)
            }
            Commands::ValidateConfig { check_sources } => self.validate_config(*check_sources),
            Commands::ListSources { format } => self.list_sources(format),
        };
        info!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn enabled_sources(&self) -> Vec<SourceConfig> {
        self.config.enabled_sources().into_iter().cloned().collect()
    }

    fn fetcher(&self) -> ContentFetcher {
        ContentFetcher::from_config(Arc::clone(&self.transport), &self.config.fetch)
    }

    fn generate_readme(&self, output: Option<PathBuf>, dry_run: bool) -> Result<String, ApiError> {
        info!("Agent curator starting...");
        let sources = self.enabled_sources();
        info!("Loaded {} enabled sources", sources.len());
        if sources.is_empty() {
            warn!("No enabled sources found in configuration");
            return Ok("No enabled sources found in configuration; nothing generated".to_string());
        }

        let aggregator = Aggregator::new(self.fetcher(), self.config.fetch.web_base.clone());
        let aggregation = block_on(aggregator.run(&sources))?;
        let repositories = aggregation.repositories.len();
        let agents = aggregation.agents.len();

        if dry_run {
            return Ok(format!(
                "Dry run: Would generate README with {} repositories and {} agents\n{}",
                repositories,
                agents,
                format_summary(&aggregation.summary)
            ));
        }

        let output_path =
            output.unwrap_or_else(|| PathBuf::from(&self.config.generation.output_file));
        let content = ReadmeRenderer::from_config(&self.config.generation)
            .render(&aggregation, chrono::Utc::now());
        write_readme(&output_path, &content)?;
        info!("README generated successfully: {}", output_path.display());

        Ok(format!(
            "Successfully generated README with {} repositories and {} agents!",
            repositories, agents
        ))
    }

    fn validate_config(&self, check_sources: bool) -> Result<String, ApiError> {
        let sources = self.enabled_sources();
        let mut out = String::from("Configuration validation:\n");
        out.push_str(&format!("{} Found {} enabled sources\n", "✓".green(), sources.len()));

        if check_sources {
            let fetcher = self.fetcher();
            let mut unreachable = Vec::new();
            for source in &sources {
                let reachable = match source.url.as_deref() {
                    Some(url) if !url.trim().is_empty() => {
                        block_on(fetcher.fetch_json(url))?.is_some()
                    }
                    _ => false,
                };
                if reachable {
                    out.push_str(&format!(
                        "{} Source '{}' URL is accessible\n",
                        "✓".green(),
                        source.id
                    ));
                } else {
                    out.push_str(&format!(
                        "{} Source '{}' is not accessible\n",
                        "✗".red(),
                        source.id
                    ));
                    unreachable.push(source.id.clone());
                }
            }
            if !unreachable.is_empty() {
                return Err(ApiError::SourceCheckFailed(format!(
                    "{}unreachable sources: {}",
                    out,
                    unreachable.join(", ")
                )));
            }
        }

        out.push_str(&format!("{} Configuration is valid", "✓".green()));
        Ok(out)
    }

    fn list_sources(&self, format: &str) -> Result<String, ApiError> {
        let sources = self.enabled_sources();
        if format == "json" {
            return serde_json::to_string_pretty(&sources)
                .map_err(|e| ApiError::OutputError(format!("Failed to serialize sources: {}", e)));
        }

        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["ID", "URL", "Description"]);
        for source in &sources {
            table.add_row(vec![
                source.id.clone(),
                source.url.clone().unwrap_or_else(|| "-".to_string()),
                source.description.clone().unwrap_or_default(),
            ]);
        }
        Ok(format!("{}\n\n{}", "Configured Sources".bold().underline(), table))
    }
}

fn format_summary(summary: &crate::aggregator::RunSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Skipped", "Count"]);
    table.add_row(vec!["Empty sources".to_string(), summary.sources_empty.to_string()]);
    table.add_row(vec![
        "Disabled repositories".to_string(),
        summary.repositories_disabled.to_string(),
    ]);
    table.add_row(vec![
        "Invalid repositories".to_string(),
        summary.repositories_invalid.to_string(),
    ]);
    table.add_row(vec![
        "Repositories without agents".to_string(),
        summary.repositories_without_agents.to_string(),
    ]);
    table.add_row(vec!["Failed downloads".to_string(), summary.files_failed.to_string()]);
    table.add_row(vec!["Unparsed files".to_string(), summary.files_unparsed.to_string()]);
    table.to_string()
}

/// Drive a future to completion on a fresh runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, ApiError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(ApiError::ConfigError(
            "Cannot run the fetch pipeline from within an async runtime".to_string(),
        ));
    }
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
    Ok(rt.block_on(future))
}
