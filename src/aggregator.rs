//! Aggregation pipeline
//!
//! Walks configured sources in order, collects every repository they list,
//! and gathers the agents of each enabled, valid repository. A failure at any
//! level only removes that unit's contribution; the run always completes.

use crate::catalog::{validate_agent_repo_data, AgentRecord, RepositoryRecord};
use crate::config::SourceConfig;
use crate::fetch::ContentFetcher;
use crate::markdown::parse_agent_markdown;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Counters describing what a run skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub sources_processed: usize,
    /// Sources that yielded no repositories (missing URL, failed fetch, wrong shape)
    pub sources_empty: usize,
    pub repositories_disabled: usize,
    pub repositories_invalid: usize,
    pub repositories_without_agents: usize,
    pub files_failed: usize,
    pub files_unparsed: usize,
}

/// Result of one run: every listed repository and every collected agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub repositories: Vec<RepositoryRecord>,
    pub agents: Vec<AgentRecord>,
    pub summary: RunSummary,
}

impl Aggregation {
    /// Agents grouped by category; categories sorted, collection order kept within each.
    pub fn agents_by_category(&self) -> BTreeMap<&str, Vec<&AgentRecord>> {
        let mut groups: BTreeMap<&str, Vec<&AgentRecord>> = BTreeMap::new();
        for agent in &self.agents {
            groups.entry(agent.category.as_str()).or_default().push(agent);
        }
        groups
    }
}

/// Drives the fetcher over the configured sources.
pub struct Aggregator {
    fetcher: ContentFetcher,
    web_base: String,
}

impl Aggregator {
    pub fn new(fetcher: ContentFetcher, web_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            web_base: web_base.into(),
        }
    }

    pub fn fetcher(&self) -> &ContentFetcher {
        &self.fetcher
    }

    /// Run the pipeline over `sources`. Disabled sources are skipped.
    pub async fn run(&self, sources: &[SourceConfig]) -> Aggregation {
        let mut aggregation = Aggregation::default();

        for source in sources.iter().filter(|s| s.enabled) {
            info!("Processing source: {}", source.id);
            aggregation.summary.sources_processed += 1;

            let repositories = self.fetcher.fetch_repository_list(source).await;
            if repositories.is_empty() {
                aggregation.summary.sources_empty += 1;
            }

            for repo in &repositories {
                self.collect_repository(repo, &mut aggregation).await;
            }
            aggregation.repositories.extend(repositories);
        }

        info!(
            "Total repositories collected: {}",
            aggregation.repositories.len()
        );
        info!("Total agents collected: {}", aggregation.agents.len());
        aggregation
    }

    async fn collect_repository(&self, repo: &RepositoryRecord, aggregation: &mut Aggregation) {
        if !repo.enabled {
            debug!("Skipping disabled repository: {}", repo.id);
            aggregation.summary.repositories_disabled += 1;
            return;
        }

        if let Err(reason) = validate_agent_repo_data(repo) {
            warn!("Invalid repository data, skipping {}: {}", repo.id, reason);
            aggregation.summary.repositories_invalid += 1;
            return;
        }
        let (Some(owner), Some(name)) = (repo.owner.as_deref(), repo.name.as_deref()) else {
            return;
        };

        let Some(directory) = self
            .fetcher
            .fetch_agent_directory(owner, name, &repo.branch, &repo.agents_path)
            .await
        else {
            warn!("No agent manifest found for {}/{}", owner, name);
            aggregation.summary.repositories_without_agents += 1;
            return;
        };

        let before = aggregation.agents.len();
        for file in &directory.files {
            let Some(content) = self.fetcher.fetch_agent_file_contents(file).await else {
                aggregation.summary.files_failed += 1;
                continue;
            };

            match parse_agent_markdown(&content, &file.name) {
                Ok(parsed) => aggregation.agents.push(AgentRecord::assemble(
                    parsed,
                    owner,
                    name,
                    &self.web_base,
                    &directory.branch,
                    file,
                )),
                Err(e) => {
                    warn!("Failed to parse agent markdown from {}: {}", file.path, e);
                    aggregation.summary.files_unparsed += 1;
                }
            }
        }

        info!(
            "Fetched {} agents from repository {}/{}",
            aggregation.agents.len() - before,
            owner,
            name
        );
    }
}
