use std::sync::Arc;
use std::time::Duration;

use curator::aggregator::Aggregator;
use curator::config::{CuratorConfig, FetchConfig, SourceConfig};
use curator::fetch::ContentFetcher;
use curator::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

use crate::integration::support::{catalog_transport, listing_url, API, SOURCE_URL};

fn fetch_config() -> FetchConfig {
    FetchConfig {
        api_base: API.to_string(),
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn pipeline_collects_agents_across_fallback_branches() {
    let transport = Arc::new(catalog_transport());
    let fetcher = ContentFetcher::from_config(transport.clone(), &fetch_config());
    let aggregator = Aggregator::new(fetcher, "https://github.com");

    let result = aggregator
        .run(&[SourceConfig::new("community", SOURCE_URL)])
        .await;

    assert_eq!(result.repositories.len(), 3);
    assert_eq!(
        result
            .repositories
            .iter()
            .map(|r| r.is_valid())
            .collect::<Vec<_>>(),
        vec![true, false, true]
    );

    let names: Vec<&str> = result.agents.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Code Review Helper", "Security Auditor", "Focus Keeper"]);
    assert_eq!(result.agents[0].description, "Reviews diffs. Suggests fixes.");
    assert_eq!(result.agents[2].description, "Keeps you focused.");
    assert_eq!(result.agents[2].branch, "develop");
    assert_eq!(
        result.agents[2].file_url(),
        "https://github.com/zen/helpers/blob/develop/agents/focus.md"
    );
    assert!(result.agents.iter().all(|a| a.category == "General"));

    assert_eq!(
        transport.request_count(&listing_url("zen", "helpers", "agents", "dev")),
        0
    );
    assert_eq!(
        transport.request_count(&listing_url("zen", "helpers", "agents", "development")),
        0
    );
}

#[tokio::test]
async fn fetcher_tries_branches_in_fallback_order() {
    let transport = Arc::new(catalog_transport());
    let fetcher = ContentFetcher::new(
        transport.clone(),
        Duration::from_secs(1),
        Duration::from_secs(60),
        API,
    );

    let directory = fetcher
        .fetch_agent_directory("zen", "helpers", "main", "agents")
        .await
        .expect("develop branch lists agents");

    assert_eq!(directory.branch, "develop");
    assert_eq!(
        transport.requests(),
        vec![
            listing_url("zen", "helpers", "agents", "main"),
            listing_url("zen", "helpers", "agents", "master"),
            listing_url("zen", "helpers", "agents", "develop"),
        ]
    );
}

fn cli_context() -> CliContext {
    let config = CuratorConfig {
        agent_sources: vec![SourceConfig::new("community", SOURCE_URL)],
        fetch: fetch_config(),
        ..CuratorConfig::default()
    };
    CliContext::with_transport(config, Arc::new(catalog_transport()))
}

#[test]
fn generate_readme_writes_listing() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("docs").join("README.md");

    let message = cli_context()
        .execute(&Commands::GenerateReadme {
            output: Some(output.clone()),
            dry_run: false,
        })
        .unwrap();
    assert_eq!(
        message,
        "Successfully generated README with 3 repositories and 3 agents!"
    );

    let readme = std::fs::read_to_string(&output).unwrap();
    assert!(readme.contains("**3** Claude agents"));
    assert!(readme.contains("- [General](#general)"));
    assert!(readme.contains("[Security Auditor](https://github.com/acme/agents/blob/main/agents/security.md)"));
    assert!(readme.contains("[zen/helpers](https://github.com/zen/helpers)"));
}

#[test]
fn dry_run_reports_counts_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("README.md");

    let message = cli_context()
        .execute(&Commands::GenerateReadme {
            output: Some(output.clone()),
            dry_run: true,
        })
        .unwrap();

    assert!(message.starts_with("Dry run: Would generate README with 3 repositories and 3 agents"));
    assert!(message.contains("Invalid repositories"));
    assert!(!output.exists());
}
