use std::fs;
use std::time::Duration;

use curator::config::ConfigLoader;
use curator::logging::LogOutput;
use tempfile::TempDir;

#[test]
fn load_yaml_sources_and_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    fs::write(
        &path,
        r#"
agent_sources:
  - id: community
    url: https://lists.example.com/agents.json
  - id: retired
    url: https://lists.example.com/old.json
    enabled: false
  - id: no-url
fetch:
  timeout_secs: 5
  cache_ttl_secs: 120
generation:
  output_file: docs/AGENTS.md
logging:
  level: debug
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(Some(&path)).unwrap();

    assert_eq!(config.agent_sources.len(), 3);
    let enabled: Vec<&str> = config
        .enabled_sources()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(enabled, vec!["community", "no-url"]);
    assert_eq!(config.agent_sources[2].url, None);
    assert_eq!(config.fetch.timeout(), Duration::from_secs(5));
    assert_eq!(config.fetch.cache_ttl(), Duration::from_secs(120));
    assert_eq!(config.fetch.api_base, "https://api.github.com");
    assert_eq!(config.generation.output_file, "docs/AGENTS.md");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.output, LogOutput::Stderr);
}

#[test]
fn load_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("curator.toml");
    fs::write(
        &path,
        r#"
[[agent_sources]]
id = "community"
url = "https://lists.example.com/agents.json"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.agent_sources.len(), 1);
    assert!(config.agent_sources[0].enabled);
}

#[test]
fn missing_explicit_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let result = ConfigLoader::load(Some(&temp_dir.path().join("absent.yaml")));
    assert!(result.is_err());
}

#[test]
fn malformed_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    fs::write(&path, "agent_sources: [ {id: a, enabled: maybe-not }").unwrap();
    assert!(ConfigLoader::load(Some(&path)).is_err());
}
