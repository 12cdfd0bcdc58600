//! Content fetcher.

use crate::cache::ResponseCache;
use crate::catalog::{AgentDirectory, AgentFileReference, RepositoryRecord};
use crate::config::{FetchConfig, SourceConfig};
use crate::error::FetchError;
use crate::fetch::branch::branch_candidates;
use crate::fetch::transport::Transport;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Retrieves source lists, directory listings and agent files.
///
/// Owns the response cache for the lifetime of one run. JSON payloads
/// (source lists and directory listings) are cached; raw agent files are not.
pub struct ContentFetcher {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    api_base: String,
    cache: Mutex<ResponseCache<Value>>,
}

impl ContentFetcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        timeout: Duration,
        cache_ttl: Duration,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            timeout,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            cache: Mutex::new(ResponseCache::new(cache_ttl)),
        }
    }

    pub fn from_config(transport: Arc<dyn Transport>, config: &FetchConfig) -> Self {
        Self::new(
            transport,
            config.timeout(),
            config.cache_ttl(),
            config.api_base.clone(),
        )
    }

    /// Number of live cache entries.
    pub fn cached_entries(&self) -> usize {
        self.cache.lock().len()
    }

    /// Fetch and parse a JSON document, serving from cache when fresh.
    ///
    /// Failures are logged and reported as `None`.
    pub async fn fetch_json(&self, url: &str) -> Option<Value> {
        let started = Instant::now();
        match self.cached_json(url).await {
            Ok(data) => Some(data),
            Err(e) => {
                error!(
                    "Failed to fetch {} in {:.2} seconds: {}",
                    url,
                    started.elapsed().as_secs_f64(),
                    e
                );
                None
            }
        }
    }

    async fn cached_json(&self, url: &str) -> Result<Value, FetchError> {
        let cached = self.cache.lock().lookup(url);
        if let Some(data) = cached {
            return Ok(data);
        }

        let started = Instant::now();
        info!("Fetching data from: {}", url);
        let response = self
            .transport
            .get(url, self.timeout)
            .await?
            .error_for_status(url)?;
        let data: Value =
            serde_json::from_str(&response.body).map_err(|source| FetchError::MalformedPayload {
                url: url.to_string(),
                source,
            })?;
        info!(
            "Successfully fetched data from {} in {:.2} seconds",
            url,
            started.elapsed().as_secs_f64()
        );

        self.cache.lock().store(url, data.clone());
        Ok(data)
    }

    /// Fetch the repository candidates listed by a source.
    ///
    /// The payload must be an object keyed by repository id; entries that are
    /// not objects are dropped, and any other payload shape yields nothing.
    pub async fn fetch_repository_list(&self, source: &SourceConfig) -> Vec<RepositoryRecord> {
        let url = match source.url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                error!(
                    "{}",
                    FetchError::MissingSourceUrl {
                        source_id: source.id.clone()
                    }
                );
                return Vec::new();
            }
        };

        let Some(data) = self.fetch_json(url).await else {
            return Vec::new();
        };
        let Some(entries) = data.as_object() else {
            warn!("Source {} did not return an object of repositories", url);
            return Vec::new();
        };

        let repos: Vec<RepositoryRecord> = entries
            .iter()
            .filter_map(|(id, value)| RepositoryRecord::from_entry(id, value, url))
            .collect();
        info!("Fetched {} agent repositories from {}", repos.len(), url);
        repos
    }

    /// Contents API URL for a directory on a branch.
    pub fn contents_url(&self, owner: &str, name: &str, agents_path: &str, branch: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_base,
            owner,
            name,
            agents_path.trim_matches('/'),
            branch
        )
    }

    /// List the markdown agent files of a repository, trying fallback branches.
    ///
    /// The first branch whose listing contains at least one markdown file wins;
    /// later candidates are not requested. Returns `None` when every candidate
    /// fails or lists no agent files.
    pub async fn fetch_agent_directory(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
        agents_path: &str,
    ) -> Option<AgentDirectory> {
        for candidate in branch_candidates(branch) {
            let url = self.contents_url(owner, name, agents_path, &candidate);
            debug!("Trying to fetch agent directory from {}", url);

            let listing = match self.cached_json(&url).await {
                Ok(listing) => listing,
                Err(e) => {
                    debug!("Failed to fetch directory from branch {}: {}", candidate, e);
                    continue;
                }
            };

            let files = agent_files_from_listing(&listing);
            if files.is_empty() {
                debug!("No agent files on branch {} of {}/{}", candidate, owner, name);
                continue;
            }

            info!(
                "Successfully fetched agent directory from {}/{} (branch {})",
                owner, name, candidate
            );
            return Some(AgentDirectory {
                branch: candidate,
                files,
            });
        }

        warn!("No valid agent directory found in {}/{}", owner, name);
        None
    }

    /// Download the raw text of one agent file.
    pub async fn fetch_agent_file_contents(&self, file: &AgentFileReference) -> Option<String> {
        debug!("Fetching agent file: {}", file.download_url);
        let result = self
            .transport
            .get(&file.download_url, self.timeout)
            .await
            .and_then(|response| response.error_for_status(&file.download_url));
        match result {
            Ok(response) => Some(response.body),
            Err(e) => {
                warn!("Failed to fetch agent file {}: {}", file.name, e);
                None
            }
        }
    }
}

/// Markdown file entries of a contents listing. Non-list payloads yield nothing.
fn agent_files_from_listing(listing: &Value) -> Vec<AgentFileReference> {
    let Some(items) = listing.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("file"))
        .filter_map(|item| {
            let name = item.get("name").and_then(Value::as_str)?;
            if !name.ends_with(".md") {
                return None;
            }
            let path = item.get("path").and_then(Value::as_str)?;
            let download_url = item.get("download_url").and_then(Value::as_str)?;
            Some(AgentFileReference {
                name: name.to_string(),
                path: path.to_string(),
                download_url: download_url.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::transport::StaticTransport;
    use serde_json::json;

    const API: &str = "https://api.example.com";

    fn fetcher(transport: Arc<StaticTransport>) -> ContentFetcher {
        ContentFetcher::new(transport, Duration::from_secs(5), Duration::from_secs(600), API)
    }

    fn listing(files: &[&str]) -> String {
        let entries: Vec<Value> = files
            .iter()
            .map(|f| {
                json!({
                    "type": "file",
                    "name": f,
                    "path": format!("agents/{}", f),
                    "download_url": format!("https://raw.example.com/agents/{}", f)
                })
            })
            .collect();
        Value::Array(entries).to_string()
    }

    #[tokio::test]
    async fn test_fetch_json_caches_success() {
        let transport = Arc::new(StaticTransport::new().route("https://s/list.json", r#"{"a":1}"#));
        let fetcher = fetcher(transport.clone());

        assert_eq!(fetcher.fetch_json("https://s/list.json").await, Some(json!({"a": 1})));
        assert_eq!(fetcher.fetch_json("https://s/list.json").await, Some(json!({"a": 1})));
        assert_eq!(transport.request_count("https://s/list.json"), 1);
        assert_eq!(fetcher.cached_entries(), 1);
    }

    #[tokio::test]
    async fn test_fetch_json_failures_are_absent_and_uncached() {
        let transport = Arc::new(
            StaticTransport::new()
                .route("https://s/bad.json", "not json {")
                .route_status("https://s/500.json", 500, "{}")
                .fail("https://s/down.json"),
        );
        let fetcher = fetcher(transport.clone());

        assert_eq!(fetcher.fetch_json("https://s/bad.json").await, None);
        assert_eq!(fetcher.fetch_json("https://s/500.json").await, None);
        assert_eq!(fetcher.fetch_json("https://s/down.json").await, None);
        assert_eq!(fetcher.fetch_json("https://s/bad.json").await, None);
        assert_eq!(transport.request_count("https://s/bad.json"), 2);
        assert_eq!(fetcher.cached_entries(), 0);
    }

    #[tokio::test]
    async fn test_fetch_repository_list_stamps_id_and_source() {
        let body = json!({
            "first": {"owner": "a", "name": "one"},
            "skipped": "not an object",
            "second": {"owner": "b", "name": "two", "branch": "dev"}
        })
        .to_string();
        let transport = Arc::new(StaticTransport::new().route("https://s/repos.json", body));
        let fetcher = fetcher(transport);

        let repos = fetcher
            .fetch_repository_list(&SourceConfig::new("main", "https://s/repos.json"))
            .await;
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].id, "first");
        assert_eq!(repos[1].id, "second");
        assert_eq!(repos[1].branch, "dev");
        assert!(repos.iter().all(|r| r.source_url == "https://s/repos.json"));
    }

    #[tokio::test]
    async fn test_fetch_repository_list_wrong_shape_or_missing_url() {
        let transport = Arc::new(
            StaticTransport::new()
                .route("https://s/list.json", "[1, 2, 3]")
                .route("https://s/scalar.json", "42"),
        );
        let fetcher = fetcher(transport.clone());

        assert!(fetcher
            .fetch_repository_list(&SourceConfig::new("l", "https://s/list.json"))
            .await
            .is_empty());
        assert!(fetcher
            .fetch_repository_list(&SourceConfig::new("s", "https://s/scalar.json"))
            .await
            .is_empty());

        let mut no_url = SourceConfig::new("n", "");
        no_url.url = None;
        assert!(fetcher.fetch_repository_list(&no_url).await.is_empty());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_branch_fallback_stops_at_first_listing_with_agents() {
        let develop = format!("{}/repos/o/r/contents/agents?ref=develop", API);
        let transport = Arc::new(
            StaticTransport::new()
                .route(
                    format!("{}/repos/o/r/contents/agents?ref=master", API),
                    "[]",
                )
                .fail(format!("{}/repos/o/r/contents/agents?ref=main", API))
                .route(&develop, listing(&["a.md", "b.md"]))
                .route(
                    format!("{}/repos/o/r/contents/agents?ref=dev", API),
                    listing(&["never.md"]),
                ),
        );
        let fetcher = fetcher(transport.clone());

        let directory = fetcher
            .fetch_agent_directory("o", "r", "main", "agents")
            .await
            .unwrap();

        assert_eq!(directory.branch, "develop");
        assert_eq!(directory.files.len(), 2);
        let refs: Vec<String> = transport
            .requests()
            .iter()
            .map(|u| u.rsplit("ref=").next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(refs, vec!["main", "master", "develop"]);
    }

    #[tokio::test]
    async fn test_custom_branch_tries_only_itself() {
        let transport = Arc::new(StaticTransport::new());
        let fetcher = fetcher(transport.clone());

        assert!(fetcher
            .fetch_agent_directory("o", "r", "feature", "/agents/")
            .await
            .is_none());
        assert_eq!(
            transport.requests(),
            vec![format!("{}/repos/o/r/contents/agents?ref=feature", API)]
        );
    }

    #[tokio::test]
    async fn test_listing_keeps_only_markdown_files() {
        let body = json!([
            {"type": "file", "name": "a.md", "path": "agents/a.md", "download_url": "https://raw/a.md"},
            {"type": "dir", "name": "nested.md", "path": "agents/nested.md", "download_url": null},
            {"type": "file", "name": "notes.txt", "path": "agents/notes.txt", "download_url": "https://raw/notes.txt"},
            {"type": "file", "name": "broken.md", "path": "agents/broken.md"}
        ])
        .to_string();
        let transport = Arc::new(StaticTransport::new().route(
            format!("{}/repos/o/r/contents/agents?ref=trunk", API),
            body,
        ));
        let fetcher = fetcher(transport);

        let directory = fetcher
            .fetch_agent_directory("o", "r", "trunk", "agents")
            .await
            .unwrap();
        assert_eq!(
            directory.files,
            vec![AgentFileReference {
                name: "a.md".to_string(),
                path: "agents/a.md".to_string(),
                download_url: "https://raw/a.md".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_fetch_agent_file_contents() {
        let transport = Arc::new(
            StaticTransport::new()
                .route("https://raw/a.md", "# A")
                .fail("https://raw/b.md"),
        );
        let fetcher = fetcher(transport);
        let file = |name: &str| AgentFileReference {
            name: name.to_string(),
            path: format!("agents/{}", name),
            download_url: format!("https://raw/{}", name),
        };

        assert_eq!(
            fetcher.fetch_agent_file_contents(&file("a.md")).await.as_deref(),
            Some("# A")
        );
        assert_eq!(fetcher.fetch_agent_file_contents(&file("b.md")).await, None);
        assert_eq!(fetcher.fetch_agent_file_contents(&file("c.md")).await, None);
    }
}
