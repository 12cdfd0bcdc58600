use curator::fetch::StaticTransport;
use serde_json::{json, Value};

pub const API: &str = "https://api.example.com";
pub const SOURCE_URL: &str = "https://lists.example.com/agents.json";

pub fn listing_url(owner: &str, name: &str, path: &str, branch: &str) -> String {
    format!("{}/repos/{}/{}/contents/{}?ref={}", API, owner, name, path, branch)
}

pub fn raw_url(owner: &str, name: &str, branch: &str, file: &str) -> String {
    format!(
        "https://raw.example.com/{}/{}/{}/agents/{}",
        owner, name, branch, file
    )
}

pub fn listing(owner: &str, name: &str, branch: &str, files: &[&str]) -> String {
    let mut entries: Vec<Value> = files
        .iter()
        .map(|f| {
            json!({
                "type": "file",
                "name": f,
                "path": format!("agents/{}", f),
                "download_url": raw_url(owner, name, branch, f)
            })
        })
        .collect();
    entries.push(json!({"type": "dir", "name": "drafts", "path": "agents/drafts", "download_url": null}));
    Value::Array(entries).to_string()
}

/// Three repositories: one on `main`, one found only on `develop`, one with
/// a blank owner.
pub fn catalog_transport() -> StaticTransport {
    let repos = json!({
        "acme": {"owner": "acme", "name": "agents", "description": "Acme agents"},
        "broken": {"owner": "", "name": "agents"},
        "zen": {"owner": "zen", "name": "helpers", "branch": "main"}
    });

    StaticTransport::new()
        .route(SOURCE_URL, repos.to_string())
        .route(
            listing_url("acme", "agents", "agents", "main"),
            listing("acme", "agents", "main", &["code-review-helper.md", "security.md"]),
        )
        .route(
            raw_url("acme", "agents", "main", "code-review-helper.md"),
            "Reviews diffs.\nSuggests fixes.\n\nDetails follow.",
        )
        .route(
            raw_url("acme", "agents", "main", "security.md"),
            "# Security Auditor\n\nFinds vulnerabilities.",
        )
        .fail(listing_url("zen", "helpers", "agents", "main"))
        .route(listing_url("zen", "helpers", "agents", "master"), "[]")
        .route(
            listing_url("zen", "helpers", "agents", "develop"),
            listing("zen", "helpers", "develop", &["focus.md"]),
        )
        .route(
            raw_url("zen", "helpers", "develop", "focus.md"),
            "# Focus Keeper\nKeeps you focused.",
        )
}
