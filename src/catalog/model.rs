//! Repository and agent records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_AGENTS_PATH: &str = "agents";
pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// One repository listed by a source.
///
/// `owner` and `name` stay optional so that invalid entries can be kept for
/// reporting; see [`RepositoryRecord::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub id: String,
    pub owner: Option<String>,
    pub name: Option<String>,
    pub branch: String,
    pub enabled: bool,
    pub agents_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source_url: String,
}

impl RepositoryRecord {
    /// Build a record from one `id -> object` entry of a source payload.
    ///
    /// Returns `None` when the value is not an object. Fields of the wrong
    /// type are treated as absent.
    pub fn from_entry(id: &str, value: &Value, source_url: &str) -> Option<Self> {
        let object = value.as_object()?;
        let string_field = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            id: id.to_string(),
            owner: string_field("owner"),
            name: string_field("name"),
            branch: string_field("branch").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            enabled: object
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            agents_path: string_field("agentsPath")
                .unwrap_or_else(|| DEFAULT_AGENTS_PATH.to_string()),
            description: string_field("description"),
            source_url: source_url.to_string(),
        })
    }

    /// Whether owner and name are present and non-blank.
    pub fn is_valid(&self) -> bool {
        super::validation::validate_agent_repo_data(self).is_ok()
    }

    /// `owner/name`, or the record id when either part is missing.
    pub fn display_name(&self) -> String {
        match (self.owner.as_deref(), self.name.as_deref()) {
            (Some(owner), Some(name)) => format!("{}/{}", owner, name),
            _ => self.id.clone(),
        }
    }
}

/// A markdown file found in a repository's agents directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFileReference {
    pub name: String,
    pub path: String,
    pub download_url: String,
}

/// Directory listing that produced at least one agent file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDirectory {
    /// Branch the listing was found on (may differ from the requested one).
    pub branch: String,
    pub files: Vec<AgentFileReference>,
}

/// Fields extracted from one agent markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAgent {
    pub name: String,
    pub description: String,
    pub category: String,
    pub author: Option<String>,
    pub version: String,
    pub tags: Vec<String>,
}

impl ParsedAgent {
    pub fn named(name: String) -> Self {
        Self {
            name,
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            author: None,
            version: DEFAULT_VERSION.to_string(),
            tags: Vec::new(),
        }
    }
}

/// An agent with its repository provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub version: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub repo_url: String,
    pub branch: String,
    pub file_path: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl AgentRecord {
    /// Stamp repository provenance onto parsed fields.
    pub fn assemble(
        parsed: ParsedAgent,
        owner: &str,
        name: &str,
        web_base: &str,
        branch: &str,
        file: &AgentFileReference,
    ) -> Self {
        Self {
            name: parsed.name,
            description: parsed.description,
            category: parsed.category,
            author: parsed.author,
            version: parsed.version,
            repo_owner: owner.to_string(),
            repo_name: name.to_string(),
            repo_url: format!("{}/{}/{}", web_base.trim_end_matches('/'), owner, name),
            branch: branch.to_string(),
            file_path: file.path.clone(),
            tags: parsed.tags,
        }
    }

    /// `{owner}/{name}:{agent}`. Not unique across repositories.
    pub fn id(&self) -> String {
        format!("{}/{}:{}", self.repo_owner, self.repo_name, self.name)
    }

    /// Browsable URL of the agent file on the branch it was listed from.
    pub fn file_url(&self) -> String {
        format!("{}/blob/{}/{}", self.repo_url, self.branch, self.file_path)
    }
}
