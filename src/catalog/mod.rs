//! Catalog domain: repository and agent records collected by a run.

pub mod model;
pub mod validation;

pub use model::{
    AgentDirectory, AgentFileReference, AgentRecord, ParsedAgent, RepositoryRecord,
    DEFAULT_AGENTS_PATH, DEFAULT_BRANCH, DEFAULT_CATEGORY, DEFAULT_VERSION,
};
pub use validation::{validate_agent_name, validate_agent_repo_data};
