//! Structural validation for repository and agent records.

use super::model::RepositoryRecord;

/// Validate repository record: owner and name must be present and non-blank.
pub fn validate_agent_repo_data(repo: &RepositoryRecord) -> Result<(), String> {
    match repo.owner.as_deref() {
        None => return Err(format!("Missing required field 'owner' in repository '{}'", repo.id)),
        Some(owner) if owner.trim().is_empty() => {
            return Err(format!("Invalid owner field in repository '{}'", repo.id))
        }
        Some(_) => {}
    }

    match repo.name.as_deref() {
        None => Err(format!("Missing required field 'name' in repository '{}'", repo.id)),
        Some(name) if name.trim().is_empty() => {
            Err(format!("Invalid name field in repository '{}'", repo.id))
        }
        Some(_) => Ok(()),
    }
}

/// Validate an agent name.
pub fn validate_agent_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Agent name cannot be empty".to_string());
    }
    Ok(())
}
