//! Markdown README rendering of an aggregation.

use crate::aggregator::Aggregation;
use crate::catalog::AgentRecord;
use crate::config::GenerationConfig;
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use std::path::Path;

const ANCHOR_ICON: &str = r#"<img src="https://raw.githubusercontent.com/avelino/awesome-go/main/.github/assets/github.svg" alt="GitHub" width="20" height="20">"#;

/// Renders an [`Aggregation`] as a curated README. Pure with respect to its input.
#[derive(Debug, Clone)]
pub struct ReadmeRenderer {
    title: String,
    description_max_len: usize,
}

impl ReadmeRenderer {
    pub fn new(title: impl Into<String>, description_max_len: usize) -> Self {
        Self {
            title: title.into(),
            description_max_len,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.title.clone(), config.description_max_len)
    }

    pub fn render(&self, aggregation: &Aggregation, generated_at: DateTime<Utc>) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}", self.title));
        lines.push(String::new());
        lines.push("![Awesome](https://awesome.re/badge.svg)".to_string());
        lines.push(String::new());
        lines.push(format!(
            "A curated collection of **{}** Claude agents from various repositories and sources.",
            aggregation.agents.len()
        ));
        lines.push(String::new());
        lines.push(format!(
            "**Last updated:** {}",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        lines.push(String::new());

        self.push_section_heading(&mut lines, "Installation", "installation");
        lines.push("1. Install CAM: `curl -fsSL https://raw.githubusercontent.com/Chat2AnyLLM/code-assistant-manager/main/install.sh | bash`".to_string());
        lines.push("2. `cam agent fetch`".to_string());
        lines.push("3. `cam agent install security-auditor`".to_string());
        lines.push(String::new());

        let groups = aggregation.agents_by_category();
        if !groups.is_empty() {
            lines.push("## Table of Contents".to_string());
            lines.push(String::new());
            lines.push("<details>".to_string());
            lines.push("<summary>Expand contents</summary>".to_string());
            lines.push(String::new());
            for category in groups.keys() {
                lines.push(format!("- [{}](#{})", category, category_anchor(category)));
            }
            lines.push(String::new());
            lines.push("</details>".to_string());
            lines.push(String::new());
        }

        for (category, agents) in &groups {
            lines.push(format!("## {}", category));
            lines.push(String::new());
            lines.push("| Agent | Description | Repository |".to_string());
            lines.push("|-------|-------------|------------|".to_string());
            for agent in agents {
                lines.push(self.agent_row(agent));
            }
            lines.push(String::new());
            lines.push("[⬆ back to top](#table-of-contents)".to_string());
            lines.push(String::new());
        }

        lines.push("---".to_string());
        lines.push(String::new());
        self.push_section_heading(&mut lines, "Contributing", "contributing");
        lines.push(
            "Found an awesome Claude agent? Submit a pull request adding its repository to a configured source!"
                .to_string(),
        );
        lines.push(String::new());
        self.push_section_heading(&mut lines, "License", "license");
        lines.push("This list is licensed under the [Creative Commons Attribution 4.0 International License](https://creativecommons.org/licenses/by/4.0/).".to_string());
        lines.push(String::new());
        lines.push("*This README is automatically generated from agent repository sources.*".to_string());
        lines.push(String::new());

        lines.join("\n")
    }

    fn push_section_heading(&self, lines: &mut Vec<String>, title: &str, anchor: &str) {
        lines.push(format!("## {}", title));
        lines.push(String::new());
        lines.push(format!(r##"<a href="#{}">{}</a>"##, anchor, ANCHOR_ICON));
        lines.push(String::new());
    }

    fn agent_row(&self, agent: &AgentRecord) -> String {
        let description = if agent.description.is_empty() {
            "No description available".to_string()
        } else {
            truncate_description(&agent.description, self.description_max_len)
        };
        format!(
            "| [{}]({}) | {} | [{}/{}]({}) |",
            escape_cell(&agent.name),
            agent.file_url(),
            escape_cell(&description),
            agent.repo_owner,
            agent.repo_name,
            agent.repo_url
        )
    }
}

/// GitHub-style heading anchor: lowercase, keep alphanumerics, spaces and
/// hyphens, then turn spaces into hyphens.
pub fn category_anchor(category: &str) -> String {
    category
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

/// Cut `description` to `max_len` characters, trim trailing space, append `...`.
pub fn truncate_description(description: &str, max_len: usize) -> String {
    if description.chars().count() <= max_len {
        return description.to_string();
    }
    let cut: String = description.chars().take(max_len).collect();
    format!("{}...", cut.trim_end())
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Write rendered content, creating parent directories as needed.
pub fn write_readme(path: &Path, content: &str) -> Result<(), ApiError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content).map_err(|e| {
        ApiError::OutputError(format!("Failed to write {}: {}", path.display(), e))
    })
}
