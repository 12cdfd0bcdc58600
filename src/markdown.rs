//! Agent markdown parsing
//!
//! Lightweight extraction of an agent's name and description from the raw
//! text of its markdown file. Front matter is not interpreted; category,
//! version and tags keep their defaults.

use crate::catalog::{validate_agent_name, ParsedAgent};
use crate::error::ParseError;

/// Parse one agent file.
///
/// The name defaults to the title-cased file stem and is overridden by any
/// `# ` heading line. The description is the first run of non-blank lines
/// that does not start with a heading marker, joined with single spaces and
/// ended by the next blank line.
pub fn parse_agent_markdown(content: &str, filename: &str) -> Result<ParsedAgent, ParseError> {
    let mut name = default_agent_name(filename);
    let mut in_description = false;
    let mut description_lines: Vec<&str> = Vec::new();

    for line in content.trim().lines() {
        let line = line.trim();
        if let Some(title) = line.strip_prefix("# ") {
            let title = title.trim();
            if !title.is_empty() {
                name = title.to_string();
            }
        } else if line.is_empty() {
            if in_description {
                break;
            }
        } else if in_description {
            description_lines.push(line);
        } else if !line.starts_with('#') {
            in_description = true;
            description_lines.push(line);
        }
    }

    if validate_agent_name(&name).is_err() {
        return Err(ParseError::MissingName {
            filename: filename.to_string(),
        });
    }

    let mut agent = ParsedAgent::named(name);
    agent.description = description_lines.join(" ").trim().to_string();
    Ok(agent)
}

/// Derive a display name from a file name: `code-review-helper.md` becomes
/// `Code Review Helper`.
pub fn default_agent_name(filename: &str) -> String {
    let stem = filename
        .strip_suffix(".md")
        .or_else(|| filename.rsplit_once('.').map(|(stem, _)| stem))
        .unwrap_or(filename);
    title_case(&stem.replace('-', " "))
}

/// Upper-case letters that follow a non-letter, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if previous_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    out
}
