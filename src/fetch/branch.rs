//! Branch fallback ordering for directory listings.

/// Alternates tried after `main`/`master` and its counterpart.
pub const FALLBACK_BRANCHES: [&str; 3] = ["develop", "development", "dev"];

/// Ordered list of branches to try for a requested branch.
///
/// `main` falls back to `master, develop, development, dev`; `master` falls
/// back to `main, develop, development, dev`. Any other branch is tried alone.
pub fn branch_candidates(requested: &str) -> Vec<String> {
    let counterpart = match requested {
        "main" => "master",
        "master" => "main",
        _ => return vec![requested.to_string()],
    };

    let mut candidates = vec![requested.to_string(), counterpart.to_string()];
    candidates.extend(FALLBACK_BRANCHES.iter().map(|b| b.to_string()));
    candidates
}
