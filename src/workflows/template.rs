use crate::gateway::SourceHost;
use crate::types::RepoRef;
use log::{debug, warn};

pub const PR_TEMPLATE_PATHS: [&str; 4] = [
    ".github/PULL_REQUEST_TEMPLATE.md",
    ".github/pull_request_template.md",
    "PULL_REQUEST_TEMPLATE.md",
    "pull_request_template.md",
];

pub const ISSUE_TEMPLATE_PATHS: [&str; 4] = [
    ".github/ISSUE_TEMPLATE.md",
    ".github/issue_template.md",
    "ISSUE_TEMPLATE.md",
    "issue_template.md",
];

/// First candidate path that exists in the repository, in order.
/// Lookup failures are never fatal: they are logged and the next path is tried.
pub async fn find_template(host: &dyn SourceHost, repo: &RepoRef, candidates: &[&str]) -> Option<String> {
    for path in candidates {
        match host.get_repository_file(repo, path).await {
            Ok(Some(content)) => {
                debug!("Using template {}", path);
                return Some(content);
            }
            Ok(None) => continue,
            Err(e) => {
                warn!("Could not fetch template {}: {}", path, e);
            }
        }
    }
    None
}
