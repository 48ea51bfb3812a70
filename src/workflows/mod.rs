//! One orchestrator per user-facing operation.
//!
//! Each public entry point runs its steps against injected gateways and
//! returns either a report or an [`AppError`]; nothing else escapes.

pub mod add_labels;
pub mod get_labels;
pub mod interactive;
pub mod remove_labels;
pub mod suggest;
pub mod suggest_issue;
pub mod suggest_pr;
pub mod template;

pub use add_labels::{add_labels, AddLabelsReport};
pub use get_labels::{get_labels, LabelOutput};
pub use remove_labels::{remove_labels, RemoveLabelsReport};
pub use suggest::SuggestOutcome;
pub use suggest_issue::suggest_issue_content;
pub use suggest_pr::suggest_pr_content;

use crate::error::{AppError, Failure};
use crate::gateway::SourceHost;
use crate::select::{self, Prompter};
use crate::types::RepoRef;
use log::info;

/// List the user's repositories and ask for one.
pub(crate) async fn select_repository(host: &dyn SourceHost, prompter: &dyn Prompter) -> Result<RepoRef, Failure> {
    info!("Fetching repositories ...");
    let repos = host.list_repositories_for_user().await?;
    if repos.is_empty() {
        return Err(Failure::public("No repositories found."));
    }
    let chosen = select::choose_repository(prompter, &repos)?;
    let repo = RepoRef::parse(&chosen)
        .ok_or_else(|| Failure::public(format!("Invalid repository name: {}", chosen)))?;
    info!("Selected repository: {}", repo);
    Ok(repo)
}

pub(crate) fn finish<T>(result: Result<T, Failure>, context: &str) -> Result<T, AppError> {
    result.map_err(|f| f.classify(context))
}
