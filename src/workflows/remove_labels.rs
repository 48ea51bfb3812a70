use super::{finish, select_repository};
use crate::error::{AppError, Failure};
use crate::gateway::SourceHost;
use crate::select::{self, Prompter};
use crate::types::RepoRef;
use log::{error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveLabelsReport {
    pub repo: Option<RepoRef>,
    pub removed: Vec<String>,
    /// Already gone from the repository.
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
}

pub async fn remove_labels(host: &dyn SourceHost, prompter: &dyn Prompter) -> Result<RemoveLabelsReport, AppError> {
    finish(run(host, prompter).await, "remove-labels")
}

async fn run(host: &dyn SourceHost, prompter: &dyn Prompter) -> Result<RemoveLabelsReport, Failure> {
    let repo = select_repository(host, prompter).await?;
    info!("Removing labels from repository: {}", repo);

    info!("Fetching labels from repository: {} ...", repo);
    let existing = host.list_labels(&repo).await?;
    if existing.is_empty() {
        return Err(Failure::public("No labels found in this repository."));
    }

    let selected = select::choose_labels(prompter, "Select labels to remove:", &existing)?;
    if selected.is_empty() {
        return Err(Failure::public("No labels were selected for removal."));
    }

    let mut report = RemoveLabelsReport {
        repo: Some(repo.clone()),
        ..Default::default()
    };
    for label in selected {
        match host.delete_label(&repo, &label.name).await {
            Ok(()) => {
                info!("Label \"{}\" removed successfully!", label.name);
                report.removed.push(label.name);
            }
            Err(e) if e.is_not_found() => {
                warn!("Label \"{}\" not found. Skipping...", label.name);
                report.skipped.push(label.name);
            }
            Err(e) => {
                error!("Failed to remove label \"{}\": {}", label.name, e);
                report.failed.push((label.name, e.to_string()));
            }
        }
    }
    Ok(report)
}
