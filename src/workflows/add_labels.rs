use super::{finish, select_repository};
use crate::catalog::{LabelCatalog, DEFAULT_TEMPLATE};
use crate::error::{AppError, Failure};
use crate::gateway::SourceHost;
use crate::select::{self, Prompter};
use crate::types::{Label, RepoRef};
use log::{error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddLabelsReport {
    pub repo: Option<RepoRef>,
    pub created: Vec<String>,
    /// Already present in the repository.
    pub skipped: Vec<String>,
    /// Name and message of labels whose creation failed for another reason.
    pub failed: Vec<(String, String)>,
}

/// Pick a repository and a label template, then create the selected labels.
/// Existing labels are skipped and a failing label never stops the batch.
pub async fn add_labels(
    host: &dyn SourceHost,
    prompter: &dyn Prompter,
    catalog: &LabelCatalog,
) -> Result<AddLabelsReport, AppError> {
    finish(run(host, prompter, catalog).await, "add-labels")
}

async fn run(
    host: &dyn SourceHost,
    prompter: &dyn Prompter,
    catalog: &LabelCatalog,
) -> Result<AddLabelsReport, Failure> {
    let repo = select_repository(host, prompter).await?;
    info!("Adding labels to repository: {}", repo);

    let names = catalog.names();
    let template = if names.len() == 1 {
        names[0].clone()
    } else {
        select::choose_template(prompter, &names, DEFAULT_TEMPLATE)?
    };
    let available = catalog.load(&template);
    if available.is_empty() {
        return Err(Failure::public(format!("Label template \"{}\" is empty.", template)));
    }

    let selected = select::choose_labels(prompter, "Select labels to add:", &available)?;
    if selected.is_empty() {
        return Err(Failure::public("No labels were selected."));
    }

    let mut report = create_all(host, &repo, &selected).await;
    report.repo = Some(repo);
    Ok(report)
}

async fn create_all(host: &dyn SourceHost, repo: &RepoRef, labels: &[Label]) -> AddLabelsReport {
    let mut report = AddLabelsReport::default();
    for label in labels {
        match host.create_label(repo, label).await {
            Ok(()) => {
                info!("Label \"{}\" added successfully!", label.name);
                report.created.push(label.name.clone());
            }
            Err(e) if e.is_already_exists() => {
                warn!("Label \"{}\" already exists. Skipping...", label.name);
                report.skipped.push(label.name.clone());
            }
            Err(e) => {
                error!("Failed to add label \"{}\": {}", label.name, e);
                report.failed.push((label.name.clone(), e.to_string()));
            }
        }
    }
    report
}
