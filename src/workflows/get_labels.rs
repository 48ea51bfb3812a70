use super::{finish, select_repository};
use crate::catalog::{self, LabelCatalog};
use crate::error::{AppError, Failure};
use crate::gateway::SourceHost;
use crate::select::Prompter;
use crate::types::Label;
use log::info;
use std::io::Write;
use std::path::PathBuf;

/// Where fetched labels go.
#[derive(Debug, Clone)]
pub enum LabelOutput {
    /// Pretty JSON on stdout.
    Stdout,
    /// `<catalog>/<owner>-<name>.json`, reusable by add-labels.
    Catalog(LabelCatalog),
    File(PathBuf),
}

pub async fn get_labels(
    host: &dyn SourceHost,
    prompter: &dyn Prompter,
    output: &LabelOutput,
) -> Result<Vec<Label>, AppError> {
    finish(run(host, prompter, output).await, "get-labels")
}

async fn run(host: &dyn SourceHost, prompter: &dyn Prompter, output: &LabelOutput) -> Result<Vec<Label>, Failure> {
    let repo = select_repository(host, prompter).await?;
    info!("Fetching labels from repository: {} ...", repo);
    let labels = host.list_labels(&repo).await?;
    info!("Labels fetched successfully! ({} labels)", labels.len());

    match output {
        LabelOutput::Stdout => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{}", serde_json::to_string_pretty(&labels)?)?;
            out.flush()?;
        }
        LabelOutput::Catalog(cat) => {
            let path = cat.save(&repo, &labels)?;
            info!("Labels saved to {}", path.display());
            info!("You can now use these labels when adding labels to other repositories.");
        }
        LabelOutput::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            catalog::write_labels(path, &labels)?;
            info!("Labels saved to {}", path.display());
        }
    }
    Ok(labels)
}
