//! Composition root: builds the gateways for one command and runs it.

use crate::catalog::LabelCatalog;
use crate::cli::USAGE;
use crate::config::Config;
use crate::error::{AppError, Failure};
use crate::github::GitHubClient;
use crate::openai::OpenAiClient;
use crate::options::{self, SelectiveOptions};
use crate::select::{Prompter, TerminalPrompter};
use crate::workflows::{self, interactive, LabelOutput};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    AddLabels,
    GetLabels { output: Option<PathBuf>, stdout: bool },
    RemoveLabels,
    SuggestLabels(SelectiveOptions),
    SuggestIssueLabels(SelectiveOptions),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddLabels => "add-labels",
            Operation::GetLabels { .. } => "get-labels",
            Operation::RemoveLabels => "remove-labels",
            Operation::SuggestLabels(_) => "suggest-labels",
            Operation::SuggestIssueLabels(_) => "suggest-issue-labels",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Run(Operation),
    Help,
    Interactive,
}

pub async fn run(mode: Mode, config: Config) -> Result<(), AppError> {
    let prompter = TerminalPrompter::new();
    match mode {
        Mode::Help => {
            print!("{}", USAGE);
            Ok(())
        }
        Mode::Run(op) => execute(op, &config, &prompter).await,
        Mode::Interactive => match interactive::choose_mode(&prompter)? {
            None => Ok(()),
            Some(Mode::Help) => {
                print!("{}", USAGE);
                Ok(())
            }
            Some(Mode::Run(op)) => {
                let config = interactive::ensure_token(config, &prompter)?;
                execute(op, &config, &prompter).await
            }
            Some(Mode::Interactive) => Ok(()),
        },
    }
}

/// Run one operation. Selective options are validated before any gateway exists.
pub async fn execute(op: Operation, config: &Config, prompter: &dyn Prompter) -> Result<(), AppError> {
    if let Operation::SuggestLabels(o) | Operation::SuggestIssueLabels(o) = &op {
        options::resolve(o)?;
    }
    let context = op.name();
    let host = GitHubClient::new(&config.github).map_err(|e| Failure::from(e).classify(context))?;

    match op {
        Operation::AddLabels => {
            let catalog = LabelCatalog::new(config.labels_dir.clone());
            workflows::add_labels(&host, prompter, &catalog).await?;
        }
        Operation::GetLabels { output, stdout } => {
            let target = match (stdout, output) {
                (true, _) => LabelOutput::Stdout,
                (false, Some(path)) => LabelOutput::File(path),
                (false, None) => LabelOutput::Catalog(LabelCatalog::new(config.labels_dir.clone())),
            };
            workflows::get_labels(&host, prompter, &target).await?;
        }
        Operation::RemoveLabels => {
            workflows::remove_labels(&host, prompter).await?;
        }
        Operation::SuggestLabels(o) => {
            let ai = OpenAiClient::new(&config.openai).map_err(|e| Failure::from(e).classify(context))?;
            workflows::suggest_pr_content(&host, &ai, prompter, &o).await?;
        }
        Operation::SuggestIssueLabels(o) => {
            let ai = OpenAiClient::new(&config.openai).map_err(|e| Failure::from(e).classify(context))?;
            workflows::suggest_issue_content(&host, &ai, prompter, &o).await?;
        }
    }
    Ok(())
}
