//! Menu shown when the binary runs without a command.

use crate::app::{Mode, Operation};
use crate::config::Config;
use crate::error::{AppError, Failure};
use crate::options::SelectiveOptions;
use crate::select::{self, Prompter};

const MENU: [(&str, MenuChoice); 7] = [
    ("Add labels to a repository", MenuChoice::AddLabels),
    ("Get labels from a repository", MenuChoice::GetLabels),
    ("Remove labels from a repository", MenuChoice::RemoveLabels),
    ("Suggest labels for a pull request", MenuChoice::SuggestLabels),
    ("Suggest labels for an issue", MenuChoice::SuggestIssueLabels),
    ("Display available commands", MenuChoice::Help),
    ("Exit", MenuChoice::Exit),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    AddLabels,
    GetLabels,
    RemoveLabels,
    SuggestLabels,
    SuggestIssueLabels,
    Help,
    Exit,
}

/// Ask what to do. `None` means exit.
pub fn choose_mode(prompter: &dyn Prompter) -> Result<Option<Mode>, AppError> {
    run(prompter).map_err(|f| f.classify("interactive mode"))
}

fn run(prompter: &dyn Prompter) -> Result<Option<Mode>, Failure> {
    let items: Vec<String> = MENU.iter().map(|(label, _)| label.to_string()).collect();
    let idx = prompter.select("What would you like to do?", &items)?;
    let Some((_, choice)) = MENU.get(idx) else {
        return Ok(None);
    };
    let mode = match choice {
        MenuChoice::AddLabels => Mode::Run(Operation::AddLabels),
        MenuChoice::GetLabels => Mode::Run(Operation::GetLabels {
            output: None,
            stdout: false,
        }),
        MenuChoice::RemoveLabels => Mode::Run(Operation::RemoveLabels),
        MenuChoice::SuggestLabels => {
            let scope = select::choose_apply_scope(prompter)?;
            Mode::Run(Operation::SuggestLabels(SelectiveOptions::from(scope)))
        }
        MenuChoice::SuggestIssueLabels => {
            let scope = select::choose_apply_scope(prompter)?;
            Mode::Run(Operation::SuggestIssueLabels(SelectiveOptions::from(scope)))
        }
        MenuChoice::Help => Mode::Help,
        MenuChoice::Exit => return Ok(None),
    };
    Ok(Some(mode))
}

/// Ask for a GitHub token when none is configured.
pub fn ensure_token(config: Config, prompter: &dyn Prompter) -> Result<Config, AppError> {
    if config.github.token.is_some() {
        return Ok(config);
    }
    let token = prompter
        .password("Please enter your GitHub Personal Access Token:")
        .map_err(|e| Failure::from(e).classify("interactive mode"))?;
    if token.trim().is_empty() {
        return Err(AppError::public("Token is required"));
    }
    Ok(config.with_token(Some(token)))
}
