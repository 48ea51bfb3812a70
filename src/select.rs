//! Interactive choice points.
//!
//! [`Prompter`] is the raw terminal round-trip; the free functions on top of it
//! are the typed choices the workflows use. Callers never pass an empty list.

use crate::types::{ApplyScope, IssueSummary, Label, Language, PullRequestSummary, Repository};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Password, Select};
use std::io;

pub trait Prompter {
    fn select(&self, message: &str, items: &[String]) -> dialoguer::Result<usize>;
    fn multi_select(&self, message: &str, items: &[String]) -> dialoguer::Result<Vec<usize>>;
    fn confirm(&self, message: &str, default: bool) -> dialoguer::Result<bool>;
    fn password(&self, message: &str) -> dialoguer::Result<String>;
}

/// Terminal prompts backed by `dialoguer`.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, items: &[String]) -> dialoguer::Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact()
    }

    fn multi_select(&self, message: &str, items: &[String]) -> dialoguer::Result<Vec<usize>> {
        MultiSelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .interact()
    }

    fn confirm(&self, message: &str, default: bool) -> dialoguer::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact()
    }

    fn password(&self, message: &str) -> dialoguer::Result<String> {
        Password::with_theme(&self.theme)
            .with_prompt(message)
            .interact()
    }
}

fn no_choice() -> dialoguer::Error {
    io::Error::new(io::ErrorKind::InvalidInput, "no valid choice available").into()
}

fn pick<T: Clone>(p: &dyn Prompter, message: &str, items: &[T], render: impl Fn(&T) -> String) -> dialoguer::Result<T> {
    if items.is_empty() {
        return Err(no_choice());
    }
    let rendered: Vec<String> = items.iter().map(render).collect();
    let idx = p.select(message, &rendered)?;
    items.get(idx).cloned().ok_or_else(no_choice)
}

pub fn choose_repository(p: &dyn Prompter, repos: &[Repository]) -> dialoguer::Result<String> {
    pick(p, "Select a repository:", repos, |r| r.full_name.clone()).map(|r| r.full_name)
}

pub fn choose_pull_request(p: &dyn Prompter, pulls: &[PullRequestSummary]) -> dialoguer::Result<PullRequestSummary> {
    pick(p, "Select a pull request to analyze:", pulls, |pr| pr.to_string())
}

pub fn choose_issue(p: &dyn Prompter, issues: &[IssueSummary]) -> dialoguer::Result<IssueSummary> {
    pick(p, "Select an issue to analyze:", issues, |i| i.to_string())
}

pub fn choose_template(p: &dyn Prompter, names: &[String], default_name: &str) -> dialoguer::Result<String> {
    pick(p, "Select a label template:", names, |n| {
        if n == default_name {
            format!("{} (default template)", n)
        } else {
            n.clone()
        }
    })
}

/// Multi-select over labels; returns the chosen labels in list order.
pub fn choose_labels(p: &dyn Prompter, message: &str, labels: &[Label]) -> dialoguer::Result<Vec<Label>> {
    let rendered: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
    let picked = p.multi_select(message, &rendered)?;
    Ok(picked
        .into_iter()
        .filter_map(|i| labels.get(i).cloned())
        .collect())
}

pub fn confirm(p: &dyn Prompter, message: &str) -> dialoguer::Result<bool> {
    p.confirm(message, true)
}

pub fn choose_language(p: &dyn Prompter) -> dialoguer::Result<Language> {
    pick(
        p,
        "Which language version would you like to use for the description?",
        &Language::ALL,
        |l| l.display_name().to_string(),
    )
}

pub fn choose_apply_scope(p: &dyn Prompter) -> dialoguer::Result<ApplyScope> {
    pick(
        p,
        "What would you like to apply with AI suggestions?",
        &ApplyScope::ALL,
        |s| s.display_name().to_string(),
    )
}
