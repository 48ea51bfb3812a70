use super::suggest::{self, SuggestOutcome, Target};
use super::template::{find_template, ISSUE_TEMPLATE_PATHS};
use super::{finish, select_repository};
use crate::error::{AppError, Failure};
use crate::gateway::{SourceHost, Suggester};
use crate::options::{self, Scope, SelectiveOptions};
use crate::select::{self, Prompter};
use log::info;

pub const NO_OPEN_ISSUES: &str = "No open issues found in this repository.";

/// Issue counterpart of [`super::suggest_pr_content`].
pub async fn suggest_issue_content(
    host: &dyn SourceHost,
    ai: &dyn Suggester,
    prompter: &dyn Prompter,
    options: &SelectiveOptions,
) -> Result<SuggestOutcome, AppError> {
    let scope = options::resolve(options)?;
    finish(run(host, ai, prompter, &scope).await, "suggest-issue-labels")
}

async fn run(
    host: &dyn SourceHost,
    ai: &dyn Suggester,
    prompter: &dyn Prompter,
    scope: &Scope,
) -> Result<SuggestOutcome, Failure> {
    let repo = select_repository(host, prompter).await?;

    info!("Fetching issues from repository: {} ...", repo);
    let issues = host.list_open_issues(&repo).await?;
    if issues.is_empty() {
        return Err(Failure::public(NO_OPEN_ISSUES));
    }
    let issue = select::choose_issue(prompter, &issues)?;

    info!("Fetching repository labels...");
    let labels = host.list_labels(&repo).await?;
    info!("Fetching issue details...");
    let details = host.get_issue(&repo, issue.number).await?;

    let template = find_template(host, &repo, &ISSUE_TEMPLATE_PATHS).await;
    match template {
        Some(_) => info!("Found issue template"),
        None => info!("No issue template found, proceeding without it"),
    }

    info!("Analyzing issue with AI...");
    let suggestion = ai
        .suggest_issue_content(&details, &labels, template.as_deref())
        .await?;
    let suggestion = suggest::validate_suggestion(suggestion)?;

    suggest::present(Target::Issue, &suggestion, scope);

    let Some(language) = suggest::confirm_apply(prompter, Target::Issue, scope)? else {
        return Ok(SuggestOutcome::Declined);
    };

    info!("Applying changes to issue #{}...", issue.number);
    let payload = suggest::build_payload(scope, &suggestion, language);
    if let Some(body) = &payload.body {
        host.update_issue_body(&repo, issue.number, body).await?;
    }
    if let Some(names) = &payload.labels {
        host.set_issue_labels(&repo, issue.number, names).await?;
    }
    info!("{}", suggest::applied_message(Target::Issue, scope));
    Ok(SuggestOutcome::Applied(payload))
}
