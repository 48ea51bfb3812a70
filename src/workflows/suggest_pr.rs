use super::suggest::{self, SuggestOutcome, Target};
use super::template::{find_template, PR_TEMPLATE_PATHS};
use super::{finish, select_repository};
use crate::error::{AppError, Failure};
use crate::gateway::{SourceHost, Suggester};
use crate::options::{self, Scope, SelectiveOptions};
use crate::select::{self, Prompter};
use log::info;

pub const NO_OPEN_PULL_REQUESTS: &str = "No open pull requests found in this repository.";

/// Analyse one open pull request with the AI service and, after confirmation,
/// apply the in-scope labels and/or description.
pub async fn suggest_pr_content(
    host: &dyn SourceHost,
    ai: &dyn Suggester,
    prompter: &dyn Prompter,
    options: &SelectiveOptions,
) -> Result<SuggestOutcome, AppError> {
    let scope = options::resolve(options)?;
    finish(run(host, ai, prompter, &scope).await, "suggest-labels")
}

async fn run(
    host: &dyn SourceHost,
    ai: &dyn Suggester,
    prompter: &dyn Prompter,
    scope: &Scope,
) -> Result<SuggestOutcome, Failure> {
    let repo = select_repository(host, prompter).await?;

    info!("Fetching pull requests from repository: {} ...", repo);
    let pulls = host.list_open_pull_requests(&repo).await?;
    if pulls.is_empty() {
        return Err(Failure::public(NO_OPEN_PULL_REQUESTS));
    }
    let pr = select::choose_pull_request(prompter, &pulls)?;

    info!("Fetching repository labels...");
    let labels = host.list_labels(&repo).await?;
    info!("Fetching pull request details...");
    let details = host.get_pull_request(&repo, pr.number).await?;

    let template = find_template(host, &repo, &PR_TEMPLATE_PATHS).await;
    match template {
        Some(_) => info!("Found PR template"),
        None => info!("No PR template found, proceeding without it"),
    }

    info!("Analyzing pull request with AI...");
    let suggestion = ai
        .suggest_pr_content(&details, &labels, template.as_deref())
        .await?;
    let suggestion = suggest::validate_suggestion(suggestion)?;

    suggest::present(Target::PullRequest, &suggestion, scope);

    let Some(language) = suggest::confirm_apply(prompter, Target::PullRequest, scope)? else {
        return Ok(SuggestOutcome::Declined);
    };

    info!("Applying changes to pull request #{}...", pr.number);
    let payload = suggest::build_payload(scope, &suggestion, language);
    if let Some(body) = &payload.body {
        host.update_pull_request_body(&repo, pr.number, body).await?;
    }
    if let Some(names) = &payload.labels {
        host.set_pull_request_labels(&repo, pr.number, names).await?;
    }
    info!("{}", suggest::applied_message(Target::PullRequest, scope));
    Ok(SuggestOutcome::Applied(payload))
}
