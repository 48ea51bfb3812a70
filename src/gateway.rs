//! Narrow interfaces over the two external services.
//!
//! Workflows only ever see these traits; the concrete clients live in
//! [`crate::github`] and [`crate::openai`] and are handed in by the caller.

use crate::http::HostError;
use crate::openai::AiError;
use crate::types::{
    ContentSuggestion, IssueDetails, IssueSummary, Label, PullRequestDetails, PullRequestSummary,
    RepoRef, Repository,
};
use async_trait::async_trait;

/// Repository, label, pull request and issue operations of the source host.
#[async_trait]
pub trait SourceHost: Send + Sync {
    async fn list_repositories_for_user(&self) -> Result<Vec<Repository>, HostError>;

    async fn list_labels(&self, repo: &RepoRef) -> Result<Vec<Label>, HostError>;

    /// Fails with [`HostError::Unprocessable`] when the label already exists.
    async fn create_label(&self, repo: &RepoRef, label: &Label) -> Result<(), HostError>;

    /// Fails with [`HostError::NotFound`] when the label is missing.
    async fn delete_label(&self, repo: &RepoRef, name: &str) -> Result<(), HostError>;

    async fn list_open_pull_requests(&self, repo: &RepoRef) -> Result<Vec<PullRequestSummary>, HostError>;

    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequestDetails, HostError>;

    async fn set_pull_request_labels(&self, repo: &RepoRef, number: u64, names: &[String]) -> Result<(), HostError>;

    async fn update_pull_request_body(&self, repo: &RepoRef, number: u64, body: &str) -> Result<(), HostError>;

    /// Open issues only; pull requests reported by the same listing are excluded.
    async fn list_open_issues(&self, repo: &RepoRef) -> Result<Vec<IssueSummary>, HostError>;

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<IssueDetails, HostError>;

    async fn set_issue_labels(&self, repo: &RepoRef, number: u64, names: &[String]) -> Result<(), HostError>;

    async fn update_issue_body(&self, repo: &RepoRef, number: u64, body: &str) -> Result<(), HostError>;

    /// Decoded file content, or `None` when the path does not exist.
    async fn get_repository_file(&self, repo: &RepoRef, path: &str) -> Result<Option<String>, HostError>;
}

/// AI analysis of a pull request or issue.
#[async_trait]
pub trait Suggester: Send + Sync {
    async fn suggest_pr_content(
        &self,
        pr: &PullRequestDetails,
        labels: &[Label],
        template: Option<&str>,
    ) -> Result<ContentSuggestion, AiError>;

    async fn suggest_issue_content(
        &self,
        issue: &IssueDetails,
        labels: &[Label],
        template: Option<&str>,
    ) -> Result<ContentSuggestion, AiError>;
}
