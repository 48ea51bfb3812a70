use crate::config::GitHubConfig;
use crate::gateway::SourceHost;
use crate::http::{self, encode_path, encode_path_segment, HostError};
use crate::types::{
    FileStatus, IssueDetails, IssueState, IssueSummary, Label, PullRequestDetails, PullRequestFile,
    PullRequestSummary, RepoRef, Repository,
};
use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method};
use serde::Deserialize;

/// GitHub REST implementation of [`SourceHost`].
pub struct GitHubClient {
    client: Client,
    cfg: GitHubConfig,
}

impl GitHubClient {
    /// Fails when no token is configured; the client is never built without one.
    pub fn new(cfg: &GitHubConfig) -> Result<Self, HostError> {
        if cfg.token.is_none() {
            return Err(HostError::MissingToken);
        }
        Ok(Self {
            client: http::build_client(cfg)?,
            cfg: cfg.clone(),
        })
    }

    fn repo_path(repo: &RepoRef) -> String {
        format!(
            "/repos/{}/{}",
            encode_path_segment(repo.owner()),
            encode_path_segment(repo.name())
        )
    }
}

#[derive(Deserialize)]
struct RawLabel {
    name: String,
    color: String,
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawPull {
    number: u64,
    title: String,
    body: Option<String>,
}

#[derive(Deserialize)]
struct RawFile {
    filename: String,
    status: FileStatus,
    additions: u64,
    deletions: u64,
    changes: u64,
    patch: Option<String>,
}

#[derive(Deserialize)]
struct RawIssue {
    number: u64,
    title: String,
    body: Option<String>,
    state: IssueState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    // Present only on pull requests surfaced through the issues endpoint.
    pull_request: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct RawContent {
    #[serde(rename = "type")]
    kind: String,
    content: Option<String>,
}

fn decode_content(raw: RawContent) -> Result<Option<String>, HostError> {
    if raw.kind != "file" {
        return Ok(None);
    }
    let Some(encoded) = raw.content else {
        return Ok(None);
    };
    // GitHub wraps base64 content at 60 columns.
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| HostError::Decode(e.to_string()))?;
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| HostError::Decode(e.to_string()))
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn list_repositories_for_user(&self) -> Result<Vec<Repository>, HostError> {
        http::rest_get_all(&self.client, &self.cfg, "/user/repos?per_page=100").await
    }

    async fn list_labels(&self, repo: &RepoRef) -> Result<Vec<Label>, HostError> {
        let path = format!("{}/labels?per_page=100", Self::repo_path(repo));
        let raw: Vec<RawLabel> = http::rest_get_all(&self.client, &self.cfg, &path).await?;
        Ok(raw
            .into_iter()
            .map(|l| Label {
                name: l.name,
                color: l.color,
                description: l.description.unwrap_or_default(),
            })
            .collect())
    }

    async fn create_label(&self, repo: &RepoRef, label: &Label) -> Result<(), HostError> {
        let path = format!("{}/labels", Self::repo_path(repo));
        let body = serde_json::json!({
            "name": label.name,
            "color": label.color,
            "description": label.description,
        });
        http::rest_send_json(&self.client, &self.cfg, Method::POST, &path, Some(&body)).await?;
        Ok(())
    }

    async fn delete_label(&self, repo: &RepoRef, name: &str) -> Result<(), HostError> {
        let path = format!("{}/labels/{}", Self::repo_path(repo), encode_path_segment(name));
        http::rest_send_json(&self.client, &self.cfg, Method::DELETE, &path, None).await?;
        Ok(())
    }

    async fn list_open_pull_requests(&self, repo: &RepoRef) -> Result<Vec<PullRequestSummary>, HostError> {
        let path = format!("{}/pulls?state=open&per_page=100", Self::repo_path(repo));
        let raw: Vec<RawPull> = http::rest_get_all(&self.client, &self.cfg, &path).await?;
        Ok(raw
            .into_iter()
            .map(|p| PullRequestSummary {
                number: p.number,
                title: p.title,
            })
            .collect())
    }

    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequestDetails, HostError> {
        let base = format!("{}/pulls/{}", Self::repo_path(repo), number);
        let pr: RawPull = http::rest_get_json(&self.client, &self.cfg, &base).await?;
        let files: Vec<RawFile> =
            http::rest_get_all(&self.client, &self.cfg, &format!("{}/files?per_page=100", base)).await?;
        Ok(PullRequestDetails {
            title: pr.title,
            description: pr.body.unwrap_or_default(),
            files: files
                .into_iter()
                .map(|f| PullRequestFile {
                    name: f.filename,
                    status: f.status,
                    additions: f.additions,
                    deletions: f.deletions,
                    changes: f.changes,
                    patch: f.patch,
                })
                .collect(),
            repo: repo.clone(),
        })
    }

    async fn set_pull_request_labels(&self, repo: &RepoRef, number: u64, names: &[String]) -> Result<(), HostError> {
        // Pull request labels live on the issue resource.
        self.set_issue_labels(repo, number, names).await
    }

    async fn update_pull_request_body(&self, repo: &RepoRef, number: u64, body: &str) -> Result<(), HostError> {
        let path = format!("{}/pulls/{}", Self::repo_path(repo), number);
        let payload = serde_json::json!({ "body": body });
        http::rest_send_json(&self.client, &self.cfg, Method::PATCH, &path, Some(&payload)).await?;
        Ok(())
    }

    async fn list_open_issues(&self, repo: &RepoRef) -> Result<Vec<IssueSummary>, HostError> {
        let path = format!("{}/issues?state=open&per_page=100", Self::repo_path(repo));
        let raw: Vec<RawIssue> = http::rest_get_all(&self.client, &self.cfg, &path).await?;
        Ok(raw
            .into_iter()
            .filter(|i| i.pull_request.is_none())
            .map(|i| IssueSummary {
                number: i.number,
                title: i.title,
            })
            .collect())
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<IssueDetails, HostError> {
        let path = format!("{}/issues/{}", Self::repo_path(repo), number);
        let issue: RawIssue = http::rest_get_json(&self.client, &self.cfg, &path).await?;
        Ok(IssueDetails {
            title: issue.title,
            description: issue.body.unwrap_or_default(),
            repo: repo.clone(),
            state: issue.state,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        })
    }

    async fn set_issue_labels(&self, repo: &RepoRef, number: u64, names: &[String]) -> Result<(), HostError> {
        let path = format!("{}/issues/{}/labels", Self::repo_path(repo), number);
        let payload = serde_json::json!({ "labels": names });
        http::rest_send_json(&self.client, &self.cfg, Method::PUT, &path, Some(&payload)).await?;
        Ok(())
    }

    async fn update_issue_body(&self, repo: &RepoRef, number: u64, body: &str) -> Result<(), HostError> {
        let path = format!("{}/issues/{}", Self::repo_path(repo), number);
        let payload = serde_json::json!({ "body": body });
        http::rest_send_json(&self.client, &self.cfg, Method::PATCH, &path, Some(&payload)).await?;
        Ok(())
    }

    async fn get_repository_file(&self, repo: &RepoRef, path: &str) -> Result<Option<String>, HostError> {
        let url_path = format!("{}/contents/{}", Self::repo_path(repo), encode_path(path));
        // Directories come back as a JSON array.
        let raw: Option<serde_json::Value> =
            http::rest_get_optional_json(&self.client, &self.cfg, &url_path).await?;
        match raw {
            Some(v) if v.is_object() => {
                let content: RawContent =
                    serde_json::from_value(v).map_err(|e| HostError::Decode(e.to_string()))?;
                decode_content(content)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_base64_content_decodes() {
        let raw = RawContent {
            kind: "file".into(),
            content: Some("IyMg\nU3VtbWFyeQo=\n".into()),
        };
        assert_eq!(decode_content(raw).unwrap().as_deref(), Some("## Summary\n"));
    }

    #[test]
    fn non_file_content_is_absent() {
        let raw = RawContent {
            kind: "symlink".into(),
            content: None,
        };
        assert_eq!(decode_content(raw).unwrap(), None);
    }

    #[test]
    fn client_requires_token() {
        let cfg = GitHubConfig {
            token: None,
            api_url: "https://api.github.com".into(),
            api_version: "2022-11-28".into(),
            user_agent: "gh-labels/test".into(),
            timeout_secs: 5,
        };
        assert!(matches!(GitHubClient::new(&cfg), Err(HostError::MissingToken)));
    }
}
