#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use gh_labels::gateway::{SourceHost, Suggester};
use gh_labels::http::HostError;
use gh_labels::openai::AiError;
use gh_labels::select::Prompter;
use gh_labels::types::{
    ContentSuggestion, DescriptionVariant, Descriptions, IssueDetails, IssueState, IssueSummary, Label,
    LabelSuggestion, PullRequestDetails, PullRequestSummary, RepoRef, Repository,
};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory source host. Labels are tracked per repository; every call is recorded.
#[derive(Default)]
pub struct FakeHost {
    pub repos: Vec<String>,
    pub labels: Mutex<HashMap<String, Vec<Label>>>,
    pub pulls: Vec<PullRequestSummary>,
    pub issues: Vec<IssueSummary>,
    pub files: HashMap<String, String>,
    pub create_failures: HashMap<String, HostError>,
    pub delete_failures: HashMap<String, HostError>,
    pub repos_failure: Option<HostError>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeHost {
    pub fn with_repos(repos: &[&str]) -> Self {
        Self {
            repos: repos.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn seed_labels(self, repo: &str, labels: Vec<Label>) -> Self {
        self.labels.lock().unwrap().insert(repo.to_string(), labels);
        self
    }

    pub fn labels_of(&self, repo: &str) -> Vec<Label> {
        self.labels.lock().unwrap().get(repo).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change repository state.
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| {
                c.starts_with("create_label")
                    || c.starts_with("delete_label")
                    || c.starts_with("set_")
                    || c.starts_with("update_")
            })
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SourceHost for FakeHost {
    async fn list_repositories_for_user(&self) -> Result<Vec<Repository>, HostError> {
        self.record("list_repositories_for_user".into());
        if let Some(e) = &self.repos_failure {
            return Err(e.clone());
        }
        Ok(self
            .repos
            .iter()
            .map(|r| Repository { full_name: r.clone() })
            .collect())
    }

    async fn list_labels(&self, repo: &RepoRef) -> Result<Vec<Label>, HostError> {
        self.record(format!("list_labels:{}", repo));
        Ok(self.labels_of(&repo.to_string()))
    }

    async fn create_label(&self, repo: &RepoRef, label: &Label) -> Result<(), HostError> {
        self.record(format!("create_label:{}", label.name));
        if let Some(e) = self.create_failures.get(&label.name) {
            return Err(e.clone());
        }
        let mut all = self.labels.lock().unwrap();
        let existing = all.entry(repo.to_string()).or_default();
        if existing.iter().any(|l| l.name == label.name) {
            return Err(HostError::Unprocessable {
                message: "Validation Failed".into(),
            });
        }
        existing.push(label.clone());
        Ok(())
    }

    async fn delete_label(&self, repo: &RepoRef, name: &str) -> Result<(), HostError> {
        self.record(format!("delete_label:{}", name));
        if let Some(e) = self.delete_failures.get(name) {
            return Err(e.clone());
        }
        let mut all = self.labels.lock().unwrap();
        let existing = all.entry(repo.to_string()).or_default();
        let before = existing.len();
        existing.retain(|l| l.name != name);
        if existing.len() == before {
            return Err(HostError::NotFound {
                message: "Not Found".into(),
            });
        }
        Ok(())
    }

    async fn list_open_pull_requests(&self, repo: &RepoRef) -> Result<Vec<PullRequestSummary>, HostError> {
        self.record(format!("list_open_pull_requests:{}", repo));
        Ok(self.pulls.clone())
    }

    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequestDetails, HostError> {
        self.record(format!("get_pull_request:{}", number));
        let title = self
            .pulls
            .iter()
            .find(|p| p.number == number)
            .map(|p| p.title.clone())
            .ok_or_else(|| HostError::NotFound {
                message: "Not Found".into(),
            })?;
        Ok(PullRequestDetails {
            title,
            description: "Original description".into(),
            files: Vec::new(),
            repo: repo.clone(),
        })
    }

    async fn set_pull_request_labels(&self, _repo: &RepoRef, number: u64, names: &[String]) -> Result<(), HostError> {
        self.record(format!("set_pull_request_labels:{}:{}", number, names.join(",")));
        Ok(())
    }

    async fn update_pull_request_body(&self, _repo: &RepoRef, number: u64, _body: &str) -> Result<(), HostError> {
        self.record(format!("update_pull_request_body:{}", number));
        Ok(())
    }

    async fn list_open_issues(&self, repo: &RepoRef) -> Result<Vec<IssueSummary>, HostError> {
        self.record(format!("list_open_issues:{}", repo));
        Ok(self.issues.clone())
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<IssueDetails, HostError> {
        self.record(format!("get_issue:{}", number));
        let title = self
            .issues
            .iter()
            .find(|i| i.number == number)
            .map(|i| i.title.clone())
            .ok_or_else(|| HostError::NotFound {
                message: "Not Found".into(),
            })?;
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Ok(IssueDetails {
            title,
            description: "Steps to reproduce".into(),
            repo: repo.clone(),
            state: IssueState::Open,
            created_at: at,
            updated_at: at,
        })
    }

    async fn set_issue_labels(&self, _repo: &RepoRef, number: u64, names: &[String]) -> Result<(), HostError> {
        self.record(format!("set_issue_labels:{}:{}", number, names.join(",")));
        Ok(())
    }

    async fn update_issue_body(&self, _repo: &RepoRef, number: u64, _body: &str) -> Result<(), HostError> {
        self.record(format!("update_issue_body:{}", number));
        Ok(())
    }

    async fn get_repository_file(&self, _repo: &RepoRef, path: &str) -> Result<Option<String>, HostError> {
        self.record(format!("get_repository_file:{}", path));
        Ok(self.files.get(path).cloned())
    }
}

/// Suggester returning a canned result and remembering what it was given.
pub struct FakeSuggester {
    result: Result<ContentSuggestion, AiError>,
    calls: AtomicUsize,
    pub last_template: Mutex<Option<String>>,
}

impl FakeSuggester {
    pub fn returning(suggestion: ContentSuggestion) -> Self {
        Self::with_result(Ok(suggestion))
    }

    pub fn failing(error: AiError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<ContentSuggestion, AiError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_template: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, template: Option<&str>) -> Result<ContentSuggestion, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_template.lock().unwrap() = template.map(str::to_string);
        self.result.clone()
    }
}

#[async_trait]
impl Suggester for FakeSuggester {
    async fn suggest_pr_content(
        &self,
        _pr: &PullRequestDetails,
        _labels: &[Label],
        template: Option<&str>,
    ) -> Result<ContentSuggestion, AiError> {
        self.answer(template)
    }

    async fn suggest_issue_content(
        &self,
        _issue: &IssueDetails,
        _labels: &[Label],
        template: Option<&str>,
    ) -> Result<ContentSuggestion, AiError> {
        self.answer(template)
    }
}

#[derive(Debug, Clone)]
pub enum Answer {
    Select(usize),
    Multi(Vec<usize>),
    Confirm(bool),
    Password(String),
}

/// Prompter that replays a fixed script. Any prompt the script does not expect panics.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, message: &str) -> Answer {
        self.asked.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {}", message))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, _items: &[String]) -> dialoguer::Result<usize> {
        match self.next(message) {
            Answer::Select(i) => Ok(i),
            other => panic!("expected select for {:?}, script has {:?}", message, other),
        }
    }

    fn multi_select(&self, message: &str, _items: &[String]) -> dialoguer::Result<Vec<usize>> {
        match self.next(message) {
            Answer::Multi(v) => Ok(v),
            other => panic!("expected multi-select for {:?}, script has {:?}", message, other),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> dialoguer::Result<bool> {
        match self.next(message) {
            Answer::Confirm(b) => Ok(b),
            other => panic!("expected confirm for {:?}, script has {:?}", message, other),
        }
    }

    fn password(&self, message: &str) -> dialoguer::Result<String> {
        match self.next(message) {
            Answer::Password(s) => Ok(s),
            other => panic!("expected password for {:?}, script has {:?}", message, other),
        }
    }
}

pub fn repo(full_name: &str) -> RepoRef {
    RepoRef::parse(full_name).unwrap()
}

pub fn suggestion() -> ContentSuggestion {
    ContentSuggestion {
        labels: vec![
            LabelSuggestion {
                name: "bug".into(),
                description: "Fixes a crash".into(),
                confidence: 92,
                is_new: false,
            },
            LabelSuggestion {
                name: "needs-triage".into(),
                description: "Not yet reviewed".into(),
                confidence: 40,
                is_new: true,
            },
        ],
        description: Descriptions {
            en: Some(DescriptionVariant {
                content: "## Summary\nFixes the crash.".into(),
                confidence: 85,
            }),
            pl: Some(DescriptionVariant {
                content: "## Podsumowanie\nNaprawia awarię.".into(),
                confidence: 80,
            }),
        },
    }
}
