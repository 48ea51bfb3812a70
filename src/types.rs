use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A repository label. Identity is the name, unique within a repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Label {
    pub name: String,
    /// Hex colour without the leading `#`.
    pub color: String,
    #[serde(default)]
    pub description: String,
}

impl Label {
    pub fn new(name: impl Into<String>, color: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into().trim_start_matches('#').to_string(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} - {}", self.name, self.description)
        }
    }
}

/// `owner/name` reference to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Parse `owner/name`; both segments must be non-empty and there must be exactly two.
    pub fn parse(full_name: &str) -> Option<Self> {
        let mut parts = full_name.split('/');
        let owner = parts.next()?;
        let name = parts.next()?;
        if parts.next().is_some() || owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// File-system friendly form, slashes replaced.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub full_name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    // GitHub also reports copied/changed/unchanged
    #[serde(other)]
    Other,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Removed => "removed",
            FileStatus::Renamed => "renamed",
            FileStatus::Other => "changed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestFile {
    pub name: String,
    pub status: FileStatus,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

/// Row of the open pull request listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
}

impl fmt::Display for PullRequestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.number, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDetails {
    pub title: String,
    pub description: String,
    pub files: Vec<PullRequestFile>,
    pub repo: RepoRef,
}

/// Row of the open issue listing. Pull requests never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
}

impl fmt::Display for IssueSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.number, self.title)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => f.write_str("open"),
            IssueState::Closed => f.write_str("closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDetails {
    pub title: String,
    pub description: String,
    pub repo: RepoRef,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelSuggestion {
    pub name: String,
    pub description: String,
    pub confidence: i64,
    #[serde(rename = "isNew")]
    pub is_new: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DescriptionVariant {
    pub content: String,
    pub confidence: i64,
}

/// Both language variants of a suggested description.
///
/// A variant is `None` only when the AI service omitted it; such a suggestion
/// is rejected before it reaches the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptions {
    pub en: Option<DescriptionVariant>,
    pub pl: Option<DescriptionVariant>,
}

impl Descriptions {
    pub fn get(&self, language: Language) -> Option<&DescriptionVariant> {
        match language {
            Language::En => self.en.as_ref(),
            Language::Pl => self.pl.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSuggestion {
    pub labels: Vec<LabelSuggestion>,
    pub description: Descriptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Pl,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Pl];

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pl => "Polish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyScope {
    Both,
    LabelsOnly,
    DescriptionOnly,
}

impl ApplyScope {
    pub const ALL: [ApplyScope; 3] = [ApplyScope::Both, ApplyScope::LabelsOnly, ApplyScope::DescriptionOnly];

    pub fn display_name(self) -> &'static str {
        match self {
            ApplyScope::Both => "Both labels and description (default)",
            ApplyScope::LabelsOnly => "Only labels",
            ApplyScope::DescriptionOnly => "Only description",
        }
    }
}

/// Partial update for a pull request or issue. Out-of-scope fields are absent,
/// never sent as empty values; `Some("")` is a real body update.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl UpdatePayload {
    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.labels.is_none()
    }
}
