//! Prompt text and response schema for the suggestion requests.

use crate::types::{IssueDetails, Label, PullRequestDetails};
use serde_json::{json, Value};

const MAX_PATCH_CHARS: usize = 1_500;

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}\n[... truncated]", &text[..idx]),
        None => text.to_string(),
    }
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.trim().is_empty() {
        placeholder
    } else {
        text
    }
}

pub fn pr_summary(pr: &PullRequestDetails) -> String {
    let files = pr
        .files
        .iter()
        .map(|f| {
            let mut line = format!("- {} ({}, +{}, -{})", f.name, f.status, f.additions, f.deletions);
            if let Some(patch) = &f.patch {
                line.push_str("\n```diff\n");
                line.push_str(&truncate(patch, MAX_PATCH_CHARS));
                line.push_str("\n```");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Pull Request Title: {}\nRepository: {}\n\nDescription:\n{}\n\nFiles Changed:\n{}\n",
        pr.title,
        pr.repo,
        or_placeholder(&pr.description, "No description provided"),
        or_placeholder(&files, "No files changed"),
    )
}

pub fn issue_summary(issue: &IssueDetails) -> String {
    format!(
        "Issue Title: {}\nRepository: {}\nState: {}\nCreated: {}\nUpdated: {}\n\nDescription:\n{}\n",
        issue.title,
        issue.repo,
        issue.state,
        issue.created_at.to_rfc3339(),
        issue.updated_at.to_rfc3339(),
        or_placeholder(&issue.description, "No description provided"),
    )
}

pub fn label_listing(labels: &[Label]) -> String {
    if labels.is_empty() {
        return "(the repository has no labels yet)".to_string();
    }
    labels
        .iter()
        .map(|l| format!("{}: {}", l.name, or_placeholder(&l.description, "No description")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn template_section(kind: &str, template: Option<&str>) -> String {
    match template {
        Some(t) if !t.trim().is_empty() => format!(
            "\nThe repository provides this {kind} template. Structure both descriptions according to it:\n{t}\n"
        ),
        _ => String::new(),
    }
}

fn instructions(kind: &str) -> String {
    format!(
        "Suggest the most relevant labels from the available ones. If the {kind} content calls for a label \
that does not exist yet, you may suggest it and mark it as new.\n\
For each suggested label provide its name, a short reason why it applies, a confidence score between 1 and 100 \
(a number, not a string) and whether it is new.\n\
Also write an improved description for the {kind} in two language versions: English (en) and Polish (pl). \
Each version carries its own confidence score between 1 and 100. Both versions are required.\n"
    )
}

pub fn system_prompt() -> &'static str {
    "You are a GitHub label assistant. You classify pull requests and issues with repository labels \
and write clear, well structured descriptions. Answer only with JSON matching the requested schema."
}

pub fn pr_prompt(pr: &PullRequestDetails, labels: &[Label], template: Option<&str>) -> String {
    format!(
        "Here's information about the pull request:\n{}\nThese are the labels available in the repository:\n{}\n{}\n{}",
        pr_summary(pr),
        label_listing(labels),
        template_section("pull request", template),
        instructions("pull request"),
    )
}

pub fn issue_prompt(issue: &IssueDetails, labels: &[Label], template: Option<&str>) -> String {
    format!(
        "Here's information about the issue:\n{}\nThese are the labels available in the repository:\n{}\n{}\n{}",
        issue_summary(issue),
        label_listing(labels),
        template_section("issue", template),
        instructions("issue"),
    )
}

/// `response_format` for strict structured output.
pub fn response_format(name: &str) -> Value {
    let variant = json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "content": {"type": "string"},
            "confidence": {"type": "number"}
        },
        "required": ["content", "confidence"]
    });
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": name,
            "strict": true,
            "schema": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "labels": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "additionalProperties": false,
                            "properties": {
                                "name": {"type": "string"},
                                "description": {"type": "string"},
                                "confidence": {"type": "number"},
                                "isNew": {"type": "boolean"}
                            },
                            "required": ["name", "description", "confidence", "isNew"]
                        }
                    },
                    "description": {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": { "en": variant.clone(), "pl": variant },
                        "required": ["en", "pl"]
                    }
                },
                "required": ["labels", "description"]
            }
        }
    })
}
