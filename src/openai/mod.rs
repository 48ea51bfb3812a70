//! OpenAI chat-completions implementation of [`Suggester`].

pub mod prompt;

use crate::config::OpenAiConfig;
use crate::gateway::Suggester;
use crate::types::{
    ContentSuggestion, DescriptionVariant, Descriptions, IssueDetails, Label, LabelSuggestion,
    PullRequestDetails,
};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failures produced by the AI gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("OpenAI API key not found. Please set the OPENAI_API_KEY environment variable.")]
    MissingCredential,
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    Service(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid AI response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    response_format: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WireSuggestion {
    #[serde(default)]
    labels: Vec<WireLabel>,
    description: Option<WireDescriptions>,
}

#[derive(Debug, Deserialize)]
struct WireLabel {
    name: String,
    #[serde(default)]
    description: Option<String>,
    confidence: f64,
    #[serde(rename = "isNew", default)]
    is_new: bool,
}

#[derive(Debug, Deserialize)]
struct WireDescriptions {
    en: Option<WireVariant>,
    pl: Option<WireVariant>,
}

#[derive(Debug, Deserialize)]
struct WireVariant {
    content: String,
    confidence: f64,
}

fn score(value: f64) -> i64 {
    if value.is_nan() {
        0
    } else {
        // saturating float-to-int cast
        value.round() as i64
    }
}

impl From<WireSuggestion> for ContentSuggestion {
    fn from(w: WireSuggestion) -> Self {
        let variant = |v: WireVariant| DescriptionVariant {
            content: v.content,
            confidence: score(v.confidence),
        };
        let (en, pl) = match w.description {
            Some(d) => (d.en.map(variant), d.pl.map(variant)),
            None => (None, None),
        };
        ContentSuggestion {
            labels: w
                .labels
                .into_iter()
                .map(|l| LabelSuggestion {
                    name: l.name,
                    description: l.description.unwrap_or_default(),
                    confidence: score(l.confidence),
                    is_new: l.is_new,
                })
                .collect(),
            description: Descriptions { en, pl },
        }
    }
}

/// Parse the assistant message content into a suggestion.
pub fn parse_suggestion(content: &str) -> Result<ContentSuggestion, AiError> {
    let wire: WireSuggestion =
        serde_json::from_str(content).map_err(|e| AiError::InvalidResponse(e.to_string()))?;
    Ok(wire.into())
}

pub struct OpenAiClient {
    client: Client,
    cfg: OpenAiConfig,
}

impl OpenAiClient {
    /// A missing API key does not fail construction; every call then fails
    /// with [`AiError::MissingCredential`].
    pub fn new(cfg: &OpenAiConfig) -> Result<Self, AiError> {
        if cfg.api_key.is_none() {
            warn!("No OpenAI API key found. Please set the OPENAI_API_KEY environment variable.");
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .use_rustls_tls()
            .build()
            .map_err(|e| AiError::Service(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            cfg: cfg.clone(),
        })
    }

    async fn complete(&self, schema_name: &str, user_prompt: &str) -> Result<ContentSuggestion, AiError> {
        let api_key = self.cfg.api_key.as_deref().ok_or(AiError::MissingCredential)?;
        let request = ChatRequest {
            model: &self.cfg.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.cfg.temperature,
            seed: self.cfg.seed,
            response_format: prompt::response_format(schema_name),
        };
        let url = format!("{}/chat/completions", self.cfg.api_url.trim_end_matches('/'));
        debug!("POST {} model={}", url, self.cfg.model);

        let res = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;
        let status = res.status();
        let body = res.text().await.map_err(|e| AiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                AiError::RateLimited(message)
            } else {
                AiError::Service(format!("OpenAI API error ({}): {}", status.as_u16(), message))
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AiError::InvalidResponse(e.to_string()))?;
        let message = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| AiError::InvalidResponse("no choices returned".into()))?;
        if let Some(refusal) = message.refusal {
            return Err(AiError::Service(format!("request refused: {}", refusal)));
        }
        let content = message
            .content
            .ok_or_else(|| AiError::InvalidResponse("empty message content".into()))?;
        parse_suggestion(&content)
    }
}

#[async_trait]
impl Suggester for OpenAiClient {
    async fn suggest_pr_content(
        &self,
        pr: &PullRequestDetails,
        labels: &[Label],
        template: Option<&str>,
    ) -> Result<ContentSuggestion, AiError> {
        let user_prompt = prompt::pr_prompt(pr, labels, template);
        self.complete("pr_suggestions", &user_prompt).await
    }

    async fn suggest_issue_content(
        &self,
        issue: &IssueDetails,
        labels: &[Label],
        template: Option<&str>,
    ) -> Result<ContentSuggestion, AiError> {
        let user_prompt = prompt::issue_prompt(issue, labels, template);
        self.complete("issue_suggestions", &user_prompt).await
    }
}
