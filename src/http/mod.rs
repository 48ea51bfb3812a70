use crate::config::GitHubConfig;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Failures produced by the GitHub transport. This is the only error shape the
/// host gateway hands upward; callers match on it instead of probing responses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("GitHub token is required. Provide one with --token or set the GITHUB_TOKEN environment variable.")]
    MissingToken,
    #[error("GitHub API error (404): {message}")]
    NotFound { message: String },
    /// 422; GitHub uses it for "already exists" on label creation.
    #[error("GitHub API error (422): {message}")]
    Unprocessable { message: String },
    #[error("GitHub API error ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode GitHub response: {0}")]
    Decode(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl HostError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HostError::NotFound { .. } => Some(404),
            HostError::Unprocessable { .. } => Some(422),
            HostError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HostError::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, HostError::Unprocessable { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateMeta {
    pub remaining: Option<i32>,
    pub used: Option<i32>,
    pub reset_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
    pub rate: RateMeta,
}

pub fn build_client(cfg: &GitHubConfig) -> Result<Client, HostError> {
    let mut default_headers = HeaderMap::new();
    let ua = HeaderValue::from_str(&cfg.user_agent).map_err(|e| HostError::Client(e.to_string()))?;
    default_headers.insert(USER_AGENT, ua);
    // Authorization header is injected per request.
    Client::builder()
        .default_headers(default_headers)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .use_rustls_tls()
        .build()
        .map_err(|e| HostError::Client(e.to_string()))
}

fn auth_header(token: &str) -> Result<HeaderValue, HostError> {
    HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| HostError::Client(e.to_string()))
}

#[derive(Deserialize)]
struct GitHubErrorBody {
    message: Option<String>,
}

/// Pull a human message out of a GitHub error body, falling back to the raw text
/// and then to the canonical reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<GitHubErrorBody>(body) {
        if let Some(m) = parsed.message.filter(|m| !m.is_empty()) {
            return m;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status.canonical_reason().unwrap_or("Unknown error").to_string()
}

pub fn map_status_to_error(status: StatusCode, body: &str) -> HostError {
    let message = error_message(status, body);
    match status {
        StatusCode::NOT_FOUND => HostError::NotFound { message },
        StatusCode::UNPROCESSABLE_ENTITY => HostError::Unprocessable { message },
        s => HostError::Status {
            status: s.as_u16(),
            message,
        },
    }
}

fn transport_error(e: reqwest::Error) -> HostError {
    if e.is_decode() {
        HostError::Decode(e.to_string())
    } else {
        HostError::Network(e.to_string())
    }
}

pub fn extract_rate_from_rest(headers: &HeaderMap) -> RateMeta {
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i32>().ok());
    let used = headers
        .get("x-ratelimit-used")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i32>().ok());
    let reset_at = headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|epoch| chrono::DateTime::<chrono::Utc>::from_timestamp(epoch, 0))
        .map(|t| t.to_rfc3339());
    RateMeta {
        remaining,
        used,
        reset_at,
    }
}

/// URL of the `rel="next"` entry of a `Link` header, if any.
pub fn next_page_from_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get("link").and_then(|v| v.to_str().ok())?;
    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|p| p.trim() == "rel=\"next\"");
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(|t| t.to_string())
    })
}

pub fn same_origin(base: &str, candidate: &str) -> bool {
    match (Url::parse(base), Url::parse(candidate)) {
        (Ok(a), Ok(b)) => a.origin() == b.origin(),
        _ => false,
    }
}

/// Percent-encode a single path segment (everything but RFC 3986 unreserved characters).
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Encode a repository file path, keeping `/` separators.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(encode_path_segment)
        .collect::<Vec<_>>()
        .join("/")
}

pub fn api_url(cfg: &GitHubConfig, path: &str) -> String {
    format!("{}{}", cfg.api_url.trim_end_matches('/'), path)
}

/// Send one authenticated REST request. Non-2xx statuses come back as `HostError`.
/// There is no retry; a failed call surfaces immediately.
pub async fn rest_send(
    client: &Client,
    cfg: &GitHubConfig,
    method: Method,
    url: &str,
    body: Option<&serde_json::Value>,
) -> Result<RestResponse, HostError> {
    let token = cfg.token.as_deref().ok_or(HostError::MissingToken)?;
    debug!("REST {} {}", method, url);
    let mut req = client
        .request(method.clone(), url)
        .header(AUTHORIZATION, auth_header(token)?)
        .header("X-GitHub-Api-Version", &cfg.api_version)
        .header(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
    if let Some(b) = body {
        req = req.json(b);
    }
    let res = req.send().await.map_err(transport_error)?;

    let status = res.status();
    let headers = res.headers().clone();
    let rate = extract_rate_from_rest(&headers);
    if let Some(remaining) = rate.remaining {
        debug!("REST {} {} -> {} (rate remaining {})", method, url, status, remaining);
    }
    let text = res.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(map_status_to_error(status, &text));
    }
    Ok(RestResponse {
        status,
        headers,
        body: text,
        rate,
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, HostError> {
    serde_json::from_str(body).map_err(|e| HostError::Decode(e.to_string()))
}

pub async fn rest_get_json<T: DeserializeOwned>(
    client: &Client,
    cfg: &GitHubConfig,
    path: &str,
) -> Result<T, HostError> {
    let res = rest_send(client, cfg, Method::GET, &api_url(cfg, path), None).await?;
    decode(&res.body)
}

/// GET that treats 404 as "absent" rather than a failure.
pub async fn rest_get_optional_json<T: DeserializeOwned>(
    client: &Client,
    cfg: &GitHubConfig,
    path: &str,
) -> Result<Option<T>, HostError> {
    match rest_get_json(client, cfg, path).await {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// GET a list endpoint and follow `Link: rel="next"` until exhausted.
/// Next links pointing at another origin are not followed.
pub async fn rest_get_all<T: DeserializeOwned>(
    client: &Client,
    cfg: &GitHubConfig,
    path: &str,
) -> Result<Vec<T>, HostError> {
    let mut items = Vec::new();
    let mut url = api_url(cfg, path);
    loop {
        let res = rest_send(client, cfg, Method::GET, &url, None).await?;
        let mut page: Vec<T> = decode(&res.body)?;
        items.append(&mut page);
        match next_page_from_link(&res.headers) {
            Some(next) if same_origin(&cfg.api_url, &next) => url = next,
            Some(next) => {
                warn!("Ignoring pagination link to foreign origin: {}", next);
                break;
            }
            None => break,
        }
    }
    Ok(items)
}

pub async fn rest_send_json(
    client: &Client,
    cfg: &GitHubConfig,
    method: Method,
    path: &str,
    body: Option<&serde_json::Value>,
) -> Result<RestResponse, HostError> {
    rest_send(client, cfg, method, &api_url(cfg, path), body).await
}
