//! User-facing error kinds and the normalisation applied at every workflow boundary.

use crate::http::HostError;
use crate::openai::AiError;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Check your internet connection and try again.";

/// The only errors a workflow hands to the CLI. Every kind carries a message
/// meant for direct display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    Public(String),
    /// AI service failure other than rate limiting.
    #[error("AI service error: {0}")]
    OpenAi(String),
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Public,
    OpenAi,
    RateLimit,
}

impl AppError {
    pub fn public(message: impl Into<String>) -> Self {
        AppError::Public(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Public(m) | AppError::OpenAi(m) | AppError::RateLimit(m) => m,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Public(_) => ErrorKind::Public,
            AppError::OpenAi(_) => ErrorKind::OpenAi,
            AppError::RateLimit(_) => ErrorKind::RateLimit,
        }
    }
}

/// Everything that can go wrong inside a workflow before classification.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("{0}")]
    Public(String),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Failure {
    pub fn public(message: impl Into<String>) -> Self {
        Failure::Public(message.into())
    }

    /// Map onto the public taxonomy. `context` names the operation for the
    /// unexpected-error prefix.
    pub fn classify(self, context: &str) -> AppError {
        match self {
            Failure::Public(m) => AppError::Public(m),
            Failure::Host(HostError::Network(_)) | Failure::Ai(AiError::Network(_)) => {
                AppError::public(NETWORK_ERROR_MESSAGE)
            }
            Failure::Host(e) => AppError::Public(e.to_string()),
            Failure::Ai(AiError::RateLimited(m)) => AppError::RateLimit(m),
            Failure::Ai(e @ AiError::MissingCredential) => AppError::Public(e.to_string()),
            Failure::Ai(e) => AppError::OpenAi(e.to_string()),
            other => {
                let message = other.to_string();
                if message.to_lowercase().contains("network") {
                    AppError::public(NETWORK_ERROR_MESSAGE)
                } else {
                    AppError::Public(format!("Unexpected error in {}: {}", context, message))
                }
            }
        }
    }
}

impl From<AppError> for Failure {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Public(m) => Failure::Public(m),
            AppError::OpenAi(m) => Failure::Ai(AiError::Service(m)),
            AppError::RateLimit(m) => Failure::Ai(AiError::RateLimited(m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_passes_through() {
        let e = Failure::public("No labels were selected.").classify("add-labels");
        assert_eq!(e, AppError::public("No labels were selected."));
        assert_eq!(e.kind(), ErrorKind::Public);
    }

    #[test]
    fn host_errors_carry_status() {
        let e = Failure::from(HostError::Status {
            status: 401,
            message: "Bad credentials".into(),
        })
        .classify("get-labels");
        assert_eq!(e.message(), "GitHub API error (401): Bad credentials");
    }

    #[test]
    fn network_failures_are_masked() {
        let e = Failure::from(HostError::Network("dns error: tcp connect".into())).classify("x");
        assert_eq!(e.message(), NETWORK_ERROR_MESSAGE);

        let io = std::io::Error::new(std::io::ErrorKind::Other, "Network is unreachable");
        assert_eq!(Failure::from(io).classify("x").message(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn ai_kinds_are_distinguished() {
        let rl = Failure::from(AiError::RateLimited("slow down".into())).classify("x");
        assert_eq!(rl.kind(), ErrorKind::RateLimit);
        assert_eq!(rl.to_string(), "Rate limit exceeded. Please try again later.");

        let svc = Failure::from(AiError::Service("boom".into())).classify("x");
        assert_eq!(svc.kind(), ErrorKind::OpenAi);
        assert_eq!(svc.to_string(), "AI service error: boom");

        let missing = Failure::from(AiError::MissingCredential).classify("x");
        assert_eq!(missing.kind(), ErrorKind::Public);
        assert!(missing.message().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn unclassified_gets_prefix() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let e = Failure::from(io).classify("get-labels");
        assert_eq!(e.message(), "Unexpected error in get-labels: permission denied");
    }
}
