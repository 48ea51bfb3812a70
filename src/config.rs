use std::env;
use std::path::PathBuf;

/// Runtime configuration, built once at startup and passed into the gateways.
#[derive(Debug, Clone)]
pub struct Config {
    pub github: GitHubConfig,
    pub openai: OpenAiConfig,
    pub labels_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub token: Option<String>,
    pub api_url: String,
    pub api_version: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub seed: Option<i64>,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Env vars:
    /// - GITHUB_TOKEN (or GH_TOKEN)
    /// - GITHUB_API_URL (default: https://api.github.com)
    /// - GITHUB_API_VERSION (default: 2022-11-28)
    /// - GITHUB_HTTP_TIMEOUT_SECS (default: 30)
    /// - GITHUB_USER_AGENT (default: gh-labels/<version>)
    /// - OPENAI_API_KEY
    /// - OPENAI_API_URL (default: https://api.openai.com/v1)
    /// - OPENAI_MODEL (default: gpt-4o)
    /// - OPENAI_TEMPERATURE (default: 0.3)
    /// - OPENAI_SEED (default: 42)
    /// - GH_LABELS_DIR (default: labels)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_empty("GITHUB_TOKEN").or_else(|| non_empty("GH_TOKEN"));
        let api_url = non_empty("GITHUB_API_URL").unwrap_or_else(|| "https://api.github.com".to_string());
        let api_version = non_empty("GITHUB_API_VERSION").unwrap_or_else(|| "2022-11-28".to_string());
        let timeout_secs = non_empty("GITHUB_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);
        let user_agent = non_empty("GITHUB_USER_AGENT")
            .unwrap_or_else(|| format!("gh-labels/{}", env!("CARGO_PKG_VERSION")));

        let openai = OpenAiConfig {
            api_key: non_empty("OPENAI_API_KEY"),
            api_url: non_empty("OPENAI_API_URL").unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: non_empty("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            temperature: non_empty("OPENAI_TEMPERATURE")
                .and_then(|s| s.parse::<f32>().ok())
                .unwrap_or(0.3),
            seed: Some(non_empty("OPENAI_SEED").and_then(|s| s.parse::<i64>().ok()).unwrap_or(42)),
            timeout_secs: 120,
        };

        Self {
            github: GitHubConfig {
                token,
                api_url,
                api_version,
                user_agent,
                timeout_secs,
            },
            openai,
            labels_dir: non_empty("GH_LABELS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("labels")),
        }
    }

    /// An explicit `--token` wins over the environment.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(t) = token.filter(|t| !t.trim().is_empty()) {
            self.github.token = Some(t);
        }
        self
    }
}
