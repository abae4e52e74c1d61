use serde::Deserialize;

use crate::models::PlotDepth;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Which OMDb plot text to request; `full` is treated as a synopsis
    #[serde(default)]
    pub omdb_plot: PlotDepth,

    /// Completion service key. When unset the session asks for one.
    #[serde(default)]
    pub completion_api_key: Option<String>,

    /// OpenAI-compatible chat completions endpoint
    #[serde(default = "default_completion_api_url")]
    pub completion_api_url: String,

    /// Model identifier sent with every completion request
    #[serde(default = "default_completion_model")]
    pub completion_model: String,

    /// Timeout applied to every outbound HTTP call
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_completion_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_completion_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_http_timeout_secs() -> u64 {
    60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        // An empty key in .env means "ask at runtime"
        if config
            .completion_api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            config.completion_api_key = None;
        }

        Ok(config)
    }
}
