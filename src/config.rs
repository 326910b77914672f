use std::time::Duration;

use serde::Deserialize;

use crate::ui::AutocompleteSettings;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation backend serving `/api/search` and `/api/recommend`
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Base URL of the poster proxy the client asks for artwork
    #[serde(default = "default_poster_proxy_url")]
    pub poster_proxy_url: String,

    /// Movie metadata (OMDb) API base URL
    #[serde(default = "default_poster_api_url")]
    pub poster_api_url: String,

    /// Movie metadata API key, only ever read by the proxy
    #[serde(default)]
    pub poster_api_key: Option<String>,

    /// Idle time before an autocomplete lookup fires
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Shortest query that triggers an autocomplete lookup
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_poster_proxy_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_poster_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_min_query_len() -> usize {
    2
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
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The poster API key, required when running the proxy
    pub fn require_poster_api_key(&self) -> anyhow::Result<String> {
        self.poster_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("POSTER_API_KEY must be set to run the poster proxy"))
    }

    pub fn autocomplete_settings(&self) -> AutocompleteSettings {
        AutocompleteSettings {
            debounce: Duration::from_millis(self.search_debounce_ms),
            min_query_len: self.min_query_len,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
