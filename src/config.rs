use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Gemini API key. When unset the app runs in offline/demo mode.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini REST API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Model used for recommendations and taglines
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for place images
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Upper bound for a single AI call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Phrase sent to the AI guide when the user query is empty
    #[serde(default = "default_trending_phrase")]
    pub trending_phrase: String,

    /// Query auto-submitted on startup
    #[serde(default = "default_startup_query")]
    pub startup_query: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_trending_phrase() -> String {
    "Trending spots".to_string()
}

fn default_startup_query() -> String {
    "top attractions".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_url: default_gemini_api_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            request_timeout_secs: default_request_timeout_secs(),
            trending_phrase: default_trending_phrase(),
            startup_query: default_startup_query(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Blank keys count as missing
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
