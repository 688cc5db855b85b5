use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BilinError, Result};

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub zhipu: ZhipuConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API endpoint base URL
    pub endpoint: String,
    /// Model to use for translation
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZhipuConfig {
    /// API endpoint base URL
    pub endpoint: String,
    /// Model to use for translation
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Optional proxy URL applied to all outbound requests
    /// (e.g. "http://127.0.0.1:7897"). Passed explicitly into the
    /// client builder, never read from process environment.
    pub proxy: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig {
                endpoint: "https://generativelanguage.googleapis.com".to_string(),
                model: "gemini-2.0-flash".to_string(),
            },
            zhipu: ZhipuConfig {
                endpoint: "https://open.bigmodel.cn".to_string(),
                model: "glm-4-flash".to_string(),
            },
            http: HttpConfig {
                proxy: None,
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BilinError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| BilinError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| BilinError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| BilinError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Build an HTTP client honoring the proxy and timeout settings.
    /// Each provider gets its own client constructed from this.
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.http.timeout_secs));

        if let Some(proxy_url) = &self.http.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| BilinError::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|e| BilinError::Config(format!("Failed to build HTTP client: {}", e)))
    }
}
