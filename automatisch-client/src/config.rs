//! Configuration for the Automatisch client

use serde::{Deserialize, Serialize};

/// Default Automatisch instance (local development server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Client configuration
///
/// Established once at startup and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the Automatisch instance
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; empty means requests are sent unauthenticated
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout() -> u64 { DEFAULT_TIMEOUT_MS }

impl ClientConfig {
    /// Create a new configuration builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Whether an API key is configured
    pub fn is_authenticated(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_ms: Option<u64>,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.unwrap_or_else(default_base_url),
            api_key: self.api_key.unwrap_or_default(),
            timeout_ms: self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
        }
    }
}
