//! Command line and environment configuration

use automatisch_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use automatisch_client::ClientConfig;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "automatisch-mcp-server")]
#[command(about = "Model Context Protocol bridge for Automatisch workflows")]
#[command(version)]
pub struct Cli {
    /// Base URL of the Automatisch instance
    #[arg(long, env = "AUTOMATISCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API key sent as a bearer token (empty means unauthenticated)
    #[arg(long, env = "AUTOMATISCH_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "AUTOMATISCH_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::builder()
            .base_url(self.base_url.clone())
            .api_key(self.api_key.clone())
            .timeout_ms(self.timeout_ms)
            .build()
    }
}
