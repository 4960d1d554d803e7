// ============================================================================
// Careday Config - Centralized configuration management
// ============================================================================
//
// Configuration for the careday submission service, loaded from environment
// variables with sensible defaults for local development.
//
// ============================================================================

mod constants;
mod kafka;
mod redis;
mod retry;

pub use constants::{
    DEFAULT_DRAFT_TTL_SECS, DEFAULT_PORT, MAX_ATTACHMENT_UPLOAD_BYTES, MAX_TOTAL_ATTACHMENT_BYTES,
    SUPPORTED_ATTACHMENT_CONTENT_TYPES,
};
pub use kafka::KafkaConfig;
pub use redis::RedisConfig;
pub use retry::RetryConfig;

use anyhow::Result;

/// Main configuration structure for the submission service
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub rust_log: String,

    /// Base URL of the identity/relationship lookup service
    pub lookup_base_url: String,
    /// Base URL of the remote attachment store
    pub attachment_store_base_url: String,
    /// Public base URL of this service, used to build attachment reference
    /// URLs returned to clients
    pub public_base_url: String,

    // Sub-configurations
    pub kafka: KafkaConfig,
    pub redis: RedisConfig,
    pub retry: RetryConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            port,
            bind_address: format!("[::]:{}", port),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),

            lookup_base_url: std::env::var("LOOKUP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8091".to_string()),
            attachment_store_base_url: std::env::var("ATTACHMENT_STORE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8092/attachments".to_string()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),

            kafka: KafkaConfig::from_env(),
            redis: RedisConfig::from_env(),
            retry: RetryConfig::from_env(),
        })
    }
}
