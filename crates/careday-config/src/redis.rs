// ============================================================================
// Redis Configuration
// ============================================================================

use crate::constants::DEFAULT_DRAFT_TTL_SECS;

/// Redis configuration for draft storage.
#[derive(Clone, Debug)]
pub struct RedisConfig {
    pub url: String,
    /// Key prefix so drafts never collide with other tenants of the instance
    pub draft_key_prefix: String,
    /// Seconds a stored draft survives without being rewritten
    pub draft_ttl_secs: u64,
}

impl RedisConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            draft_key_prefix: std::env::var("DRAFT_KEY_PREFIX")
                .unwrap_or_else(|_| "draft:".to_string()),
            draft_ttl_secs: std::env::var("DRAFT_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DRAFT_TTL_SECS),
        }
    }
}
