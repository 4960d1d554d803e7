// ============================================================================
// Retry Configuration
// ============================================================================

/// Bounded exponential backoff schedule for attachment store calls.
///
/// Injected into the store client so retry behavior is configuration, not
/// something baked into each transport call site.
#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub multiplier: f64,
}

impl RetryConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            max_attempts: std::env::var("ATTACHMENT_RETRY_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            initial_delay_ms: std::env::var("ATTACHMENT_RETRY_INITIAL_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            multiplier: std::env::var("ATTACHMENT_RETRY_MULTIPLIER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2.0),
        }
    }

    /// Delay before the given 1-based attempt retries.
    pub fn delay_before_attempt(&self, attempt: u32) -> std::time::Duration {
        let factor = self.multiplier.powi(attempt.saturating_sub(1) as i32);
        std::time::Duration::from_millis((self.initial_delay_ms as f64 * factor) as u64)
    }
}
