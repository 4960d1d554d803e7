// ============================================================================
// Draft Storage
// ============================================================================
//
// Redis-backed temporary storage for half-finished submissions, keyed by the
// caller's subject. Drafts are opaque JSON strings with a TTL; nothing in
// them is validated or published.
//
// ============================================================================

use careday_config::RedisConfig;
use careday_error::AppResult;
use redis::{aio::ConnectionManager, AsyncCommands};

/// Redis client with automatic reconnection, scoped to draft keys.
#[derive(Clone)]
pub struct DraftStore {
    conn: ConnectionManager,
    key_prefix: String,
    ttl_secs: u64,
}

impl DraftStore {
    /// Connect to Redis. Supports both redis:// and rediss:// (TLS) URLs.
    pub async fn connect(config: &RedisConfig) -> anyhow::Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            key_prefix: config.draft_key_prefix.clone(),
            ttl_secs: config.draft_ttl_secs,
        })
    }

    fn key(&self, subject: &str) -> String {
        format!("{}{}", self.key_prefix, subject)
    }

    pub async fn get(&self, subject: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        let draft: Option<String> = conn.get(self.key(subject)).await?;
        Ok(draft)
    }

    /// Store or replace the caller's draft; the TTL restarts on every write.
    pub async fn put(&self, subject: &str, draft: String) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(self.key(subject), draft, self.ttl_secs).await?;
        tracing::debug!(ttl_secs = self.ttl_secs, "Draft stored");
        Ok(())
    }

    pub async fn delete(&self, subject: &str) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(self.key(subject)).await?;
        Ok(removed > 0)
    }
}
