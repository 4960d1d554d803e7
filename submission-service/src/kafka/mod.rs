// ============================================================================
// Durable Log
// ============================================================================

pub mod producer;
pub mod types;

use async_trait::async_trait;
use careday_error::AppResult;

use crate::message::CompletedRecord;
use self::types::Metadata;

/// Publishes one completed record to the durable log and blocks for broker
/// acknowledgment. No retry happens at this layer: on failure the saga
/// compensates instead of retrying.
#[async_trait]
pub trait RecordPublisher: Send + Sync {
    async fn publish(&self, record: &CompletedRecord, metadata: &Metadata)
        -> AppResult<(i32, i64)>;
}
