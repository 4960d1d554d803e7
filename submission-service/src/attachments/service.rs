// ============================================================================
// Attachment Fan-Out Service
// ============================================================================
//
// Runs one store operation per referenced attachment concurrently and joins
// them all before returning; no unit of work is left unobserved. Retry lives
// in the store client, never here.
//
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use careday_error::AppResult;
use careday_types::{AttachmentId, CorrelationId};
use futures::future::join_all;

use super::client::AttachmentStore;
use super::{Attachment, DocumentOwner};
use crate::auth::IdToken;

/// Whole-message attachment operations, as the submission saga sees them.
#[async_trait]
pub trait AttachmentOps: Send + Sync {
    /// Fetch every referenced attachment. Attachments the store cannot
    /// return are dropped as missing — the caller enforces completeness.
    async fn fetch_all(
        &self,
        ids: &[AttachmentId],
        token: &IdToken,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> Vec<Attachment>;

    /// Retain every attachment. All units run to completion; the first
    /// failure is surfaced afterwards.
    async fn retain_all(
        &self,
        ids: &[AttachmentId],
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()>;

    /// Delete every attachment. All units run to completion; the first
    /// failure is surfaced afterwards.
    async fn delete_all(
        &self,
        ids: &[AttachmentId],
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()>;
}

pub struct AttachmentService {
    store: Arc<dyn AttachmentStore>,
}

impl AttachmentService {
    pub fn new(store: Arc<dyn AttachmentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AttachmentOps for AttachmentService {
    async fn fetch_all(
        &self,
        ids: &[AttachmentId],
        token: &IdToken,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> Vec<Attachment> {
        let fetches = ids.iter().map(|id| async move {
            match self.store.fetch(id, token, owner, correlation_id).await {
                Ok(attachment) => Some(attachment),
                Err(err) => {
                    tracing::warn!(
                        attachment_id = %id,
                        error = %err,
                        correlation_id = %correlation_id,
                        "Attachment not retrievable, treating as missing"
                    );
                    None
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }

    async fn retain_all(
        &self,
        ids: &[AttachmentId],
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()> {
        let results = join_all(
            ids.iter()
                .map(|id| self.store.retain(id, owner, correlation_id)),
        )
        .await;

        results.into_iter().collect::<AppResult<Vec<()>>>()?;
        Ok(())
    }

    async fn delete_all(
        &self,
        ids: &[AttachmentId],
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()> {
        let results = join_all(
            ids.iter()
                .map(|id| self.store.delete(id, owner, correlation_id)),
        )
        .await;

        results.into_iter().collect::<AppResult<Vec<()>>>()?;
        Ok(())
    }
}
