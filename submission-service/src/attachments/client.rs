// ============================================================================
// Attachment Store Client
// ============================================================================
//
// HTTP client for the remote attachment store. Every operation carries the
// caller's correlation id and an owner claim the store authorizes against,
// and wraps only the transport call in a bounded exponential-backoff retry —
// local logic is never re-run.
//
// ============================================================================

use async_trait::async_trait;
use careday_config::RetryConfig;
use careday_error::{AppError, AppResult};
use careday_metrics::ATTACHMENT_RETRIES_TOTAL;
use careday_types::{AttachmentId, CorrelationId};
use reqwest::StatusCode;
use serde::Deserialize;

use super::{Attachment, DocumentOwner};
use crate::auth::IdToken;

/// Single-attachment operations against the remote store.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    async fn store(
        &self,
        attachment: &Attachment,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> AppResult<AttachmentId>;

    async fn fetch(
        &self,
        id: &AttachmentId,
        token: &IdToken,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<Attachment>;

    async fn retain(
        &self,
        id: &AttachmentId,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()>;

    async fn delete(
        &self,
        id: &AttachmentId,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()>;
}

/// Id assigned by the store on upload.
#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

pub struct AttachmentStoreClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl AttachmentStoreClient {
    pub fn new(http: reqwest::Client, base_url: String, retry: RetryConfig) -> Self {
        Self {
            http,
            base_url,
            retry,
        }
    }

    fn attachment_url(&self, id: &AttachmentId) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), id)
    }

    /// Decide whether a failed attempt may go again. Returns the original
    /// error once attempts are exhausted.
    async fn backoff(
        &self,
        operation: &'static str,
        attempt: u32,
        err: AppError,
    ) -> AppResult<()> {
        if attempt >= self.retry.max_attempts {
            return Err(err);
        }

        tracing::warn!(
            operation,
            attempt,
            max_attempts = self.retry.max_attempts,
            error = %err,
            "Attachment store operation failed, will retry"
        );
        ATTACHMENT_RETRIES_TOTAL.with_label_values(&[operation]).inc();
        tokio::time::sleep(self.retry.delay_before_attempt(attempt)).await;
        Ok(())
    }

    async fn store_once(
        &self,
        attachment: &Attachment,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> AppResult<AttachmentId> {
        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(&token.raw)
            .header("Accept", "application/json")
            .header("X-Correlation-ID", correlation_id.as_str())
            .json(attachment)
            .send()
            .await?;

        if response.status() == StatusCode::CREATED {
            let created: CreatedResponse = response.json().await?;
            Ok(AttachmentId::new(created.id))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Failed to store attachment");
            Err(AppError::transport(format!(
                "attachment store returned {}",
                status
            )))
        }
    }

    async fn fetch_once(
        &self,
        id: &AttachmentId,
        token: &IdToken,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<Attachment> {
        let response = self
            .http
            .post(self.attachment_url(id))
            .bearer_auth(&token.raw)
            .header("Accept", "application/json")
            .header("X-Correlation-ID", correlation_id.as_str())
            .json(owner)
            .send()
            .await?;

        if response.status() == StatusCode::OK {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                attachment_id = %id,
                status = %status,
                body = %body,
                "Failed to fetch attachment"
            );
            Err(AppError::AttachmentNotRetrievable(id.to_string()))
        }
    }

    async fn retain_once(
        &self,
        id: &AttachmentId,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()> {
        let response = self
            .http
            .put(format!("{}/retain", self.attachment_url(id)))
            .header("X-Correlation-ID", correlation_id.as_str())
            .json(owner)
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                attachment_id = %id,
                status = %status,
                body = %body,
                "Failed to retain attachment"
            );
            Err(AppError::AttachmentRetentionFailed(id.to_string()))
        }
    }

    async fn delete_once(
        &self,
        id: &AttachmentId,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()> {
        let response = self
            .http
            .delete(self.attachment_url(id))
            .header("X-Correlation-ID", correlation_id.as_str())
            .json(owner)
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                attachment_id = %id,
                status = %status,
                body = %body,
                "Failed to delete attachment"
            );
            Err(AppError::AttachmentDeletionFailed(id.to_string()))
        }
    }
}

#[async_trait]
impl AttachmentStore for AttachmentStoreClient {
    async fn store(
        &self,
        attachment: &Attachment,
        token: &IdToken,
        correlation_id: &CorrelationId,
    ) -> AppResult<AttachmentId> {
        let mut attempt = 1;
        loop {
            match self.store_once(attachment, token, correlation_id).await {
                Ok(id) => return Ok(id),
                Err(err) => self.backoff("store-attachment", attempt, err).await?,
            }
            attempt += 1;
        }
    }

    async fn fetch(
        &self,
        id: &AttachmentId,
        token: &IdToken,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<Attachment> {
        let mut attempt = 1;
        loop {
            match self.fetch_once(id, token, owner, correlation_id).await {
                Ok(attachment) => return Ok(attachment),
                Err(err) => self.backoff("fetch-attachment", attempt, err).await?,
            }
            attempt += 1;
        }
    }

    async fn retain(
        &self,
        id: &AttachmentId,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()> {
        let mut attempt = 1;
        loop {
            match self.retain_once(id, owner, correlation_id).await {
                Ok(()) => return Ok(()),
                Err(err) => self.backoff("retain-attachment", attempt, err).await?,
            }
            attempt += 1;
        }
    }

    async fn delete(
        &self,
        id: &AttachmentId,
        owner: &DocumentOwner,
        correlation_id: &CorrelationId,
    ) -> AppResult<()> {
        let mut attempt = 1;
        loop {
            match self.delete_once(id, owner, correlation_id).await {
                Ok(()) => return Ok(()),
                Err(err) => self.backoff("delete-attachment", attempt, err).await?,
            }
            attempt += 1;
        }
    }
}
