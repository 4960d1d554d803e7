use axum::{http::StatusCode, response::IntoResponse};
use careday_types::Violations;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Application error type for the careday submission service
///
/// Covers the submission pipeline's error taxonomy plus the ambient
/// transport and infrastructure failures, providing structured error
/// information for logging and client-facing responses.
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Client-correctable errors =====
    #[error("Validation failed: {0}")]
    Validation(Violations),

    #[error("Endpoint requires a {expected} message")]
    WrongMessageType { expected: &'static str },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // ===== Attachment errors =====
    #[error("Referenced {expected} attachment(s), found {found}")]
    AttachmentIncomplete { expected: usize, found: usize },

    #[error("Combined attachment size {total_bytes} exceeds the {max_bytes} byte limit")]
    AttachmentTooLarge { total_bytes: usize, max_bytes: usize },

    #[error("Attachment {0} could not be retrieved from the store")]
    AttachmentNotRetrievable(String),

    #[error("Attachment {0} could not be retained")]
    AttachmentRetentionFailed(String),

    #[error("Attachment {0} could not be deleted")]
    AttachmentDeletionFailed(String),

    // ===== Transport & publish errors =====
    #[error("Upstream service error: {0}")]
    Transport(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Kafka error: {0}")]
    Kafka(String),

    #[error("Publish rejected: {0}")]
    PublishRejected(String),

    /// The durable publish failed after side effects had already occurred;
    /// compensation has been attempted. Always surfaced, never masked by
    /// the compensation outcome.
    #[error("Submission {0} could not be registered")]
    SubmissionFailed(String),

    // ===== Infrastructure errors =====
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::WrongMessageType { .. } => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AttachmentIncomplete { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AttachmentTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::AttachmentNotRetrievable(_)
            | AppError::AttachmentRetentionFailed(_)
            | AppError::AttachmentDeletionFailed(_)
            | AppError::Transport(_)
            | AppError::Reqwest(_) => StatusCode::BAD_GATEWAY,
            AppError::Kafka(_)
            | AppError::PublishRejected(_)
            | AppError::SubmissionFailed(_)
            | AppError::Redis(_)
            | AppError::Json(_)
            | AppError::Internal(_)
            | AppError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "INVALID_REQUEST_PARAMETERS",
            AppError::WrongMessageType { .. } => "WRONG_MESSAGE_TYPE",
            AppError::Auth(_) => "AUTH_ERROR",
            AppError::AccessDenied(_) => "ACCESS_DENIED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AttachmentIncomplete { .. } => "ATTACHMENT_INCOMPLETE",
            AppError::AttachmentTooLarge { .. } => "ATTACHMENTS_TOO_LARGE",
            AppError::AttachmentNotRetrievable(_) => "ATTACHMENT_NOT_RETRIEVABLE",
            AppError::AttachmentRetentionFailed(_) => "ATTACHMENT_RETENTION_FAILED",
            AppError::AttachmentDeletionFailed(_) => "ATTACHMENT_DELETION_FAILED",
            AppError::Transport(_) | AppError::Reqwest(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::Kafka(_) => "KAFKA_ERROR",
            AppError::PublishRejected(_) => "PUBLISH_REJECTED",
            AppError::SubmissionFailed(_) => "SUBMISSION_FAILED",
            AppError::Redis(_) => "REDIS_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Get a user-friendly error message (without sensitive details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(violations) => format!("Validation failed: {}", violations),
            AppError::WrongMessageType { expected } => {
                format!("This endpoint requires a {} message", expected)
            }
            AppError::Auth(_) => "Invalid or missing token".to_string(),
            AppError::AccessDenied(msg) => format!("Access denied: {}", msg),
            AppError::NotFound(msg) => format!("Not found: {}", msg),
            AppError::AttachmentIncomplete { expected, found } => format!(
                "Referenced {} attachment(s), but only {} could be retrieved.",
                expected, found
            ),
            AppError::AttachmentTooLarge { max_bytes, .. } => format!(
                "The combined size of all attachments exceeds the limit of {} bytes.",
                max_bytes
            ),
            AppError::Transport(_) | AppError::Reqwest(_) => "External service error".to_string(),
            AppError::SubmissionFailed(_) => {
                "The submission could not be registered. Try again later.".to_string()
            }
            AppError::Redis(_) => "Draft storage error".to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    /// Log this error with appropriate level and context
    pub fn log(&self) {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = %code,
                status = %status.as_u16(),
                "Server error occurred"
            );
        } else if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                error = %self,
                error_code = %code,
                "Authentication failed"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = %code,
                "Client error occurred"
            );
        }
    }

    /// Create an access-denied error
    pub fn access_denied(msg: impl Into<String>) -> Self {
        AppError::AccessDenied(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        AppError::Auth(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        AppError::Transport(msg.into())
    }

    /// Create an internal server error
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Create a Kafka error
    pub fn kafka(msg: impl Into<String>) -> Self {
        AppError::Kafka(msg.into())
    }
}

impl From<Violations> for AppError {
    fn from(violations: Violations) -> Self {
        AppError::Validation(violations)
    }
}

impl From<rdkafka::error::KafkaError> for AppError {
    fn from(err: rdkafka::error::KafkaError) -> Self {
        tracing::error!(error = %err, "Kafka error occurred");
        AppError::Kafka(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Log the error with appropriate level
        self.log();

        let status = self.status_code();
        let error_code = self.error_code();
        let user_message = self.user_message();

        let response_body = if status.is_server_error() {
            // For server errors, don't expose internal details to client
            json!({
                "error": "Internal server error",
                "error_code": error_code,
                "status": status.as_u16(),
            })
        } else if let AppError::Validation(ref violations) = self {
            // Validation responses carry the full violation set so the
            // caller can correct every field in one resubmission
            json!({
                "error": user_message,
                "error_code": error_code,
                "status": status.as_u16(),
                "violations": violations,
            })
        } else {
            // Standard format for other errors
            json!({
                "error": user_message,
                "error_code": error_code,
                "status": status.as_u16(),
            })
        };

        (status, axum::Json(response_body)).into_response()
    }
}
