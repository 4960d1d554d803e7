// ============================================================================
// HTTP Routes
// ============================================================================
//
// Router and handlers for the caller-facing surface: the three submission
// endpoints, applicant and children lookups, attachment upload/delete,
// drafts, health checks and metrics exposition.
//
// ============================================================================

pub mod applicant;
pub mod attachments;
pub mod children;
pub mod drafts;
pub mod submissions;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use careday_error::AppError;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::AppContext;

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Prometheus metrics exposition
async fn metrics() -> Result<impl IntoResponse, AppError> {
    let rendered = careday_metrics::gather_metrics()
        .map_err(|e| AppError::internal(format!("failed to render metrics: {}", e)))?;
    Ok((StatusCode::OK, rendered))
}

/// Build the service router.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(health_check))
        .route("/health/ready", get(health_check))
        .route("/health/live", get(health_check))
        .route("/metrics", get(metrics))
        // Submissions
        .route(
            "/submissions/corona-transfer",
            post(submissions::submit_corona_transfer),
        )
        .route(
            "/submissions/spouse-transfer",
            post(submissions::submit_spouse_transfer),
        )
        .route(
            "/submissions/redistribution",
            post(submissions::submit_redistribution),
        )
        // Lookups
        .route("/applicant", get(applicant::get_applicant))
        .route("/children", get(children::get_children))
        // Attachments
        .route("/attachments", post(attachments::upload_attachment))
        .route(
            "/attachments/:attachment_id",
            delete(attachments::delete_attachment),
        )
        // Drafts
        .route(
            "/drafts",
            get(drafts::get_draft)
                .post(drafts::put_draft)
                .put(drafts::put_draft)
                .delete(drafts::delete_draft),
        )
        // Apply middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state(context)
}
