// ============================================================================
// Draft Endpoints
// ============================================================================

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use careday_error::AppError;

use crate::auth::IdToken;
use crate::AppContext;

/// GET /drafts — the caller's stored draft, or an empty object.
pub async fn get_draft(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
) -> Result<impl IntoResponse, AppError> {
    let draft = context
        .drafts
        .get(&token.subject)
        .await?
        .unwrap_or_else(|| "{}".to_string());

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        draft,
    ))
}

/// POST and PUT /drafts — store the body verbatim as the caller's draft.
pub async fn put_draft(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    context.drafts.put(&token.subject, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /drafts — drop the caller's draft.
pub async fn delete_draft(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
) -> Result<impl IntoResponse, AppError> {
    context.drafts.delete(&token.subject).await?;
    Ok(StatusCode::ACCEPTED)
}
