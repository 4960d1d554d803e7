// ============================================================================
// Submission Endpoints
// ============================================================================
//
// One endpoint per message type. Each checks that the posted message matches
// the endpoint before handing it to the saga, so a redistribution posted to
// the corona endpoint is a client error, not an accepted submission.
//
// ============================================================================

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use careday_error::AppError;
use tracing::info;

use crate::auth::{CallContext, IdToken};
use crate::kafka::types::Metadata;
use crate::message::Message;
use crate::AppContext;

pub async fn submit_corona_transfer(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
    call: CallContext,
    Json(message): Json<Message>,
) -> Result<impl IntoResponse, AppError> {
    info!("Received a new corona-transfer message");
    if !matches!(message, Message::CoronaTransfer { .. }) {
        return Err(AppError::WrongMessageType {
            expected: "coronaTransfer",
        });
    }
    register(&context, message, &token, &call).await
}

pub async fn submit_spouse_transfer(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
    call: CallContext,
    Json(message): Json<Message>,
) -> Result<impl IntoResponse, AppError> {
    info!("Received a new spouse-transfer message");
    if !matches!(message, Message::SpouseTransfer { .. }) {
        return Err(AppError::WrongMessageType {
            expected: "spouseTransfer",
        });
    }
    register(&context, message, &token, &call).await
}

pub async fn submit_redistribution(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
    call: CallContext,
    Json(message): Json<Message>,
) -> Result<impl IntoResponse, AppError> {
    info!("Received a new redistribution message");
    if !matches!(message, Message::Redistribution { .. }) {
        return Err(AppError::WrongMessageType {
            expected: "redistribution",
        });
    }
    register(&context, message, &token, &call).await
}

async fn register(
    context: &AppContext,
    message: Message,
    token: &IdToken,
    call: &CallContext,
) -> Result<StatusCode, AppError> {
    let metadata = Metadata::new(&call.correlation_id, call.request_id.clone());
    context
        .submissions
        .register(message, metadata, token, &call.correlation_id)
        .await?;
    Ok(StatusCode::ACCEPTED)
}
