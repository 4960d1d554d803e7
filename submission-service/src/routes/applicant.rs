use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use careday_error::AppError;

use crate::auth::{CallContext, IdToken};
use crate::clients::applicant::ApplicantResolver;
use crate::AppContext;

/// GET /applicant — the resolved identity of the authenticated caller.
pub async fn get_applicant(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
    call: CallContext,
) -> Result<impl IntoResponse, AppError> {
    let applicant = context
        .applicant
        .resolve(&token, &call.correlation_id)
        .await?;
    Ok(Json(applicant))
}
