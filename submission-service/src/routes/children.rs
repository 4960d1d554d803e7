use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::{CallContext, IdToken};
use crate::clients::children::ChildrenLookup;
use crate::AppContext;

/// GET /children — the caller's currently registered children.
pub async fn get_children(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
    call: CallContext,
) -> impl IntoResponse {
    let children = context
        .children
        .current_children(&token, &call.correlation_id)
        .await;
    Json(json!({ "children": children }))
}
