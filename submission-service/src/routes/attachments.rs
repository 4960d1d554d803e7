// ============================================================================
// Attachment Endpoints
// ============================================================================
//
// Upload and delete pass through to the remote attachment store; uploaded
// files stay provisional there until a redistribution submission retains
// them.
//
// ============================================================================

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use careday_config::{MAX_ATTACHMENT_UPLOAD_BYTES, SUPPORTED_ATTACHMENT_CONTENT_TYPES};
use careday_error::AppError;
use careday_types::{AttachmentId, Violation, Violations};
use serde_json::json;
use tracing::info;

use crate::attachments::client::AttachmentStore;
use crate::attachments::{Attachment, DocumentOwner};
use crate::auth::{CallContext, IdToken};
use crate::AppContext;

const UPLOAD_FIELD_NAME: &str = "attachment";

fn upload_violation(reason: &str) -> AppError {
    let mut violations = Violations::new();
    violations.push(Violation::new(UPLOAD_FIELD_NAME, reason, json!(null)));
    AppError::Validation(violations)
}

/// POST /attachments — multipart upload of one file into the remote store.
pub async fn upload_attachment(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
    call: CallContext,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    info!("Storing attachment");

    let mut attachment: Option<Attachment> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_violation(&format!("unreadable multipart request: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }
        let Some(content_type) = field.content_type().map(str::to_string) else {
            continue;
        };
        let title = field
            .file_name()
            .unwrap_or("untitled attachment")
            .to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| upload_violation(&format!("unreadable file part: {}", e)))?;

        attachment = Some(Attachment {
            content: content.to_vec(),
            content_type,
            title,
            owner: Some(DocumentOwner::new(&token.subject)),
        });
        break;
    }

    let attachment = attachment.ok_or_else(|| {
        upload_violation("no file part named 'attachment' with a content type was found")
    })?;

    if !SUPPORTED_ATTACHMENT_CONTENT_TYPES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(&attachment.content_type))
    {
        return Err(upload_violation(&format!(
            "content type must be one of {:?}",
            SUPPORTED_ATTACHMENT_CONTENT_TYPES
        )));
    }

    if attachment.content.len() > MAX_ATTACHMENT_UPLOAD_BYTES {
        return Err(AppError::AttachmentTooLarge {
            total_bytes: attachment.content.len(),
            max_bytes: MAX_ATTACHMENT_UPLOAD_BYTES,
        });
    }

    let id = context
        .store
        .store(&attachment, &token, &call.correlation_id)
        .await?;
    info!(attachment_id = %id, "Attachment stored");

    let location = format!(
        "{}/attachments/{}",
        context.config.public_base_url.trim_end_matches('/'),
        id
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        location
            .parse()
            .map_err(|_| AppError::internal("attachment location is not a valid header value"))?,
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        header::LOCATION.as_str().parse().expect("static header"),
    );

    Ok((StatusCode::CREATED, headers))
}

/// DELETE /attachments/{attachment_id} — drop a provisional attachment.
pub async fn delete_attachment(
    State(context): State<Arc<AppContext>>,
    token: IdToken,
    call: CallContext,
    Path(attachment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = AttachmentId::new(attachment_id);
    info!(attachment_id = %id, "Deleting attachment");

    let owner = DocumentOwner::new(&token.subject);
    context
        .store
        .delete(&id, &owner, &call.correlation_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
