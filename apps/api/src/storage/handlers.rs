//! Axum route handlers for file uploads and deletes.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::extract::{AdminSession, StaffSession};
use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{
    self, object_key, public_url, staff_owns_key, validate_upload, UploadKind, DOCUMENT_TYPES,
};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub key: String,
}

/// Reads the `file` part of a multipart body: (bytes, declared content type).
async fn read_file_field(mut multipart: Multipart) -> Result<(bytes::Bytes, String), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file part must declare a content type".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        return Ok((data, content_type));
    }
    Err(AppError::Validation(
        "Missing 'file' part in multipart body".to_string(),
    ))
}

async fn store_upload(
    state: &AppState,
    kind: UploadKind,
    owner_id: uuid::Uuid,
    doc_type: Option<&str>,
    multipart: Multipart,
) -> Result<UploadResponse, AppError> {
    let (data, content_type) = read_file_field(multipart).await?;
    validate_upload(kind, data.len(), &content_type)?;

    let key = object_key(kind, owner_id, doc_type, &content_type);
    storage::put_object(
        &state.s3,
        &state.config.s3_bucket,
        &key,
        data.to_vec(),
        &content_type,
    )
    .await?;

    let url = public_url(&state.config.s3_endpoint, &state.config.s3_bucket, &key);
    Ok(UploadResponse { key, url })
}

/// POST /api/staff/uploads/avatar
///
/// Stores the image and points the staff profile at the new key.
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let response = store_upload(&state, UploadKind::Avatar, staff.id, None, multipart).await?;

    sqlx::query("UPDATE staff_users SET avatar_key = $1, updated_at = NOW() WHERE id = $2")
        .bind(&response.key)
        .bind(staff.id)
        .execute(&state.db)
        .await?;

    Ok(Json(response))
}

/// POST /api/staff/uploads/document/:doc_type
pub async fn handle_upload_document(
    State(state): State<AppState>,
    Path(doc_type): Path<String>,
    StaffSession(staff): StaffSession,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    if !DOCUMENT_TYPES.contains(&doc_type.as_str()) {
        return Err(AppError::Validation(format!(
            "Unknown document type '{doc_type}'"
        )));
    }

    let response = store_upload(
        &state,
        UploadKind::Document,
        staff.id,
        Some(&doc_type),
        multipart,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/staff/uploads/signature
///
/// PNG only; the key is stable per staff member, so re-upload replaces.
pub async fn handle_upload_signature(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let response = store_upload(&state, UploadKind::Signature, staff.id, None, multipart).await?;
    Ok(Json(response))
}

/// POST /api/staff/uploads/feed-image
pub async fn handle_upload_feed_image(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let response = store_upload(&state, UploadKind::FeedImage, staff.id, None, multipart).await?;
    Ok(Json(response))
}

/// DELETE /api/staff/uploads?key=
///
/// Staff may delete only objects under their own prefixes.
pub async fn handle_delete_own_upload(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    Query(params): Query<DeleteQuery>,
) -> Result<StatusCode, AppError> {
    if !staff_owns_key(staff.id, &params.key) {
        return Err(AppError::Forbidden);
    }
    storage::delete_object(&state.s3, &state.config.s3_bucket, &params.key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/uploads?key=
pub async fn handle_admin_delete_upload(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<DeleteQuery>,
) -> Result<StatusCode, AppError> {
    storage::delete_object(&state.s3, &state.config.s3_bucket, &params.key).await?;
    Ok(StatusCode::NO_CONTENT)
}
