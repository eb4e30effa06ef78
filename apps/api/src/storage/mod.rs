//! Object storage conventions and helpers.
//!
//! Bucket layout:
//!   avatars/{user_id}/{uuid}.{ext}
//!   documents/{staff_id}/{doc_type}/{uuid}.{ext}
//!   signatures/{staff_id}.png
//!   feed/{staff_id}/{uuid}.{ext}
//!
//! All S3 access in the service goes through this module.

use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

use crate::errors::AppError;

pub mod handlers;

/// Uploads above this size are rejected with a validation error.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const IMAGE_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];
const DOCUMENT_CONTENT_TYPES: &[&str] =
    &["image/png", "image/jpeg", "image/webp", "application/pdf"];

/// Document types accepted under documents/{staff_id}/{doc_type}/.
pub const DOCUMENT_TYPES: &[&str] = &[
    "government_id",
    "resume",
    "clearance",
    "medical",
    "certificate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Avatar,
    Document,
    Signature,
    FeedImage,
}

impl UploadKind {
    fn allowed_content_types(self) -> &'static [&'static str] {
        match self {
            UploadKind::Document => DOCUMENT_CONTENT_TYPES,
            UploadKind::Signature => &["image/png"],
            _ => IMAGE_CONTENT_TYPES,
        }
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}

/// Validates an upload's size and content type against the kind's rules.
pub fn validate_upload(kind: UploadKind, size: usize, content_type: &str) -> Result<(), AppError> {
    if size == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File exceeds the {} MB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }
    if !kind.allowed_content_types().contains(&content_type) {
        return Err(AppError::Validation(format!(
            "Content type '{content_type}' is not allowed for this upload"
        )));
    }
    Ok(())
}

/// Builds the object key for an upload. `doc_type` applies to documents only
/// and must already be validated against `DOCUMENT_TYPES`.
pub fn object_key(
    kind: UploadKind,
    owner_id: Uuid,
    doc_type: Option<&str>,
    content_type: &str,
) -> String {
    let ext = extension_for(content_type).unwrap_or("bin");
    match kind {
        UploadKind::Avatar => format!("avatars/{}/{}.{}", owner_id, Uuid::new_v4(), ext),
        UploadKind::Document => format!(
            "documents/{}/{}/{}.{}",
            owner_id,
            doc_type.unwrap_or("general"),
            Uuid::new_v4(),
            ext
        ),
        // One signature per staff member; re-upload overwrites.
        UploadKind::Signature => format!("signatures/{owner_id}.png"),
        UploadKind::FeedImage => format!("feed/{}/{}.{}", owner_id, Uuid::new_v4(), ext),
    }
}

/// Whether a key sits under one of the given staff member's own prefixes.
/// Staff may delete only their own objects.
pub fn staff_owns_key(staff_id: Uuid, key: &str) -> bool {
    key.starts_with(&format!("avatars/{staff_id}/"))
        || key.starts_with(&format!("documents/{staff_id}/"))
        || key.starts_with(&format!("feed/{staff_id}/"))
        || key == format!("signatures/{staff_id}.png")
}

/// Public URL for an object, assembled from the configured endpoint + bucket.
pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}

pub fn signature_key(staff_id: Uuid) -> String {
    format!("signatures/{staff_id}.png")
}

pub async fn put_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    data: Vec<u8>,
    content_type: &str,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(data))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Upload of '{key}' failed: {e}")))?;
    Ok(())
}

pub async fn delete_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<(), AppError> {
    s3.delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Delete of '{key}' failed: {e}")))?;
    Ok(())
}

/// HEADs an object; NotFound maps to Ok(false).
pub async fn object_exists(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<bool, AppError> {
    match s3.head_object().bucket(bucket).key(key).send().await {
        Ok(_) => Ok(true),
        Err(e) => {
            let service_err = e.into_service_error();
            if service_err.is_not_found() {
                Ok(false)
            } else {
                Err(AppError::Storage(format!(
                    "Head of '{key}' failed: {service_err}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_within_limit_passes() {
        assert!(validate_upload(UploadKind::Avatar, 1024, "image/png").is_ok());
    }

    #[test]
    fn test_upload_at_limit_passes() {
        assert!(validate_upload(UploadKind::Avatar, MAX_UPLOAD_BYTES, "image/png").is_ok());
    }

    #[test]
    fn test_upload_over_limit_rejected() {
        let err = validate_upload(UploadKind::Avatar, MAX_UPLOAD_BYTES + 1, "image/png");
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_upload_rejected() {
        assert!(validate_upload(UploadKind::Avatar, 0, "image/png").is_err());
    }

    #[test]
    fn test_pdf_rejected_for_avatar() {
        assert!(validate_upload(UploadKind::Avatar, 100, "application/pdf").is_err());
    }

    #[test]
    fn test_pdf_allowed_for_document() {
        assert!(validate_upload(UploadKind::Document, 100, "application/pdf").is_ok());
    }

    #[test]
    fn test_signature_must_be_png() {
        assert!(validate_upload(UploadKind::Signature, 100, "image/png").is_ok());
        assert!(validate_upload(UploadKind::Signature, 100, "image/jpeg").is_err());
    }

    #[test]
    fn test_avatar_key_shape() {
        let id = Uuid::new_v4();
        let key = object_key(UploadKind::Avatar, id, None, "image/jpeg");
        assert!(key.starts_with(&format!("avatars/{id}/")));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn test_document_key_includes_doc_type() {
        let id = Uuid::new_v4();
        let key = object_key(UploadKind::Document, id, Some("resume"), "application/pdf");
        assert!(key.starts_with(&format!("documents/{id}/resume/")));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn test_signature_key_is_stable() {
        let id = Uuid::new_v4();
        assert_eq!(
            object_key(UploadKind::Signature, id, None, "image/png"),
            format!("signatures/{id}.png")
        );
    }

    #[test]
    fn test_staff_owns_own_prefixes() {
        let id = Uuid::new_v4();
        assert!(staff_owns_key(id, &format!("avatars/{id}/x.png")));
        assert!(staff_owns_key(id, &format!("documents/{id}/resume/x.pdf")));
        assert!(staff_owns_key(id, &format!("signatures/{id}.png")));
        assert!(staff_owns_key(id, &format!("feed/{id}/x.jpg")));
    }

    #[test]
    fn test_staff_does_not_own_other_prefixes() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(!staff_owns_key(id, &format!("avatars/{other}/x.png")));
        assert!(!staff_owns_key(id, &format!("signatures/{other}.png")));
        assert!(!staff_owns_key(id, "contracts/anything.pdf"));
    }

    #[test]
    fn test_public_url_trims_endpoint_slash() {
        assert_eq!(
            public_url("http://localhost:9000/", "crewline", "avatars/a/b.png"),
            "http://localhost:9000/crewline/avatars/a/b.png"
        );
    }
}
