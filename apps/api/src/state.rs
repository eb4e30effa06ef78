use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::auth::AuthClient;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::recruitment::candidates::CandidateDirectory;
use crate::video_client::VideoClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub auth: AuthClient,
    pub video: VideoClient,
    pub llm: LlmClient,
    /// Pluggable candidate directory over the external recruiting database.
    pub candidates: Arc<dyn CandidateDirectory>,
    pub config: Config,
}
