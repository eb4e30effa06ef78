mod activity;
mod assistant;
mod attendance;
mod auth;
mod config;
mod db;
mod directory;
mod errors;
mod llm_client;
mod models;
mod onboarding;
mod recruitment;
mod reviews;
mod routes;
mod state;
mod storage;
mod tasks;
mod tickets;
mod video_client;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use axum::extract::DefaultBodyLimit;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::AuthClient;
use crate::config::Config;
use crate::db::{create_pool, create_recruiting_pool};
use crate::llm_client::LlmClient;
use crate::recruitment::candidates::{CandidateDirectory, SqlCandidateDirectory};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::MAX_UPLOAD_BYTES;
use crate::video_client::VideoClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Crewline API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (portal + external recruiting database)
    let db = create_pool(&config.database_url).await?;
    let recruiting_db = create_recruiting_pool(&config.recruiting_database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize vendor clients
    let auth = AuthClient::new(config.auth_api_url.clone(), config.auth_api_key.clone());
    info!("Auth provider client initialized");

    let video = VideoClient::new(config.video_api_url.clone(), config.video_api_key.clone());
    info!("Video API client initialized");

    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let candidates: Arc<dyn CandidateDirectory> =
        Arc::new(SqlCandidateDirectory::new(recruiting_db));

    // Build app state
    let state = AppState {
        db,
        s3,
        auth,
        video,
        llm,
        candidates,
        config: config.clone(),
    };

    // Build router. The body limit leaves headroom over the upload cap so the
    // size check in the storage module produces the 400, not the framework.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // TODO: tighten CORS in production
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "crewline-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
