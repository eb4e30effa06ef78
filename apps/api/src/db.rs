use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns the portal PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the pool for the external recruiting database.
/// Candidate data is read with raw SQL only; this service never writes to it.
pub async fn create_recruiting_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to recruiting database...");

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(database_url)
        .await?;

    info!("Recruiting database connection pool established");
    Ok(pool)
}
