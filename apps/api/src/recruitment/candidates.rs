//! Candidate directory — read-only raw-SQL access to the external recruiting
//! database, behind a trait so the backend can be swapped without touching
//! handlers. Carried in `AppState` as `Arc<dyn CandidateDirectory>`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::recruitment::CandidateRecord;

pub const DEFAULT_SEARCH_LIMIT: i64 = 20;
pub const MAX_SEARCH_LIMIT: i64 = 50;

#[async_trait]
pub trait CandidateDirectory: Send + Sync {
    /// Case-insensitive search over name and position.
    async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
    ) -> Result<Vec<CandidateRecord>, AppError>;

    async fn get(&self, candidate_id: Uuid) -> Result<Option<CandidateRecord>, AppError>;
}

/// Raw-SQL directory over the recruiting database pool.
pub struct SqlCandidateDirectory {
    pool: PgPool,
}

impl SqlCandidateDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateDirectory for SqlCandidateDirectory {
    async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        let candidates = sqlx::query_as::<_, CandidateRecord>(
            r#"
            SELECT id, full_name, email, phone, position, years_experience,
                   expected_salary, resume_url
            FROM candidates
            WHERE ($1::text IS NULL
                   OR full_name ILIKE '%' || $1 || '%'
                   OR position ILIKE '%' || $1 || '%')
            ORDER BY full_name
            LIMIT $2
            "#,
        )
        .bind(query)
        .bind(limit.clamp(1, MAX_SEARCH_LIMIT))
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    async fn get(&self, candidate_id: Uuid) -> Result<Option<CandidateRecord>, AppError> {
        let candidate = sqlx::query_as::<_, CandidateRecord>(
            r#"
            SELECT id, full_name, email, phone, position, years_experience,
                   expected_salary, resume_url
            FROM candidates
            WHERE id = $1
            "#,
        )
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }
}
