//! Axum route handlers for performance reviews.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AdminSession, ClientSession, StaffSession};
use crate::errors::AppError;
use crate::models::review::ReviewRow;
use crate::reviews::scoring::{overall_score, validate_answers, ReviewAnswer};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub staff_id: Uuid,
    pub period: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub answers: Vec<ReviewAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewStatusQuery {
    pub status: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Client handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/client/reviews
///
/// Creates a PENDING review tied to a staff assignment.
pub async fn handle_create_review(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewRow>), AppError> {
    if request.period.trim().is_empty() {
        return Err(AppError::Validation(
            "Review period cannot be empty".to_string(),
        ));
    }

    let assigned: Option<Uuid> = sqlx::query_scalar(
        "SELECT id FROM staff_users WHERE id = $1 AND assigned_company_id = $2 AND status = 'ACTIVE'",
    )
    .bind(request.staff_id)
    .bind(client.company_id)
    .fetch_optional(&state.db)
    .await?;

    if assigned.is_none() {
        return Err(AppError::Validation(
            "Staff member is not actively assigned to your company".to_string(),
        ));
    }

    let review: ReviewRow = sqlx::query_as(
        r#"
        INSERT INTO reviews (id, client_id, staff_id, period, status)
        VALUES ($1, $2, $3, $4, 'PENDING')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(client.id)
    .bind(request.staff_id)
    .bind(request.period.trim())
    .fetch_one(&state.db)
    .await?;

    info!(
        "Client {} opened review {} for staff {}",
        client.id, review.id, review.staff_id
    );
    Ok((StatusCode::CREATED, Json(review)))
}

/// POST /api/client/reviews/:id/submit
///
/// Records answers and the computed overall score. Only a PENDING review can
/// be submitted.
pub async fn handle_submit_review(
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
    ClientSession(client): ClientSession,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<Json<ReviewRow>, AppError> {
    let existing: Option<ReviewRow> =
        sqlx::query_as("SELECT * FROM reviews WHERE id = $1 AND client_id = $2")
            .bind(review_id)
            .bind(client.id)
            .fetch_optional(&state.db)
            .await?;
    let existing =
        existing.ok_or_else(|| AppError::NotFound(format!("Review {review_id} not found")))?;

    if existing.status != "PENDING" {
        return Err(AppError::Validation(format!(
            "Review is {} and cannot be submitted",
            existing.status
        )));
    }

    validate_answers(&request.answers).map_err(AppError::Validation)?;
    let score = overall_score(&request.answers);

    let answers_json =
        serde_json::to_value(&request.answers).map_err(|e| anyhow::anyhow!(e))?;

    let review: ReviewRow = sqlx::query_as(
        r#"
        UPDATE reviews
        SET status = 'SUBMITTED', answers = $1, overall_score = $2,
            submitted_at = NOW(), updated_at = NOW()
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(answers_json)
    .bind(score)
    .bind(existing.id)
    .fetch_one(&state.db)
    .await?;

    info!("Review {} submitted with score {}", review.id, score);
    Ok(Json(review))
}

/// GET /api/client/reviews
pub async fn handle_list_client_reviews(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
) -> Result<Json<Vec<ReviewRow>>, AppError> {
    let reviews: Vec<ReviewRow> =
        sqlx::query_as("SELECT * FROM reviews WHERE client_id = $1 ORDER BY created_at DESC")
            .bind(client.id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(reviews))
}

// ────────────────────────────────────────────────────────────────────────────
// Staff handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/staff/reviews
///
/// Reviews about the caller, read-only.
pub async fn handle_list_staff_reviews(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<Vec<ReviewRow>>, AppError> {
    let reviews: Vec<ReviewRow> =
        sqlx::query_as("SELECT * FROM reviews WHERE staff_id = $1 ORDER BY created_at DESC")
            .bind(staff.id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(reviews))
}

// ────────────────────────────────────────────────────────────────────────────
// Admin handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/admin/reviews?status
pub async fn handle_admin_list_reviews(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<ReviewStatusQuery>,
) -> Result<Json<Vec<ReviewRow>>, AppError> {
    let reviews: Vec<ReviewRow> = sqlx::query_as(
        r#"
        SELECT * FROM reviews
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.status)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(reviews))
}

/// POST /api/admin/reviews/:id/acknowledge
///
/// SUBMITTED → UNDER_REVIEW.
pub async fn handle_acknowledge_review(
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
    AdminSession(admin): AdminSession,
) -> Result<Json<ReviewRow>, AppError> {
    let existing: Option<ReviewRow> = sqlx::query_as("SELECT * FROM reviews WHERE id = $1")
        .bind(review_id)
        .fetch_optional(&state.db)
        .await?;
    let existing =
        existing.ok_or_else(|| AppError::NotFound(format!("Review {review_id} not found")))?;

    if existing.status != "SUBMITTED" {
        return Err(AppError::Validation(format!(
            "Review is {} and cannot be acknowledged",
            existing.status
        )));
    }

    let review: ReviewRow = sqlx::query_as(
        "UPDATE reviews SET status = 'UNDER_REVIEW', updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(existing.id)
    .fetch_one(&state.db)
    .await?;

    info!("Admin {} acknowledged review {}", admin.id, review.id);
    Ok(Json(review))
}
