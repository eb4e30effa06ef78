//! Axum route handlers for time entries and breaks.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::attendance::breaks::{allotted_minutes, break_clock, BreakClock};
use crate::auth::extract::{AdminSession, StaffSession};
use crate::errors::AppError;
use crate::models::attendance::{BreakRow, TimeEntryRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TimeRangeQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct AdminTimeQuery {
    pub staff_id: Uuid,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct StartBreakRequest {
    pub break_type: String,
}

/// A break plus its derived clock, as returned to the staff portal.
#[derive(Debug, Serialize)]
pub struct BreakView {
    #[serde(flatten)]
    pub record: BreakRow,
    #[serde(flatten)]
    pub clock: BreakClock,
}

fn break_view(record: BreakRow) -> BreakView {
    let clock = break_clock(&record, Utc::now());
    BreakView { record, clock }
}

// ────────────────────────────────────────────────────────────────────────────
// Time entry handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/staff/time-entries/clock-in
///
/// Rejected while an open entry exists.
pub async fn handle_clock_in(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<TimeEntryRow>, AppError> {
    let open: Option<Uuid> = sqlx::query_scalar(
        "SELECT id FROM time_entries WHERE staff_id = $1 AND clock_out IS NULL",
    )
    .bind(staff.id)
    .fetch_optional(&state.db)
    .await?;

    if open.is_some() {
        return Err(AppError::Validation(
            "Already clocked in — clock out first".to_string(),
        ));
    }

    let entry: TimeEntryRow = sqlx::query_as(
        "INSERT INTO time_entries (id, staff_id, clock_in) VALUES ($1, $2, NOW()) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(staff.id)
    .fetch_one(&state.db)
    .await?;

    info!("Staff {} clocked in", staff.id);
    Ok(Json(entry))
}

/// POST /api/staff/time-entries/clock-out
///
/// Closes the open entry; worked time is wall-clock subtraction.
pub async fn handle_clock_out(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<TimeEntryRow>, AppError> {
    let open: Option<TimeEntryRow> = sqlx::query_as(
        "SELECT * FROM time_entries WHERE staff_id = $1 AND clock_out IS NULL",
    )
    .bind(staff.id)
    .fetch_optional(&state.db)
    .await?;

    let open = open.ok_or_else(|| AppError::Validation("No open time entry".to_string()))?;

    let now = Utc::now();
    let worked_seconds = (now - open.clock_in).num_seconds().max(0);

    let entry: TimeEntryRow = sqlx::query_as(
        "UPDATE time_entries SET clock_out = $1, worked_seconds = $2 WHERE id = $3 RETURNING *",
    )
    .bind(now)
    .bind(worked_seconds)
    .bind(open.id)
    .fetch_one(&state.db)
    .await?;

    info!("Staff {} clocked out after {}s", staff.id, worked_seconds);
    Ok(Json(entry))
}

/// GET /api/staff/time-entries?from&to
pub async fn handle_list_own_time_entries(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    Query(range): Query<TimeRangeQuery>,
) -> Result<Json<Vec<TimeEntryRow>>, AppError> {
    let entries = fetch_time_entries(&state.db, staff.id, &range).await?;
    Ok(Json(entries))
}

/// GET /api/admin/time-entries?staff_id&from&to
pub async fn handle_admin_list_time_entries(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<AdminTimeQuery>,
) -> Result<Json<Vec<TimeEntryRow>>, AppError> {
    let range = TimeRangeQuery {
        from: params.from,
        to: params.to,
    };
    let entries = fetch_time_entries(&state.db, params.staff_id, &range).await?;
    Ok(Json(entries))
}

async fn fetch_time_entries(
    db: &sqlx::PgPool,
    staff_id: Uuid,
    range: &TimeRangeQuery,
) -> Result<Vec<TimeEntryRow>, AppError> {
    Ok(sqlx::query_as::<_, TimeEntryRow>(
        r#"
        SELECT * FROM time_entries
        WHERE staff_id = $1
          AND ($2::timestamptz IS NULL OR clock_in >= $2)
          AND ($3::timestamptz IS NULL OR clock_in <= $3)
        ORDER BY clock_in DESC
        "#,
    )
    .bind(staff_id)
    .bind(range.from)
    .bind(range.to)
    .fetch_all(db)
    .await?)
}

// ────────────────────────────────────────────────────────────────────────────
// Break handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/staff/breaks/start
///
/// One active (unended) break per staff member, checked before insert.
pub async fn handle_start_break(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    Json(request): Json<StartBreakRequest>,
) -> Result<Json<BreakView>, AppError> {
    let allotted = allotted_minutes(&request.break_type).ok_or_else(|| {
        AppError::Validation(format!("Unknown break type '{}'", request.break_type))
    })?;

    let active: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM breaks WHERE staff_id = $1 AND ended_at IS NULL")
            .bind(staff.id)
            .fetch_optional(&state.db)
            .await?;

    if active.is_some() {
        return Err(AppError::Validation(
            "A break is already in progress".to_string(),
        ));
    }

    let record: BreakRow = sqlx::query_as(
        r#"
        INSERT INTO breaks (id, staff_id, break_type, allotted_minutes, started_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(staff.id)
    .bind(&request.break_type)
    .bind(allotted)
    .fetch_one(&state.db)
    .await?;

    info!("Staff {} started a {} break", staff.id, request.break_type);
    Ok(Json(break_view(record)))
}

/// POST /api/staff/breaks/:id/pause
pub async fn handle_pause_break(
    State(state): State<AppState>,
    Path(break_id): Path<Uuid>,
    StaffSession(staff): StaffSession,
) -> Result<Json<BreakView>, AppError> {
    let record = own_unended_break(&state.db, staff.id, break_id).await?;

    if record.paused_at.is_some() {
        return Err(AppError::Validation("Break is already paused".to_string()));
    }

    let record: BreakRow =
        sqlx::query_as("UPDATE breaks SET paused_at = NOW() WHERE id = $1 RETURNING *")
            .bind(record.id)
            .fetch_one(&state.db)
            .await?;

    Ok(Json(break_view(record)))
}

/// POST /api/staff/breaks/:id/resume
pub async fn handle_resume_break(
    State(state): State<AppState>,
    Path(break_id): Path<Uuid>,
    StaffSession(staff): StaffSession,
) -> Result<Json<BreakView>, AppError> {
    let record = own_unended_break(&state.db, staff.id, break_id).await?;

    let paused_at = record
        .paused_at
        .ok_or_else(|| AppError::Validation("Break is not paused".to_string()))?;

    let paused_seconds = record.paused_seconds + (Utc::now() - paused_at).num_seconds().max(0);

    let record: BreakRow = sqlx::query_as(
        "UPDATE breaks SET paused_seconds = $1, paused_at = NULL WHERE id = $2 RETURNING *",
    )
    .bind(paused_seconds)
    .bind(record.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(break_view(record)))
}

/// POST /api/staff/breaks/:id/end
///
/// Folds an in-flight pause into the accumulated total before stamping the end.
pub async fn handle_end_break(
    State(state): State<AppState>,
    Path(break_id): Path<Uuid>,
    StaffSession(staff): StaffSession,
) -> Result<Json<BreakView>, AppError> {
    let record = own_unended_break(&state.db, staff.id, break_id).await?;

    let now = Utc::now();
    let paused_seconds = match record.paused_at {
        Some(paused_at) => record.paused_seconds + (now - paused_at).num_seconds().max(0),
        None => record.paused_seconds,
    };

    let record: BreakRow = sqlx::query_as(
        "UPDATE breaks SET ended_at = $1, paused_seconds = $2, paused_at = NULL WHERE id = $3 RETURNING *",
    )
    .bind(now)
    .bind(paused_seconds)
    .bind(record.id)
    .fetch_one(&state.db)
    .await?;

    info!("Staff {} ended break {}", staff.id, record.id);
    Ok(Json(break_view(record)))
}

/// GET /api/staff/breaks/active
pub async fn handle_get_active_break(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<BreakView>, AppError> {
    let record: Option<BreakRow> =
        sqlx::query_as("SELECT * FROM breaks WHERE staff_id = $1 AND ended_at IS NULL")
            .bind(staff.id)
            .fetch_optional(&state.db)
            .await?;

    let record = record.ok_or_else(|| AppError::NotFound("No active break".to_string()))?;
    Ok(Json(break_view(record)))
}

/// Loads a break owned by the caller that has not ended yet.
async fn own_unended_break(
    db: &sqlx::PgPool,
    staff_id: Uuid,
    break_id: Uuid,
) -> Result<BreakRow, AppError> {
    let record: Option<BreakRow> =
        sqlx::query_as("SELECT * FROM breaks WHERE id = $1 AND staff_id = $2")
            .bind(break_id)
            .bind(staff_id)
            .fetch_optional(db)
            .await?;

    let record = record.ok_or_else(|| AppError::NotFound(format!("Break {break_id} not found")))?;

    if record.ended_at.is_some() {
        return Err(AppError::Validation("Break has already ended".to_string()));
    }

    Ok(record)
}
