//! Axum route handlers for tasks.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AdminSession, ClientSession, StaffSession};
use crate::errors::AppError;
use crate::models::task::TaskRow;
use crate::state::AppState;
use crate::tasks::status::{TaskStatus, TASK_PRIORITIES};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub staff_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminTaskQuery {
    pub staff_id: Option<Uuid>,
}

fn validate_priority(priority: &str) -> Result<(), AppError> {
    if TASK_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Unknown priority '{priority}'"
        )))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/client/tasks
///
/// The staff member must be actively assigned to the client's company.
pub async fn handle_create_task(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskRow>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Task title cannot be empty".to_string()));
    }
    let priority = request.priority.unwrap_or_else(|| "medium".to_string());
    validate_priority(&priority)?;

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

    let task: TaskRow = sqlx::query_as(
        r#"
        INSERT INTO tasks (id, client_id, staff_id, title, description, priority, status, due_date)
        VALUES ($1, $2, $3, $4, $5, $6, 'TODO', $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(client.id)
    .bind(request.staff_id)
    .bind(request.title.trim())
    .bind(&request.description)
    .bind(&priority)
    .bind(request.due_date)
    .fetch_one(&state.db)
    .await?;

    info!("Client {} created task {} for staff {}", client.id, task.id, task.staff_id);
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/client/tasks
pub async fn handle_list_client_tasks(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
) -> Result<Json<Vec<TaskRow>>, AppError> {
    let tasks: Vec<TaskRow> =
        sqlx::query_as("SELECT * FROM tasks WHERE client_id = $1 ORDER BY created_at DESC")
            .bind(client.id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(tasks))
}

/// PATCH /api/client/tasks/:id
pub async fn handle_update_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    ClientSession(client): ClientSession,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<TaskRow>, AppError> {
    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Task title cannot be empty".to_string()));
        }
    }
    if let Some(priority) = &request.priority {
        validate_priority(priority)?;
    }

    let existing: Option<TaskRow> =
        sqlx::query_as("SELECT * FROM tasks WHERE id = $1 AND client_id = $2")
            .bind(task_id)
            .bind(client.id)
            .fetch_optional(&state.db)
            .await?;
    let existing = existing.ok_or_else(|| AppError::NotFound(format!("Task {task_id} not found")))?;

    let task: TaskRow = sqlx::query_as(
        r#"
        UPDATE tasks
        SET title = COALESCE($1, title),
            description = COALESCE($2, description),
            priority = COALESCE($3, priority),
            due_date = COALESCE($4, due_date),
            updated_at = NOW()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(request.title.as_deref().map(str::trim))
    .bind(&request.description)
    .bind(&request.priority)
    .bind(request.due_date)
    .bind(existing.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(task))
}

/// DELETE /api/client/tasks/:id
pub async fn handle_delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    ClientSession(client): ClientSession,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM tasks WHERE id = $1 AND client_id = $2")
        .bind(task_id)
        .bind(client.id)
        .execute(&state.db)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Task {task_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Staff handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/staff/tasks
pub async fn handle_list_staff_tasks(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<Vec<TaskRow>>, AppError> {
    let tasks: Vec<TaskRow> =
        sqlx::query_as("SELECT * FROM tasks WHERE staff_id = $1 ORDER BY created_at DESC")
            .bind(staff.id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(tasks))
}

/// PATCH /api/staff/tasks/:id/status
///
/// TODO → IN_PROGRESS → DONE, one step at a time.
pub async fn handle_update_task_status(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    StaffSession(staff): StaffSession,
    Json(request): Json<UpdateTaskStatusRequest>,
) -> Result<Json<TaskRow>, AppError> {
    let to = TaskStatus::parse(&request.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", request.status)))?;

    let existing: Option<TaskRow> =
        sqlx::query_as("SELECT * FROM tasks WHERE id = $1 AND staff_id = $2")
            .bind(task_id)
            .bind(staff.id)
            .fetch_optional(&state.db)
            .await?;
    let existing = existing.ok_or_else(|| AppError::NotFound(format!("Task {task_id} not found")))?;

    let from = TaskStatus::parse(&existing.status)
        .ok_or_else(|| anyhow::anyhow!("Corrupt task status '{}'", existing.status))?;

    if !from.can_transition(to) {
        return Err(AppError::Validation(format!(
            "Cannot move task from {} to {}",
            existing.status, request.status
        )));
    }

    let task: TaskRow =
        sqlx::query_as("UPDATE tasks SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *")
            .bind(to.as_str())
            .bind(existing.id)
            .fetch_one(&state.db)
            .await?;

    Ok(Json(task))
}

// ────────────────────────────────────────────────────────────────────────────
// Admin handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/admin/tasks?staff_id
pub async fn handle_admin_list_tasks(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<AdminTaskQuery>,
) -> Result<Json<Vec<TaskRow>>, AppError> {
    let tasks: Vec<TaskRow> = sqlx::query_as(
        r#"
        SELECT * FROM tasks
        WHERE ($1::uuid IS NULL OR staff_id = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.staff_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(tasks))
}
