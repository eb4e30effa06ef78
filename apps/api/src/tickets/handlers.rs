//! Axum route handlers for support tickets.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AdminSession, ClientSession, StaffSession};
use crate::errors::AppError;
use crate::models::ticket::{TicketCommentRow, TicketRow};
use crate::state::AppState;
use crate::tickets::status::{TicketStatus, TICKET_CATEGORIES};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub body: String,
    pub category: String,
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TicketStatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTicketStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct TicketDetailResponse {
    pub ticket: TicketRow,
    pub comments: Vec<TicketCommentRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared logic
// ────────────────────────────────────────────────────────────────────────────

async fn open_ticket(
    db: &sqlx::PgPool,
    opened_by: Uuid,
    role: &str,
    request: CreateTicketRequest,
) -> Result<TicketRow, AppError> {
    if request.subject.trim().is_empty() {
        return Err(AppError::Validation(
            "Ticket subject cannot be empty".to_string(),
        ));
    }
    if request.body.trim().is_empty() {
        return Err(AppError::Validation(
            "Ticket body cannot be empty".to_string(),
        ));
    }
    if !TICKET_CATEGORIES.contains(&request.category.as_str()) {
        return Err(AppError::Validation(format!(
            "Unknown ticket category '{}'",
            request.category
        )));
    }
    let priority = request.priority.unwrap_or_else(|| "medium".to_string());
    if !["low", "medium", "high"].contains(&priority.as_str()) {
        return Err(AppError::Validation(format!(
            "Unknown priority '{priority}'"
        )));
    }

    let ticket: TicketRow = sqlx::query_as(
        r#"
        INSERT INTO tickets (id, opened_by, opened_by_role, subject, body, category, priority, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'OPEN')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(opened_by)
    .bind(role)
    .bind(request.subject.trim())
    .bind(request.body.trim())
    .bind(&request.category)
    .bind(&priority)
    .fetch_one(db)
    .await?;

    info!("{role} {opened_by} opened ticket {}", ticket.id);
    Ok(ticket)
}

async fn own_ticket_detail(
    db: &sqlx::PgPool,
    ticket_id: Uuid,
    opened_by: Uuid,
    role: &str,
) -> Result<TicketDetailResponse, AppError> {
    let ticket: Option<TicketRow> = sqlx::query_as(
        "SELECT * FROM tickets WHERE id = $1 AND opened_by = $2 AND opened_by_role = $3",
    )
    .bind(ticket_id)
    .bind(opened_by)
    .bind(role)
    .fetch_optional(db)
    .await?;
    let ticket = ticket.ok_or_else(|| AppError::NotFound(format!("Ticket {ticket_id} not found")))?;

    let comments: Vec<TicketCommentRow> = sqlx::query_as(
        "SELECT * FROM ticket_comments WHERE ticket_id = $1 ORDER BY created_at ASC",
    )
    .bind(ticket.id)
    .fetch_all(db)
    .await?;

    Ok(TicketDetailResponse { ticket, comments })
}

async fn add_comment(
    db: &sqlx::PgPool,
    ticket_id: Uuid,
    author_id: Uuid,
    role: &str,
    body: &str,
) -> Result<TicketCommentRow, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::Validation("Comment cannot be empty".to_string()));
    }

    let comment: TicketCommentRow = sqlx::query_as(
        r#"
        INSERT INTO ticket_comments (id, ticket_id, author_id, author_role, body)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(ticket_id)
    .bind(author_id)
    .bind(role)
    .bind(body.trim())
    .fetch_one(db)
    .await?;
    Ok(comment)
}

// ────────────────────────────────────────────────────────────────────────────
// Staff handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/staff/tickets
pub async fn handle_staff_create_ticket(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    Json(request): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketRow>), AppError> {
    let ticket = open_ticket(&state.db, staff.id, "staff", request).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/staff/tickets
pub async fn handle_staff_list_tickets(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<Vec<TicketRow>>, AppError> {
    let tickets: Vec<TicketRow> = sqlx::query_as(
        "SELECT * FROM tickets WHERE opened_by = $1 AND opened_by_role = 'staff' ORDER BY created_at DESC",
    )
    .bind(staff.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(tickets))
}

/// GET /api/staff/tickets/:id
pub async fn handle_staff_get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    StaffSession(staff): StaffSession,
) -> Result<Json<TicketDetailResponse>, AppError> {
    let detail = own_ticket_detail(&state.db, ticket_id, staff.id, "staff").await?;
    Ok(Json(detail))
}

/// POST /api/staff/tickets/:id/comments
pub async fn handle_staff_comment_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    StaffSession(staff): StaffSession,
    Json(request): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<TicketCommentRow>), AppError> {
    // Ownership check doubles as existence check.
    own_ticket_detail(&state.db, ticket_id, staff.id, "staff").await?;
    let comment = add_comment(&state.db, ticket_id, staff.id, "staff", &request.body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// ────────────────────────────────────────────────────────────────────────────
// Client handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/client/tickets
pub async fn handle_client_create_ticket(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
    Json(request): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketRow>), AppError> {
    let ticket = open_ticket(&state.db, client.id, "client", request).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/client/tickets
pub async fn handle_client_list_tickets(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
) -> Result<Json<Vec<TicketRow>>, AppError> {
    let tickets: Vec<TicketRow> = sqlx::query_as(
        "SELECT * FROM tickets WHERE opened_by = $1 AND opened_by_role = 'client' ORDER BY created_at DESC",
    )
    .bind(client.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(tickets))
}

/// GET /api/client/tickets/:id
pub async fn handle_client_get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    ClientSession(client): ClientSession,
) -> Result<Json<TicketDetailResponse>, AppError> {
    let detail = own_ticket_detail(&state.db, ticket_id, client.id, "client").await?;
    Ok(Json(detail))
}

/// POST /api/client/tickets/:id/comments
pub async fn handle_client_comment_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    ClientSession(client): ClientSession,
    Json(request): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<TicketCommentRow>), AppError> {
    own_ticket_detail(&state.db, ticket_id, client.id, "client").await?;
    let comment = add_comment(&state.db, ticket_id, client.id, "client", &request.body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// ────────────────────────────────────────────────────────────────────────────
// Admin handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/admin/tickets?status
pub async fn handle_admin_list_tickets(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<TicketStatusQuery>,
) -> Result<Json<Vec<TicketRow>>, AppError> {
    let tickets: Vec<TicketRow> = sqlx::query_as(
        r#"
        SELECT * FROM tickets
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.status)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(tickets))
}

/// PATCH /api/admin/tickets/:id/status
pub async fn handle_admin_update_ticket_status(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    AdminSession(admin): AdminSession,
    Json(request): Json<UpdateTicketStatusRequest>,
) -> Result<Json<TicketRow>, AppError> {
    let to = TicketStatus::parse(&request.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", request.status)))?;

    let existing: Option<TicketRow> = sqlx::query_as("SELECT * FROM tickets WHERE id = $1")
        .bind(ticket_id)
        .fetch_optional(&state.db)
        .await?;
    let existing =
        existing.ok_or_else(|| AppError::NotFound(format!("Ticket {ticket_id} not found")))?;

    let from = TicketStatus::parse(&existing.status)
        .ok_or_else(|| anyhow::anyhow!("Corrupt ticket status '{}'", existing.status))?;

    if !from.can_transition(to) {
        return Err(AppError::Validation(format!(
            "Cannot move ticket from {} to {}",
            existing.status, request.status
        )));
    }

    let ticket: TicketRow = sqlx::query_as(
        "UPDATE tickets SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(to.as_str())
    .bind(existing.id)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Admin {} moved ticket {} to {}",
        admin.id,
        ticket.id,
        to.as_str()
    );
    Ok(Json(ticket))
}

/// POST /api/admin/tickets/:id/comments
pub async fn handle_admin_comment_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    AdminSession(admin): AdminSession,
    Json(request): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<TicketCommentRow>), AppError> {
    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM tickets WHERE id = $1")
        .bind(ticket_id)
        .fetch_optional(&state.db)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!("Ticket {ticket_id} not found")));
    }

    let comment = add_comment(&state.db, ticket_id, admin.id, "management", &request.body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
