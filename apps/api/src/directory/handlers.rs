//! Axum route handlers for companies, client provisioning, and the staff roster.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AdminSession, ClientSession, StaffSession};
use crate::errors::AppError;
use crate::models::onboarding::OnboardingSectionRow;
use crate::models::user::{ClientUserRow, CompanyRow, ManagementUserRow, StaffUserRow};
use crate::onboarding::progress::{admin_progress, AdminProgress};
use crate::onboarding::sections::SectionStatus;
use crate::state::AppState;
use crate::storage::public_url;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub industry: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub external_id: String,
    pub email: String,
    pub full_name: String,
    pub company_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentRequest {
    /// None unassigns the staff member.
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct StaffMeResponse {
    pub user: StaffUserRow,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClientMeResponse {
    pub user: ClientUserRow,
    pub company: CompanyRow,
}

#[derive(Debug, Serialize)]
pub struct AdminMeResponse {
    pub user: ManagementUserRow,
}

#[derive(Debug, Serialize)]
pub struct StaffDetailResponse {
    pub staff: StaffUserRow,
    pub onboarding: AdminProgress,
    pub contract_status: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Company handlers (admin)
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/admin/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyRow>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Company name cannot be empty".to_string(),
        ));
    }

    let company: CompanyRow = sqlx::query_as(
        "INSERT INTO companies (id, name, industry) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(request.name.trim())
    .bind(&request.industry)
    .fetch_one(&state.db)
    .await?;

    info!("Admin {} created company {}", admin.id, company.id);
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/admin/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    let companies: Vec<CompanyRow> =
        sqlx::query_as("SELECT * FROM companies ORDER BY name")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(companies))
}

// ────────────────────────────────────────────────────────────────────────────
// Client account handlers (admin)
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/admin/clients
pub async fn handle_create_client(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Json(request): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientUserRow>), AppError> {
    if request.external_id.trim().is_empty() || request.full_name.trim().is_empty() {
        return Err(AppError::Validation(
            "external_id and full_name are required".to_string(),
        ));
    }
    if !request.email.contains('@') {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }

    let company: Option<Uuid> = sqlx::query_scalar("SELECT id FROM companies WHERE id = $1")
        .bind(request.company_id)
        .fetch_optional(&state.db)
        .await?;
    if company.is_none() {
        return Err(AppError::NotFound(format!(
            "Company {} not found",
            request.company_id
        )));
    }

    let client: ClientUserRow = sqlx::query_as(
        r#"
        INSERT INTO client_users (id, external_id, email, full_name, company_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.external_id.trim())
    .bind(request.email.trim())
    .bind(request.full_name.trim())
    .bind(request.company_id)
    .fetch_one(&state.db)
    .await?;

    info!("Admin {} provisioned client user {}", admin.id, client.id);
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/admin/clients
pub async fn handle_list_clients(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<Vec<ClientUserRow>>, AppError> {
    let clients: Vec<ClientUserRow> =
        sqlx::query_as("SELECT * FROM client_users ORDER BY created_at")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(clients))
}

/// DELETE /api/admin/clients/:id
///
/// Rejected while staff are actively assigned to the client's company.
pub async fn handle_delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    AdminSession(admin): AdminSession,
) -> Result<StatusCode, AppError> {
    let client: Option<ClientUserRow> =
        sqlx::query_as("SELECT * FROM client_users WHERE id = $1")
            .bind(client_id)
            .fetch_optional(&state.db)
            .await?;
    let client =
        client.ok_or_else(|| AppError::NotFound(format!("Client {client_id} not found")))?;

    let active_staff: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM staff_users WHERE assigned_company_id = $1 AND status = 'ACTIVE'",
    )
    .bind(client.company_id)
    .fetch_one(&state.db)
    .await?;

    if active_staff > 0 {
        return Err(AppError::Validation(format!(
            "Client's company still has {active_staff} actively assigned staff"
        )));
    }

    sqlx::query("DELETE FROM client_users WHERE id = $1")
        .bind(client.id)
        .execute(&state.db)
        .await?;

    info!("Admin {} deleted client user {}", admin.id, client.id);
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Staff roster handlers (admin)
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/admin/staff
pub async fn handle_list_staff(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<Vec<StaffUserRow>>, AppError> {
    let staff: Vec<StaffUserRow> =
        sqlx::query_as("SELECT * FROM staff_users ORDER BY created_at")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(staff))
}

/// GET /api/admin/staff/:id
///
/// Profile plus onboarding review progress and latest contract status.
pub async fn handle_get_staff(
    State(state): State<AppState>,
    Path(staff_id): Path<Uuid>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<StaffDetailResponse>, AppError> {
    let staff: Option<StaffUserRow> = sqlx::query_as("SELECT * FROM staff_users WHERE id = $1")
        .bind(staff_id)
        .fetch_optional(&state.db)
        .await?;
    let staff = staff.ok_or_else(|| AppError::NotFound(format!("Staff {staff_id} not found")))?;

    let sections: Vec<OnboardingSectionRow> =
        sqlx::query_as("SELECT * FROM onboarding_sections WHERE staff_id = $1")
            .bind(staff.id)
            .fetch_all(&state.db)
            .await?;
    let statuses: Vec<SectionStatus> = sections
        .iter()
        .filter_map(|r| SectionStatus::parse(&r.status))
        .collect();

    let contract_status: Option<String> = sqlx::query_scalar(
        "SELECT status FROM employment_contracts WHERE staff_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(staff.id)
    .fetch_optional(&state.db)
    .await?;

    Ok(Json(StaffDetailResponse {
        staff,
        onboarding: admin_progress(&statuses),
        contract_status,
    }))
}

/// PATCH /api/admin/staff/:id/assignment
///
/// Assigns the staff member to a client company, or unassigns with null.
pub async fn handle_update_assignment(
    State(state): State<AppState>,
    Path(staff_id): Path<Uuid>,
    AdminSession(admin): AdminSession,
    Json(request): Json<UpdateAssignmentRequest>,
) -> Result<Json<StaffUserRow>, AppError> {
    if let Some(company_id) = request.company_id {
        let company: Option<Uuid> = sqlx::query_scalar("SELECT id FROM companies WHERE id = $1")
            .bind(company_id)
            .fetch_optional(&state.db)
            .await?;
        if company.is_none() {
            return Err(AppError::NotFound(format!(
                "Company {company_id} not found"
            )));
        }
    }

    let staff: Option<StaffUserRow> = sqlx::query_as(
        "UPDATE staff_users SET assigned_company_id = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(request.company_id)
    .bind(staff_id)
    .fetch_optional(&state.db)
    .await?;
    let staff = staff.ok_or_else(|| AppError::NotFound(format!("Staff {staff_id} not found")))?;

    info!(
        "Admin {} set staff {} assignment to {:?}",
        admin.id, staff.id, staff.assigned_company_id
    );
    Ok(Json(staff))
}

// ────────────────────────────────────────────────────────────────────────────
// `me` handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/staff/me
pub async fn handle_staff_me(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<StaffMeResponse>, AppError> {
    let avatar_url = staff
        .avatar_key
        .as_deref()
        .map(|key| public_url(&state.config.s3_endpoint, &state.config.s3_bucket, key));
    Ok(Json(StaffMeResponse {
        user: staff,
        avatar_url,
    }))
}

/// GET /api/client/me
pub async fn handle_client_me(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
) -> Result<Json<ClientMeResponse>, AppError> {
    let company: CompanyRow = sqlx::query_as("SELECT * FROM companies WHERE id = $1")
        .bind(client.company_id)
        .fetch_one(&state.db)
        .await?;
    Ok(Json(ClientMeResponse {
        user: client,
        company,
    }))
}

/// GET /api/admin/me
pub async fn handle_admin_me(AdminSession(admin): AdminSession) -> Json<AdminMeResponse> {
    Json(AdminMeResponse { user: admin })
}
