//! Axum route handlers for recruitment: candidates, interviews, job
//! acceptances, and employment contracts.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AdminSession, ClientSession, StaffSession};
use crate::errors::AppError;
use crate::models::recruitment::{
    CandidateRecord, EmploymentContractRow, InterviewRequestRow, JobAcceptanceRow,
};
use crate::models::user::StaffUserRow;
use crate::onboarding::sections::ALL_SECTIONS;
use crate::recruitment::candidates::DEFAULT_SEARCH_LIMIT;
use crate::recruitment::status::{ContractStatus, InterviewStatus};
use crate::state::AppState;
use crate::storage::{self, signature_key};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CandidateSearchQuery {
    pub search: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    pub candidate_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct InterviewStatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleInterviewRequest {
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct JobAcceptanceRequest {
    pub interview_id: Uuid,
    pub start_date: NaiveDate,
    pub salary: f64,
}

#[derive(Debug, Serialize)]
pub struct JobAcceptanceResponse {
    pub acceptance: JobAcceptanceRow,
    pub staff: StaffUserRow,
    pub contract: EmploymentContractRow,
}

#[derive(Debug, Deserialize)]
pub struct ContractQuery {
    pub staff_id: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate handlers (admin)
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/admin/candidates?search&limit
pub async fn handle_search_candidates(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<CandidateSearchQuery>,
) -> Result<Json<Vec<CandidateRecord>>, AppError> {
    let candidates = state
        .candidates
        .search(
            params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()),
            params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        )
        .await?;
    Ok(Json(candidates))
}

/// GET /api/admin/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<CandidateRecord>, AppError> {
    let candidate = state
        .candidates
        .get(candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    Ok(Json(candidate))
}

// ────────────────────────────────────────────────────────────────────────────
// Interview handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/client/interview-requests
///
/// Client asks to interview a candidate; the request starts PENDING until an
/// admin schedules it.
pub async fn handle_create_interview_request(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
    Json(request): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewRequestRow>), AppError> {
    let candidate = state
        .candidates
        .get(request.candidate_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Candidate {} not found", request.candidate_id))
        })?;

    let interview: InterviewRequestRow = sqlx::query_as(
        r#"
        INSERT INTO interview_requests (id, client_id, candidate_id, candidate_name, status)
        VALUES ($1, $2, $3, $4, 'PENDING')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(client.id)
    .bind(candidate.id)
    .bind(&candidate.full_name)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Client {} requested an interview with candidate {}",
        client.id, candidate.id
    );
    Ok((StatusCode::CREATED, Json(interview)))
}

/// GET /api/client/interview-requests
pub async fn handle_list_client_interviews(
    State(state): State<AppState>,
    ClientSession(client): ClientSession,
) -> Result<Json<Vec<InterviewRequestRow>>, AppError> {
    let interviews: Vec<InterviewRequestRow> = sqlx::query_as(
        "SELECT * FROM interview_requests WHERE client_id = $1 ORDER BY created_at DESC",
    )
    .bind(client.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(interviews))
}

/// GET /api/admin/interviews?status
pub async fn handle_admin_list_interviews(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<InterviewStatusQuery>,
) -> Result<Json<Vec<InterviewRequestRow>>, AppError> {
    let interviews: Vec<InterviewRequestRow> = sqlx::query_as(
        r#"
        SELECT * FROM interview_requests
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.status)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(interviews))
}

/// POST /api/admin/interviews/:id/schedule
///
/// Provisions a video room and stamps the schedule. PENDING → SCHEDULED.
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    AdminSession(admin): AdminSession,
    Json(request): Json<ScheduleInterviewRequest>,
) -> Result<Json<InterviewRequestRow>, AppError> {
    let interview =
        interview_in_status(&state.db, interview_id, InterviewStatus::Pending).await?;

    let room = state
        .video
        .create_room(&format!("interview-{}", interview.id))
        .await?;

    let interview: InterviewRequestRow = sqlx::query_as(
        r#"
        UPDATE interview_requests
        SET status = 'SCHEDULED', room_name = $1, room_url = $2,
            scheduled_at = $3, updated_at = NOW()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(&room.name)
    .bind(&room.url)
    .bind(request.scheduled_at)
    .bind(interview.id)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Admin {} scheduled interview {} in room {}",
        admin.id, interview.id, room.name
    );
    Ok(Json(interview))
}

/// POST /api/admin/interviews/:id/complete — SCHEDULED → COMPLETED.
pub async fn handle_complete_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<InterviewRequestRow>, AppError> {
    advance_interview(&state.db, interview_id, InterviewStatus::Scheduled, InterviewStatus::Completed)
        .await
        .map(Json)
}

/// POST /api/admin/interviews/:id/send-offer — COMPLETED → OFFER_SENT.
pub async fn handle_send_offer(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<InterviewRequestRow>, AppError> {
    advance_interview(&state.db, interview_id, InterviewStatus::Completed, InterviewStatus::OfferSent)
        .await
        .map(Json)
}

/// POST /api/admin/interviews/:id/decline-offer — OFFER_SENT → OFFER_DECLINED.
pub async fn handle_decline_offer(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<InterviewRequestRow>, AppError> {
    advance_interview(
        &state.db,
        interview_id,
        InterviewStatus::OfferSent,
        InterviewStatus::OfferDeclined,
    )
    .await
    .map(Json)
}

async fn interview_in_status(
    db: &sqlx::PgPool,
    interview_id: Uuid,
    expected: InterviewStatus,
) -> Result<InterviewRequestRow, AppError> {
    let interview: Option<InterviewRequestRow> =
        sqlx::query_as("SELECT * FROM interview_requests WHERE id = $1")
            .bind(interview_id)
            .fetch_optional(db)
            .await?;
    let interview = interview
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;

    if interview.status != expected.as_str() {
        return Err(AppError::Validation(format!(
            "Interview is {} and must be {}",
            interview.status,
            expected.as_str()
        )));
    }
    Ok(interview)
}

async fn advance_interview(
    db: &sqlx::PgPool,
    interview_id: Uuid,
    from: InterviewStatus,
    to: InterviewStatus,
) -> Result<InterviewRequestRow, AppError> {
    debug_assert!(from.can_transition(to));
    let interview = interview_in_status(db, interview_id, from).await?;

    let interview: InterviewRequestRow = sqlx::query_as(
        "UPDATE interview_requests SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(to.as_str())
    .bind(interview.id)
    .fetch_one(db)
    .await?;

    info!("Interview {} moved to {}", interview.id, to.as_str());
    Ok(interview)
}

// ────────────────────────────────────────────────────────────────────────────
// Job acceptance (admin)
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/admin/job-acceptances
///
/// Records the acceptance, pre-provisions an INVITED staff account with blank
/// onboarding sections, drafts the employment contract, and marks the
/// interview HIRED. The staff account is linked to the auth provider account
/// on first login via its placeholder external id.
pub async fn handle_create_job_acceptance(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Json(request): Json<JobAcceptanceRequest>,
) -> Result<(StatusCode, Json<JobAcceptanceResponse>), AppError> {
    if request.salary <= 0.0 {
        return Err(AppError::Validation("Salary must be positive".to_string()));
    }

    let interview =
        interview_in_status(&state.db, request.interview_id, InterviewStatus::OfferSent).await?;

    let candidate = state
        .candidates
        .get(interview.candidate_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation("Candidate no longer exists in the recruiting database".to_string())
        })?;

    let company_id: Option<Uuid> =
        sqlx::query_scalar("SELECT company_id FROM client_users WHERE id = $1")
            .bind(interview.client_id)
            .fetch_optional(&state.db)
            .await?;

    let staff: StaffUserRow = sqlx::query_as(
        r#"
        INSERT INTO staff_users
            (id, external_id, email, full_name, position, assigned_company_id, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'INVITED')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(format!("pending-{}", candidate.id))
    .bind(&candidate.email)
    .bind(&candidate.full_name)
    .bind(&candidate.position)
    .bind(company_id)
    .fetch_one(&state.db)
    .await?;

    for section in ALL_SECTIONS {
        sqlx::query(
            "INSERT INTO onboarding_sections (id, staff_id, section, status) VALUES ($1, $2, $3, 'BLANK')",
        )
        .bind(Uuid::new_v4())
        .bind(staff.id)
        .bind(section.as_str())
        .execute(&state.db)
        .await?;
    }

    let acceptance: JobAcceptanceRow = sqlx::query_as(
        r#"
        INSERT INTO job_acceptances (id, interview_id, candidate_id, staff_id, start_date, salary)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(interview.id)
    .bind(candidate.id)
    .bind(staff.id)
    .bind(request.start_date)
    .bind(request.salary)
    .fetch_one(&state.db)
    .await?;

    let terms = json!({
        "position": candidate.position,
        "salary": request.salary,
        "start_date": request.start_date,
    });
    let contract: EmploymentContractRow = sqlx::query_as(
        r#"
        INSERT INTO employment_contracts (id, staff_id, acceptance_id, status, terms)
        VALUES ($1, $2, $3, 'DRAFT', $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(staff.id)
    .bind(acceptance.id)
    .bind(terms)
    .fetch_one(&state.db)
    .await?;

    sqlx::query("UPDATE interview_requests SET status = 'HIRED', updated_at = NOW() WHERE id = $1")
        .bind(interview.id)
        .execute(&state.db)
        .await?;

    info!(
        "Admin {} recorded acceptance for candidate {}; staff {} provisioned",
        admin.id, candidate.id, staff.id
    );
    Ok((
        StatusCode::CREATED,
        Json(JobAcceptanceResponse {
            acceptance,
            staff,
            contract,
        }),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Contract handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/admin/contracts?staff_id
pub async fn handle_admin_list_contracts(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<ContractQuery>,
) -> Result<Json<Vec<EmploymentContractRow>>, AppError> {
    let contracts: Vec<EmploymentContractRow> = sqlx::query_as(
        r#"
        SELECT * FROM employment_contracts
        WHERE ($1::uuid IS NULL OR staff_id = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.staff_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(contracts))
}

/// POST /api/admin/contracts/:id/issue — DRAFT → ISSUED.
pub async fn handle_issue_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<Uuid>,
    AdminSession(admin): AdminSession,
) -> Result<Json<EmploymentContractRow>, AppError> {
    let contract = contract_in_status(&state.db, contract_id, ContractStatus::Draft).await?;

    let contract: EmploymentContractRow = sqlx::query_as(
        "UPDATE employment_contracts SET status = 'ISSUED', issued_at = NOW(), updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(contract.id)
    .fetch_one(&state.db)
    .await?;

    info!("Admin {} issued contract {}", admin.id, contract.id);
    Ok(Json(contract))
}

/// GET /api/staff/contract
pub async fn handle_get_own_contract(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<EmploymentContractRow>, AppError> {
    let contract: Option<EmploymentContractRow> = sqlx::query_as(
        "SELECT * FROM employment_contracts WHERE staff_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(staff.id)
    .fetch_optional(&state.db)
    .await?;

    let contract = contract.ok_or_else(|| AppError::NotFound("No contract on file".to_string()))?;
    Ok(Json(contract))
}

/// POST /api/staff/contract/sign
///
/// ISSUED → SIGNED; requires the staff member's signature image to already be
/// in object storage.
pub async fn handle_sign_contract(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<EmploymentContractRow>, AppError> {
    let contract: Option<EmploymentContractRow> = sqlx::query_as(
        "SELECT * FROM employment_contracts WHERE staff_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(staff.id)
    .fetch_optional(&state.db)
    .await?;
    let contract = contract.ok_or_else(|| AppError::NotFound("No contract on file".to_string()))?;

    if contract.status != ContractStatus::Issued.as_str() {
        return Err(AppError::Validation(format!(
            "Contract is {} and cannot be signed",
            contract.status
        )));
    }

    let has_signature = storage::object_exists(
        &state.s3,
        &state.config.s3_bucket,
        &signature_key(staff.id),
    )
    .await?;
    if !has_signature {
        return Err(AppError::Validation(
            "Upload a signature before signing the contract".to_string(),
        ));
    }

    let contract: EmploymentContractRow = sqlx::query_as(
        "UPDATE employment_contracts SET status = 'SIGNED', signed_at = NOW(), updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(contract.id)
    .fetch_one(&state.db)
    .await?;

    info!("Staff {} signed contract {}", staff.id, contract.id);
    Ok(Json(contract))
}

async fn contract_in_status(
    db: &sqlx::PgPool,
    contract_id: Uuid,
    expected: ContractStatus,
) -> Result<EmploymentContractRow, AppError> {
    let contract: Option<EmploymentContractRow> =
        sqlx::query_as("SELECT * FROM employment_contracts WHERE id = $1")
            .bind(contract_id)
            .fetch_optional(db)
            .await?;
    let contract =
        contract.ok_or_else(|| AppError::NotFound(format!("Contract {contract_id} not found")))?;

    if contract.status != expected.as_str() {
        return Err(AppError::Validation(format!(
            "Contract is {} and must be {}",
            contract.status,
            expected.as_str()
        )));
    }
    Ok(contract)
}
