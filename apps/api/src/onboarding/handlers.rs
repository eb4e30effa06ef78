//! Axum route handlers for the onboarding workflow.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AdminSession, StaffSession};
use crate::errors::AppError;
use crate::models::onboarding::OnboardingSectionRow;
use crate::onboarding::progress::{
    admin_progress, is_fully_approved, staff_progress, AdminProgress, StaffProgress,
};
use crate::onboarding::sections::{OnboardingSection, SectionStatus, ALL_SECTIONS};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SectionView {
    pub section: String,
    pub status: String,
    pub payload: Option<Value>,
    pub feedback: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct StaffOnboardingResponse {
    pub sections: Vec<SectionView>,
    pub progress: StaffProgress,
}

#[derive(Debug, Deserialize)]
pub struct SubmitSectionRequest {
    pub payload: Value,
}

#[derive(Debug, Serialize)]
pub struct AdminOnboardingSummary {
    pub staff_id: Uuid,
    pub full_name: String,
    pub staff_status: String,
    pub progress: AdminProgress,
}

#[derive(Debug, Serialize)]
pub struct AdminOnboardingDetail {
    pub staff_id: Uuid,
    pub sections: Vec<SectionView>,
    pub progress: AdminProgress,
}

#[derive(Debug, Deserialize)]
pub struct RejectSectionRequest {
    pub feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared queries
// ────────────────────────────────────────────────────────────────────────────

async fn fetch_sections(
    db: &sqlx::PgPool,
    staff_id: Uuid,
) -> Result<Vec<OnboardingSectionRow>, AppError> {
    Ok(sqlx::query_as::<_, OnboardingSectionRow>(
        "SELECT * FROM onboarding_sections WHERE staff_id = $1",
    )
    .bind(staff_id)
    .fetch_all(db)
    .await?)
}

/// Orders rows per ALL_SECTIONS, synthesizing BLANK views for sections that
/// have no row yet (accounts provisioned before a section was introduced).
fn section_views(rows: Vec<OnboardingSectionRow>) -> Vec<SectionView> {
    let mut by_section: HashMap<String, OnboardingSectionRow> =
        rows.into_iter().map(|r| (r.section.clone(), r)).collect();

    ALL_SECTIONS
        .iter()
        .map(|section| match by_section.remove(section.as_str()) {
            Some(row) => SectionView {
                section: row.section,
                status: row.status,
                payload: row.payload,
                feedback: row.feedback,
                submitted_at: row.submitted_at,
                reviewed_at: row.reviewed_at,
            },
            None => SectionView {
                section: section.as_str().to_string(),
                status: SectionStatus::Blank.as_str().to_string(),
                payload: None,
                feedback: None,
                submitted_at: None,
                reviewed_at: None,
            },
        })
        .collect()
}

fn statuses_of(views: &[SectionView]) -> Vec<SectionStatus> {
    views
        .iter()
        .filter_map(|v| SectionStatus::parse(&v.status))
        .collect()
}

fn parse_section(raw: &str) -> Result<OnboardingSection, AppError> {
    OnboardingSection::parse(raw)
        .ok_or_else(|| AppError::NotFound(format!("Onboarding section '{raw}' not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Staff handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/staff/onboarding
///
/// Full record: every section with its status and feedback, plus the
/// staff-facing completion percentage.
pub async fn handle_get_own_onboarding(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
) -> Result<Json<StaffOnboardingResponse>, AppError> {
    let sections = section_views(fetch_sections(&state.db, staff.id).await?);
    let progress = staff_progress(&statuses_of(&sections));
    Ok(Json(StaffOnboardingResponse { sections, progress }))
}

/// PUT /api/staff/onboarding/:section
///
/// Submits or resubmits one section. Allowed from BLANK and REJECTED;
/// resubmission clears earlier feedback. SUBMITTED and APPROVED are locked.
pub async fn handle_submit_section(
    State(state): State<AppState>,
    Path(raw_section): Path<String>,
    StaffSession(staff): StaffSession,
    Json(request): Json<SubmitSectionRequest>,
) -> Result<Json<SectionView>, AppError> {
    let section = parse_section(&raw_section)?;

    if !request.payload.is_object() {
        return Err(AppError::Validation(
            "Section payload must be a JSON object".to_string(),
        ));
    }

    let existing: Option<OnboardingSectionRow> = sqlx::query_as(
        "SELECT * FROM onboarding_sections WHERE staff_id = $1 AND section = $2",
    )
    .bind(staff.id)
    .bind(section.as_str())
    .fetch_optional(&state.db)
    .await?;

    let row: OnboardingSectionRow = match existing {
        Some(row) => {
            let status = SectionStatus::parse(&row.status)
                .ok_or_else(|| anyhow::anyhow!("Corrupt section status '{}'", row.status))?;
            if !status.can_submit() {
                return Err(AppError::Validation(format!(
                    "Section '{}' is {} and cannot be resubmitted",
                    section.as_str(),
                    row.status
                )));
            }
            sqlx::query_as(
                r#"
                UPDATE onboarding_sections
                SET status = 'SUBMITTED', payload = $1, feedback = NULL,
                    submitted_at = NOW(), reviewed_at = NULL, updated_at = NOW()
                WHERE id = $2
                RETURNING *
                "#,
            )
            .bind(&request.payload)
            .bind(row.id)
            .fetch_one(&state.db)
            .await?
        }
        None => {
            sqlx::query_as(
                r#"
                INSERT INTO onboarding_sections (id, staff_id, section, status, payload, submitted_at)
                VALUES ($1, $2, $3, 'SUBMITTED', $4, NOW())
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(staff.id)
            .bind(section.as_str())
            .bind(&request.payload)
            .fetch_one(&state.db)
            .await?
        }
    };

    info!(
        "Staff {} submitted onboarding section {}",
        staff.id,
        section.as_str()
    );

    Ok(Json(SectionView {
        section: row.section,
        status: row.status,
        payload: row.payload,
        feedback: row.feedback,
        submitted_at: row.submitted_at,
        reviewed_at: row.reviewed_at,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Admin handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/admin/onboarding
///
/// Every non-inactive staff member with admin-facing review progress.
pub async fn handle_list_onboarding(
    State(state): State<AppState>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<Vec<AdminOnboardingSummary>>, AppError> {
    let staff: Vec<(Uuid, String, String)> = sqlx::query_as(
        "SELECT id, full_name, status FROM staff_users WHERE status <> 'INACTIVE' ORDER BY created_at",
    )
    .fetch_all(&state.db)
    .await?;

    let rows: Vec<OnboardingSectionRow> =
        sqlx::query_as("SELECT * FROM onboarding_sections").fetch_all(&state.db).await?;

    let mut by_staff: HashMap<Uuid, Vec<OnboardingSectionRow>> = HashMap::new();
    for row in rows {
        by_staff.entry(row.staff_id).or_default().push(row);
    }

    let summaries = staff
        .into_iter()
        .map(|(staff_id, full_name, staff_status)| {
            let views = section_views(by_staff.remove(&staff_id).unwrap_or_default());
            AdminOnboardingSummary {
                staff_id,
                full_name,
                staff_status,
                progress: admin_progress(&statuses_of(&views)),
            }
        })
        .collect();

    Ok(Json(summaries))
}

/// GET /api/admin/onboarding/:staff_id
pub async fn handle_get_staff_onboarding(
    State(state): State<AppState>,
    Path(staff_id): Path<Uuid>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<AdminOnboardingDetail>, AppError> {
    ensure_staff_exists(&state.db, staff_id).await?;

    let sections = section_views(fetch_sections(&state.db, staff_id).await?);
    let progress = admin_progress(&statuses_of(&sections));
    Ok(Json(AdminOnboardingDetail {
        staff_id,
        sections,
        progress,
    }))
}

/// POST /api/admin/onboarding/:staff_id/:section/approve
///
/// SUBMITTED → APPROVED. When the last section is approved, the staff account
/// flips INVITED → ACTIVE.
pub async fn handle_approve_section(
    State(state): State<AppState>,
    Path((staff_id, raw_section)): Path<(Uuid, String)>,
    AdminSession(admin): AdminSession,
) -> Result<Json<SectionView>, AppError> {
    let section = parse_section(&raw_section)?;
    let row = reviewable_section(&state.db, staff_id, section).await?;

    let updated: OnboardingSectionRow = sqlx::query_as(
        r#"
        UPDATE onboarding_sections
        SET status = 'APPROVED', reviewed_at = NOW(), updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(row.id)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Admin {} approved onboarding section {} for staff {}",
        admin.id,
        section.as_str(),
        staff_id
    );

    let all = fetch_sections(&state.db, staff_id).await?;
    let statuses: Vec<SectionStatus> = all
        .iter()
        .filter_map(|r| SectionStatus::parse(&r.status))
        .collect();
    if all.len() == ALL_SECTIONS.len() && is_fully_approved(&statuses) {
        let activated = sqlx::query(
            "UPDATE staff_users SET status = 'ACTIVE', updated_at = NOW()
             WHERE id = $1 AND status = 'INVITED'",
        )
        .bind(staff_id)
        .execute(&state.db)
        .await?;
        if activated.rows_affected() > 0 {
            info!("Staff {staff_id} completed onboarding and is now ACTIVE");
        }
    }

    Ok(Json(SectionView {
        section: updated.section,
        status: updated.status,
        payload: updated.payload,
        feedback: updated.feedback,
        submitted_at: updated.submitted_at,
        reviewed_at: updated.reviewed_at,
    }))
}

/// POST /api/admin/onboarding/:staff_id/:section/reject
///
/// SUBMITTED → REJECTED; feedback is required so staff can fix and resubmit.
pub async fn handle_reject_section(
    State(state): State<AppState>,
    Path((staff_id, raw_section)): Path<(Uuid, String)>,
    AdminSession(admin): AdminSession,
    Json(request): Json<RejectSectionRequest>,
) -> Result<Json<SectionView>, AppError> {
    let section = parse_section(&raw_section)?;

    if request.feedback.trim().is_empty() {
        return Err(AppError::Validation(
            "Rejection feedback cannot be empty".to_string(),
        ));
    }

    let row = reviewable_section(&state.db, staff_id, section).await?;

    let updated: OnboardingSectionRow = sqlx::query_as(
        r#"
        UPDATE onboarding_sections
        SET status = 'REJECTED', feedback = $1, reviewed_at = NOW(), updated_at = NOW()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(request.feedback.trim())
    .bind(row.id)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Admin {} rejected onboarding section {} for staff {}",
        admin.id,
        section.as_str(),
        staff_id
    );

    Ok(Json(SectionView {
        section: updated.section,
        status: updated.status,
        payload: updated.payload,
        feedback: updated.feedback,
        submitted_at: updated.submitted_at,
        reviewed_at: updated.reviewed_at,
    }))
}

async fn ensure_staff_exists(db: &sqlx::PgPool, staff_id: Uuid) -> Result<(), AppError> {
    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM staff_users WHERE id = $1")
        .bind(staff_id)
        .fetch_optional(db)
        .await?;
    exists
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Staff {staff_id} not found")))
}

/// Loads a section row and verifies it is in a reviewable state.
async fn reviewable_section(
    db: &sqlx::PgPool,
    staff_id: Uuid,
    section: OnboardingSection,
) -> Result<OnboardingSectionRow, AppError> {
    ensure_staff_exists(db, staff_id).await?;

    let row: Option<OnboardingSectionRow> = sqlx::query_as(
        "SELECT * FROM onboarding_sections WHERE staff_id = $1 AND section = $2",
    )
    .bind(staff_id)
    .bind(section.as_str())
    .fetch_optional(db)
    .await?;

    let row = row.ok_or_else(|| {
        AppError::Validation(format!(
            "Section '{}' has not been submitted",
            section.as_str()
        ))
    })?;

    let status = SectionStatus::parse(&row.status)
        .ok_or_else(|| anyhow::anyhow!("Corrupt section status '{}'", row.status))?;
    if !status.can_review() {
        return Err(AppError::Validation(format!(
            "Section '{}' is {} and cannot be reviewed",
            section.as_str(),
            row.status
        )));
    }

    Ok(row)
}
