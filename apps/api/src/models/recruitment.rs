use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Candidate record from the external recruiting database (read-only).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRecord {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub years_experience: Option<i32>,
    pub expected_salary: Option<f64>,
    pub resume_url: Option<String>,
}

/// Interview request raised by a client against a candidate.
/// Status: PENDING, SCHEDULED, COMPLETED, OFFER_SENT, HIRED, OFFER_DECLINED.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRequestRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub status: String,
    pub room_name: Option<String>,
    pub room_url: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Created when a candidate accepts an offer; drives account pre-provisioning.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobAcceptanceRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub candidate_id: Uuid,
    pub staff_id: Uuid,
    pub start_date: NaiveDate,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
}

/// Employment contract for a provisioned staff account.
/// Status: DRAFT, ISSUED, SIGNED.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmploymentContractRow {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub acceptance_id: Uuid,
    pub status: String,
    pub terms: Value,
    pub issued_at: Option<DateTime<Utc>>,
    pub signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
