use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One onboarding sub-form for a staff member. A full onboarding record is the
/// set of section rows for that staff member, seeded BLANK at provisioning.
/// Status: BLANK, SUBMITTED, APPROVED, REJECTED.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OnboardingSectionRow {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub section: String,
    pub status: String,
    pub payload: Option<Value>,
    pub feedback: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
