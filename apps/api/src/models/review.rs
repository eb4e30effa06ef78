use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Performance review of a staff member, authored by a client user.
/// Status: PENDING (created, unanswered), SUBMITTED (answers + score recorded),
/// UNDER_REVIEW (acknowledged by management).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub staff_id: Uuid,
    pub period: String,
    pub status: String,
    pub answers: Option<Value>,
    pub overall_score: Option<f64>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
