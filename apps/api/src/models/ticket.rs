use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Support ticket opened from the staff or client portal.
/// Status: OPEN, IN_PROGRESS, RESOLVED, CLOSED.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TicketRow {
    pub id: Uuid,
    pub opened_by: Uuid,
    pub opened_by_role: String,
    pub subject: String,
    pub body: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TicketCommentRow {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub author_id: Uuid,
    pub author_role: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
