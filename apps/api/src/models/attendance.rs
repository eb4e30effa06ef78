use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A clock-in/clock-out pair. `clock_out` and `worked_seconds` are NULL while
/// the entry is open; at most one open entry per staff member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimeEntryRow {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub worked_seconds: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A break taken during a shift. At most one unended break per staff member.
/// `paused_at` is set while the break is paused; completed pause intervals
/// accumulate into `paused_seconds`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BreakRow {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub break_type: String,
    pub allotted_minutes: i32,
    pub started_at: DateTime<Utc>,
    pub paused_at: Option<DateTime<Utc>>,
    pub paused_seconds: i64,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
