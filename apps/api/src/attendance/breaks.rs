use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::attendance::BreakRow;

/// Allotted minutes per break type. Unknown types are rejected at the handler.
pub fn allotted_minutes(break_type: &str) -> Option<i32> {
    match break_type {
        "lunch" => Some(60),
        "short" => Some(15),
        "coffee" => Some(10),
        _ => None,
    }
}

/// Live clock for a break, derived from its timestamps.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BreakClock {
    pub elapsed_seconds: i64,
    pub remaining_seconds: i64,
    pub is_paused: bool,
    pub is_ended: bool,
}

/// Computes elapsed/remaining for a break at `now`.
///
/// Elapsed time freezes while paused: the reference instant is `ended_at` for
/// a finished break, `paused_at` while paused, otherwise `now`; completed
/// pause intervals in `paused_seconds` are subtracted.
pub fn break_clock(row: &BreakRow, now: DateTime<Utc>) -> BreakClock {
    let reference = row.ended_at.or(row.paused_at).unwrap_or(now);
    let elapsed = ((reference - row.started_at).num_seconds() - row.paused_seconds).max(0);
    let remaining = (i64::from(row.allotted_minutes) * 60 - elapsed).max(0);
    BreakClock {
        elapsed_seconds: elapsed,
        remaining_seconds: remaining,
        is_paused: row.ended_at.is_none() && row.paused_at.is_some(),
        is_ended: row.ended_at.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn ts(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, hour, min, sec).unwrap()
    }

    fn make_break(started: DateTime<Utc>) -> BreakRow {
        BreakRow {
            id: Uuid::new_v4(),
            staff_id: Uuid::new_v4(),
            break_type: "lunch".to_string(),
            allotted_minutes: 60,
            started_at: started,
            paused_at: None,
            paused_seconds: 0,
            ended_at: None,
            created_at: started,
        }
    }

    #[test]
    fn test_running_break_elapsed() {
        let row = make_break(ts(12, 0, 0));
        let clock = break_clock(&row, ts(12, 10, 0));
        assert_eq!(clock.elapsed_seconds, 600);
        assert_eq!(clock.remaining_seconds, 3000);
        assert!(!clock.is_paused);
        assert!(!clock.is_ended);
    }

    #[test]
    fn test_paused_break_freezes_elapsed() {
        let mut row = make_break(ts(12, 0, 0));
        row.paused_at = Some(ts(12, 5, 0));
        // Clock reads the same long after the pause began.
        let clock = break_clock(&row, ts(13, 30, 0));
        assert_eq!(clock.elapsed_seconds, 300);
        assert!(clock.is_paused);
    }

    #[test]
    fn test_accumulated_pauses_subtracted() {
        let mut row = make_break(ts(12, 0, 0));
        row.paused_seconds = 120;
        let clock = break_clock(&row, ts(12, 10, 0));
        assert_eq!(clock.elapsed_seconds, 480);
    }

    #[test]
    fn test_ended_break_uses_end_timestamp() {
        let mut row = make_break(ts(12, 0, 0));
        row.ended_at = Some(ts(12, 45, 0));
        let clock = break_clock(&row, ts(18, 0, 0));
        assert_eq!(clock.elapsed_seconds, 2700);
        assert!(clock.is_ended);
        assert!(!clock.is_paused);
    }

    #[test]
    fn test_overrun_remaining_clamps_to_zero() {
        let mut row = make_break(ts(12, 0, 0));
        row.allotted_minutes = 15;
        let clock = break_clock(&row, ts(12, 20, 0));
        assert_eq!(clock.elapsed_seconds, 1200);
        assert_eq!(clock.remaining_seconds, 0);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let mut row = make_break(ts(12, 0, 0));
        row.paused_seconds = 9999;
        let clock = break_clock(&row, ts(12, 1, 0));
        assert_eq!(clock.elapsed_seconds, 0);
    }

    #[test]
    fn test_allotted_minutes_table() {
        assert_eq!(allotted_minutes("lunch"), Some(60));
        assert_eq!(allotted_minutes("short"), Some(15));
        assert_eq!(allotted_minutes("coffee"), Some(10));
        assert_eq!(allotted_minutes("siesta"), None);
    }
}
