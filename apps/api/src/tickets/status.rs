#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

pub const TICKET_CATEGORIES: &[&str] = &["it", "hr", "payroll", "equipment", "other"];

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Resolved => "RESOLVED",
            TicketStatus::Closed => "CLOSED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(TicketStatus::Open),
            "IN_PROGRESS" => Some(TicketStatus::InProgress),
            "RESOLVED" => Some(TicketStatus::Resolved),
            "CLOSED" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    /// Tickets only move forward; closed is terminal and reopening is not
    /// supported (a new ticket is opened instead).
    pub fn can_transition(self, to: TicketStatus) -> bool {
        matches!(
            (self, to),
            (TicketStatus::Open, TicketStatus::InProgress)
                | (TicketStatus::InProgress, TicketStatus::Resolved)
                | (TicketStatus::InProgress, TicketStatus::Closed)
                | (TicketStatus::Resolved, TicketStatus::Closed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TicketStatus::{Closed, InProgress, Open, Resolved};

    #[test]
    fn test_forward_path() {
        assert!(Open.can_transition(InProgress));
        assert!(InProgress.can_transition(Resolved));
        assert!(InProgress.can_transition(Closed));
        assert!(Resolved.can_transition(Closed));
    }

    #[test]
    fn test_open_cannot_skip_to_terminal() {
        assert!(!Open.can_transition(Resolved));
        assert!(!Open.can_transition(Closed));
    }

    #[test]
    fn test_no_reopening() {
        assert!(!Closed.can_transition(Open));
        assert!(!Closed.can_transition(InProgress));
        assert!(!Resolved.can_transition(InProgress));
        assert!(!Resolved.can_transition(Open));
    }

    #[test]
    fn test_parse_round_trip() {
        for status in [Open, InProgress, Resolved, Closed] {
            assert_eq!(TicketStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TicketStatus::parse("REOPENED"), None);
    }
}
