/// Interview lifecycle. Each transition is a discrete admin endpoint; there is
/// no derived automation between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewStatus {
    Pending,
    Scheduled,
    Completed,
    OfferSent,
    Hired,
    OfferDeclined,
}

impl InterviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InterviewStatus::Pending => "PENDING",
            InterviewStatus::Scheduled => "SCHEDULED",
            InterviewStatus::Completed => "COMPLETED",
            InterviewStatus::OfferSent => "OFFER_SENT",
            InterviewStatus::Hired => "HIRED",
            InterviewStatus::OfferDeclined => "OFFER_DECLINED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(InterviewStatus::Pending),
            "SCHEDULED" => Some(InterviewStatus::Scheduled),
            "COMPLETED" => Some(InterviewStatus::Completed),
            "OFFER_SENT" => Some(InterviewStatus::OfferSent),
            "HIRED" => Some(InterviewStatus::Hired),
            "OFFER_DECLINED" => Some(InterviewStatus::OfferDeclined),
            _ => None,
        }
    }

    pub fn can_transition(self, to: InterviewStatus) -> bool {
        matches!(
            (self, to),
            (InterviewStatus::Pending, InterviewStatus::Scheduled)
                | (InterviewStatus::Scheduled, InterviewStatus::Completed)
                | (InterviewStatus::Completed, InterviewStatus::OfferSent)
                | (InterviewStatus::OfferSent, InterviewStatus::Hired)
                | (InterviewStatus::OfferSent, InterviewStatus::OfferDeclined)
        )
    }
}

/// Employment contract lifecycle: DRAFT → ISSUED → SIGNED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractStatus {
    Draft,
    Issued,
    Signed,
}

impl ContractStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Draft => "DRAFT",
            ContractStatus::Issued => "ISSUED",
            ContractStatus::Signed => "SIGNED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(ContractStatus::Draft),
            "ISSUED" => Some(ContractStatus::Issued),
            "SIGNED" => Some(ContractStatus::Signed),
            _ => None,
        }
    }

    pub fn can_transition(self, to: ContractStatus) -> bool {
        matches!(
            (self, to),
            (ContractStatus::Draft, ContractStatus::Issued)
                | (ContractStatus::Issued, ContractStatus::Signed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InterviewStatus::{Completed, Hired, OfferDeclined, OfferSent, Pending, Scheduled};

    #[test]
    fn test_interview_happy_path() {
        assert!(Pending.can_transition(Scheduled));
        assert!(Scheduled.can_transition(Completed));
        assert!(Completed.can_transition(OfferSent));
        assert!(OfferSent.can_transition(Hired));
    }

    #[test]
    fn test_offer_can_be_declined() {
        assert!(OfferSent.can_transition(OfferDeclined));
    }

    #[test]
    fn test_interview_no_skipping() {
        assert!(!Pending.can_transition(Completed));
        assert!(!Pending.can_transition(OfferSent));
        assert!(!Scheduled.can_transition(OfferSent));
        assert!(!Completed.can_transition(Hired));
    }

    #[test]
    fn test_terminal_states_are_final() {
        assert!(!Hired.can_transition(Pending));
        assert!(!OfferDeclined.can_transition(OfferSent));
    }

    #[test]
    fn test_interview_parse_round_trip() {
        for status in [Pending, Scheduled, Completed, OfferSent, Hired, OfferDeclined] {
            assert_eq!(InterviewStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(InterviewStatus::parse("GHOSTED"), None);
    }

    #[test]
    fn test_contract_lifecycle() {
        assert!(ContractStatus::Draft.can_transition(ContractStatus::Issued));
        assert!(ContractStatus::Issued.can_transition(ContractStatus::Signed));
        assert!(!ContractStatus::Draft.can_transition(ContractStatus::Signed));
        assert!(!ContractStatus::Signed.can_transition(ContractStatus::Draft));
    }
}
