use serde::{Deserialize, Serialize};

/// The onboarding sub-forms every new hire must complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingSection {
    PersonalInfo,
    GovernmentIds,
    Documents,
    Signature,
    EmergencyContact,
    BankDetails,
    WorkSetup,
}

pub const ALL_SECTIONS: &[OnboardingSection] = &[
    OnboardingSection::PersonalInfo,
    OnboardingSection::GovernmentIds,
    OnboardingSection::Documents,
    OnboardingSection::Signature,
    OnboardingSection::EmergencyContact,
    OnboardingSection::BankDetails,
    OnboardingSection::WorkSetup,
];

impl OnboardingSection {
    pub fn as_str(self) -> &'static str {
        match self {
            OnboardingSection::PersonalInfo => "personal_info",
            OnboardingSection::GovernmentIds => "government_ids",
            OnboardingSection::Documents => "documents",
            OnboardingSection::Signature => "signature",
            OnboardingSection::EmergencyContact => "emergency_contact",
            OnboardingSection::BankDetails => "bank_details",
            OnboardingSection::WorkSetup => "work_setup",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ALL_SECTIONS.iter().copied().find(|sec| sec.as_str() == s)
    }
}

/// Per-section status. Transitions are linear:
/// BLANK → SUBMITTED → APPROVED, or SUBMITTED → REJECTED → SUBMITTED (resubmit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionStatus {
    Blank,
    Submitted,
    Approved,
    Rejected,
}

impl SectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionStatus::Blank => "BLANK",
            SectionStatus::Submitted => "SUBMITTED",
            SectionStatus::Approved => "APPROVED",
            SectionStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BLANK" => Some(SectionStatus::Blank),
            "SUBMITTED" => Some(SectionStatus::Submitted),
            "APPROVED" => Some(SectionStatus::Approved),
            "REJECTED" => Some(SectionStatus::Rejected),
            _ => None,
        }
    }

    /// Staff may (re)submit from BLANK or REJECTED. SUBMITTED is awaiting
    /// review and APPROVED is locked.
    pub fn can_submit(self) -> bool {
        matches!(self, SectionStatus::Blank | SectionStatus::Rejected)
    }

    /// Admin may approve or reject only a submitted section.
    pub fn can_review(self) -> bool {
        self == SectionStatus::Submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections_round_trip_names() {
        for section in ALL_SECTIONS {
            assert_eq!(OnboardingSection::parse(section.as_str()), Some(*section));
        }
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(OnboardingSection::parse("pets"), None);
    }

    #[test]
    fn test_section_count() {
        assert_eq!(ALL_SECTIONS.len(), 7);
    }

    #[test]
    fn test_submit_allowed_from_blank_and_rejected() {
        assert!(SectionStatus::Blank.can_submit());
        assert!(SectionStatus::Rejected.can_submit());
    }

    #[test]
    fn test_submit_locked_once_submitted_or_approved() {
        assert!(!SectionStatus::Submitted.can_submit());
        assert!(!SectionStatus::Approved.can_submit());
    }

    #[test]
    fn test_review_only_from_submitted() {
        assert!(SectionStatus::Submitted.can_review());
        assert!(!SectionStatus::Blank.can_review());
        assert!(!SectionStatus::Approved.can_review());
        assert!(!SectionStatus::Rejected.can_review());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            SectionStatus::Blank,
            SectionStatus::Submitted,
            SectionStatus::Approved,
            SectionStatus::Rejected,
        ] {
            assert_eq!(SectionStatus::parse(status.as_str()), Some(status));
        }
    }
}
