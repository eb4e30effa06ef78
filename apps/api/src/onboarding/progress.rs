use serde::Serialize;

use crate::onboarding::sections::SectionStatus;

/// Staff-facing completion: a section counts once it has been handed in,
/// whether or not review has happened yet. All sections weigh equally.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StaffProgress {
    pub completed_sections: usize,
    pub total_sections: usize,
    pub percent: f64,
}

/// Admin-facing completion counts APPROVED and REJECTED separately:
/// `approved_percent` is sign-off progress, `reviewed_percent` is how much of
/// the record has been looked at either way.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminProgress {
    pub approved_sections: usize,
    pub rejected_sections: usize,
    pub total_sections: usize,
    pub approved_percent: f64,
    pub reviewed_percent: f64,
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = (count as f64 / total as f64) * 100.0;
    (raw * 10.0).round() / 10.0
}

pub fn staff_progress(statuses: &[SectionStatus]) -> StaffProgress {
    let completed = statuses
        .iter()
        .filter(|s| matches!(s, SectionStatus::Submitted | SectionStatus::Approved))
        .count();
    StaffProgress {
        completed_sections: completed,
        total_sections: statuses.len(),
        percent: percent(completed, statuses.len()),
    }
}

pub fn admin_progress(statuses: &[SectionStatus]) -> AdminProgress {
    let approved = statuses
        .iter()
        .filter(|s| **s == SectionStatus::Approved)
        .count();
    let rejected = statuses
        .iter()
        .filter(|s| **s == SectionStatus::Rejected)
        .count();
    AdminProgress {
        approved_sections: approved,
        rejected_sections: rejected,
        total_sections: statuses.len(),
        approved_percent: percent(approved, statuses.len()),
        reviewed_percent: percent(approved + rejected, statuses.len()),
    }
}

/// The record is complete when every section has been approved.
pub fn is_fully_approved(statuses: &[SectionStatus]) -> bool {
    !statuses.is_empty() && statuses.iter().all(|s| *s == SectionStatus::Approved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::sections::SectionStatus::{Approved, Blank, Rejected, Submitted};

    #[test]
    fn test_staff_progress_counts_submitted_and_approved() {
        let statuses = [Submitted, Approved, Blank, Rejected, Blank, Blank, Blank];
        let progress = staff_progress(&statuses);
        assert_eq!(progress.completed_sections, 2);
        assert_eq!(progress.total_sections, 7);
        assert!((progress.percent - 28.6).abs() < 0.01, "{}", progress.percent);
    }

    #[test]
    fn test_staff_progress_all_blank_is_zero() {
        let statuses = [Blank; 7];
        assert_eq!(staff_progress(&statuses).percent, 0.0);
    }

    #[test]
    fn test_staff_progress_all_handed_in_is_100() {
        let statuses = [Submitted, Submitted, Approved, Approved, Submitted, Approved, Submitted];
        assert_eq!(staff_progress(&statuses).percent, 100.0);
    }

    #[test]
    fn test_rejected_does_not_count_for_staff() {
        let statuses = [Rejected; 7];
        assert_eq!(staff_progress(&statuses).completed_sections, 0);
    }

    #[test]
    fn test_admin_progress_separates_approved_and_rejected() {
        let statuses = [Approved, Approved, Rejected, Submitted, Blank, Blank, Blank];
        let progress = admin_progress(&statuses);
        assert_eq!(progress.approved_sections, 2);
        assert_eq!(progress.rejected_sections, 1);
        assert!((progress.approved_percent - 28.6).abs() < 0.01);
        assert!((progress.reviewed_percent - 42.9).abs() < 0.01);
    }

    #[test]
    fn test_admin_progress_submitted_is_not_reviewed() {
        let statuses = [Submitted; 7];
        let progress = admin_progress(&statuses);
        assert_eq!(progress.approved_percent, 0.0);
        assert_eq!(progress.reviewed_percent, 0.0);
    }

    #[test]
    fn test_fully_approved() {
        assert!(is_fully_approved(&[Approved; 7]));
        assert!(!is_fully_approved(&[
            Approved, Approved, Approved, Approved, Approved, Approved, Submitted
        ]));
        assert!(!is_fully_approved(&[]));
    }

    #[test]
    fn test_empty_statuses_percent_is_zero() {
        assert_eq!(staff_progress(&[]).percent, 0.0);
        assert_eq!(admin_progress(&[]).reviewed_percent, 0.0);
    }
}
