// Staff onboarding — per-section submission, admin approve/reject, derived
// completion percentages. Sections are independent sub-forms; each carries its
// own status and feedback.

pub mod handlers;
pub mod progress;
pub mod sections;
