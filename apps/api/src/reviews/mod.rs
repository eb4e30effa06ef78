// Performance reviews — created PENDING by a client, submitted with answers
// and a computed overall score, then acknowledged by management.

pub mod handlers;
pub mod scoring;
