// Task management — clients create tasks for staff assigned to their company,
// staff walk them through TODO → IN_PROGRESS → DONE.

pub mod handlers;
pub mod status;
