// Support ticketing — staff and clients open tickets, management works them
// through OPEN → IN_PROGRESS → RESOLVED/CLOSED.

pub mod handlers;
pub mod status;
