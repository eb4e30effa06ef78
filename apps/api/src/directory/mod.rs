// Directory — companies, client accounts, staff roster, and the per-portal
// `me` endpoints.

pub mod handlers;
