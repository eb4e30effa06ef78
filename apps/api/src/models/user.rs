use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A client company serviced by the agency. Staff are assigned to companies;
/// client portal users belong to exactly one company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub industry: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Staff portal user. `external_id` links to the auth provider account.
/// Status: INVITED (pre-provisioned, onboarding incomplete), ACTIVE, INACTIVE.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffUserRow {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub full_name: String,
    pub position: Option<String>,
    pub avatar_key: Option<String>,
    pub assigned_company_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client portal user, scoped to a single company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientUserRow {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub full_name: String,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin/management portal user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ManagementUserRow {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}
