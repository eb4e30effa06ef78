//! Axum extractors that gate each portal surface by role.
//!
//! Handlers take `StaffSession` / `ClientSession` / `AdminSession` as an
//! argument; extraction resolves the bearer token against the auth provider,
//! checks the role, then loads the portal user row. Missing or invalid token
//! → 401; wrong role or no portal row (revoked account) → 403.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::{bearer_token, AuthSession, Role};
use crate::errors::AppError;
use crate::models::user::{ClientUserRow, ManagementUserRow, StaffUserRow};
use crate::state::AppState;

pub struct StaffSession(pub StaffUserRow);

pub struct ClientSession(pub ClientUserRow);

pub struct AdminSession(pub ManagementUserRow);

async fn resolve_session(parts: &Parts, state: &AppState) -> Result<AuthSession, AppError> {
    let token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;
    Ok(state.auth.lookup(token).await?)
}

#[async_trait]
impl FromRequestParts<AppState> for StaffSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session = resolve_session(parts, state).await?;
        if session.role != Role::Staff {
            return Err(AppError::Forbidden);
        }
        let row =
            sqlx::query_as::<_, StaffUserRow>("SELECT * FROM staff_users WHERE external_id = $1")
                .bind(&session.external_id)
                .fetch_optional(&state.db)
                .await?
                .ok_or(AppError::Forbidden)?;
        Ok(StaffSession(row))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ClientSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session = resolve_session(parts, state).await?;
        if session.role != Role::Client {
            return Err(AppError::Forbidden);
        }
        let row =
            sqlx::query_as::<_, ClientUserRow>("SELECT * FROM client_users WHERE external_id = $1")
                .bind(&session.external_id)
                .fetch_optional(&state.db)
                .await?
                .ok_or(AppError::Forbidden)?;
        Ok(ClientSession(row))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session = resolve_session(parts, state).await?;
        if session.role != Role::Management {
            return Err(AppError::Forbidden);
        }
        let row = sqlx::query_as::<_, ManagementUserRow>(
            "SELECT * FROM management_users WHERE external_id = $1",
        )
        .bind(&session.external_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Forbidden)?;
        Ok(AdminSession(row))
    }
}
