//! Login slice.

use anyhow::Context;
use argon2::{Argon2, PasswordVerifier, password_hash::PasswordHash};
use axum::{Json, extract::State};
use sqlx::PgPool;

use crate::AppState;
use crate::domain::{SessionToken, StoreError, UserId};
use crate::infra::ClientError;

use super::create_session;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LoginResponse {
    pub token: SessionToken,
    pub user_id: UserId,
    pub is_admin: bool,
}

pub async fn login_endpoint(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, ClientError> {
    let response = login(
        &app_state.pool,
        &payload,
        app_state.settings.session.idle_minutes,
    )
    .await?;
    Ok(Json(response))
}

//----------------------- Implementation --------------------------

#[derive(Debug, sqlx::FromRow)]
struct CredentialsRow {
    id: UserId,
    password_hash: String,
    is_admin: bool,
}

pub async fn login(
    pool: &PgPool,
    payload: &LoginPayload,
    idle_minutes: u16,
) -> Result<LoginResponse, ClientError> {
    let email = payload.email.trim().to_lowercase();
    let row = sqlx::query_as::<_, CredentialsRow>(
        "SELECT id, password_hash, is_admin FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(pool)
    .await
    .context("Problem in login reading user credentials.")?;

    // Unknown email and wrong password are indistinguishable to the caller.
    let Some(row) = row else {
        return Err(StoreError::InvalidCredentials.into());
    };
    if !verify_password(&row.password_hash, &payload.password) {
        return Err(StoreError::InvalidCredentials.into());
    }

    let token = create_session(pool, row.id, idle_minutes).await?;
    Ok(LoginResponse {
        token,
        user_id: row.id,
        is_admin: row.is_admin,
    })
}

fn verify_password(stored_hash: &str, candidate: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

//-------------------------- Tests -------------------------------
