//! Session handling: the `CurrentUser` extractor and session maintenance.
//!
//! Sessions are bearer tokens backed by a database row with a sliding
//! 30-minute idle expiry (configurable). Every authenticated request slides
//! the expiry forward; the session sweeper subsystem removes rows that have
//! lapsed.

use anyhow::Context;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use sqlx::PgPool;
use std::str::FromStr;

use crate::domain::{SessionToken, StoreError, UserId};
use crate::infra::{ClientError, Settings};

/// The authenticated identity for user-scoped operations. Extraction fails
/// with `LoginRequired` when the bearer token is missing, unknown, or idle
/// past its expiry.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub is_admin: bool,
}

impl CurrentUser {
    pub fn require_admin(&self) -> Result<(), StoreError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(StoreError::Unauthorized)
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    PgPool: FromRef<S>,
    Settings: FromRef<S>,
{
    type Rejection = ClientError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Err(StoreError::LoginRequired.into());
        };

        let pool = PgPool::from_ref(state);
        let settings = Settings::from_ref(state);

        authenticate(&pool, token, settings.session.idle_minutes)
            .await?
            .ok_or_else(|| StoreError::LoginRequired.into())
    }
}

fn bearer_token(parts: &Parts) -> Option<SessionToken> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    SessionToken::from_str(token).ok()
}

//----------------------- Implementation --------------------------

/// Looks the session up and slides its expiry forward in the same statement,
/// so an active user never times out mid-visit.
pub async fn authenticate(
    pool: &PgPool,
    token: SessionToken,
    idle_minutes: u16,
) -> Result<Option<CurrentUser>, anyhow::Error> {
    sqlx::query_as::<_, CurrentUser>(
        "UPDATE sessions s
         SET expires_at = now() + make_interval(mins => $2)
         FROM users u
         WHERE s.token = $1 AND s.user_id = u.id AND s.expires_at > now()
         RETURNING u.id, u.email, u.is_admin",
    )
    .bind(token)
    .bind(i32::from(idle_minutes))
    .fetch_optional(pool)
    .await
    .context("Problem in authenticate looking up the session.")
}

pub async fn create_session(
    pool: &PgPool,
    user_id: UserId,
    idle_minutes: u16,
) -> Result<SessionToken, anyhow::Error> {
    let token = SessionToken::new();
    sqlx::query(
        "INSERT INTO sessions (token, user_id, expires_at)
         VALUES ($1, $2, now() + make_interval(mins => $3))",
    )
    .bind(token)
    .bind(user_id)
    .bind(i32::from(idle_minutes))
    .execute(pool)
    .await
    .with_context(|| format!("Problem in create_session for user {user_id}."))?;
    Ok(token)
}

pub async fn delete_session(pool: &PgPool, token: SessionToken) -> Result<(), anyhow::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await
        .context("Problem in delete_session.")?;
    Ok(())
}

/// Removes lapsed sessions. Returns the number of rows swept.
pub async fn delete_expired_sessions(pool: &PgPool) -> Result<u64, anyhow::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
        .execute(pool)
        .await
        .context("Problem in delete_expired_sessions.")?;
    Ok(result.rows_affected())
}
