//! Profile update slice.

use anyhow::Context;
use axum::{Json, extract::State};
use sqlx::PgPool;

use crate::domain::UserId;
use crate::domain::auth::CurrentUser;
use crate::infra::ClientError;

use super::ProfileView;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProfilePayload {
    pub address: Option<String>,
    pub preferences: Option<String>,
}

pub async fn update_profile_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<ProfileView>, ClientError> {
    let command: UpdateProfileCommand = payload.into();
    let profile = update_profile(&pool, user.id, command).await?;
    Ok(Json(profile))
}

//------------------------- Command ----------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileCommand {
    pub address: Option<String>,
    pub preferences: Option<String>,
}

impl From<ProfilePayload> for UpdateProfileCommand {
    fn from(payload: ProfilePayload) -> Self {
        Self {
            address: normalise(payload.address),
            preferences: normalise(payload.preferences),
        }
    }
}

// Whitespace-only input clears the field rather than storing blanks.
fn normalise(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

//----------------------- Implementation --------------------------

pub async fn update_profile(
    pool: &PgPool,
    user_id: UserId,
    command: UpdateProfileCommand,
) -> Result<ProfileView, anyhow::Error> {
    sqlx::query_as::<_, ProfileView>(
        "UPDATE users SET address = $2, preferences = $3
         WHERE id = $1
         RETURNING email, address, preferences",
    )
    .bind(user_id)
    .bind(&command.address)
    .bind(&command.preferences)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Problem in update_profile({user_id})."))
}

//-------------------------- Tests -------------------------------
