//! Profile view slice.

use anyhow::Context;
use axum::{Json, extract::State};
use sqlx::PgPool;

use crate::domain::UserId;
use crate::domain::auth::CurrentUser;
use crate::infra::ClientError;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct ProfileView {
    pub email: String,
    pub address: Option<String>,
    pub preferences: Option<String>,
}

pub async fn profile_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> Result<Json<ProfileView>, ClientError> {
    let profile = profile_for_user(&pool, user.id).await?;
    Ok(Json(profile))
}

//----------------------- Implementation --------------------------

pub async fn profile_for_user(
    pool: &PgPool,
    user_id: UserId,
) -> Result<ProfileView, anyhow::Error> {
    sqlx::query_as::<_, ProfileView>(
        "SELECT email, address, preferences FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Problem in profile_for_user({user_id})."))
}
