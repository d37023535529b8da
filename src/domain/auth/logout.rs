//! Logout slice.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
};
use sqlx::PgPool;
use std::str::FromStr;

use crate::domain::{SessionToken, StoreError};
use crate::infra::ClientError;

use super::delete_session;

pub async fn logout_endpoint(
    State(pool): State<PgPool>,
    headers: HeaderMap,
) -> Result<Json<String>, ClientError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|v| SessionToken::from_str(v).ok())
        .ok_or(StoreError::LoginRequired)?;

    delete_session(&pool, token).await?;
    Ok(Json("You have been logged out.".to_owned()))
}
