//! Register slice.

use anyhow::Context;
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State};
use sqlx::PgPool;

use crate::domain::{StoreError, UserId};
use crate::infra::ClientError;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RegisterResponse {
    pub user_id: UserId,
}

pub async fn register_endpoint(
    State(pool): State<PgPool>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<RegisterResponse>, ClientError> {
    let command: RegisterCommand = payload.try_into()?;
    let user_id = register_user(&pool, command).await?;
    Ok(Json(RegisterResponse { user_id }))
}

//------------------------- Command ----------------------------

#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
}

impl TryFrom<RegisterPayload> for RegisterCommand {
    type Error = ClientError;

    fn try_from(payload: RegisterPayload) -> Result<Self, Self::Error> {
        let email = payload.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(ClientError::Payload("Invalid email address.".to_owned()));
        }
        if payload.password.len() < 6 {
            return Err(ClientError::Payload(
                "Password must be at least 6 characters.".to_owned(),
            ));
        }
        if payload.password != payload.confirm_password {
            return Err(ClientError::Payload("Passwords do not match.".to_owned()));
        }
        Ok(Self {
            email,
            password: payload.password,
        })
    }
}

//----------------------- Implementation --------------------------

pub async fn register_user(
    pool: &PgPool,
    command: RegisterCommand,
) -> Result<UserId, ClientError> {
    let existing = sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE email = $1")
        .bind(&command.email)
        .fetch_optional(pool)
        .await
        .context("Problem in register_user checking for an existing email.")?;
    if existing.is_some() {
        return Err(StoreError::EmailTaken.into());
    }

    let password_hash = hash_password(&command.password)?;

    let user_id = UserId::new();
    sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(&command.email)
        .bind(password_hash)
        .execute(pool)
        .await
        .with_context(|| format!("Problem in register_user inserting {user_id}."))?;

    Ok(user_id)
}

pub fn hash_password(password: &str) -> Result<String, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))
}

//-------------------------- Tests -------------------------------
