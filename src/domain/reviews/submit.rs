//! Submit review slice.

use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::CurrentUser;
use crate::domain::{ProductId, ReviewId, StoreError, UserId};
use crate::infra::ClientError;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ReviewPayload {
    pub rating: i32,
    pub comment: Option<String>,
}

pub async fn submit_review_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(product_uuid): Path<Uuid>,
    Json(payload): Json<ReviewPayload>,
) -> Result<Json<ReviewId>, ClientError> {
    let product_id: ProductId = product_uuid.try_into()?;
    let command: ReviewCommand = payload.try_into()?;
    let review_id = submit_review(&pool, user.id, product_id, command).await?;
    Ok(Json(review_id))
}

//------------------------- Command ----------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCommand {
    pub rating: i32,
    pub comment: String,
}

impl TryFrom<ReviewPayload> for ReviewCommand {
    type Error = ClientError;

    fn try_from(payload: ReviewPayload) -> Result<Self, Self::Error> {
        if !(1..=5).contains(&payload.rating) {
            return Err(ClientError::Payload(
                "Rating must be between 1 and 5.".to_owned(),
            ));
        }
        Ok(Self {
            rating: payload.rating,
            comment: payload.comment.unwrap_or_default(),
        })
    }
}

//----------------------- Implementation --------------------------

pub async fn submit_review(
    pool: &PgPool,
    user_id: UserId,
    product_id: ProductId,
    command: ReviewCommand,
) -> Result<ReviewId, ClientError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
            .bind(product_id)
            .fetch_one(pool)
            .await
            .with_context(|| format!("Problem in submit_review({user_id}, {product_id})."))?;
    if !exists {
        return Err(StoreError::NotFound("Product").into());
    }

    let review_id = ReviewId::new();
    sqlx::query(
        "INSERT INTO reviews (id, user_id, product_id, rating, comment)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(review_id)
    .bind(user_id)
    .bind(product_id)
    .bind(command.rating)
    .bind(&command.comment)
    .execute(pool)
    .await
    .with_context(|| format!("Problem in submit_review({user_id}, {product_id}) inserting."))?;

    Ok(review_id)
}

//-------------------------- Tests -------------------------------
