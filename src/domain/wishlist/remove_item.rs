//! Remove from wishlist slice.

use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::CurrentUser;
use crate::domain::{ProductId, StoreError, UserId};
use crate::infra::ClientError;

//------------------------- Web API ----------------------------

pub async fn remove_from_wishlist_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(product_uuid): Path<Uuid>,
) -> Result<Json<ProductId>, ClientError> {
    let product_id: ProductId = product_uuid.try_into()?;
    remove_from_wishlist(&pool, user.id, product_id).await?;
    Ok(Json(product_id))
}

//----------------------- Implementation --------------------------

pub async fn remove_from_wishlist(
    pool: &PgPool,
    user_id: UserId,
    product_id: ProductId,
) -> Result<(), ClientError> {
    let result = sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await
        .with_context(|| format!("Problem in remove_from_wishlist({user_id}, {product_id})."))?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("Wishlist item").into());
    }
    Ok(())
}
