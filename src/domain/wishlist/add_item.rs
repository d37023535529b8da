//! Add to wishlist slice.

use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::CurrentUser;
use crate::domain::{ProductId, StoreError, UserId, WishlistItemId};
use crate::infra::ClientError;

//------------------------- Web API ----------------------------

pub async fn add_to_wishlist_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(product_uuid): Path<Uuid>,
) -> Result<Json<WishlistItemId>, ClientError> {
    let product_id: ProductId = product_uuid.try_into()?;
    let item_id = add_to_wishlist(&pool, user.id, product_id).await?;
    Ok(Json(item_id))
}

//----------------------- Implementation --------------------------

pub async fn add_to_wishlist(
    pool: &PgPool,
    user_id: UserId,
    product_id: ProductId,
) -> Result<WishlistItemId, ClientError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Problem in add_to_wishlist({user_id}, {product_id})."))?;
    if !exists {
        return Err(StoreError::NotFound("Product").into());
    }

    let item_id = WishlistItemId::new();
    let inserted = sqlx::query(
        "INSERT INTO wishlist_items (id, user_id, product_id)
         VALUES ($1, $2, $3)
         ON CONFLICT (user_id, product_id) DO NOTHING",
    )
    .bind(item_id)
    .bind(user_id)
    .bind(product_id)
    .execute(pool)
    .await
    .with_context(|| format!("Problem in add_to_wishlist({user_id}, {product_id})."))?;

    if inserted.rows_affected() == 0 {
        return Err(StoreError::AlreadyInWishlist.into());
    }
    Ok(item_id)
}
