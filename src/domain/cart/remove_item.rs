//! Remove from cart slice.

use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::CurrentUser;
use crate::domain::cart::{CartView, cart_view};
use crate::domain::{CartItemId, StoreError, UserId};
use crate::infra::ClientError;

//------------------------- Web API ----------------------------

pub async fn remove_from_cart_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(item_uuid): Path<Uuid>,
) -> Result<Json<CartView>, ClientError> {
    let item_id: CartItemId = item_uuid.try_into()?;
    remove_from_cart(&pool, user.id, item_id).await?;
    let view = cart_view(&pool, user.id).await?;
    Ok(Json(view))
}

//----------------------- Implementation --------------------------

pub async fn remove_from_cart(
    pool: &PgPool,
    user_id: UserId,
    item_id: CartItemId,
) -> Result<(), ClientError> {
    let owner = sqlx::query_scalar::<_, UserId>("SELECT user_id FROM cart_items WHERE id = $1")
        .bind(item_id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Problem in remove_from_cart({item_id})."))?
        .ok_or(StoreError::NotFound("Cart item"))?;

    if owner != user_id {
        return Err(StoreError::Unauthorized.into());
    }

    sqlx::query("DELETE FROM cart_items WHERE id = $1")
        .bind(item_id)
        .execute(pool)
        .await
        .with_context(|| format!("Problem in remove_from_cart({item_id}) deleting."))?;
    Ok(())
}
