//! Update cart quantity slice.

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

#[derive(Debug, Clone, serde::Deserialize)]
pub struct QuantityPayload {
    pub quantity: i32,
}

pub async fn update_cart_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(item_uuid): Path<Uuid>,
    Json(payload): Json<QuantityPayload>,
) -> Result<Json<CartView>, ClientError> {
    let item_id: CartItemId = item_uuid.try_into()?;
    if payload.quantity < 1 {
        return Err(ClientError::Payload(
            "Quantity must be at least 1.".to_owned(),
        ));
    }
    set_quantity(&pool, user.id, item_id, payload.quantity).await?;
    let view = cart_view(&pool, user.id).await?;
    Ok(Json(view))
}

//----------------------- Implementation --------------------------

#[derive(Debug, sqlx::FromRow)]
struct LineWithStock {
    user_id: UserId,
    name: String,
    stock: i32,
}

pub async fn set_quantity(
    pool: &PgPool,
    user_id: UserId,
    item_id: CartItemId,
    quantity: i32,
) -> Result<(), ClientError> {
    let line = sqlx::query_as::<_, LineWithStock>(
        "SELECT ci.user_id, p.name, p.stock
         FROM cart_items ci JOIN products p ON p.id = ci.product_id
         WHERE ci.id = $1",
    )
    .bind(item_id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("Problem in set_quantity({item_id})."))?
    .ok_or(StoreError::NotFound("Cart item"))?;

    if line.user_id != user_id {
        return Err(StoreError::Unauthorized.into());
    }
    if quantity > line.stock {
        return Err(StoreError::InsufficientStock {
            product_name: line.name,
        }
        .into());
    }

    sqlx::query("UPDATE cart_items SET quantity = $2 WHERE id = $1")
        .bind(item_id)
        .bind(quantity)
        .execute(pool)
        .await
        .with_context(|| format!("Problem in set_quantity({item_id}) updating."))?;
    Ok(())
}
