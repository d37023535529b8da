//! Add to cart slice.
//!
//! Stock is a ceiling checked at mutation time; it is not reserved here.
//! Decrements only happen at checkout settlement.

use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::CurrentUser;
use crate::domain::cart::{CartView, cart_view};
use crate::domain::{CartItemId, ProductId, StoreError, UserId};
use crate::infra::ClientError;

//------------------------- Web API ----------------------------

pub async fn add_to_cart_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(product_uuid): Path<Uuid>,
) -> Result<Json<CartView>, ClientError> {
    let product_id: ProductId = product_uuid.try_into()?;
    add_to_cart(&pool, user.id, product_id).await?;
    let view = cart_view(&pool, user.id).await?;
    Ok(Json(view))
}

//----------------------- Implementation --------------------------

#[derive(Debug, sqlx::FromRow)]
struct ExistingLine {
    id: CartItemId,
    quantity: i32,
}

pub async fn add_to_cart(
    pool: &PgPool,
    user_id: UserId,
    product_id: ProductId,
) -> Result<(), ClientError> {
    let mut tx = pool
        .begin()
        .await
        .context("Problem in add_to_cart starting a transaction.")?;

    let stock = sqlx::query_scalar::<_, i32>("SELECT stock FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await
        .with_context(|| format!("Problem in add_to_cart({user_id}, {product_id})."))?
        .ok_or(StoreError::NotFound("Product"))?;

    if stock <= 0 {
        return Err(StoreError::OutOfStock.into());
    }

    let existing = sqlx::query_as::<_, ExistingLine>(
        "SELECT id, quantity FROM cart_items WHERE user_id = $1 AND product_id = $2",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(&mut *tx)
    .await
    .with_context(|| format!("Problem in add_to_cart({user_id}, {product_id})."))?;

    match existing {
        Some(line) if line.quantity >= stock => {
            return Err(StoreError::StockLimitReached.into());
        }
        Some(line) => {
            sqlx::query("UPDATE cart_items SET quantity = quantity + 1 WHERE id = $1")
                .bind(line.id)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Problem in add_to_cart incrementing line {}.", line.id))?;
        }
        None => {
            sqlx::query(
                "INSERT INTO cart_items (id, user_id, product_id, quantity) VALUES ($1, $2, $3, 1)",
            )
            .bind(CartItemId::new())
            .bind(user_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Problem in add_to_cart({user_id}, {product_id})."))?;
        }
    }

    tx.commit()
        .await
        .context("Problem in add_to_cart committing.")?;
    Ok(())
}
