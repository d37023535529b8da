//! Cart view slice: the user's cart lines with totals.

use anyhow::Context;
use axum::{Json, extract::State};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::auth::CurrentUser;
use crate::domain::{CartItemId, ProductId, UserId};
use crate::infra::ClientError;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: Decimal,
    /// Σ quantity over the user's cart lines, computed on demand.
    pub cart_count: i64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CartLineView {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

pub async fn cart_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> Result<Json<CartView>, ClientError> {
    let view = cart_view(&pool, user.id).await?;
    Ok(Json(view))
}

//----------------------- Implementation --------------------------

#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: CartItemId,
    product_id: ProductId,
    name: String,
    price: Decimal,
    quantity: i32,
}

pub async fn cart_view(pool: &PgPool, user_id: UserId) -> Result<CartView, anyhow::Error> {
    let rows = sqlx::query_as::<_, CartLineRow>(
        "SELECT ci.id, ci.product_id, p.name, p.price, ci.quantity
         FROM cart_items ci JOIN products p ON p.id = ci.product_id
         WHERE ci.user_id = $1
         ORDER BY ci.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("Problem in cart_view({user_id}) reading cart items."))?;

    let items: Vec<CartLineView> = rows
        .into_iter()
        .map(|row| {
            let line_total = row.price * Decimal::from(row.quantity);
            CartLineView {
                id: row.id,
                product_id: row.product_id,
                name: row.name,
                price: row.price,
                quantity: row.quantity,
                line_total,
            }
        })
        .collect();

    let total = items.iter().map(|i| i.line_total).sum();
    let cart_count = items.iter().map(|i| i64::from(i.quantity)).sum();

    Ok(CartView {
        items,
        total,
        cart_count,
    })
}

/// `Σ quantity` over the user's cart lines. A pure query; nothing is cached
/// between requests.
pub async fn cart_count(pool: &PgPool, user_id: UserId) -> Result<i64, anyhow::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(quantity), 0)::BIGINT FROM cart_items WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Problem in cart_count({user_id})."))
}
