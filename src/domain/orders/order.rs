//! Order views and loaders. Orders are append-only after settlement; only
//! the status field changes later, and that is out of this server's hands.

use anyhow::Context;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{OrderId, ProductId, UserId};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub created_at: jiff::Timestamp,
    pub total_amount: Decimal,
    pub status: String,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, sqlx::FromRow)]
pub struct OrderItemView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    created_at: SqlxTimestamp,
    total_amount: Decimal,
    status: String,
}

pub async fn order_items(pool: &PgPool, order_id: OrderId) -> Result<Vec<OrderItemView>, anyhow::Error> {
    sqlx::query_as::<_, OrderItemView>(
        "SELECT oi.product_id, p.name, oi.quantity, oi.unit_price
         FROM order_items oi JOIN products p ON p.id = oi.product_id
         WHERE oi.order_id = $1
         ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("Problem in order_items({order_id})."))
}

/// The user's orders, newest first.
pub async fn orders_for_user(
    pool: &PgPool,
    user_id: UserId,
) -> Result<Vec<OrderView>, anyhow::Error> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT id, user_id, created_at, total_amount, status
         FROM orders WHERE user_id = $1
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("Problem in orders_for_user({user_id})."))?;

    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        let items = order_items(pool, row.id).await?;
        views.push(OrderView {
            id: row.id,
            created_at: row.created_at.to_jiff(),
            total_amount: row.total_amount,
            status: row.status,
            items,
        });
    }
    Ok(views)
}

/// One order with its owning user, for the cross-user access check.
pub async fn find_order(
    pool: &PgPool,
    order_id: OrderId,
) -> Result<Option<(UserId, OrderView)>, anyhow::Error> {
    let row = sqlx::query_as::<_, OrderRow>(
        "SELECT id, user_id, created_at, total_amount, status FROM orders WHERE id = $1",
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("Problem in find_order({order_id})."))?;

    let Some(row) = row else {
        return Ok(None);
    };
    let items = order_items(pool, row.id).await?;
    Ok(Some((
        row.user_id,
        OrderView {
            id: row.id,
            created_at: row.created_at.to_jiff(),
            total_amount: row.total_amount,
            status: row.status,
            items,
        },
    )))
}
