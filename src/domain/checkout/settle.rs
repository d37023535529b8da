//! Checkout settlement slice.
//!
//! Converts the user's cart into a committed order exactly once. Everything
//! runs in a single transaction: conditional stock decrements, the order row,
//! its line items (capturing the unit price charged), and the cart deletion.
//! Any failure rolls the whole settlement back, leaving cart and stock
//! exactly as they were.
//!
//! The success redirect is treated as proof of payment, as the hosted-
//! checkout flow it mirrors does. Settling an already-emptied cart is a
//! no-op, which makes the at-least-once callback safe against duplicate
//! redirects.

use anyhow::Context;
use axum::{Json, extract::State};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::auth::CurrentUser;
use crate::domain::orders::{OrderItemView, OrderView};
use crate::domain::{OrderId, OrderItemId, StoreError, UserId};
use crate::infra::ClientError;

use super::priced_cart_lines;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SettlementOutcome {
    /// The cart settled into this order.
    Settled { order: OrderView },
    /// The cart was already empty; duplicate success redirects land here.
    NothingToSettle,
}

pub async fn checkout_success_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> Result<Json<SettlementOutcome>, ClientError> {
    match settle_cart(&pool, user.id).await? {
        Some(order) => Ok(Json(SettlementOutcome::Settled { order })),
        None => Ok(Json(SettlementOutcome::NothingToSettle)),
    }
}

//----------------------- Implementation --------------------------

/// Settles the user's current cart. Returns `None` when there is nothing to
/// settle. On `InsufficientStock` (stock fell since initiation) or any
/// database failure the transaction is dropped unfinished and Postgres rolls
/// it back; no partial settlement can become visible.
pub async fn settle_cart(
    pool: &PgPool,
    user_id: UserId,
) -> Result<Option<OrderView>, ClientError> {
    let mut tx = pool
        .begin()
        .await
        .context("Problem in settle_cart starting the settlement transaction.")?;

    let lines = priced_cart_lines(&mut *tx, user_id)
        .await
        .with_context(|| format!("Problem in settle_cart({user_id}) reading the cart."))?;

    if lines.is_empty() {
        return Ok(None);
    }

    // Conditional decrement: the WHERE clause refuses to take stock below
    // zero, so of two concurrent settlements of the last unit exactly one
    // sees a row updated. Lines arrive ordered by product id, keeping the
    // row-lock order consistent across settlements.
    for line in &lines {
        let updated = sqlx::query(
            "UPDATE products SET stock = stock - $1 WHERE id = $2 AND stock >= $1",
        )
        .bind(line.quantity)
        .bind(line.product_id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Problem in settle_cart decrementing {}.", line.product_id))?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::InsufficientStock {
                product_name: line.name.clone(),
            }
            .into());
        }
    }

    let total: Decimal = lines.iter().map(|l| l.line_total()).sum();
    let order_id = OrderId::new();
    let created_at = sqlx::query_scalar::<_, SqlxTimestamp>(
        "INSERT INTO orders (id, user_id, total_amount) VALUES ($1, $2, $3)
         RETURNING created_at",
    )
    .bind(order_id)
    .bind(user_id)
    .bind(total)
    .fetch_one(&mut *tx)
    .await
    .with_context(|| format!("Problem in settle_cart({user_id}) creating the order."))?;

    let mut items = Vec::with_capacity(lines.len());
    for line in &lines {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, product_id, quantity, unit_price)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(OrderItemId::new())
        .bind(order_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.price)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Problem in settle_cart adding a line for {}.", line.product_id))?;

        items.push(OrderItemView {
            product_id: line.product_id,
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.price,
        });
    }

    sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Problem in settle_cart({user_id}) clearing the cart."))?;

    tx.commit()
        .await
        .context("Problem in settle_cart committing the settlement.")?;

    Ok(Some(OrderView {
        id: order_id,
        created_at: created_at.to_jiff(),
        total_amount: total,
        status: "Processing".to_owned(),
        items,
    }))
}
