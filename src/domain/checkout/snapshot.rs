//! Priced cart snapshot shared by checkout initiation and settlement.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use sqlx::PgExecutor;

use crate::domain::{ProductId, StoreError, UserId};

/// A cart line joined with the product's live price, name and stock.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub stock: i32,
}

impl PricedLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Reads the user's cart lines with live product data. Ordered by product id
/// so concurrent settlements lock product rows in a consistent order.
pub async fn priced_cart_lines<'e, E>(
    executor: E,
    user_id: UserId,
) -> Result<Vec<PricedLine>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, PricedLine>(
        "SELECT ci.product_id, p.name, p.price, ci.quantity, p.stock
         FROM cart_items ci JOIN products p ON p.id = ci.product_id
         WHERE ci.user_id = $1
         ORDER BY ci.product_id",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Checks every line against live stock, naming the first product that
/// cannot be fulfilled.
pub fn ensure_available(lines: &[PricedLine]) -> Result<(), StoreError> {
    for line in lines {
        if line.quantity > line.stock {
            return Err(StoreError::InsufficientStock {
                product_name: line.name.clone(),
            });
        }
    }
    Ok(())
}

/// Converts a price to integral minor currency units (cents), rounding
/// halves away from zero. `None` on overflow.
pub fn minor_units(price: Decimal) -> Option<i64> {
    (price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

//-------------------------- Tests -------------------------------
