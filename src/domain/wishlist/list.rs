//! Wishlist listing slice.

use anyhow::Context;
use axum::{Json, extract::State};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::auth::CurrentUser;
use crate::domain::catalog::Product;
use crate::domain::{ProductId, UserId, WishlistItemId};
use crate::infra::ClientError;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WishlistEntry {
    pub id: WishlistItemId,
    pub product: Product,
}

pub async fn wishlist_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> Result<Json<Vec<WishlistEntry>>, ClientError> {
    let entries = wishlist(&pool, user.id).await?;
    Ok(Json(entries))
}

//----------------------- Implementation --------------------------

#[derive(Debug, sqlx::FromRow)]
struct WishlistRow {
    id: WishlistItemId,
    product_id: ProductId,
    name: String,
    description: String,
    price: Decimal,
    stock: i32,
    image_url: Option<String>,
    category: Option<String>,
}

pub async fn wishlist(pool: &PgPool, user_id: UserId) -> Result<Vec<WishlistEntry>, anyhow::Error> {
    let rows = sqlx::query_as::<_, WishlistRow>(
        "SELECT w.id, p.id AS product_id, p.name, p.description, p.price, p.stock,
                p.image_url, p.category
         FROM wishlist_items w JOIN products p ON p.id = w.product_id
         WHERE w.user_id = $1
         ORDER BY w.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("Problem in wishlist({user_id})."))?;

    Ok(rows
        .into_iter()
        .map(|row| WishlistEntry {
            id: row.id,
            product: Product {
                id: row.product_id,
                name: row.name,
                description: row.description,
                price: row.price,
                stock: row.stock,
                image_url: row.image_url,
                category: row.category,
            },
        })
        .collect())
}
