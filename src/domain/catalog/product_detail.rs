//! Product detail slice: one product with its reviews.

use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{ProductId, ReviewId, StoreError};
use crate::infra::ClientError;

use super::Product;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub reviews: Vec<ReviewView>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReviewView {
    pub id: ReviewId,
    pub reviewer: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: jiff::Timestamp,
}

pub async fn product_detail_endpoint(
    State(pool): State<PgPool>,
    Path(product_uuid): Path<Uuid>,
) -> Result<Json<ProductDetail>, ClientError> {
    let product_id: ProductId = product_uuid.try_into()?;
    match product_detail(&pool, product_id).await? {
        Some(detail) => Ok(Json(detail)),
        None => Err(StoreError::NotFound("Product").into()),
    }
}

//----------------------- Implementation --------------------------

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: ReviewId,
    reviewer: String,
    rating: i32,
    comment: String,
    created_at: SqlxTimestamp,
}

pub async fn product_detail(
    pool: &PgPool,
    product_id: ProductId,
) -> Result<Option<ProductDetail>, anyhow::Error> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, stock, image_url, category
         FROM products WHERE id = $1",
    )
    .bind(product_id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("Problem in product_detail({product_id}) reading the product."))?;

    let Some(product) = product else {
        return Ok(None);
    };

    let reviews = sqlx::query_as::<_, ReviewRow>(
        "SELECT r.id, u.email AS reviewer, r.rating, r.comment, r.created_at
         FROM reviews r JOIN users u ON u.id = r.user_id
         WHERE r.product_id = $1
         ORDER BY r.created_at DESC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("Problem in product_detail({product_id}) reading reviews."))?
    .into_iter()
    .map(|row| ReviewView {
        id: row.id,
        reviewer: row.reviewer,
        rating: row.rating,
        comment: row.comment,
        created_at: row.created_at.to_jiff(),
    })
    .collect();

    Ok(Some(ProductDetail { product, reviews }))
}
