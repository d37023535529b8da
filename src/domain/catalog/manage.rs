//! Admin product management slice: create, update, delete.

use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::CurrentUser;
use crate::domain::{ProductId, StoreError};
use crate::infra::ClientError;

use super::{Product, ProductInput, ProductPayload};

//------------------------- Web API ----------------------------

pub async fn create_product_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, ClientError> {
    user.require_admin()?;
    let input: ProductInput = payload.try_into()?;
    let product = create_product(&pool, input).await?;
    Ok(Json(product))
}

pub async fn update_product_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(product_uuid): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, ClientError> {
    user.require_admin()?;
    let product_id: ProductId = product_uuid.try_into()?;
    let input: ProductInput = payload.try_into()?;
    let product = update_product(&pool, product_id, input)
        .await?
        .ok_or(StoreError::NotFound("Product"))?;
    Ok(Json(product))
}

pub async fn delete_product_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(product_uuid): Path<Uuid>,
) -> Result<Json<ProductId>, ClientError> {
    user.require_admin()?;
    let product_id: ProductId = product_uuid.try_into()?;
    let deleted = delete_product(&pool, product_id).await?;
    if !deleted {
        return Err(StoreError::NotFound("Product").into());
    }
    Ok(Json(product_id))
}

//----------------------- Implementation --------------------------

pub async fn create_product(pool: &PgPool, input: ProductInput) -> Result<Product, anyhow::Error> {
    let product_id = ProductId::new();
    sqlx::query_as::<_, Product>(
        "INSERT INTO products (id, name, description, price, stock, image_url, category)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, name, description, price, stock, image_url, category",
    )
    .bind(product_id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.stock)
    .bind(&input.image_url)
    .bind(&input.category)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Problem in create_product({product_id})."))
}

pub async fn update_product(
    pool: &PgPool,
    product_id: ProductId,
    input: ProductInput,
) -> Result<Option<Product>, anyhow::Error> {
    sqlx::query_as::<_, Product>(
        "UPDATE products
         SET name = $2, description = $3, price = $4, stock = $5, image_url = $6, category = $7
         WHERE id = $1
         RETURNING id, name, description, price, stock, image_url, category",
    )
    .bind(product_id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.stock)
    .bind(&input.image_url)
    .bind(&input.category)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("Problem in update_product({product_id})."))
}

pub async fn delete_product(pool: &PgPool, product_id: ProductId) -> Result<bool, anyhow::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(pool)
        .await
        .with_context(|| format!("Problem in delete_product({product_id})."))?;
    Ok(result.rows_affected() > 0)
}
