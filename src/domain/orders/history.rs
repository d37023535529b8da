//! Order history slice.

use axum::{
    Json,
    extract::{Path, State},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::CurrentUser;
use crate::domain::{OrderId, StoreError};
use crate::infra::ClientError;

use super::{OrderView, find_order, orders_for_user};

//------------------------- Web API ----------------------------

pub async fn orders_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> Result<Json<Vec<OrderView>>, ClientError> {
    let orders = orders_for_user(&pool, user.id).await?;
    Ok(Json(orders))
}

pub async fn order_detail_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(order_uuid): Path<Uuid>,
) -> Result<Json<OrderView>, ClientError> {
    let order_id: OrderId = order_uuid.try_into()?;
    let (owner, order) = find_order(&pool, order_id)
        .await?
        .ok_or(StoreError::NotFound("Order"))?;
    if owner != user.id {
        return Err(StoreError::Unauthorized.into());
    }
    Ok(Json(order))
}
