//! Checkout cancel slice. The shopper abandoned the payment page; nothing
//! changes and the cart is returned untouched.

use axum::{Json, extract::State};
use sqlx::PgPool;

use crate::domain::auth::CurrentUser;
use crate::domain::cart::{CartView, cart_view};
use crate::infra::ClientError;

pub async fn checkout_cancel_endpoint(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> Result<Json<CartView>, ClientError> {
    let view = cart_view(&pool, user.id).await?;
    Ok(Json(view))
}
