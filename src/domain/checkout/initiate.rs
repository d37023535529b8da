//! Checkout initiation slice.
//!
//! Validates the cart against live stock and opens a hosted payment session.
//! Stock is not reserved here; the race window until settlement is closed by
//! the conditional decrement inside the settlement transaction.

use anyhow::Context;
use axum::{Json, extract::State};
use sqlx::PgPool;
use tracing::warn;

use crate::AppState;
use crate::domain::{StoreError, UserId, auth::CurrentUser};
use crate::infra::ClientError;

use super::{
    PaymentGateway, SessionLineItem, ensure_available, minor_units, priced_cart_lines,
};

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CheckoutRedirect {
    /// The hosted payment page the client should redirect to.
    pub url: String,
}

pub async fn checkout_endpoint(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<CheckoutRedirect>, ClientError> {
    let redirect = initiate_checkout(
        &app_state.pool,
        app_state.payments.as_ref(),
        &app_state.settings.payment.success_url,
        &app_state.settings.payment.cancel_url,
        user.id,
    )
    .await?;
    Ok(Json(redirect))
}

//----------------------- Implementation --------------------------

pub async fn initiate_checkout(
    pool: &PgPool,
    gateway: &dyn PaymentGateway,
    success_url: &str,
    cancel_url: &str,
    user_id: UserId,
) -> Result<CheckoutRedirect, ClientError> {
    let lines = priced_cart_lines(pool, user_id)
        .await
        .with_context(|| format!("Problem in initiate_checkout({user_id}) reading the cart."))?;

    if lines.is_empty() {
        return Err(StoreError::EmptyCart.into());
    }
    ensure_available(&lines)?;

    let line_items = lines
        .iter()
        .map(|line| {
            let unit_amount_cents = minor_units(line.price)
                .with_context(|| format!("Price of {} overflows minor units.", line.name))?;
            Ok(SessionLineItem {
                name: line.name.clone(),
                unit_amount_cents,
                quantity: i64::from(line.quantity),
            })
        })
        .collect::<Result<Vec<_>, anyhow::Error>>()?;

    let session = gateway
        .create_session(&line_items, success_url, cancel_url)
        .await
        .map_err(|e| {
            warn!("Checkout session creation for {user_id} failed: {e}");
            StoreError::PaymentGateway(e.to_string())
        })?;

    Ok(CheckoutRedirect { url: session.url })
}
