//! Payment gateway boundary: a hosted checkout session provider.
//!
//! The storefront never touches card data. It asks the provider for a hosted
//! session, redirects the shopper to it, and receives control back on the
//! success and cancel routes.

use async_trait::async_trait;
use std::sync::Arc;

use crate::infra::PaymentSettings;

/// One line of a hosted checkout session, priced in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionLineItem {
    pub name: String,
    pub unit_amount_cents: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment gateway keys are not configured.")]
    NotConfigured,
    #[error("Payment gateway request failed: {0}")]
    Request(String),
    #[error("Payment gateway returned an unexpected response: {0}")]
    UnexpectedResponse(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_session(
        &self,
        line_items: &[SessionLineItem],
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, PaymentError>;
}

pub type PaymentGatewayHandle = Arc<dyn PaymentGateway>;

//----------------------- Implementation --------------------------

/// Production gateway client. Speaks the Stripe-style form-encoded checkout
/// session API with the configured secret key.
pub struct HostedCheckoutClient {
    http: reqwest::Client,
    settings: PaymentSettings,
}

impl HostedCheckoutClient {
    pub fn new(settings: PaymentSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl PaymentGateway for HostedCheckoutClient {
    async fn create_session(
        &self,
        line_items: &[SessionLineItem],
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, PaymentError> {
        if !self.settings.is_configured() {
            return Err(PaymentError::NotConfigured);
        }

        let mut form: Vec<(String, String)> = vec![
            ("mode".to_owned(), "payment".to_owned()),
            ("success_url".to_owned(), success_url.to_owned()),
            ("cancel_url".to_owned(), cancel_url.to_owned()),
        ];
        for (i, item) in line_items.iter().enumerate() {
            form.push((
                format!("line_items[{i}][price_data][currency]"),
                "usd".to_owned(),
            ));
            form.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                item.name.clone(),
            ));
            form.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                item.unit_amount_cents.to_string(),
            ));
            form.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
        }

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.settings.api_base))
            .bearer_auth(&self.settings.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| PaymentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::UnexpectedResponse(format!(
                "status {}",
                response.status()
            )));
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| PaymentError::UnexpectedResponse(e.to_string()))
    }
}
