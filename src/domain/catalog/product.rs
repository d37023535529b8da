//! Product model and validated admin input.

use rust_decimal::Decimal;

use crate::domain::ProductId;
use crate::infra::ClientError;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Product input that has passed validation. Raw form data is never turned
/// into a persisted row directly; construction rejects on the first violated
/// invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl TryFrom<ProductPayload> for ProductInput {
    type Error = ClientError;

    fn try_from(payload: ProductPayload) -> Result<Self, Self::Error> {
        let name = payload.name.trim().to_owned();
        if name.is_empty() {
            return Err(ClientError::Payload(
                "Product name must not be empty.".to_owned(),
            ));
        }
        if payload.price < Decimal::ZERO {
            return Err(ClientError::Payload(
                "Price must not be negative.".to_owned(),
            ));
        }
        if payload.stock < 0 {
            return Err(ClientError::Payload(
                "Stock must not be negative.".to_owned(),
            ));
        }
        Ok(Self {
            name,
            description: payload.description.unwrap_or_default(),
            price: payload.price,
            stock: payload.stock,
            image_url: payload.image_url,
            category: payload.category,
        })
    }
}

//-------------------------- Tests -------------------------------
