use axum::http::StatusCode;

/// Domain failures surfaced to shoppers. Each maps to an HTTP status at the
/// request boundary; none of them leak internals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Not enough stock for {product_name}.")]
    InsufficientStock { product_name: String },
    #[error("This product is out of stock.")]
    OutOfStock,
    #[error("Reached available stock limit.")]
    StockLimitReached,
    #[error("Your cart is empty.")]
    EmptyCart,
    #[error("Unauthorized.")]
    Unauthorized,
    #[error("Payment failed. Please try again.")]
    PaymentGateway(String),
    #[error("{0} not found.")]
    NotFound(&'static str),
    #[error("Email already registered.")]
    EmailTaken,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Login required.")]
    LoginRequired,
    #[error("Product already in your wishlist.")]
    AlreadyInWishlist,
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::InsufficientStock { .. }
            | StoreError::OutOfStock
            | StoreError::StockLimitReached
            | StoreError::EmptyCart => StatusCode::BAD_REQUEST,
            StoreError::Unauthorized => StatusCode::FORBIDDEN,
            StoreError::PaymentGateway(_) => StatusCode::BAD_GATEWAY,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::EmailTaken | StoreError::AlreadyInWishlist => StatusCode::CONFLICT,
            StoreError::InvalidCredentials | StoreError::LoginRequired => {
                StatusCode::UNAUTHORIZED
            }
        }
    }
}
