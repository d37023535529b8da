use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::StoreError;

/// Errors surfaced to HTTP clients. Domain failures become the message the
/// shopper sees; everything else is logged server-side and reported
/// generically.
#[derive(Debug)]
pub enum ClientError {
    Domain(StoreError),
    Payload(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        #[derive(serde::Serialize)]
        struct ErrorResponse {
            message: String,
        }

        let (status, message) = match self {
            ClientError::Domain(store_error) => {
                (store_error.status_code(), store_error.to_string())
            }
            ClientError::Payload(message) => (StatusCode::BAD_REQUEST, message),
            ClientError::Internal(error) => {
                tracing::error!("Internal error: {error:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Please ask your system administrator to check the logs.".to_owned(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<StoreError> for ClientError {
    fn from(store_error: StoreError) -> Self {
        ClientError::Domain(store_error)
    }
}

impl From<anyhow::Error> for ClientError {
    fn from(value: anyhow::Error) -> Self {
        ClientError::Internal(value)
    }
}

impl From<sqlx::Error> for ClientError {
    fn from(value: sqlx::Error) -> Self {
        ClientError::Internal(anyhow::Error::new(value))
    }
}
