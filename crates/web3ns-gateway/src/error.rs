//! Error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use web3ns_ccip::{ErrorBody, ErrorKind};

/// Any failure a handler can return
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// CCIP gateway failure
    #[error(transparent)]
    Ccip(#[from] web3ns_ccip::Error),

    /// Lookup failure
    #[error(transparent)]
    Lookup(#[from] web3ns_lookup::Error),
}

impl ApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Ccip(e) => e.kind(),
            ApiError::Lookup(e) => e.kind(),
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Ccip(e) => e.to_body(),
            ApiError::Lookup(e) => e.to_body(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        if kind == ErrorKind::InternalError {
            tracing::error!("Request failed: {}", self);
        }

        let status =
            StatusCode::from_u16(kind.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}
