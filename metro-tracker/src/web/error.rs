//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::deeplink::DeepLinkError;
use crate::store::StoreError;

use super::dto::ErrorResponse;

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// An interactive refresh is already running
    #[error("a refresh is already in progress")]
    Busy,

    /// The departure source failed
    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DeepLinkError> for WebError {
    fn from(e: DeepLinkError) -> Self {
        WebError::BadRequest(e.to_string())
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Busy => StatusCode::CONFLICT,
            WebError::Upstream(_) => StatusCode::BAD_GATEWAY,
            WebError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(WebError::Busy.status(), StatusCode::CONFLICT);
        assert_eq!(
            WebError::Upstream("Network connection failed".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            WebError::from(DeepLinkError::MissingStation).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::from(StoreError::InvalidKey("..".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
