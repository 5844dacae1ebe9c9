//! API error types and their HTTP status mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use engine::EngineError;

/// Errors a request handler can return
///
/// Every variant renders as the `{"error": "..."}` envelope the clients
/// expect; the variant decides the status code.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request rejected before touching any state
    #[error("{message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            ApiError::Engine(e) => {
                let status = match &e {
                    EngineError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                    EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
                    EngineError::ProviderError { .. } => StatusCode::BAD_GATEWAY,
                    EngineError::ExportError { .. } | EngineError::JoinError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
        };

        if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            warn!("⚠️ Request failed with {status}: {message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ProviderFailure;

    #[test]
    fn test_status_mapping() {
        let bad = ApiError::bad_request("itemIds and provider are required");
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);

        let validation: ApiError = EngineError::validation("No failed items to retry").into();
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);

        let missing: ApiError = EngineError::NotFound { entity: "Batch", id: "x".into() }.into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let provider: ApiError = EngineError::ProviderError {
            provider: "openai".into(),
            reason: ProviderFailure::RateLimitExceeded,
        }
        .into();
        assert_eq!(provider.into_response().status(), StatusCode::BAD_GATEWAY);

        let export: ApiError = EngineError::export("doc create failed").into();
        assert_eq!(export.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
