use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::StoreError;
use crate::services::openweather::ProviderError;
use crate::services::validation::ValidationError;

/// User-facing message for every 500 response. Details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";

/// User-facing message when the provider lookup fails for any reason.
pub const PROVIDER_FAILURE_MESSAGE: &str = "City not found or API error";

/// Standard error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Build a `{ "error": ... }` response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(ErrorResponse::new(message))).into_response()
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // The provider client already logged the failure with its city and lang.
            AppError::Provider(_) => (StatusCode::NOT_FOUND, PROVIDER_FAILURE_MESSAGE.to_string()),
            AppError::Persistence(err) => {
                tracing::error!("Persistence error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        error_response(status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use tracing_subscriber::layer::SubscriberExt;

    use crate::services::test_support::WarnCounter;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let (status, body) = body_of(ValidationError::MissingCityName.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "city_name parameter is required");
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_found() {
        let (status, body) = body_of(ProviderError::Status(401).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], PROVIDER_FAILURE_MESSAGE);
    }

    #[test]
    fn test_provider_failure_is_not_logged_again() {
        let counter = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        let response = tracing::subscriber::with_default(subscriber, || {
            AppError::from(ProviderError::Status(404)).into_response()
        });
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(counter.count(), 0);
    }

    #[tokio::test]
    async fn test_persistence_details_are_not_leaked() {
        let err = AppError::Persistence(StoreError::Database(sqlx::Error::PoolTimedOut));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }
}
