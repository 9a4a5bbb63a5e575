use crate::core::RecommendError;
use crate::models::ErrorResponse;
use crate::services::{MapsError, StoreError};
use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "Something went wrong!";

/// Error returned by every HTTP handler
///
/// `Internal` details are logged and replaced with a generic message; the
/// other kinds are shown to the caller as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Validation(_) => "validation_error",
            ApiError::Upstream(_) => "upstream_error",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                INTERNAL_MESSAGE.to_string()
            }
            ApiError::Upstream(detail) => {
                tracing::warn!("Upstream error: {}", detail);
                detail.clone()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.kind().to_string(),
            message,
            status_code: self.status_code().as_u16(),
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => {
                ApiError::Validation(format!("Email already registered: {}", email))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            RecommendError::Store(e) => e.into(),
        }
    }
}

impl From<MapsError> for ApiError {
    fn from(err: MapsError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::Validation(format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ApiError::Validation(format!("Invalid query: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[actix_web::test]
    async fn test_internal_error_hides_detail() {
        let err = ApiError::Internal("connection refused on 10.0.0.5".to_string());
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, INTERNAL_MESSAGE);
        assert_eq!(body.status_code, 500);
    }

    #[test]
    fn test_error_mapping() {
        let err: ApiError = StoreError::DuplicateEmail("a@b.c".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: ApiError = RecommendError::UserNotFound("x".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: ApiError = MapsError::RouteNotFound.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Unable to find the route");
    }
}
