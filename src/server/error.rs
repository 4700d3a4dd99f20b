//! The uniform `{success, error, message}` envelope for every non-2xx response.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::telemetry::ERROR_RESPONSES;

const NOT_FOUND_MESSAGE: &str = "The requested URL was not found on the server. \
If you entered the URL manually please check your spelling and try again.";
const METHOD_NOT_ALLOWED_MESSAGE: &str = "The method is not allowed for the requested URL.";
const INTERNAL_ERROR_MESSAGE: &str = "The server encountered an internal error and was unable \
to complete your request. Either the server is overloaded or there is an error in the application.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("unprocessable request: {0}")]
    Unprocessable(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::NotFound => NOT_FOUND_MESSAGE.to_owned(),
            Self::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE.to_owned(),
            Self::Unprocessable(detail) => {
                tracing::debug!("Rejected request: {detail}");
                detail
            }
            // the cause stays in the log, the client gets the generic text
            Self::Database(err) => {
                tracing::error!("Database error: {err}");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
            Self::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
        };
        ERROR_RESPONSES.with_label_values(&[status.as_str()]).inc();

        let body = ErrorEnvelope {
            success: false,
            error: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

// A path segment that does not parse simply does not match the route.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => Self::NotFound,
            other => Self::Internal(other.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn envelope(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = envelope(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 404);
        assert_eq!(body["message"], NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn unprocessable_keeps_detail() {
        let (status, body) = envelope(ApiError::Unprocessable("missing field `answer`".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "missing field `answer`");
    }

    #[tokio::test]
    async fn database_error_hides_cause() {
        let (status, body) = envelope(ApiError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], 500);
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn method_not_allowed_is_405() {
        let (status, body) = envelope(ApiError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], 405);
    }
}
