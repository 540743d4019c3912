//! Maps application errors onto HTTP status codes.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::response::ErrorResponse;
use crate::domain::identity::AuthError;
use crate::domain::ordering::OrderError;

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Order placement or lifecycle failure.
    Order(OrderError),
    /// Login or credential failure.
    Auth(AuthError),
    /// Body could not be parsed.
    BadRequest(String),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Order(err) => match err {
                OrderError::Validation { .. }
                | OrderError::InvalidStatus { .. }
                | OrderError::IllegalTransition { .. }
                | OrderError::OrderClosed { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                OrderError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "Order not found".to_string())
                }
                OrderError::DuplicateOrderId { .. } | OrderError::Store(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
                AuthError::Unauthenticated { .. } => {
                    (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
                }
                AuthError::Internal { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self::Order(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = ?self, "Request rejected");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ordering::{OrderStatus, StoreError};
    use test_case::test_case;

    #[test_case(OrderError::validation("items", "empty cart"), StatusCode::BAD_REQUEST ; "validation")]
    #[test_case(OrderError::InvalidStatus { value: "x".into() }, StatusCode::BAD_REQUEST ; "invalid status")]
    #[test_case(OrderError::OrderClosed { status: OrderStatus::Delivered }, StatusCode::BAD_REQUEST ; "closed")]
    #[test_case(OrderError::not_found("o-1"), StatusCode::NOT_FOUND ; "not found")]
    #[test_case(OrderError::Store(StoreError::Unavailable { message: "down".into() }), StatusCode::INTERNAL_SERVER_ERROR ; "store")]
    fn order_errors_map_to_status(err: OrderError, expected: StatusCode) {
        assert_eq!(ApiError::from(err).status_and_message().0, expected);
    }

    #[test]
    fn not_found_body_hides_the_id() {
        let (_, message) = ApiError::from(OrderError::not_found("o-1")).status_and_message();
        assert_eq!(message, "Order not found");
    }

    #[test]
    fn auth_errors_are_unauthorized() {
        let (status, message) = ApiError::from(AuthError::InvalidCredentials).status_and_message();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Invalid credentials");

        let (status, message) =
            ApiError::from(AuthError::unauthenticated("expired")).status_and_message();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Unauthorized");
    }

    #[test]
    fn store_details_are_not_leaked() {
        let err = OrderError::Store(StoreError::Timeout {
            operation: "create",
            timeout_ms: 500,
        });
        let (_, message) = ApiError::from(err).status_and_message();
        assert_eq!(message, "Internal server error");
    }
}
