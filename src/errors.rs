use std::fmt;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Machine-readable reason carried in the `details` field of error bodies.
///
/// `InvalidStatusTransition` extends the legacy set of codes: it is returned
/// when a status change is not allowed from the order's current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyBody,
    InvalidBody,
    CannotCreateOrder,
    CannotGetOrders,
    OrderNotFound,
    CannotUpdateOrder,
    CannotDeleteOrder,
    CannotGetProducts,
    InvalidStatusTransition,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyBody => "EMPTY_BODY",
            ErrorCode::InvalidBody => "INVALID_BODY",
            ErrorCode::CannotCreateOrder => "CANNOT_CREATE_ORDER",
            ErrorCode::CannotGetOrders => "CANNOT_GET_ORDERS",
            ErrorCode::OrderNotFound => "ORDER_NOT_FOUND",
            ErrorCode::CannotUpdateOrder => "CANNOT_UPDATE_ORDER",
            ErrorCode::CannotDeleteOrder => "CANNOT_DELETE_ORDER",
            ErrorCode::CannotGetProducts => "CANNOT_GET_PRODUCTS",
            ErrorCode::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub details: ErrorCode,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(ErrorCode),

    #[error("Not found: {0}")]
    NotFound(ErrorCode),

    #[error("Internal error ({code}): {message}")]
    Internal { code: ErrorCode, message: String },
}

impl AppError {
    pub fn internal(code: ErrorCode, cause: impl fmt::Display) -> Self {
        AppError::Internal {
            code,
            message: cause.to_string(),
        }
    }

    /// Maps a domain failure of the operation identified by `code`.
    pub fn from_domain(e: DomainError, code: ErrorCode) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound(ErrorCode::OrderNotFound),
            DomainError::InvalidTransition { .. } => {
                AppError::NotFound(ErrorCode::InvalidStatusTransition)
            }
            DomainError::Internal(message) => AppError::Internal { code, message },
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest(code) | AppError::NotFound(code) => *code,
            AppError::Internal { code, .. } => *code,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal { .. } = self {
            log::error!("{}", self);
        }
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            status_code: status.as_u16(),
            details: self.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[test]
    fn bad_request_returns_400() {
        let resp = AppError::BadRequest(ErrorCode::EmptyBody).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound(ErrorCode::OrderNotFound).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::internal(ErrorCode::CannotGetOrders, "connection refused");
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn body_carries_status_code_and_details() {
        let resp = AppError::NotFound(ErrorCode::OrderNotFound).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "statusCode": 404, "details": "ORDER_NOT_FOUND" })
        );
    }

    #[actix_web::test]
    async fn internal_body_hides_the_cause() {
        let resp =
            AppError::internal(ErrorCode::CannotCreateOrder, "password leaked").error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let text = std::str::from_utf8(&body).unwrap();

        assert!(text.contains("CANNOT_CREATE_ORDER"));
        assert!(!text.contains("password"));
    }

    #[test]
    fn serialized_codes_match_as_str() {
        let codes = [
            ErrorCode::EmptyBody,
            ErrorCode::InvalidBody,
            ErrorCode::CannotCreateOrder,
            ErrorCode::CannotGetOrders,
            ErrorCode::OrderNotFound,
            ErrorCode::CannotUpdateOrder,
            ErrorCode::CannotDeleteOrder,
            ErrorCode::CannotGetProducts,
            ErrorCode::InvalidStatusTransition,
        ];
        for code in codes {
            assert_eq!(
                serde_json::to_value(code).unwrap(),
                serde_json::Value::String(code.as_str().to_string())
            );
        }
    }

    #[test]
    fn domain_not_found_maps_to_order_not_found() {
        let app_err = AppError::from_domain(DomainError::NotFound, ErrorCode::CannotUpdateOrder);
        assert!(matches!(app_err, AppError::NotFound(ErrorCode::OrderNotFound)));
    }

    #[test]
    fn domain_invalid_transition_maps_to_404() {
        let app_err = AppError::from_domain(
            DomainError::InvalidTransition {
                from: OrderStatus::Done,
                to: OrderStatus::New,
            },
            ErrorCode::CannotUpdateOrder,
        );
        assert!(matches!(
            app_err,
            AppError::NotFound(ErrorCode::InvalidStatusTransition)
        ));
    }

    #[test]
    fn domain_internal_keeps_operation_code() {
        let app_err = AppError::from_domain(
            DomainError::Internal("oops".to_string()),
            ErrorCode::CannotDeleteOrder,
        );
        assert_eq!(app_err.code(), ErrorCode::CannotDeleteOrder);
        assert_eq!(app_err.to_string(), "Internal error (CANNOT_DELETE_ORDER): oops");
    }
}
