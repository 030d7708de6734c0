use actix_web::web;
use bigdecimal::{BigDecimal, ToPrimitive};
use serde::de::DeserializeOwned;

use crate::domain::errors::DomainError;
use crate::domain::order::OrderId;
use crate::errors::{AppError, ErrorCode};

pub mod orders;
pub mod products;

/// Decodes a JSON request body. Any `Content-Type` is accepted.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        log::warn!("rejecting request with empty body");
        return Err(AppError::BadRequest(ErrorCode::EmptyBody));
    }
    serde_json::from_slice(body).map_err(|e| {
        log::warn!("rejecting request body: {}", e);
        AppError::BadRequest(ErrorCode::InvalidBody)
    })
}

/// Order ids are positive integers; anything else does not name an order.
pub(crate) fn parse_order_id(raw: &str) -> Option<OrderId> {
    raw.parse::<OrderId>().ok().filter(|id| *id > 0)
}

/// Runs a synchronous store call on the blocking pool.
pub(crate) async fn run_blocking<T, F>(code: ErrorCode, f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::internal(code, e))?
        .map_err(|e| AppError::from_domain(e, code))
}

/// Converts a stored amount to its wire form. An amount that has no finite
/// `f64` value fails the request under `code` instead of being reported as 0.
pub(crate) fn money(value: &BigDecimal, code: ErrorCode) -> Result<f64, AppError> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::internal(code, format!("amount {} is out of range", value)))
}
