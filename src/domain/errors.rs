use thiserror::Error;

use super::order::{OrderStatus, UnknownStatus};

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found")]
    NotFound,
    #[error("Cannot change order status from '{from}' to '{to}'")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UnknownStatus> for DomainError {
    fn from(e: UnknownStatus) -> Self {
        DomainError::Internal(e.to_string())
    }
}
