use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type OrderId = i32;
pub type ProductId = i32;

/// Lifecycle of an order.
///
/// `New` is the only initial state; `Canceled` and `Done` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Confirmed,
    Canceled,
    Done,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status '{0}'")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::Confirmed,
        OrderStatus::Canceled,
        OrderStatus::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Done => "done",
        }
    }

    /// Whether an order currently in `self` may be moved to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (New, Confirmed) | (New, Canceled) | (Confirmed, Canceled) | (Confirmed, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Canceled | OrderStatus::Done)
    }

    /// Statuses from which an order may move into `self`.
    pub fn predecessors(self) -> Vec<OrderStatus> {
        Self::ALL
            .into_iter()
            .filter(|from| from.can_transition_to(self))
            .collect()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedOrder {
    pub id: OrderId,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub id: OrderId,
    pub contact: ContactDetails,
    pub status: OrderStatus,
    /// Sum of product prices at the moment the order was created.
    pub total: BigDecimal,
    pub products: Vec<Product>,
}

/// Sum of the prices of `products`.
pub fn order_total(products: &[Product]) -> BigDecimal {
    products
        .iter()
        .fold(BigDecimal::from(0), |acc, p| acc + &p.price)
}

/// Collapses a requested product list into the sorted set of distinct ids.
pub fn normalize_product_ids(mut ids: Vec<ProductId>) -> Vec<ProductId> {
    ids.sort_unstable();
    ids.dedup();
    ids
}
