use super::errors::DomainError;
use super::order::{
    ContactDetails, CreatedOrder, OrderId, OrderStatus, OrderView, Product, ProductId,
};

/// Storage for orders and their product sets.
///
/// Every write is all-or-nothing: a failed call leaves no partial rows behind.
pub trait OrderRepository: Send + Sync + 'static {
    /// Creates an order in status `new`. Ids missing from the catalog are
    /// dropped from both the total and the stored product set.
    fn create(
        &self,
        contact: ContactDetails,
        product_ids: Vec<ProductId>,
    ) -> Result<CreatedOrder, DomainError>;

    fn find_by_id(&self, id: OrderId) -> Result<Option<OrderView>, DomainError>;

    fn list(&self) -> Result<Vec<OrderView>, DomainError>;

    /// Replaces the contact details and the whole product set. The total is
    /// left as it was at creation.
    fn update(
        &self,
        id: OrderId,
        contact: ContactDetails,
        product_ids: Vec<ProductId>,
    ) -> Result<(), DomainError>;

    /// Returns `false` when there was nothing to delete.
    fn delete(&self, id: OrderId) -> Result<bool, DomainError>;

    /// Fails with `InvalidTransition` unless the current status may move to
    /// `status`.
    fn change_status(&self, id: OrderId, status: OrderStatus) -> Result<(), DomainError>;
}

pub trait ProductCatalog: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Product>, DomainError>;
}
