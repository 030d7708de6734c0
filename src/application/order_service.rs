use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    normalize_product_ids, ContactDetails, CreatedOrder, OrderId, OrderStatus, OrderView, Product,
    ProductId,
};
use crate::domain::ports::{OrderRepository, ProductCatalog};

/// Entry point used by the HTTP handlers. Cheap to share across workers.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    catalog: Arc<dyn ProductCatalog>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { orders, catalog }
    }

    pub fn create_order(
        &self,
        contact: ContactDetails,
        product_ids: Vec<ProductId>,
    ) -> Result<CreatedOrder, DomainError> {
        self.orders.create(contact, normalize_product_ids(product_ids))
    }

    pub fn get_order(&self, id: OrderId) -> Result<Option<OrderView>, DomainError> {
        self.orders.find_by_id(id)
    }

    pub fn list_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        self.orders.list()
    }

    pub fn update_order(
        &self,
        id: OrderId,
        contact: ContactDetails,
        product_ids: Vec<ProductId>,
    ) -> Result<(), DomainError> {
        self.orders.update(id, contact, normalize_product_ids(product_ids))
    }

    pub fn delete_order(&self, id: OrderId) -> Result<bool, DomainError> {
        self.orders.delete(id)
    }

    pub fn change_status(&self, id: OrderId, status: OrderStatus) -> Result<(), DomainError> {
        self.orders.change_status(id, status)
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.catalog.list()
    }
}
