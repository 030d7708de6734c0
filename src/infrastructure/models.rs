use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::domain::errors::DomainError;
use crate::domain::order::{ContactDetails, OrderId, OrderView, Product, ProductId};
use crate::schema::{orders, orders_products, products};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: OrderId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub status: String,
    pub total: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub status: &'a str,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = orders_products)]
#[diesel(primary_key(order_id, product_id))]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(belongs_to(ProductRow, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderProductRow {
    pub order_id: OrderId,
    pub product_id: ProductId,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders_products)]
pub struct NewOrderProductRow {
    pub order_id: OrderId,
    pub product_id: ProductId,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}

impl OrderRow {
    /// Assembles the domain view from the order row and the catalog rows
    /// joined through `orders_products`.
    pub fn into_view(self, products: Vec<ProductRow>) -> Result<OrderView, DomainError> {
        Ok(OrderView {
            id: self.id,
            status: self.status.parse()?,
            contact: ContactDetails {
                name: self.name,
                address: self.address,
                phone: self.phone,
            },
            total: self.total,
            products: products.into_iter().map(Product::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;

    fn row(status: &str) -> OrderRow {
        OrderRow {
            id: 3,
            name: "Regina".to_string(),
            address: "test address".to_string(),
            phone: "+79267484433".to_string(),
            status: status.to_string(),
            total: BigDecimal::from(130),
        }
    }

    #[test]
    fn into_view_maps_columns_and_products() {
        let products = vec![ProductRow {
            id: 1,
            name: "хлеб".to_string(),
            price: BigDecimal::from(50),
        }];

        let view = row("confirmed").into_view(products).expect("valid row");

        assert_eq!(view.id, 3);
        assert_eq!(view.status, OrderStatus::Confirmed);
        assert_eq!(view.contact.name, "Regina");
        assert_eq!(view.contact.phone, "+79267484433");
        assert_eq!(view.total, BigDecimal::from(130));
        assert_eq!(view.products.len(), 1);
        assert_eq!(view.products[0].name, "хлеб");
    }

    #[test]
    fn into_view_rejects_unknown_status() {
        let err = row("lost").into_view(vec![]).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
