use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::Product;
use crate::domain::ports::ProductCatalog;
use crate::schema::products;

use super::models::ProductRow;

pub struct DieselProductCatalog {
    pool: DbPool,
}

impl DieselProductCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductCatalog for DieselProductCatalog {
    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::id)
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::DieselProductCatalog;
    use crate::domain::ports::ProductCatalog;
    use crate::infrastructure::order_repo::tests::setup_db;

    #[tokio::test]
    async fn list_returns_seeded_catalog() {
        let (_container, pool) = setup_db().await;
        let catalog = DieselProductCatalog::new(pool);

        let products = catalog.list().expect("list failed");

        assert_eq!(products.len(), 10);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].price, bigdecimal::BigDecimal::from(50));
    }
}
