use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    order_total, ContactDetails, CreatedOrder, OrderId, OrderStatus, OrderView, Product, ProductId,
};
use crate::domain::ports::OrderRepository;
use crate::schema::{orders, orders_products, products};

use super::models::{NewOrderProductRow, NewOrderRow, OrderProductRow, OrderRow, ProductRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Shared queries ───────────────────────────────────────────────────────────

/// Catalog rows for `ids`. Ids with no catalog entry are simply absent.
fn load_catalog_rows(
    conn: &mut PgConnection,
    ids: &[ProductId],
) -> QueryResult<Vec<ProductRow>> {
    products::table
        .filter(products::id.eq_any(ids))
        .order(products::id)
        .select(ProductRow::as_select())
        .load(conn)
}

fn insert_links(
    conn: &mut PgConnection,
    order_id: OrderId,
    product_ids: impl IntoIterator<Item = ProductId>,
) -> QueryResult<usize> {
    let links: Vec<NewOrderProductRow> = product_ids
        .into_iter()
        .map(|product_id| NewOrderProductRow {
            order_id,
            product_id,
        })
        .collect();
    if links.is_empty() {
        return Ok(0);
    }
    diesel::insert_into(orders_products::table)
        .values(&links)
        .execute(conn)
}

/// Resolves the product lists of `orders` through the join table.
fn attach_products(
    conn: &mut PgConnection,
    orders: Vec<OrderRow>,
) -> Result<Vec<OrderView>, DomainError> {
    let links: Vec<(OrderProductRow, ProductRow)> = OrderProductRow::belonging_to(&orders)
        .inner_join(products::table)
        .order(orders_products::product_id)
        .select((OrderProductRow::as_select(), ProductRow::as_select()))
        .load(conn)?;

    links
        .grouped_by(&orders)
        .into_iter()
        .zip(orders)
        .map(|(links, order)| order.into_view(links.into_iter().map(|(_, p)| p).collect()))
        .collect()
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(
        &self,
        contact: ContactDetails,
        product_ids: Vec<ProductId>,
    ) -> Result<CreatedOrder, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Price the order from the catalog; unknown ids drop out here.
            let catalog: Vec<Product> = load_catalog_rows(conn, &product_ids)?
                .into_iter()
                .map(Product::from)
                .collect();

            // 2. Insert the order
            let (id, status): (OrderId, String) = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    name: &contact.name,
                    address: &contact.address,
                    phone: &contact.phone,
                    status: OrderStatus::New.as_str(),
                    total: order_total(&catalog),
                })
                .returning((orders::id, orders::status))
                .get_result(conn)?;

            // 3. Link the order to the products that exist
            insert_links(conn, id, catalog.iter().map(|p| p.id))?;

            Ok(CreatedOrder {
                id,
                status: status.parse()?,
            })
        })
    }

    fn find_by_id(&self, id: OrderId) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        Ok(attach_products(&mut conn, vec![order])?.pop())
    }

    fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let rows = orders::table
                .select(OrderRow::as_select())
                .order(orders::id)
                .load(conn)?;

            attach_products(conn, rows)
        })
    }

    fn update(
        &self,
        id: OrderId,
        contact: ContactDetails,
        product_ids: Vec<ProductId>,
    ) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let affected = diesel::update(orders::table.find(id))
                .set((
                    orders::name.eq(&contact.name),
                    orders::address.eq(&contact.address),
                    orders::phone.eq(&contact.phone),
                ))
                .execute(conn)?;
            if affected == 0 {
                return Err(DomainError::NotFound);
            }

            diesel::delete(orders_products::table.filter(orders_products::order_id.eq(id)))
                .execute(conn)?;

            let known: Vec<ProductId> = products::table
                .filter(products::id.eq_any(&product_ids))
                .select(products::id)
                .load(conn)?;
            insert_links(conn, id, known)?;

            Ok(())
        })
    }

    fn delete(&self, id: OrderId) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::delete(orders_products::table.filter(orders_products::order_id.eq(id)))
                .execute(conn)?;
            let deleted = diesel::delete(orders::table.find(id)).execute(conn)?;
            Ok(deleted > 0)
        })
    }

    fn change_status(&self, id: OrderId, status: OrderStatus) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let allowed_from: Vec<&'static str> = status
            .predecessors()
            .into_iter()
            .map(OrderStatus::as_str)
            .collect();

        conn.transaction::<_, DomainError, _>(|conn| {
            // The guard on the current status keeps the check and the write in
            // one statement.
            let affected = diesel::update(
                orders::table
                    .filter(orders::id.eq(id))
                    .filter(orders::status.eq_any(allowed_from)),
            )
            .set(orders::status.eq(status.as_str()))
            .execute(conn)?;
            if affected > 0 {
                return Ok(());
            }

            let current: Option<String> = orders::table
                .find(id)
                .select(orders::status)
                .first(conn)
                .optional()?;
            let Some(current) = current else {
                return Err(DomainError::NotFound);
            };
            let from: OrderStatus = current.parse()?;
            if from.is_terminal() {
                log::info!("order {} is already {} and can no longer change", id, from);
            }
            Err(DomainError::InvalidTransition { from, to: status })
        })
    }
}
