use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Orders service", description = "Orders placed against a fixed product catalog"),
    paths(
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,
        handlers::orders::change_status,
        handlers::products::list_products,
    ),
    tags(
        (name = "orders", description = "Order lifecycle"),
        (name = "products", description = "Read-only catalog"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/orders-service/orders",
            "/orders-service/orders/{id}",
            "/orders-service/orders/{id}/change-status",
            "/orders-service/products",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
