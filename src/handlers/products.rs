use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::order_service::OrderService;
use crate::domain::order::Product;
use crate::errors::{AppError, ErrorCode};

use super::{money, run_blocking};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

impl ProductResponse {
    pub(crate) fn from_product(product: Product, code: ErrorCode) -> Result<Self, AppError> {
        Ok(ProductResponse {
            price: money(&product.price, code)?,
            id: product.id,
            name: product.name,
        })
    }
}

/// GET /products
///
/// Returns the whole catalog.
#[utoipa::path(
    get,
    path = "/orders-service/products",
    responses(
        (status = 200, description = "Catalog", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let products =
        run_blocking(ErrorCode::CannotGetProducts, move || service.list_products()).await?;

    let items = products
        .into_iter()
        .map(|p| ProductResponse::from_product(p, ErrorCode::CannotGetProducts))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(items))
}
