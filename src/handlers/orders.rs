use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::order_service::OrderService;
use crate::domain::order::{ContactDetails, OrderStatus, OrderView, ProductId};
use crate::errors::{AppError, ErrorCode};

use super::products::ProductResponse;
use super::{money, parse_json_body, parse_order_id, run_blocking};

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Body of both order creation and order replacement.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Catalog product ids. Unknown ids are ignored; duplicates collapse.
    pub products: Vec<i32>,
}

impl OrderRequest {
    fn into_parts(self) -> (ContactDetails, Vec<ProductId>) {
        (
            ContactDetails {
                name: self.name,
                address: self.address,
                phone: self.phone,
            },
            self.products,
        )
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeStatusRequest {
    #[schema(value_type = String, example = "confirmed")]
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: i32,
    #[schema(value_type = String, example = "new")]
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: String,
    #[schema(value_type = String)]
    pub status: OrderStatus,
    /// Price of the products at the time the order was placed.
    pub total: f64,
    pub products: Vec<ProductResponse>,
}

impl TryFrom<OrderView> for OrderResponse {
    type Error = AppError;

    fn try_from(order: OrderView) -> Result<Self, Self::Error> {
        let code = ErrorCode::CannotGetOrders;
        Ok(OrderResponse {
            id: order.id,
            name: order.contact.name,
            address: order.contact.address,
            phone: order.contact.phone,
            status: order.status,
            total: money(&order.total, code)?,
            products: order
                .products
                .into_iter()
                .map(|p| ProductResponse::from_product(p, code))
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderAckResponse {
    pub order_id: i32,
    pub details: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusChangedResponse {
    pub order_id: i32,
    #[schema(value_type = String)]
    pub status: OrderStatus,
    pub details: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Creates an order in status `new`. The total is priced from the catalog and
/// the order row and its product links are written in one transaction.
#[utoipa::path(
    post,
    path = "/orders-service/orders",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order created", body = CreateOrderResponse),
        (status = 400, description = "Empty or invalid body"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let (contact, product_ids) = parse_json_body::<OrderRequest>(&body)?.into_parts();

    let created = run_blocking(ErrorCode::CannotCreateOrder, move || {
        service.create_order(contact, product_ids)
    })
    .await?;

    log::info!("created order {}", created.id);
    Ok(HttpResponse::Ok().json(CreateOrderResponse {
        id: created.id,
        status: created.status,
    }))
}

/// GET /orders
///
/// Returns every order with its products.
#[utoipa::path(
    get,
    path = "/orders-service/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders = run_blocking(ErrorCode::CannotGetOrders, move || service.list_orders()).await?;

    let items = orders
        .into_iter()
        .map(OrderResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders-service/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id =
        parse_order_id(&path.into_inner()).ok_or(AppError::NotFound(ErrorCode::OrderNotFound))?;

    let order = run_blocking(ErrorCode::CannotGetOrders, move || {
        service.get_order(order_id)
    })
    .await?;

    match order {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::try_from(order)?)),
        None => Err(AppError::NotFound(ErrorCode::OrderNotFound)),
    }
}

/// PUT /orders/{id}
///
/// Replaces the contact details and the whole product set. The stored total
/// is not repriced.
#[utoipa::path(
    put,
    path = "/orders-service/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderAckResponse),
        (status = 400, description = "Invalid id or body"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order(
    service: web::Data<OrderService>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let order_id = parse_order_id(&path.into_inner())
        .ok_or(AppError::BadRequest(ErrorCode::CannotUpdateOrder))?;
    let (contact, product_ids) = parse_json_body::<OrderRequest>(&body)?.into_parts();

    run_blocking(ErrorCode::CannotUpdateOrder, move || {
        service.update_order(order_id, contact, product_ids)
    })
    .await?;

    log::info!("updated order {}", order_id);
    Ok(HttpResponse::Ok().json(OrderAckResponse {
        order_id,
        details: "updated".to_string(),
    }))
}

/// DELETE /orders/{id}
///
/// Deleting an order that does not exist is not an error.
#[utoipa::path(
    delete,
    path = "/orders-service/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order deleted", body = OrderAckResponse),
        (status = 400, description = "Invalid id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = parse_order_id(&path.into_inner())
        .ok_or(AppError::BadRequest(ErrorCode::CannotDeleteOrder))?;

    let deleted = run_blocking(ErrorCode::CannotDeleteOrder, move || {
        service.delete_order(order_id)
    })
    .await?;

    if deleted {
        log::info!("deleted order {}", order_id);
    } else {
        log::info!("order {} was already absent", order_id);
    }
    Ok(HttpResponse::Ok().json(OrderAckResponse {
        order_id,
        details: "deleted".to_string(),
    }))
}

/// PATCH /orders/{id}/change-status
///
/// Allowed moves: new→confirmed, new→canceled, confirmed→canceled,
/// confirmed→done. Anything else is answered with 404.
#[utoipa::path(
    patch,
    path = "/orders-service/orders/{id}/change-status",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = StatusChangedResponse),
        (status = 400, description = "Invalid id or body"),
        (status = 404, description = "Order not found or transition not allowed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn change_status(
    service: web::Data<OrderService>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let order_id = parse_order_id(&path.into_inner())
        .ok_or(AppError::BadRequest(ErrorCode::CannotUpdateOrder))?;
    let status = parse_json_body::<ChangeStatusRequest>(&body)?.status;

    run_blocking(ErrorCode::CannotUpdateOrder, move || {
        service.change_status(order_id, status)
    })
    .await?;

    log::info!("order {} moved to {}", order_id, status);
    Ok(HttpResponse::Ok().json(StatusChangedResponse {
        order_id,
        status,
        details: "updated".to_string(),
    }))
}
