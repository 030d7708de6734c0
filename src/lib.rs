pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::product_catalog::DieselProductCatalog;

pub use config::Config;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub const PATH_PREFIX: &str = "/orders-service";

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        log::info!("applied migration {}", version);
    }
    Ok(())
}

/// Wires the Postgres-backed stores into the service shared by all workers.
pub fn app_state(pool: DbPool) -> web::Data<OrderService> {
    web::Data::new(OrderService::new(
        Arc::new(DieselOrderRepository::new(pool.clone())),
        Arc::new(DieselProductCatalog::new(pool)),
    ))
}

/// Registers the service routes. Expects `web::Data<OrderService>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::{orders, products};

    cfg.service(
        web::scope(PATH_PREFIX)
            .route("/orders", web::post().to(orders::create_order))
            .route("/orders", web::get().to(orders::list_orders))
            .route("/orders/{id}", web::get().to(orders::get_order))
            .route("/orders/{id}", web::put().to(orders::update_order))
            .route("/orders/{id}", web::delete().to(orders::delete_order))
            .route(
                "/orders/{id}/change-status",
                web::patch().to(orders::change_status),
            )
            .route("/products", web::get().to(products::list_products)),
    );
}

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<OrderService>,
    config: &Config,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = openapi::ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new(format!("{PATH_PREFIX}/swagger-ui/{{_:.*}}"))
                    .url(format!("{PATH_PREFIX}/api-docs/openapi.json"), openapi.clone()),
            )
            .configure(configure)
    })
    .client_request_timeout(config.request_timeout)
    .client_disconnect_timeout(config.disconnect_timeout)
    .keep_alive(config.keep_alive)
    .bind((config.host.as_str(), config.port))?
    .run())
}
