pub mod models;
pub mod order_repo;
pub mod product_catalog;
