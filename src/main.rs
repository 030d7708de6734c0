use dotenvy::dotenv;
use orders_service::{app_state, build_server, create_pool, run_migrations, Config};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        e
    })?;

    let pool = create_pool(&config.database_url, config.max_db_connections)?;
    run_migrations(&pool).map_err(|e| e as Box<dyn std::error::Error>)?;
    log::info!(
        "connected to postgres (pool size {})",
        config.max_db_connections
    );

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(app_state(pool), &config)?.await?;
    Ok(())
}
