use dotenv::dotenv;
use env_logger;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use ev_cost::config::AppConfig;
use ev_cost::handlers::AppState;
use ev_cost::routes;
use ev_cost::services::catalog::CatalogStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("Using PORT: {}", config.port);

    let catalog = CatalogStore::new(config.catalog.clone(), config.catalog_stale_secs);
    // Warm the snapshot; requests retry on their own if this fails.
    match catalog.vehicles().await {
        Ok(vehicles) => info!("Catalog ready with {} vehicles", vehicles.len()),
        Err(e) => error!("Initial catalog load failed: {:#}", e),
    }

    let state = Arc::new(AppState {
        catalog,
        cost: config.cost,
    });

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    let api = routes::routes(state).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
