// src/bin/test_catalog.rs
use ev_cost::config::AppConfig;
use ev_cost::models::VehicleKind;
use ev_cost::services::catalog::{group_by_segment, vehicles_of_kind, CatalogStore};
use ev_cost::BoxError;
use log::{error, info};
use env_logger;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    info!("Testing vehicle catalog fetch from {:?}...", config.catalog);

    let store = CatalogStore::new(config.catalog, config.catalog_stale_secs);
    let vehicles = match store.vehicles().await {
        Ok(vehicles) => vehicles,
        Err(e) => {
            error!("ERROR: Failed to load catalog: {:#}", e);
            return Err(e.into());
        }
    };
    info!("SUCCESS: {} vehicles in catalog", vehicles.len());

    for kind in [VehicleKind::Ev, VehicleKind::Ice] {
        let selected = vehicles_of_kind(&vehicles, kind);
        println!("{} ({} vehicles)", kind.label(), selected.len());
        for group in group_by_segment(&selected) {
            println!("  {}", group.segment);
            for option in group.vehicles {
                println!("    {:<40} {}", option.label, option.id);
            }
        }
    }

    let unclassified = vehicles.iter().filter(|v| v.kind().is_none()).count();
    if unclassified > 0 {
        info!("{} vehicles have no fuel type and are hidden from both lists", unclassified);
    }

    Ok(())
}
