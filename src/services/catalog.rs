// src/services/catalog.rs
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use csv::Reader;
use log::{debug, error, info, warn};
use reqwest::Client;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::config::CatalogSource;
use crate::models::{Vehicle, VehicleKind};

/// Segments listed first, in this order. Everything else follows alphabetically.
const SEGMENT_ORDER: [&str; 3] = ["Saloon", "SUV-SMALL", "SUV-LARGE"];

/// Fetch every row of the vehicle table through the Supabase REST endpoint.
pub async fn fetch_supabase_vehicles(
    client: &Client,
    url: &str,
    anon_key: &str,
    table: &str,
) -> Result<Vec<Vehicle>> {
    let endpoint = format!("{}/rest/v1/{}?select=*", url, table);
    info!("Fetching vehicle catalog from {}", endpoint);

    let vehicles = client
        .get(&endpoint)
        .header("apikey", anon_key)
        .header("Authorization", format!("Bearer {}", anon_key))
        .send()
        .await
        .context("vehicle catalog request failed")?
        .error_for_status()
        .context("vehicle catalog request was rejected")?
        .json::<Vec<serde_json::Value>>()
        .await
        .context("vehicle catalog response was not a JSON list")?;

    let vehicles = decode_json_rows(vehicles);
    info!("Fetched {} vehicles", vehicles.len());
    Ok(vehicles)
}

/// Decode rows one at a time so a single malformed row is dropped instead of the whole table.
fn decode_json_rows(rows: Vec<serde_json::Value>) -> Vec<Vehicle> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<Vehicle>(row) {
            Ok(vehicle) => Some(vehicle),
            Err(e) => {
                warn!("Skipping vehicle row {}: {}", index, e);
                None
            }
        })
        .collect()
}

/// Load a catalog exported as CSV (by extension) or as a JSON array.
pub fn load_vehicles_from_file(path: &Path) -> Result<Vec<Vehicle>> {
    info!("Loading vehicle catalog from {}", path.display());
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let vehicles = if is_csv {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let mut rdr = Reader::from_reader(file);
        rdr.deserialize::<Vehicle>()
            .enumerate()
            .filter_map(|(index, row)| match row {
                Ok(vehicle) => Some(vehicle),
                Err(e) => {
                    warn!("Skipping vehicle row {} in {}: {}", index, path.display(), e);
                    None
                }
            })
            .collect()
    } else {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let rows = serde_json::from_str::<Vec<serde_json::Value>>(&text)
            .with_context(|| format!("{} is not a JSON list", path.display()))?;
        decode_json_rows(rows)
    };

    info!("Loaded {} vehicles", vehicles.len());
    Ok(vehicles)
}

#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub vehicles: Arc<Vec<Vehicle>>,
    pub fetched_at: DateTime<Utc>,
}

/// Holds the last catalog read and refreshes it once it goes stale.
/// A store built from fixed vehicles never refreshes.
pub struct CatalogStore {
    source: Option<CatalogSource>,
    client: Client,
    stale_after: Duration,
    snapshot: RwLock<Option<CatalogSnapshot>>,
    refresh_lock: Mutex<()>,
}

impl CatalogStore {
    pub fn new(source: CatalogSource, stale_secs: i64) -> Self {
        CatalogStore {
            source: Some(source),
            client: Client::new(),
            stale_after: Duration::seconds(stale_secs),
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Self {
        CatalogStore {
            source: None,
            client: Client::new(),
            stale_after: Duration::zero(),
            snapshot: RwLock::new(Some(CatalogSnapshot {
                vehicles: Arc::new(vehicles),
                fetched_at: Utc::now(),
            })),
            refresh_lock: Mutex::new(()),
        }
    }

    async fn load(&self, source: &CatalogSource) -> Result<Vec<Vehicle>> {
        match source {
            CatalogSource::Supabase { url, anon_key, table } => {
                fetch_supabase_vehicles(&self.client, url, anon_key, table).await
            }
            CatalogSource::File(path) => load_vehicles_from_file(path),
        }
    }

    fn is_fresh(&self, snapshot: &CatalogSnapshot) -> bool {
        Utc::now() - snapshot.fetched_at < self.stale_after
    }

    /// Current vehicles, refreshed first when the snapshot is older than the stale time.
    /// A failed refresh falls back to the previous snapshot if there is one.
    /// Only one refresh runs at a time; waiters reuse its result.
    pub async fn vehicles(&self) -> Result<Arc<Vec<Vehicle>>> {
        let Some(source) = &self.source else {
            let current = self.snapshot.read().await.clone();
            return Ok(current.map(|s| s.vehicles).unwrap_or_default());
        };

        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            if self.is_fresh(snapshot) {
                debug!("Serving catalog snapshot from {}", snapshot.fetched_at);
                return Ok(snapshot.vehicles.clone());
            }
        }

        let _refreshing = self.refresh_lock.lock().await;

        // Another request may have refreshed while this one waited.
        let current = self.snapshot.read().await.clone();
        if let Some(snapshot) = &current {
            if self.is_fresh(snapshot) {
                return Ok(snapshot.vehicles.clone());
            }
            info!("Catalog snapshot from {} is stale, refreshing", snapshot.fetched_at);
        }

        match self.load(source).await {
            Ok(vehicles) => {
                let vehicles = Arc::new(vehicles);
                *self.snapshot.write().await = Some(CatalogSnapshot {
                    vehicles: vehicles.clone(),
                    fetched_at: Utc::now(),
                });
                Ok(vehicles)
            }
            Err(e) => match current {
                Some(snapshot) => {
                    warn!("Catalog refresh failed, keeping previous snapshot: {:#}", e);
                    Ok(snapshot.vehicles)
                }
                None => {
                    error!("Catalog unavailable: {:#}", e);
                    Err(e)
                }
            },
        }
    }
}

pub fn vehicles_of_kind(vehicles: &[Vehicle], kind: VehicleKind) -> Vec<&Vehicle> {
    vehicles.iter().filter(|v| v.kind() == Some(kind)).collect()
}

pub fn find_vehicle<'a>(vehicles: &'a [Vehicle], id: &str) -> Option<&'a Vehicle> {
    vehicles.iter().find(|v| v.id == id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentGroup {
    pub segment: String,
    pub vehicles: Vec<VehicleOption>,
}

/// Selection list grouped by segment. Catalog order is kept inside a group.
pub fn group_by_segment(vehicles: &[&Vehicle]) -> Vec<SegmentGroup> {
    let mut groups: Vec<SegmentGroup> = Vec::new();
    for vehicle in vehicles {
        let segment = vehicle.segment_or_other();
        let option = VehicleOption {
            id: vehicle.id.clone(),
            label: vehicle.display_name(),
        };
        match groups.iter_mut().find(|g| g.segment == segment) {
            Some(group) => group.vehicles.push(option),
            None => groups.push(SegmentGroup {
                segment: segment.to_string(),
                vehicles: vec![option],
            }),
        }
    }

    groups.sort_by(|a, b| {
        let rank = |segment: &str| SEGMENT_ORDER.iter().position(|s| *s == segment);
        match (rank(&a.segment), rank(&b.segment)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.segment.cmp(&b.segment),
        }
    });
    groups
}
