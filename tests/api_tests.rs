use std::sync::Arc;

use ev_cost::config::CostConfig;
use ev_cost::handlers::AppState;
use ev_cost::models::Vehicle;
use ev_cost::routes::routes;
use ev_cost::services::catalog::CatalogStore;
use serde_json::Value;
use warp::http::StatusCode;

fn catalog() -> Vec<Vehicle> {
    serde_json::from_value(serde_json::json!([
        {
            "uuid": "tesla-3",
            "make": "Tesla",
            "model": "Model 3",
            "type": "Saloon",
            "msrp_gbp": 39990,
            "lease_monthly": 310,
            "max_range": 220,
            "battery_size": 60,
            "efficiency_mpkwh": 4,
            "efficiency_mpg": null,
            "segment": "Saloon",
            "depreciation_band": null,
            "maintenance_gbp_per_year": 300,
            "fuel_type": "Electric"
        },
        {
            "uuid": "kia-ev3",
            "make": "Kia",
            "model": "EV3",
            "msrp_gbp": 32995,
            "lease_monthly": null,
            "efficiency_mpkwh": null,
            "segment": "SUV-SMALL",
            "maintenance_gbp_per_year": 240,
            "fuel_type": "electric"
        },
        {
            "uuid": "merc-c",
            "make": "Mercedes",
            "model": "C-Class",
            "msrp_gbp": 38000,
            "efficiency_mpg": 30,
            "segment": "Saloon",
            "depreciation_band": "high",
            "maintenance_gbp_per_year": 720,
            "fuel_type": "Petrol"
        },
        {
            "uuid": "volvo-xc90",
            "make": "Volvo",
            "model": "XC90",
            "msrp_gbp": 65000,
            "efficiency_mpg": 35,
            "segment": "SUV-LARGE",
            "depreciation_band": "low",
            "maintenance_gbp_per_year": 900,
            "fuel_type": "Diesel"
        }
    ]))
    .expect("valid catalog")
}

fn state_with(vehicles: Vec<Vehicle>) -> Arc<AppState> {
    Arc::new(AppState {
        catalog: CatalogStore::from_vehicles(vehicles),
        cost: CostConfig::default(),
    })
}

async fn get(state: Arc<AppState>, path: &str) -> (StatusCode, Value) {
    let api = routes(state);
    let resp = warp::test::request().method("GET").path(path).reply(&api).await;
    let body: Value = serde_json::from_slice(resp.body()).expect("json body");
    (resp.status(), body)
}

#[tokio::test]
async fn ev_lease_cost_matches_worked_example() {
    let (status, body) = get(
        state_with(catalog()),
        "/api/v1/cost?vehicle_id=tesla-3&period=36&mode=lease&electricity_price=0.30&currency=GBP",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "computed");
    assert_eq!(body["outcome"]["total"], 14328.0);
    assert_eq!(body["outcome"]["line_items"][1]["label"], "Electricity");
    assert_eq!(body["outcome"]["line_items"][1]["monthly"], 63.0);
    assert_eq!(body["display"]["total_text"], "£14,328");
}

#[tokio::test]
async fn ice_buy_reports_resale_and_depreciation() {
    let (status, body) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=merc-c&period=36").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["mode"], "buy");
    assert_eq!(body["outcome"]["resale_value"], 22800.0);
    assert_eq!(body["outcome"]["depreciation"], 15200.0);
    assert_eq!(body["display"]["band_text"], "high (40% drop)");
}

#[tokio::test]
async fn unsupported_mode_is_not_a_total() {
    let (status, body) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=tesla-3&mode=buy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "unsupported");
    assert!(body["outcome"].get("total").is_none());
    assert!(body["display"].is_null());

    let (_, body) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=merc-c&mode=lease").await;
    assert_eq!(body["outcome"]["status"], "unsupported");
}

#[tokio::test]
async fn empty_selection_is_a_placeholder() {
    let (status, body) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=&kind=ice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "no_selection");
    assert_eq!(body["outcome"]["kind"], "ice");
}

#[tokio::test]
async fn rejects_bad_inputs() {
    let (status, body) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=tesla-3&period=12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("period"));

    let (status, _) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=tesla-3&kind=ice").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=merc-c&fuel_price=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=merc-c&currency=JPY").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dollar_prices_are_per_gallon() {
    let (status, body) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=merc-c&currency=USD").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["total"], 20132.0);
    assert_eq!(body["display"]["currency"], "USD");
    assert_eq!(body["display"]["total_text"], "$25,568");
}

#[tokio::test]
async fn currency_code_is_case_insensitive() {
    let (status, body) = get(state_with(catalog()), "/api/v1/cost?vehicle_id=merc-c&currency=gbp").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["total"], 23948.0);
    assert_eq!(body["display"]["total_text"], "£23,948");

    let (status, body) = get(state_with(catalog()), "/api/v1/convert?amount=100&from=gbp&to=eur").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["to"], "EUR");
}

#[tokio::test]
async fn lists_evs_grouped_by_segment() {
    let (status, body) = get(state_with(catalog()), "/api/v1/vehicles?kind=ev").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["groups"][0]["segment"], "Saloon");
    assert_eq!(body["groups"][0]["vehicles"][0]["label"], "Tesla Model 3");
    assert_eq!(body["groups"][1]["segment"], "SUV-SMALL");

    let (_, body) = get(state_with(catalog()), "/api/v1/vehicles?kind=ice").await;
    let segments: Vec<&str> = body["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["segment"].as_str().unwrap())
        .collect();
    assert_eq!(segments, vec!["Saloon", "SUV-LARGE"]);
}

#[tokio::test]
async fn empty_catalog_lists_nothing() {
    let (status, body) = get(state_with(Vec::new()), "/api/v1/vehicles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["groups"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn fetches_single_vehicle() {
    let (status, body) = get(state_with(catalog()), "/api/v1/vehicles/volvo-xc90").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uuid"], "volvo-xc90");
    assert_eq!(body["msrp_gbp"], 65000.0);

    let (status, _) = get(state_with(catalog()), "/api/v1/vehicles/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn compares_both_sides() {
    let (status, body) = get(
        state_with(catalog()),
        "/api/v1/compare?ev=tesla-3&ice=merc-c&period=36&electricity_price=0.30&fuel_price=1.45",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ev"]["outcome"]["total"], 14328.0);
    // 15200 depreciation + (183 fuel + 60 maintenance) * 36
    assert_eq!(body["ice"]["outcome"]["total"], 23948.0);
    assert_eq!(body["ice_minus_ev"], 9620.0);
    assert_eq!(body["ice_minus_ev_text"], "£9,620");
}

#[tokio::test]
async fn comparison_with_one_side_missing() {
    let (status, body) = get(state_with(catalog()), "/api/v1/compare?ev=tesla-3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ice"]["outcome"]["status"], "no_selection");
    assert!(body["ice_minus_ev"].is_null());

    let (status, _) = get(state_with(catalog()), "/api/v1/compare?ev=merc-c").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn converts_currency() {
    let (status, body) = get(state_with(catalog()), "/api/v1/convert?amount=1000&from=GBP&to=GBP").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["converted"], 1000.0);
    assert_eq!(body["text"], "£1,000.00");

    let (_, body) = get(state_with(catalog()), "/api/v1/convert?amount=1000&from=USD&to=EUR&decimals=0").await;
    assert_eq!(body["text"], "€920");

    let (status, _) = get(state_with(catalog()), "/api/v1/convert?amount=1&from=GBP&to=EUR&decimals=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(state_with(catalog()), "/api/v1/currencies").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["symbol"], "£");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, body) = get(state_with(catalog()), "/api/v1/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}
