//! Integration tests for the Intrinsic Server API endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use intrinsic_server::routes::create_router;
use intrinsic_server::{AppState, Server, ServerConfig};

fn create_test_app() -> Router {
    create_router(Arc::new(AppState::default()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = get(create_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_server_router_serves_health() {
    let server = Server::new(ServerConfig::default());
    let (status, json) = get(server.router(), "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

// =============================================================================
// DETERMINISTIC VALUATION
// =============================================================================

#[tokio::test]
async fn test_eps_valuation() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/eps?sharePrice=100&eps=5&growthRate=15",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["method"], "EPS");
    assert_eq!(json["yearByYearProjections"].as_array().unwrap().len(), 10);

    let intrinsic = json["valuation"]["intrinsicValue"].as_f64().unwrap();
    let mos = json["valuation"]["marginOfSafetyPrice"].as_f64().unwrap();
    assert!(intrinsic > 0.0);
    assert!((mos - intrinsic * 0.5).abs() < 1e-9);
    assert_eq!(json["inputs"]["discountRatePct"], 10.0);
}

#[tokio::test]
async fn test_fcf_valuation_with_custom_horizon() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/fcf?sharePrice=50&fcf=1000&outstandingShares=100&growthRate=12&projectionYears=5",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["method"], "FCF");
    assert_eq!(json["yearByYearProjections"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_missing_parameters_are_listed() {
    let (status, json) = get(create_test_app(), "/api/v1/eps?growthRate=15").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing query parameters: sharePrice, eps");
}

#[tokio::test]
async fn test_non_numeric_parameter() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/eps?sharePrice=abc&eps=5&growthRate=15",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid query parameters");
}

#[tokio::test]
async fn test_validation_failure() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/eps?sharePrice=100&eps=5&growthRate=10&terminalGrowthRate=12&discountRate=15",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["error"],
        "Validation failed: Terminal growth rate (12.0%) must be lower than growth rate (10.0%)"
    );
}

#[tokio::test]
async fn test_zero_shares_is_validation_error() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/fcf?sharePrice=50&fcf=1000&outstandingShares=0&growthRate=12",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Validation failed: Outstanding shares (0) must be positive"));
}

// =============================================================================
// SIMULATION
// =============================================================================

#[tokio::test]
async fn test_simulation_is_seeded() {
    let uri = "/api/v1/simulate?method=eps&sharePrice=100&eps=5&growthRate=15&trials=200&seed=7";
    let (status, first) = get(create_test_app(), uri).await;
    let (_, second) = get(create_test_app(), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["mode"], "simulated");
    assert_eq!(first["trialsRun"], 200);
    assert_eq!(first["seed"], 7);
    assert_eq!(first["mean"], second["mean"]);

    let p1 = first["percentile1"].as_f64().unwrap();
    let median = first["median"].as_f64().unwrap();
    let p90 = first["percentile90"].as_f64().unwrap();
    assert!(p1 <= median && median <= p90);
}

#[tokio::test]
async fn test_simulation_falls_back_when_every_trial_is_rejected() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/simulate?method=eps&sharePrice=100&eps=5&growthRate=40&terminalGrowthRate=20&discountRate=30&trials=50&seed=1",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mode"], "deterministic");
    assert!(json["valuation"]["intrinsicValue"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_simulation_rejects_unknown_method_and_bad_trials() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/simulate?method=dividends&sharePrice=100&eps=5&growthRate=15",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid query parameters");

    let (status, _) = get(
        create_test_app(),
        "/api/v1/simulate?sharePrice=100&eps=5&growthRate=15&trials=0",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// REVERSE DCF
// =============================================================================

#[tokio::test]
async fn test_reverse_dcf() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/reverse-dcf?method=eps&eps=5&sharePrice=90&growthRate=15",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let implied = json["impliedGrowthRate"].as_f64().unwrap();
    assert!(implied > 0.0 && implied < 0.5);
    assert_eq!(json["expectedGrowthRate"], 0.15);
    assert!(json["marketView"].is_string());
}

#[tokio::test]
async fn test_reverse_dcf_out_of_range_price() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/reverse-dcf?method=eps&eps=5&sharePrice=100000&growthRate=15",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Calculation error:"));
}

// =============================================================================
// METRICS
// =============================================================================

#[tokio::test]
async fn test_fcf_metrics() {
    let (status, json) = get(
        create_test_app(),
        "/api/v1/metrics?method=fcf&sharePrice=50&fcf=1000&outstandingShares=100&growthRate=15&netCurrentAssets=6000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["intrinsicValue"].as_f64().unwrap() > 0.0);
    assert_eq!(json["metrics"]["fcfForFreeYears"], 0);
    assert!(json["metrics"]["ownerEarnings"].as_f64().unwrap() > 0.0);
    assert!(json["metrics"]["ratios"]["priceToFcf"].is_number());
}
