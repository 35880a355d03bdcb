use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use voyage_estimator::server::{router, AppState};
use voyage_estimator::settings::Settings;

fn fixture(name: &str) -> serde_json::Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let raw = std::fs::read_to_string(path).expect("fixture should be readable");
    serde_json::from_str(&raw).expect("fixture should be json")
}

fn app() -> axum::Router {
    router(AppState::new(Settings {
        default_simulations: 100,
        max_simulations: 1_000,
        seed: Some(7),
        ..Settings::default()
    }))
}

async fn send(method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .expect("request should build");
    let response = app().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let payload = serde_json::from_slice(&bytes).expect("response should be valid json");
    (status, payload)
}

#[tokio::test]
async fn health_endpoint_returns_ok_json() {
    let (status, payload) = send("GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["service"], "voyage-estimator-api");
}

#[tokio::test]
async fn estimate_endpoint_runs_the_simulation() {
    let body = serde_json::json!({ "voyage": fixture("voyage_pending.json"), "sims": 200 });
    let (status, payload) = send("POST", "/api/estimate", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["engine"], "monte_carlo");
    assert_eq!(payload["sims"], 200);
    assert!(payload["handle"].as_str().is_some());
    assert_eq!(payload["config"]["numSims"], 200);
    assert_eq!(payload["config"]["ps"]["skill"], "command_skill");
    assert_eq!(payload["view"]["mode"], "distribution");
    assert_eq!(payload["view"]["rows"].as_array().map(Vec::len), Some(3));
    assert!(payload["title"].as_str().is_some_and(|t| t.starts_with("Estimate: ")));
    assert!(payload["generated_at"].as_str().is_some());

    let chart = payload["chart"].as_array().expect("chart should be an array");
    assert_eq!(chart.len(), 3);
    assert_eq!(chart[0]["id"], "No refills");
}

#[tokio::test]
async fn deterministic_estimate_has_no_chart() {
    let body = serde_json::json!({
        "voyage": fixture("voyage_pending.json"),
        "sims": 1,
        "deterministic": true
    });
    let (status, payload) = send("POST", "/api/estimate", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["engine"], "expected_value");
    assert_eq!(payload["view"]["mode"], "deterministic");
    assert!(payload["view"]["extension_per_refill"].as_f64().is_some());
    assert_eq!(payload["chart"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn estimate_rejects_out_of_range_sims() {
    let body = serde_json::json!({ "voyage": fixture("voyage_pending.json"), "sims": 5_000 });
    let (status, payload) = send("POST", "/api/estimate", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "Validation failed");
    assert_eq!(payload["errors"][0]["field"], "sims");
}

#[tokio::test]
async fn estimate_rejects_voyage_without_secondary_aggregate() {
    let mut voyage = fixture("voyage_pending.json");
    voyage["skill_aggregates"]
        .as_object_mut()
        .expect("aggregates are an object")
        .remove("science_skill");
    let (status, payload) = send("POST", "/api/estimate", Some(serde_json::json!({ "voyage": voyage }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["status"], "error");
}

#[tokio::test]
async fn finished_voyage_reports_status_without_estimate() {
    let mut voyage = fixture("voyage_pending.json");
    voyage["state"] = "completed".into();
    voyage["log_index"] = 1_800.into();
    let (status, payload) = send("POST", "/api/estimate", Some(serde_json::json!({ "voyage": voyage }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(payload["handle"].is_null());
    assert!(payload["view"].is_null());
    assert_eq!(payload["status_message"], "Your voyage (CMD/SCI) ran for 10h 0m.");
}

#[tokio::test]
async fn chart_endpoint_aggregates_a_stored_result() {
    let result = serde_json::json!({
        "deterministic": false,
        "20hrrefills": 2,
        "20hrdil": 300,
        "refills": [
            {"result": 10.5, "safeResult": 10.0, "saferResult": 10.0, "dilChance": 50,
             "lastDil": 10, "refillCostResult": 0, "all": [10.0, 10.02, 10.5, 11.0, 11.0, 12.0]},
            {"result": 12.0, "safeResult": 11.5, "saferResult": 11.0, "dilChance": 40,
             "lastDil": 12, "refillCostResult": 126, "all": []}
        ]
    });
    let (status, payload) = send(
        "POST",
        "/api/chart",
        Some(serde_json::json!({ "result": result, "needs_revive": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let series = payload["series"].as_array().expect("series should be an array");
    assert_eq!(series[0]["id"], "First refill");
    assert_eq!(series[1]["id"], "Second refill");
    assert_eq!(series[1]["data"].as_array().map(Vec::len), Some(0));
    let points = series[0]["data"].as_array().expect("points should be an array");
    assert_eq!(points.last().and_then(|p| p["y"].as_f64()), Some(0.0));
}

#[tokio::test]
async fn recommendations_endpoint_ranks_the_lineup() {
    let body = serde_json::json!({
        "voyage": fixture("voyage_pending.json"),
        "roster": fixture("roster.json")
    });
    let (status, payload) = send("POST", "/api/recommendations", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    let entries = payload["lineup"]["entries"].as_array().expect("entries should be an array");
    assert_eq!(entries[0]["slot"], "captain_slot");
    assert_eq!(entries[0]["recommendation"]["text"], "Select top crew in Command");
    assert_eq!(payload["lineup"]["trait_bonus"], 75);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chart")
        .body(Body::from("{not json"))
        .expect("request should build");
    let response = app().oneshot(request).await.expect("router is infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, payload) = send("GET", "/api/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["message"], "Route not found");
}
