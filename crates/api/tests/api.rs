//! End-to-end handler tests over the in-process router.

use api::{create_governor_config, create_router, AppState, RateLimitConfig};
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::Router;
use classifier::{LinearModel, PotholeClassifier};
use feature_engine::FEATURE_DIMENSION;
use http_body_util::BodyExt;
use sensor_window::{SensorSample, WINDOW_SIZE};
use std::net::SocketAddr;
use std::sync::Arc;
use storage::Repository;
use tower::ServiceExt;

/// Build a router whose model ignores the features and scores
/// sigmoid(bias), so verdicts are deterministic per test.
async fn test_app(bias: f64) -> (Router, Arc<AppState>) {
    let repository = Repository::connect("sqlite::memory:").await.unwrap();
    let model = LinearModel::from_parts(vec![0.0; FEATURE_DIMENSION], bias);
    let state = Arc::new(AppState::new(repository, PotholeClassifier::new(model)));
    (create_router(state.clone(), None), state)
}

fn quiet_window() -> Vec<SensorSample> {
    (0..WINDOW_SIZE)
        .map(|_| SensorSample {
            acc_z1: 9.81,
            acc_z2: 9.79,
            ..Default::default()
        })
        .collect()
}

fn detect_request(samples: &[SensorSample], lat: f64, lng: f64) -> Request<Body> {
    let body = serde_json::json!({
        "accelerometer_data": samples,
        "latitude": lat,
        "longitude": lng,
    });
    Request::builder()
        .method("POST")
        .uri("/api/detect")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn positive_detection_is_persisted() {
    // bias +2 gives confidence ~0.88 regardless of the window
    let (app, state) = test_app(2.0).await;

    let response = app
        .oneshot(detect_request(&quiet_window(), 12.9853, 79.9698))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["is_pothole"], true);
    let confidence = body["confidence"].as_f64().unwrap();
    assert!(confidence > 0.5);

    let records = state.repository.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert!((records[0].latitude - 12.9853).abs() < 1e-9);
    // Stored severity equals the returned confidence
    assert!((records[0].severity - confidence).abs() < 1e-9);
}

#[tokio::test]
async fn negative_detection_is_not_persisted() {
    let (app, state) = test_app(-2.0).await;

    let response = app
        .oneshot(detect_request(&quiet_window(), 12.9853, 79.9698))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["is_pothole"], false);
    assert!(body["confidence"].as_f64().unwrap() < 0.5);

    assert_eq!(state.repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn wrong_window_length_is_rejected() {
    let (app, state) = test_app(2.0).await;

    let mut samples = quiet_window();
    samples.truncate(WINDOW_SIZE - 1);

    let response = app
        .oneshot(detect_request(&samples, 12.9853, 79.9698))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("window"));
    assert_eq!(state.repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn out_of_range_coordinates_are_rejected() {
    let (app, _state) = test_app(2.0).await;

    let response = app
        .oneshot(detect_request(&quiet_window(), 95.0, 79.9698))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let (app, _state) = test_app(2.0).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/detect")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn potholes_listing_uses_map_field_names() {
    let (app, state) = test_app(0.0).await;
    state
        .repository
        .insert_at(12.9, 79.9, 0.82, "2025-01-01T00:00:00+00:00")
        .await
        .unwrap();

    let request = Request::builder()
        .uri("/api/potholes")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert!((list[0]["lat"].as_f64().unwrap() - 12.9).abs() < 1e-9);
    assert!((list[0]["lng"].as_f64().unwrap() - 79.9).abs() < 1e-9);
    assert!((list[0]["severity"].as_f64().unwrap() - 0.82).abs() < 1e-9);
}

#[tokio::test]
async fn route_query_returns_bounding_box_hits() {
    let (app, state) = test_app(0.0).await;
    // Inside the box
    state
        .repository
        .insert_at(12.9, 80.0, 0.75, "2025-01-01T00:00:00+00:00")
        .await
        .unwrap();
    // Outside the box
    state
        .repository
        .insert_at(14.0, 81.0, 0.9, "2025-01-01T00:00:00+00:00")
        .await
        .unwrap();

    let request = Request::builder()
        .uri("/api/route?start_lat=12.8&start_lng=79.9&end_lat=13.0&end_lng=80.1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["count"], 1);
    assert!(body["distance_km"].as_f64().unwrap() > 0.0);
    assert_eq!(body["potholes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rate_limit_budgets_only_the_write_path() {
    let repository = Repository::connect("sqlite::memory:").await.unwrap();
    let model = LinearModel::from_parts(vec![0.0; FEATURE_DIMENSION], -2.0);
    let state = Arc::new(AppState::new(repository, PotholeClassifier::new(model)));

    // One request of burst, long replenish: the second detect must trip
    let governor = create_governor_config(&RateLimitConfig {
        per_second: 60,
        burst_size: 1,
    });
    let app = create_router(state, Some(governor));

    let peer: SocketAddr = "10.0.0.1:9000".parse().unwrap();

    let mut first = detect_request(&quiet_window(), 12.9853, 79.9698);
    first.extensions_mut().insert(ConnectInfo(peer));
    let response = app.clone().oneshot(first).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut second = detect_request(&quiet_window(), 12.9853, 79.9698);
    second.extensions_mut().insert(ConnectInfo(peer));
    let response = app.clone().oneshot(second).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Read endpoints are not metered against the sensor budget
    for _ in 0..5 {
        let request = Request::builder()
            .uri("/api/potholes")
            .extension(ConnectInfo(peer))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn health_reports_model_shape() {
    let (app, _state) = test_app(0.0).await;

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["model"]["features"], FEATURE_DIMENSION);
    assert_eq!(body["metrics"]["pothole_count"], 0);
}
