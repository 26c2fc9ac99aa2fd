//! Detection Endpoint
//!
//! `POST /api/detect` runs the full pipeline for one sensor window:
//! validate, extract features, classify, persist on a positive verdict,
//! maybe fire an alert.

use crate::error::ApiError;
use crate::AppState;
use alerting::Severity;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use metrics::counter;
use sensor_window::{SampleWindow, SensorSample};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Request body from a sensor node
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    /// One detection window of raw samples
    pub accelerometer_data: Vec<SensorSample>,
    /// GPS fix at the time of the window
    pub latitude: f64,
    pub longitude: f64,
}

/// Verdict returned to the sensor node
#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub is_pothole: bool,
    pub confidence: f64,
    pub timestamp: String,
}

pub async fn detect(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DetectRequest>,
) -> Result<Json<DetectResponse>, ApiError> {
    counter!("roadwatch_detect_requests_total").increment(1);

    state.validator.validate_latitude(request.latitude)?;
    state.validator.validate_longitude(request.longitude)?;
    state.validator.validate_window(&request.accelerometer_data)?;

    let window = SampleWindow::new(request.accelerometer_data)?;
    let features = state.extractor.extract(&window);
    let detection = state.classifier.classify(&features)?;

    if detection.is_pothole {
        // Persistence is unconditional on a positive verdict; only alert
        // emission is throttled.
        state
            .repository
            .insert(request.latitude, request.longitude, detection.confidence)
            .await?;
        counter!("roadwatch_potholes_detected_total").increment(1);

        let severity = Severity::from_confidence(detection.confidence);
        info!(
            latitude = request.latitude,
            longitude = request.longitude,
            confidence = detection.confidence,
            severity = severity.as_str(),
            front_mag_max = features.front_mag_max,
            "pothole detected"
        );

        let mut throttle = state.throttle.lock().await;
        throttle.try_fire(severity, request.latitude, request.longitude);
    }

    Ok(Json(DetectResponse {
        is_pothole: detection.is_pothole,
        confidence: detection.confidence,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
