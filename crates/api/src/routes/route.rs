//! Route Query Endpoint

use crate::error::ApiError;
use crate::routes::PotholeOut;
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::{haversine_km, Coordinate};

/// Query parameters for the route endpoint
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
}

/// Response for the route endpoint
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Number of potholes inside the route's bounding box
    pub count: usize,
    /// Great-circle distance between the endpoints, km
    pub distance_km: f64,
    pub potholes: Vec<PotholeOut>,
}

/// `GET /api/route?start_lat&start_lng&end_lat&end_lng` returns the
/// potholes inside the inclusive bounding box spanned by the two
/// endpoints, in either direction of travel.
pub async fn get_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, ApiError> {
    state.validator.validate_latitude(params.start_lat)?;
    state.validator.validate_longitude(params.start_lng)?;
    state.validator.validate_latitude(params.end_lat)?;
    state.validator.validate_longitude(params.end_lng)?;

    let start = Coordinate::new(params.start_lat, params.start_lng);
    let end = Coordinate::new(params.end_lat, params.end_lng);

    let records = state.repository.in_bounding_box(start, end).await?;

    Ok(Json(RouteResponse {
        count: records.len(),
        distance_km: haversine_km(start, end),
        potholes: records.into_iter().map(PotholeOut::from).collect(),
    }))
}
