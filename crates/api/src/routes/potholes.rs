//! Pothole Listing Endpoint

use crate::error::ApiError;
use crate::routes::PotholeOut;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// `GET /api/potholes` returns every stored pothole, for the map overlay.
pub async fn get_potholes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PotholeOut>>, ApiError> {
    let records = state.repository.list_all().await?;
    Ok(Json(records.into_iter().map(PotholeOut::from).collect()))
}
