//! Route Handlers

pub mod detect;
pub mod potholes;
pub mod route;

use serde::Serialize;
use storage::PotholeRecord;

/// Pothole as serialized for the map front-end.
///
/// Field names `lat`/`lng` are what the Leaflet page binds to.
#[derive(Debug, Serialize)]
pub struct PotholeOut {
    pub lat: f64,
    pub lng: f64,
    pub severity: f64,
    pub timestamp: String,
}

impl From<PotholeRecord> for PotholeOut {
    fn from(record: PotholeRecord) -> Self {
        Self {
            lat: record.latitude,
            lng: record.longitude,
            severity: record.severity,
            timestamp: record.timestamp,
        }
    }
}
