//! Storage Layer
//!
//! SQLite persistence for pothole records, plus the great-circle helper
//! the route endpoint uses.

mod geo;
mod repository;

pub use geo::{haversine_km, Coordinate};
pub use repository::{PotholeRecord, Repository};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
