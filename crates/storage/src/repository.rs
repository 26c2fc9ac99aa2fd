//! Pothole Repository

use crate::geo::Coordinate;
use crate::StorageError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

/// A detected pothole as stored in the `potholes` table.
///
/// Severity is the classifier confidence at detection time; only windows
/// scoring above the detection threshold are ever inserted. Timestamps
/// are ISO-8601 text, matching what the map front-end parses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PotholeRecord {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: f64,
    pub timestamp: String,
}

/// Repository over a SQLite connection pool.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Connect to the database and create the schema if needed.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.init().await?;
        info!(url = database_url, "connected to pothole database");
        Ok(repo)
    }

    /// Create the `potholes` table if it does not exist.
    async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS potholes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                severity REAL NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Check database liveness.
    pub async fn health_check(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a detection, stamping the current time. Returns the row id.
    pub async fn insert(
        &self,
        latitude: f64,
        longitude: f64,
        severity: f64,
    ) -> Result<i64, StorageError> {
        self.insert_at(latitude, longitude, severity, &Utc::now().to_rfc3339())
            .await
    }

    /// Insert a record with an explicit timestamp.
    pub async fn insert_at(
        &self,
        latitude: f64,
        longitude: f64,
        severity: f64,
        timestamp: &str,
    ) -> Result<i64, StorageError> {
        let result = sqlx::query(
            "INSERT INTO potholes (latitude, longitude, severity, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(latitude)
        .bind(longitude)
        .bind(severity)
        .bind(timestamp)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, latitude, longitude, severity, "stored pothole");
        Ok(id)
    }

    /// All stored potholes in insertion order.
    pub async fn list_all(&self) -> Result<Vec<PotholeRecord>, StorageError> {
        let records = sqlx::query_as::<_, PotholeRecord>(
            "SELECT id, latitude, longitude, severity, timestamp FROM potholes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Potholes inside the inclusive bounding box spanned by two corners.
    ///
    /// Corners are normalized per axis, so the caller may pass start and
    /// end of a route in either direction of travel.
    pub async fn in_bounding_box(
        &self,
        a: Coordinate,
        b: Coordinate,
    ) -> Result<Vec<PotholeRecord>, StorageError> {
        let (lat_min, lat_max) = ordered(a.lat, b.lat);
        let (lng_min, lng_max) = ordered(a.lng, b.lng);

        let records = sqlx::query_as::<_, PotholeRecord>(
            r#"
            SELECT id, latitude, longitude, severity, timestamp FROM potholes
            WHERE latitude BETWEEN ? AND ? AND longitude BETWEEN ? AND ?
            ORDER BY id
            "#,
        )
        .bind(lat_min)
        .bind(lat_max)
        .bind(lng_min)
        .bind(lng_max)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Total stored potholes.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM potholes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Seed `n` evenly spaced potholes along the segment from `start` to
    /// `end`, severity cycling 0.7 / 0.8 / 0.9 (the demo-data script).
    pub async fn seed_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        n: usize,
    ) -> Result<(), StorageError> {
        if n == 0 {
            return Ok(());
        }
        let steps = (n - 1).max(1) as f64;
        for i in 0..n {
            let t = i as f64 / steps;
            let lat = start.lat + t * (end.lat - start.lat);
            let lng = start.lng + t * (end.lng - start.lng);
            let severity = 0.7 + (i % 3) as f64 * 0.1;
            self.insert(lat, lng, severity).await?;
        }
        info!(n, "seeded demo route");
        Ok(())
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
