//! Server Configuration
//!
//! Layered: built-in defaults, then an optional `roadwatch.toml`, then
//! `ROADWATCH__*` environment overrides.

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Socket address to bind
    pub bind_addr: String,
    /// SQLite database URL
    pub database_url: String,
    /// Path to the binary model artifact
    pub model_path: String,
    /// Confidence threshold for detection (strictly greater)
    pub detection_threshold: f64,
    /// Seed a demo route into an empty database at startup
    pub seed_demo_route: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            database_url: "sqlite:potholes.db".to_string(),
            model_path: "pothole_model.bin".to_string(),
            detection_threshold: 0.5,
            seed_demo_route: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file, and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("database_url", defaults.database_url)?
            .set_default("model_path", defaults.model_path)?
            .set_default("detection_threshold", defaults.detection_threshold)?
            .set_default("seed_demo_route", defaults.seed_demo_route)?
            .add_source(File::with_name("roadwatch").required(false))
            .add_source(Environment::with_prefix("ROADWATCH").separator("__"))
            .build()?
            .try_deserialize()
    }
}
