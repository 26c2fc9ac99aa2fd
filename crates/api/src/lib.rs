//! Pothole Detection API Server
//!
//! REST backend for the pothole map: accepts sensor windows from embedded
//! nodes, runs the detection pipeline, and serves stored potholes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use classifier::PotholeClassifier;
use feature_engine::FeatureExtractor;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use storage::{Coordinate, Repository};
use telemetry_validator::Validator;
use tokio::sync::Mutex;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod rate_limit;
mod routes;

pub use config::AppConfig;
pub use error::ApiError;
pub use rate_limit::{create_governor_config, DefaultGovernorConfig, RateLimitConfig};

use alerting::AlertThrottle;

/// Demo route endpoints used when `seed_demo_route` is enabled
const DEMO_ROUTE_START: Coordinate = Coordinate {
    lat: 12.985_330_555_555_556,
    lng: 79.969_830_555_555_56,
};
const DEMO_ROUTE_END: Coordinate = Coordinate {
    lat: 12.794_378_262_825_573,
    lng: 80.038_350_028_610_89,
};

/// Application state shared across handlers
pub struct AppState {
    /// Pothole repository
    pub repository: Repository,
    /// Trained classifier
    pub classifier: PotholeClassifier,
    /// Feature extractor
    pub extractor: FeatureExtractor,
    /// Telemetry validator
    pub validator: Validator,
    /// Alert throttle (cooldown + session cap)
    pub throttle: Mutex<AlertThrottle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state from its pipeline components.
    pub fn new(repository: Repository, classifier: PotholeClassifier) -> Self {
        Self {
            repository,
            classifier,
            extractor: FeatureExtractor::new(),
            validator: Validator::default(),
            throttle: Mutex::new(AlertThrottle::default()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
    pub metrics: SystemMetrics,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub database: ComponentHealth,
    pub model: ModelHealth,
}

/// Individual component health
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
}

/// Model health and shape
#[derive(Debug, Serialize)]
pub struct ModelHealth {
    pub status: String,
    pub features: usize,
    pub threshold: f64,
}

/// System metrics
#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    pub pothole_count: i64,
}

/// Create the application router.
///
/// The rate limiter budgets only the sensor write path; read endpoints
/// stay unmetered so map clients cannot starve the nodes (or vice versa).
pub fn create_router(state: Arc<AppState>, governor: Option<Arc<DefaultGovernorConfig>>) -> Router {
    let mut detect = post(routes::detect::detect);
    if let Some(config) = governor {
        detect = detect.layer(GovernorLayer { config });
    }

    Router::new()
        .route("/api/detect", detect)
        .route("/api/potholes", get(routes::potholes::get_potholes))
        .route("/api/route", get(routes::route::get_route))
        .route("/api/health", get(health_handler))
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database_ok = state.repository.health_check().await.is_ok();
    let pothole_count = state.repository.count().await.unwrap_or(0);

    let response = HealthResponse {
        status: if database_ok { "healthy" } else { "degraded" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus {
            database: ComponentHealth {
                status: if database_ok { "ok" } else { "error" }.to_string(),
            },
            model: ModelHealth {
                status: "ok".to_string(),
                features: state.classifier.dimension(),
                threshold: state.classifier.threshold(),
            },
        },
        metrics: SystemMetrics { pothole_count },
    };

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    // Ignore the error if a subscriber is already installed (tests)
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Build state from config and run the server until shutdown.
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let repository = Repository::connect(&config.database_url).await?;

    if config.seed_demo_route && repository.count().await? == 0 {
        repository
            .seed_route(DEMO_ROUTE_START, DEMO_ROUTE_END, 10)
            .await?;
    }

    let model = classifier::LinearModel::load(&config.model_path)?;
    let classifier = PotholeClassifier::with_threshold(model, config.detection_threshold);
    info!(
        features = classifier.dimension(),
        threshold = classifier.threshold(),
        "model ready"
    );

    let state = Arc::new(AppState::new(repository, classifier));

    let prometheus = PrometheusBuilder::new().install_recorder()?;
    let governor = create_governor_config(&RateLimitConfig::default());

    let app = create_router(state, Some(governor))
        .route(
            "/metrics",
            get(move || std::future::ready(prometheus.render())),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
