//! House Price Feature API Server
//!
//! REST API behind the property form: catalog lookups, per-group incremental
//! resolution, full feature derivation and price estimates.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use constraint_engine::{ConstraintEngine, RawInputRecord};
use feature_engine::{Derivation, DerivationError, FeaturePipeline};
use inference_engine::InferenceEngine;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod rate_limit;
mod routes;

pub use config::{ApiConfig, LogFormat};
pub use error::ApiError;

use rate_limit::create_governor_config;

/// Application state shared across handlers
pub struct AppState {
    /// Raw record → canonical features
    pub pipeline: FeaturePipeline,
    /// Price model over the same feature list
    pub inference: InferenceEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Renders the Prometheus scrape body
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Create new application state
    pub fn new(config: &ApiConfig, metrics: PrometheusHandle) -> Self {
        let expected = config.expected_features();
        let engine = ConstraintEngine::new(config.validation.clone());
        let mut pipeline = FeaturePipeline::new(engine, expected.clone());
        if let Some(year) = config.current_year {
            pipeline = pipeline.with_current_year(year);
        }

        Self {
            pipeline,
            inference: InferenceEngine::mock_for(expected),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics,
        }
    }

    /// Run the pipeline and record derivation counters
    pub fn derive(&self, raw: &RawInputRecord) -> Result<Derivation, DerivationError> {
        metrics::counter!("derivations_total").increment(1);
        match self.pipeline.derive(raw) {
            Ok(derivation) => {
                metrics::counter!("derivation_warnings_total")
                    .increment(derivation.warnings.len() as u64);
                Ok(derivation)
            }
            Err(err) => {
                metrics::counter!("derivation_failures_total").increment(1);
                warn!("Derivation rejected: {}", err);
                Err(err)
            }
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: String,
    pub expected_features: usize,
    pub current_year: i32,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/catalog", get(routes::catalog::list_attributes))
        .route("/api/v1/catalog/:attribute", get(routes::catalog::get_attribute))
        .route("/api/v1/features", post(routes::features::derive_features))
        .route("/api/v1/predict", post(routes::predict::predict))
        .route("/api/v1/resolve/subclass", post(routes::resolve::subclass))
        .route("/api/v1/resolve/basement", post(routes::resolve::basement))
        .route("/api/v1/resolve/garage", post(routes::resolve::garage))
        .route("/api/v1/resolve/floors", post(routes::resolve::floors))
        .route("/api/v1/resolve/porches", post(routes::resolve::porches))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: state.inference.model_name().to_string(),
        expected_features: state.pipeline.expected().len(),
        current_year: state.pipeline.current_year(),
    })
}

/// Prometheus scrape handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics.render()
}

/// Initialize logging
pub fn init_logging(config: &ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let level: Level = config.log_level.parse()?;
    let builder = FmtSubscriber::builder().with_max_level(level).with_target(true);

    match config.log_format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}

/// Run the server
pub async fn run_server(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = PrometheusBuilder::new().install_recorder()?;
    let governor = create_governor_config(&config.rate_limit)?;

    let state = Arc::new(AppState::new(&config, metrics));
    let app = create_router(state).layer(GovernorLayer { config: governor });

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
