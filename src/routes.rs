use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower::Layer;
use tower_http::{
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::ApiError,
    weather::{openweather::OpenWeatherClient, types::CurrentWeatherReport},
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather_client: Arc<OpenWeatherClient>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

// Route handlers
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let environment = if state.config.environment.is_production() {
        "production"
    } else {
        "development"
    };
    Json(HealthResponse {
        status: "healthy".to_string(),
        environment: environment.to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn get_current_weather(
    State(state): State<AppState>,
    Path(zip_code): Path<String>,
) -> Result<Json<CurrentWeatherReport>, ApiError> {
    match state.weather_client.get_current_weather(&zip_code).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!(zip_code = %zip_code, "Current weather lookup failed: {}", e);
            Err(e.into())
        }
    }
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/currentweather/:zip_code", get(get_current_weather))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router wrapped in trailing-slash trimming, which has to run before route matching.
pub fn create_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}
