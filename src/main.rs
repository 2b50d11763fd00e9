use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod routes;
mod weather;

use config::{Config, Environment};
use routes::{create_app, AppState};
use weather::openweather::OpenWeatherClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Production gets its variables from the platform; everywhere else reads .env,
    // which may also carry RUST_LOG, so it is loaded before the subscriber starts.
    let environment = Environment::from_value(std::env::var("ENVIRONMENT").ok().as_deref());
    if !environment.is_production() {
        dotenv::dotenv().context("failed to load .env file")?;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "currentweather_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("==== Starting current weather proxy ====");
    if !environment.is_production() {
        tracing::info!("Environment variables loaded from .env");
    }

    let config = Config::from_env()?;
    tracing::info!(
        environment = ?config.environment,
        upstream = %config.openweather_base_url,
        "Configuration loaded"
    );

    let weather_client = Arc::new(OpenWeatherClient::new(&config)?);
    let addr = config.bind_addr();

    let state = AppState {
        config: Arc::new(config),
        weather_client,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Server starting on http://{}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
