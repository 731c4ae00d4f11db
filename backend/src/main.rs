//! Stock Tracking Service - Backend Server
//!
//! Serves stock classification, packet labels and packing transfers on top of
//! the shared Google Sheets workbook used by the inventory front-ends.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<external::SheetsClient>,
    pub settings: Arc<services::SettingsCache>,
    /// Serializes label allocation and the transfer append
    pub transfer_lock: Arc<Mutex<()>>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Stock Tracking Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Spreadsheet: {}", config.sheets.spreadsheet_id);

    let sheets = external::SheetsClient::new(&config.sheets)?;
    let settings = services::SettingsCache::new(Duration::from_secs(config.settings_cache.ttl_secs));

    // Create application state
    let state = AppState {
        sheets: Arc::new(sheets),
        settings: Arc::new(settings),
        transfer_lock: Arc::new(Mutex::new(())),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Stock Tracking Service API v1.0"
}
