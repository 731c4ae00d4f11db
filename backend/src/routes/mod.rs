//! Route definitions for the stock tracking service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/stock", stock_routes())
        .nest("/labels", label_routes())
        .nest("/packing", packing_routes())
        .route("/settings/refresh", post(handlers::refresh_settings))
}

/// Stock classification and dashboard routes
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/classify", post(handlers::classify_stock))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/summary", get(handlers::get_summary))
}

/// Packet label routes
fn label_routes() -> Router<AppState> {
    Router::new()
        .route("/encode", post(handlers::encode_label))
        .route("/decode/:label", get(handlers::decode_label))
        .route("/next-sequence", post(handlers::next_label_sequence))
}

/// Packing material and transfer routes
fn packing_routes() -> Router<AppState> {
    Router::new()
        .route("/consumption", post(handlers::estimate_consumption))
        .route("/transfers", post(handlers::record_transfer))
}
