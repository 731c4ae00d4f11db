//! HTTP handlers for stock classification and the dashboard

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::stock::{
    classify, ClassifyInput, ClassifyResult, StockDashboardRow, StockService, StockSummary,
};
use crate::AppState;

/// Classify a single stock level
pub async fn classify_stock(Json(input): Json<ClassifyInput>) -> Json<ClassifyResult> {
    Json(classify(&input))
}

/// Classified inventory, most urgent first
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<Vec<StockDashboardRow>>> {
    let service = StockService::new(&*state.sheets, &state.settings, &state.config.ranges);
    let rows = service.dashboard().await?;
    Ok(Json(rows))
}

/// Counts per stock tier
pub async fn get_summary(State(state): State<AppState>) -> AppResult<Json<StockSummary>> {
    let service = StockService::new(&*state.sheets, &state.settings, &state.config.ranges);
    let summary = service.summary().await?;
    Ok(Json(summary))
}
