//! HTTP handlers for stock settings

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct RefreshResponse {
    pub skus: usize,
}

/// Drop cached settings and reload them from the sheet
pub async fn refresh_settings(State(state): State<AppState>) -> Json<RefreshResponse> {
    state.settings.invalidate().await;
    let table = state
        .settings
        .get_or_load(&*state.sheets, &state.config.ranges.settings)
        .await;
    Json(RefreshResponse { skus: table.len() })
}
