//! HTTP handlers for packing material estimates and transfers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{packing_consumption, packing_deductions, Consumption, DeductionLine};

use crate::error::AppResult;
use crate::services::packing::{PackingService, RecordTransferInput, TransferRecord};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ConsumptionInput {
    pub package_size: String,
    pub unit_count: u32,
}

#[derive(Debug, Serialize)]
pub struct ConsumptionResponse {
    pub package_size: String,
    pub unit_count: u32,
    pub consumption: Consumption,
    pub deductions: Vec<DeductionLine>,
}

/// Packing material needed for a batch
pub async fn estimate_consumption(Json(input): Json<ConsumptionInput>) -> Json<ConsumptionResponse> {
    Json(ConsumptionResponse {
        consumption: packing_consumption(&input.package_size, input.unit_count),
        deductions: packing_deductions(&input.package_size, input.unit_count),
        package_size: input.package_size,
        unit_count: input.unit_count,
    })
}

/// Record a packing transfer
pub async fn record_transfer(
    State(state): State<AppState>,
    Json(input): Json<RecordTransferInput>,
) -> AppResult<Json<TransferRecord>> {
    let service = PackingService::new(&*state.sheets, &state.config.ranges, &state.transfer_lock);
    let record = service.record_transfer(input).await?;
    Ok(Json(record))
}
