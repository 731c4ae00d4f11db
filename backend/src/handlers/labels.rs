//! HTTP handlers for packet labels

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{decode_packet_label, encode_packet_label, DecodedLabel};

use crate::error::AppResult;
use crate::services::packing::{NextSequenceInput, PackingService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EncodeLabelInput {
    pub production_batch_id: String,
    pub region: String,
    pub packing_date: String,
    pub sequence: u32,
}

#[derive(Debug, Serialize)]
pub struct LabelResponse {
    pub packet_label: String,
}

#[derive(Debug, Serialize)]
pub struct SequenceResponse {
    pub sequence: u32,
}

/// Encode a packet label
pub async fn encode_label(Json(input): Json<EncodeLabelInput>) -> AppResult<Json<LabelResponse>> {
    let packet_label = encode_packet_label(
        &input.production_batch_id,
        &input.region,
        &input.packing_date,
        input.sequence,
    )?;
    Ok(Json(LabelResponse { packet_label }))
}

/// Decode a packet label; `null` when it is not a label
pub async fn decode_label(Path(label): Path<String>) -> Json<Option<DecodedLabel>> {
    Json(decode_packet_label(&label))
}

/// Next free sequence for a region and packing day
pub async fn next_label_sequence(
    State(state): State<AppState>,
    Json(input): Json<NextSequenceInput>,
) -> AppResult<Json<SequenceResponse>> {
    let service = PackingService::new(&*state.sheets, &state.config.ranges, &state.transfer_lock);
    let sequence = service.next_sequence(input).await?;
    Ok(Json(SequenceResponse { sequence }))
}
