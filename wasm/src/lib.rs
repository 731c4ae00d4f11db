//! WebAssembly module for the stock tracking front-ends
//!
//! Provides client-side computation for:
//! - Stock tier badges and gauge percentages
//! - Packet label encoding, decoding and sequence allocation
//! - Packing material estimates for transfers
//!
//! Structured results cross the boundary as JSON strings.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Log a warning to the browser console
fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Classify raw sheet cells; returns the status JSON
/// (`{status, color, message, icon}`)
#[wasm_bindgen]
pub fn classify_stock_level(current_qty: &str, min_level: &str, max_level: &str) -> Result<String, JsValue> {
    to_json(&classify_cells(current_qty, min_level, max_level))
}

/// Stock tier name for raw sheet cells
#[wasm_bindgen]
pub fn stock_tier(current_qty: &str, min_level: &str, max_level: &str) -> String {
    classify_cells(current_qty, min_level, max_level).status.to_string()
}

/// Gauge percentage for raw sheet cells
#[wasm_bindgen]
pub fn stock_level_percentage(current_qty: &str, min_level: &str, max_level: &str) -> f64 {
    percentage_cells(current_qty, min_level, max_level)
}

/// Packing priority score for raw sheet cells
#[wasm_bindgen]
pub fn packing_priority_score(current_qty: &str, min_level: &str, max_level: &str) -> u32 {
    priority_score(&StockLevel::from_cells(current_qty, min_level, max_level))
}

/// Rank `[{name, level: {current_qty, min_level, max_level}}]` for packing
#[wasm_bindgen]
pub fn rank_packing_queue(candidates_json: &str) -> Result<String, JsValue> {
    let candidates: Vec<PackingCandidate> = serde_json::from_str(candidates_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid candidates JSON: {}", e)))?;
    to_json(&rank_for_packing(candidates))
}

/// Encode a packet label; throws with the error message on bad input
#[wasm_bindgen]
pub fn encode_label(
    production_batch_id: &str,
    region: &str,
    packing_date: &str,
    sequence: u32,
) -> Result<String, JsValue> {
    encode_packet_label(production_batch_id, region, packing_date, sequence)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a packet label to JSON, or `undefined` when it is not a label
#[wasm_bindgen]
pub fn decode_label(label: &str) -> Option<String> {
    let decoded = decode_packet_label(label)?;
    match serde_json::to_string(&decoded) {
        Ok(json) => Some(json),
        Err(e) => {
            console_warn(&format!("Failed to serialize decoded label: {}", e));
            None
        }
    }
}

/// Next sequence for a region and packing day given the labels as a JSON array
#[wasm_bindgen]
pub fn next_label_sequence(region: &str, packing_date: &str, labels_json: &str) -> Result<u32, JsValue> {
    let labels: Vec<String> = serde_json::from_str(labels_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid labels JSON: {}", e)))?;
    Ok(next_sequence(region, packing_date, &labels))
}

/// Next sequence given the labels as a JS array; non-string entries are ignored
#[wasm_bindgen]
pub fn next_label_sequence_from_array(region: &str, packing_date: &str, labels: &js_sys::Array) -> u32 {
    let labels: Vec<String> = labels.iter().filter_map(|value| value.as_string()).collect();
    next_sequence(region, packing_date, &labels)
}

/// Region code for a region name
#[wasm_bindgen]
pub fn region_label_code(region: &str) -> String {
    region_code(region).to_string()
}

/// Packing material consumption as `{material: {grams, kilograms}}` JSON
#[wasm_bindgen]
pub fn packing_material_consumption(package_size: &str, unit_count: u32) -> Result<String, JsValue> {
    to_json(&packing_consumption(package_size, unit_count))
}

/// Deduction lines for the raw material ledger as JSON
#[wasm_bindgen]
pub fn packing_material_deductions(package_size: &str, unit_count: u32) -> Result<String, JsValue> {
    to_json(&packing_deductions(package_size, unit_count))
}

/// Kilograms of one material for a batch, `0` when the size does not use it
#[wasm_bindgen]
pub fn packing_material_kilograms(package_size: &str, unit_count: u32, material: &str) -> f64 {
    packing_consumption(package_size, unit_count)
        .get(material)
        .and_then(|amount| amount.kilograms.to_f64())
        .unwrap_or(0.0)
}
