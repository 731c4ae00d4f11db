//! Packet label encoding for packed batches
//!
//! A packet label has the form `DDMMPP-CODE-SEQ`:
//! - `DD`/`MM`: day and month of the production (WIP) batch
//! - `PP`: day of packing
//! - `CODE`: region code (see [`region_code`])
//! - `SEQ`: 3-digit counter per region and packing day

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::region::region_code;

/// Highest sequence that fits the 3-digit field
pub const MAX_SEQUENCE: u32 = 999;

/// Errors raised while encoding a packet label
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("Invalid production batch id '{0}': expected WIP-<PRODUCT>-<YYMMDD>-<SEQ>")]
    Format(String),

    #[error("Invalid packing date '{0}': expected YYYY-MM-DD")]
    PackingDate(String),

    #[error("Sequence {0} out of range 1..=999")]
    SequenceOutOfRange(u32),
}

/// Fragments recovered from a packet label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodedLabel {
    pub wip_day: String,
    pub month: String,
    pub packing_day: String,
    pub region_code: String,
    pub sequence: u32,
}

/// Date fragments taken from the `YYMMDD` segment of a production batch id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

/// Extract the `YYMMDD` fragments of a production batch id.
///
/// Only the segment count and the third segment are inspected; the fragments
/// are not checked to be numeric, but whitespace is rejected so every encoded
/// label can be decoded again.
pub fn production_date(production_batch_id: &str) -> Result<ProductionDate, LabelError> {
    let parts: Vec<&str> = production_batch_id.split('-').collect();
    if parts.len() < 3 {
        return Err(LabelError::Format(production_batch_id.to_string()));
    }

    let chars: Vec<char> = parts[2].chars().collect();
    if chars.len() < 6 || chars[..6].iter().any(|c| c.is_whitespace()) {
        return Err(LabelError::Format(production_batch_id.to_string()));
    }

    let take = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();
    Ok(ProductionDate {
        year: take(0..2),
        month: take(2..4),
        day: take(4..6),
    })
}

/// Day fragment (`DD`) of a `YYYY-MM-DD` date
pub fn packing_day(packing_date_iso: &str) -> Option<&str> {
    packing_date_iso
        .trim()
        .split('-')
        .nth(2)
        .filter(|day| day.chars().count() == 2 && !day.chars().any(char::is_whitespace))
}

/// Build a packet label for a packing transfer
pub fn encode_packet_label(
    production_batch_id: &str,
    region: &str,
    packing_date_iso: &str,
    sequence: u32,
) -> Result<String, LabelError> {
    let production = production_date(production_batch_id)?;
    let pack_day = packing_day(packing_date_iso)
        .ok_or_else(|| LabelError::PackingDate(packing_date_iso.to_string()))?;

    if sequence == 0 || sequence > MAX_SEQUENCE {
        return Err(LabelError::SequenceOutOfRange(sequence));
    }

    Ok(format!(
        "{}{}{}-{}-{:03}",
        production.day,
        production.month,
        pack_day,
        region_code(region),
        sequence
    ))
}

/// Recover the fragments of a packet label.
///
/// Returns `None` for anything that is not a well-formed label; this is used
/// when scanning sheet columns where other values are expected.
pub fn decode_packet_label(label: &str) -> Option<DecodedLabel> {
    let parts: Vec<&str> = label.trim().split('-').collect();
    if parts.len() != 3 {
        return None;
    }

    let head: Vec<char> = parts[0].chars().collect();
    if head.len() != 6 {
        return None;
    }
    let sequence = parts[2].parse::<u32>().ok()?;

    let take = |range: std::ops::Range<usize>| head[range].iter().collect::<String>();
    Some(DecodedLabel {
        wip_day: take(0..2),
        month: take(2..4),
        packing_day: take(4..6),
        region_code: parts[1].to_string(),
        sequence,
    })
}

/// Next free sequence for a region and packing day.
///
/// Scans the existing labels and returns one past the highest matching
/// sequence, or `1` when there is none. The result is only valid until the
/// next label is written.
pub fn next_sequence<S: AsRef<str>>(region: &str, packing_date_iso: &str, existing_labels: &[S]) -> u32 {
    let code = region_code(region);
    let Some(day) = packing_day(packing_date_iso) else {
        return 1;
    };

    existing_labels
        .iter()
        .filter_map(|label| decode_packet_label(label.as_ref()))
        .filter(|decoded| decoded.region_code == code && decoded.packing_day == day)
        .map(|decoded| decoded.sequence)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
