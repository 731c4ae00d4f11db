//! Packing transfer service: mints packet labels and records material deductions

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    encode_packet_label, next_sequence, packing_deductions, parse_packing_date, region_code,
    validate_production_batch_id, validate_unit_count, DeductionLine,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::RangeConfig;
use crate::error::{AppError, AppResult};
use crate::external::SheetGateway;

/// Column holding packet labels in the packing transfers sheet
pub const PACKET_LABEL_COLUMN: &str = "Packet Label";

/// Packing service for recording WIP to finished-goods transfers
pub struct PackingService<'a, G> {
    sheets: &'a G,
    ranges: &'a RangeConfig,
    transfer_lock: &'a Mutex<()>,
}

/// Input for recording a packing transfer
#[derive(Debug, Clone, Deserialize)]
pub struct RecordTransferInput {
    pub production_batch_id: String,
    pub region: String,
    pub package_size: String,
    pub unit_count: u32,
    /// Defaults to today when omitted
    pub packing_date: Option<String>,
    pub operator: Option<String>,
    pub notes: Option<String>,
}

/// A recorded packing transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferRecord {
    pub id: Uuid,
    pub packet_label: String,
    pub production_batch_id: String,
    pub region: String,
    pub region_code: String,
    pub package_size: String,
    pub unit_count: u32,
    pub packing_date: NaiveDate,
    pub operator: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub deductions: Vec<DeductionLine>,
}

impl TransferRecord {
    /// Cells appended to the packing transfers sheet
    fn transfer_row(&self, notes: &str) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.recorded_at.to_rfc3339(),
            self.packing_date.to_string(),
            self.packet_label.clone(),
            self.production_batch_id.clone(),
            self.region.clone(),
            self.package_size.clone(),
            self.unit_count.to_string(),
            self.operator.clone().unwrap_or_default(),
            notes.to_string(),
        ]
    }

    /// Cells appended to the raw material ledger, one row per deduction
    fn ledger_rows(&self) -> Vec<Vec<String>> {
        self.deductions
            .iter()
            .map(|line| {
                vec![
                    self.recorded_at.to_rfc3339(),
                    self.packing_date.to_string(),
                    line.material.clone(),
                    line.category.clone(),
                    "OUT".to_string(),
                    line.quantity.normalize().to_string(),
                    line.unit.clone(),
                    self.packet_label.clone(),
                ]
            })
            .collect()
    }
}

/// Input for allocating the next sequence
#[derive(Debug, Deserialize)]
pub struct NextSequenceInput {
    pub region: String,
    pub packing_date: String,
    /// Read from the packing transfers sheet when omitted
    pub existing_labels: Option<Vec<String>>,
}

fn validate_transfer(input: &RecordTransferInput) -> AppResult<NaiveDate> {
    validate_production_batch_id(&input.production_batch_id)
        .map_err(|msg| AppError::validation("production_batch_id", msg))?;
    validate_unit_count(input.unit_count).map_err(|msg| AppError::validation("unit_count", msg))?;
    if input.package_size.trim().is_empty() {
        return Err(AppError::validation("package_size", "Package size is required"));
    }

    match input.packing_date.as_deref() {
        Some(date) => parse_packing_date(date).map_err(|msg| AppError::validation("packing_date", msg)),
        None => Ok(Utc::now().date_naive()),
    }
}

impl<'a, G: SheetGateway> PackingService<'a, G> {
    /// Create a new PackingService instance
    pub fn new(sheets: &'a G, ranges: &'a RangeConfig, transfer_lock: &'a Mutex<()>) -> Self {
        Self {
            sheets,
            ranges,
            transfer_lock,
        }
    }

    /// Packet labels already written to the packing transfers sheet
    pub async fn existing_labels(&self) -> AppResult<Vec<String>> {
        let rows = self.sheets.read_rows(&self.ranges.packing_transfers).await?;
        Ok(rows
            .iter()
            .map(|row| row.get(PACKET_LABEL_COLUMN).trim().to_string())
            .filter(|label| !label.is_empty())
            .collect())
    }

    /// Next sequence for a region and packing day
    pub async fn next_sequence(&self, input: NextSequenceInput) -> AppResult<u32> {
        let labels = match input.existing_labels {
            Some(labels) => labels,
            None => self.existing_labels().await?,
        };
        Ok(next_sequence(&input.region, &input.packing_date, &labels))
    }

    /// Record a packing transfer.
    ///
    /// Reading the existing labels, allocating the sequence and appending the
    /// new row happen under one lock, so transfers from this process never
    /// share a label. Writers outside this process are not coordinated.
    pub async fn record_transfer(&self, input: RecordTransferInput) -> AppResult<TransferRecord> {
        let packing_date = validate_transfer(&input)?;
        let packing_date_iso = packing_date.format("%Y-%m-%d").to_string();

        let _guard = self.transfer_lock.lock().await;

        let labels = self.existing_labels().await?;
        let sequence = next_sequence(&input.region, &packing_date_iso, &labels);
        let packet_label = encode_packet_label(
            &input.production_batch_id,
            &input.region,
            &packing_date_iso,
            sequence,
        )?;

        let record = TransferRecord {
            id: Uuid::new_v4(),
            packet_label,
            production_batch_id: input.production_batch_id.clone(),
            region_code: region_code(&input.region).to_string(),
            region: input.region.clone(),
            package_size: input.package_size.trim().to_string(),
            unit_count: input.unit_count,
            packing_date,
            operator: input.operator.clone(),
            recorded_at: Utc::now(),
            deductions: packing_deductions(&input.package_size, input.unit_count),
        };

        // The transfer row claims the sequence, so it is written last
        let ledger_rows = record.ledger_rows();
        if !ledger_rows.is_empty() {
            self.sheets
                .append_rows(&self.ranges.raw_material_ledger, ledger_rows)
                .await?;
        }

        let transfer_row = record.transfer_row(input.notes.as_deref().unwrap_or(""));
        if let Err(err) = self
            .sheets
            .append_rows(&self.ranges.packing_transfers, vec![transfer_row])
            .await
        {
            tracing::error!(
                label = %record.packet_label,
                batch = %record.production_batch_id,
                error = %err,
                "Ledger deductions written but transfer row failed"
            );
            return Err(AppError::SheetsApi(format!(
                "transfer {} not recorded after ledger deductions were written: {}",
                record.packet_label, err
            )));
        }

        tracing::info!(
            label = %record.packet_label,
            batch = %record.production_batch_id,
            units = record.unit_count,
            deductions = record.deductions.len(),
            "Recorded packing transfer"
        );

        Ok(record)
    }
}
