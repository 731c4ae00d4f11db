//! Stock dashboard service: classifies inventory rows and orders the packing queue

use serde::{Deserialize, Serialize};
use shared::{
    coerce_number, is_falsy, packing_order, priority_score, SheetRow, StockLevel, StockStatus,
    StockTier,
};

use crate::config::RangeConfig;
use crate::error::AppResult;
use crate::external::SheetGateway;
use crate::services::settings::{SettingsCache, SettingsTable};

/// Stock service over the inventory sheet
pub struct StockService<'a, G> {
    sheets: &'a G,
    settings: &'a SettingsCache,
    ranges: &'a RangeConfig,
}

/// A number that may arrive as JSON number or as sheet text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    pub fn value(&self) -> f64 {
        match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => coerce_number(s),
        }
    }
}

fn numeric(input: &Option<NumericInput>) -> f64 {
    input.as_ref().map_or(0.0, NumericInput::value)
}

/// Input for classifying a single stock level
#[derive(Debug, Deserialize)]
pub struct ClassifyInput {
    pub current_qty: Option<NumericInput>,
    pub min_level: Option<NumericInput>,
    pub max_level: Option<NumericInput>,
}

/// Classification of a single stock level
#[derive(Debug, Serialize)]
pub struct ClassifyResult {
    #[serde(flatten)]
    pub status: StockStatus,
    pub percentage: f64,
    pub priority_score: u32,
}

/// One inventory row as shown on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct StockDashboardRow {
    pub sku: String,
    pub product: String,
    pub region: String,
    pub current_qty: f64,
    pub min_level: f64,
    pub max_level: f64,
    pub status: StockStatus,
    pub percentage: f64,
    pub priority_score: u32,
}

impl StockDashboardRow {
    fn level(&self) -> StockLevel {
        StockLevel::new(self.current_qty, self.min_level, self.max_level)
    }
}

/// Count of rows in one tier
#[derive(Debug, Serialize, PartialEq)]
pub struct TierCount {
    pub status: StockTier,
    pub count: usize,
}

/// Dashboard summary
#[derive(Debug, Serialize)]
pub struct StockSummary {
    pub total_items: usize,
    pub needs_packing: usize,
    pub by_tier: Vec<TierCount>,
}

/// Classify a single level
pub fn classify(input: &ClassifyInput) -> ClassifyResult {
    let level = StockLevel::new(
        numeric(&input.current_qty),
        numeric(&input.min_level),
        numeric(&input.max_level),
    );
    ClassifyResult {
        status: level.status(),
        percentage: level.percentage(),
        priority_score: priority_score(&level),
    }
}

/// Build a dashboard row, filling blank bounds from the settings table
pub fn dashboard_row(row: &SheetRow, settings: &SettingsTable) -> Option<StockDashboardRow> {
    let sku = row.get("SKU").trim().to_string();
    let product = row.get("Product").trim().to_string();
    if sku.is_empty() && product.is_empty() {
        return None;
    }

    let configured = settings.get(&sku);
    let bound = |header: &str, fallback: Option<f64>| {
        let value = coerce_number(row.get(header));
        match fallback {
            Some(fallback) if is_falsy(value) => fallback,
            _ => value,
        }
    };
    let min_level = bound("Min Level", configured.map(|s| s.min_level));
    let max_level = bound("Max Level", configured.map(|s| s.max_level));
    let current_qty = coerce_number(row.get_any(&["Current Stock", "Quantity"]));

    let level = StockLevel::new(current_qty, min_level, max_level);
    Some(StockDashboardRow {
        sku,
        product,
        region: row.get("Region").trim().to_string(),
        current_qty,
        min_level,
        max_level,
        status: level.status(),
        percentage: level.percentage(),
        priority_score: priority_score(&level),
    })
}

/// Order rows most urgent first
pub fn sort_for_packing(rows: &mut [StockDashboardRow]) {
    rows.sort_by(|a, b| packing_order((a.sku.as_str(), &a.level()), (b.sku.as_str(), &b.level())));
}

/// Count rows per tier, listing every tier
pub fn summarize(rows: &[StockDashboardRow]) -> StockSummary {
    let by_tier = StockTier::ALL
        .iter()
        .map(|tier| TierCount {
            status: *tier,
            count: rows.iter().filter(|r| r.status.status == *tier).count(),
        })
        .collect();
    let needs_packing = rows
        .iter()
        .filter(|r| {
            matches!(
                r.status.status,
                StockTier::Critical | StockTier::Low | StockTier::BelowMin
            )
        })
        .count();

    StockSummary {
        total_items: rows.len(),
        needs_packing,
        by_tier,
    }
}

impl<'a, G: SheetGateway> StockService<'a, G> {
    /// Create a new StockService instance
    pub fn new(sheets: &'a G, settings: &'a SettingsCache, ranges: &'a RangeConfig) -> Self {
        Self {
            sheets,
            settings,
            ranges,
        }
    }

    /// Classified inventory rows, most urgent first
    pub async fn dashboard(&self) -> AppResult<Vec<StockDashboardRow>> {
        let rows = self.sheets.read_rows(&self.ranges.inventory).await?;
        let settings = self
            .settings
            .get_or_load(self.sheets, &self.ranges.settings)
            .await;

        let mut dashboard: Vec<StockDashboardRow> = rows
            .iter()
            .filter_map(|row| dashboard_row(row, &settings))
            .collect();
        sort_for_packing(&mut dashboard);

        tracing::debug!(rows = dashboard.len(), "Built stock dashboard");
        Ok(dashboard)
    }

    /// Counts per tier over the dashboard rows
    pub async fn summary(&self) -> AppResult<StockSummary> {
        let rows = self.dashboard().await?;
        Ok(summarize(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::memory::MemorySheets;
    use std::time::Duration;

    fn sheets() -> MemorySheets {
        let ranges = RangeConfig::default();
        MemorySheets::new()
            .with_range(
                &ranges.inventory,
                &["SKU", "Product", "Region", "Current Stock", "Min Level", "Max Level"],
                &[
                    &["SUN-25G", "Sunflower 25g", "Riyadh Region", "1,200", "", ""],
                    &["SUN-50G", "Sunflower 50g", "Eastern Region", "20", "100", "400"],
                    &["SUN-1KG", "Sunflower 1kg", "Riyadh Region", "500", "", ""],
                    &["NEW-1", "New product", "Jeddah", "10", "", ""],
                    &["", "", "", "", "", ""],
                ],
            )
            .with_range(
                &ranges.settings,
                &["SKU", "Min Level", "Max Level", "Reorder Level"],
                &[
                    &["SUN-25G", "500", "2000", "800"],
                    &["SUN-1KG", "40", "160", "60"],
                ],
            )
    }

    #[test]
    fn test_classify_accepts_numbers_and_text() {
        let input: ClassifyInput = serde_json::from_value(serde_json::json!({
            "current_qty": "19.9",
            "min_level": 100,
            "max_level": "500"
        }))
        .unwrap();
        let result = classify(&input);
        assert_eq!(result.status.status, StockTier::Critical);
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn test_classify_missing_fields_is_unknown() {
        let input: ClassifyInput = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(classify(&input).status.status, StockTier::Unknown);
    }

    #[test]
    fn test_classify_result_flattens_status() {
        let input: ClassifyInput =
            serde_json::from_value(serde_json::json!({"current_qty": 100, "min_level": 100, "max_level": 500}))
                .unwrap();
        let json = serde_json::to_value(classify(&input)).unwrap();
        assert_eq!(json["status"], "normal");
        assert_eq!(json["color"], "green");
        assert_eq!(json["priority_score"], 100);
    }

    #[tokio::test]
    async fn test_dashboard_fills_bounds_from_settings_and_sorts() {
        let sheets = sheets();
        let cache = SettingsCache::new(Duration::from_secs(60));
        let ranges = RangeConfig::default();
        let service = StockService::new(&sheets, &cache, &ranges);

        let rows = service.dashboard().await.unwrap();
        let skus: Vec<&str> = rows.iter().map(|r| r.sku.as_str()).collect();

        // SUN-50G low, SUN-25G normal, SUN-1KG overstock, NEW-1 unknown
        assert_eq!(skus, vec!["SUN-50G", "SUN-25G", "SUN-1KG", "NEW-1"]);
        assert_eq!(rows[0].status.status, StockTier::Low);
        assert_eq!(rows[1].min_level, 500.0);
        assert_eq!(rows[1].current_qty, 1200.0);
        assert_eq!(rows[2].status.status, StockTier::Overstock);
        assert_eq!(rows[3].status.status, StockTier::Unknown);
    }

    #[tokio::test]
    async fn test_summary_counts_every_tier() {
        let sheets = sheets();
        let cache = SettingsCache::new(Duration::from_secs(60));
        let ranges = RangeConfig::default();
        let summary = StockService::new(&sheets, &cache, &ranges)
            .summary()
            .await
            .unwrap();

        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.needs_packing, 1);
        assert_eq!(summary.by_tier.len(), 7);
        let unknown = summary
            .by_tier
            .iter()
            .find(|t| t.status == StockTier::Unknown)
            .unwrap();
        assert_eq!(unknown.count, 1);
    }

    #[tokio::test]
    async fn test_dashboard_propagates_inventory_read_failure() {
        let sheets = sheets();
        sheets.set_fail_reads(true);
        let cache = SettingsCache::new(Duration::from_secs(60));
        let ranges = RangeConfig::default();

        assert!(StockService::new(&sheets, &cache, &ranges)
            .dashboard()
            .await
            .is_err());
    }
}
