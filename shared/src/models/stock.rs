//! Stock level classification

use serde::{Deserialize, Serialize};

use crate::types::{coerce_number, is_falsy, or_default};

/// Below `min × CRITICAL_FACTOR` the stock is critical
pub const CRITICAL_FACTOR: f64 = 0.2;
/// Below `min × LOW_FACTOR` the stock is low
pub const LOW_FACTOR: f64 = 0.5;
/// Above `max × HIGH_FACTOR` the stock is overstocked
pub const HIGH_FACTOR: f64 = 1.5;

/// Quantity and configured bounds for one inventory row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StockLevel {
    pub current_qty: f64,
    pub min_level: f64,
    pub max_level: f64,
}

impl StockLevel {
    pub fn new(current_qty: f64, min_level: f64, max_level: f64) -> Self {
        Self {
            current_qty,
            min_level,
            max_level,
        }
    }

    /// Build a level from raw sheet cells
    pub fn from_cells(current_qty: &str, min_level: &str, max_level: &str) -> Self {
        Self::new(
            coerce_number(current_qty),
            coerce_number(min_level),
            coerce_number(max_level),
        )
    }

    pub fn tier(&self) -> StockTier {
        classify_tier(self.current_qty, self.min_level, self.max_level)
    }

    pub fn status(&self) -> StockStatus {
        self.tier().status()
    }

    pub fn percentage(&self) -> f64 {
        stock_percentage(self.current_qty, self.min_level, self.max_level)
    }
}

/// Urgency tier of a stock level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StockTier {
    Unknown,
    Critical,
    Low,
    BelowMin,
    Normal,
    High,
    Overstock,
}

impl StockTier {
    pub const ALL: [StockTier; 7] = [
        StockTier::Critical,
        StockTier::Low,
        StockTier::BelowMin,
        StockTier::Normal,
        StockTier::High,
        StockTier::Overstock,
        StockTier::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockTier::Unknown => "unknown",
            StockTier::Critical => "critical",
            StockTier::Low => "low",
            StockTier::BelowMin => "below-min",
            StockTier::Normal => "normal",
            StockTier::High => "high",
            StockTier::Overstock => "overstock",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StockTier::Unknown => "gray",
            StockTier::Critical => "red",
            StockTier::Low => "orange",
            StockTier::BelowMin => "yellow",
            StockTier::Normal => "green",
            StockTier::High => "blue",
            StockTier::Overstock => "purple",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StockTier::Unknown => "No stock levels configured",
            StockTier::Critical => "Critical - reorder immediately",
            StockTier::Low => "Low stock",
            StockTier::BelowMin => "Below minimum level",
            StockTier::Normal => "Stock level normal",
            StockTier::High => "Above maximum level",
            StockTier::Overstock => "Overstocked",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StockTier::Unknown => "❔",
            StockTier::Critical => "🚨",
            StockTier::Low => "⚠️",
            StockTier::BelowMin => "📉",
            StockTier::Normal => "✅",
            StockTier::High => "📈",
            StockTier::Overstock => "📦",
        }
    }

    pub fn status(&self) -> StockStatus {
        StockStatus {
            status: *self,
            color: self.color(),
            message: self.message(),
            icon: self.icon(),
        }
    }
}

impl std::fmt::Display for StockTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation of a stock tier for badges and dashboards
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StockStatus {
    pub status: StockTier,
    pub color: &'static str,
    pub message: &'static str,
    pub icon: &'static str,
}

/// Classify a stock level into its urgency tier.
///
/// Missing bounds are treated permissively: a falsy min becomes `0` and a
/// falsy max becomes unbounded. With neither bound the tier is `Unknown`.
pub fn classify_tier(current_qty: f64, min_level: f64, max_level: f64) -> StockTier {
    if is_falsy(min_level) && is_falsy(max_level) {
        return StockTier::Unknown;
    }

    let min = or_default(min_level, 0.0);
    let max = or_default(max_level, f64::INFINITY);
    let qty = or_default(current_qty, 0.0);

    if qty < min * CRITICAL_FACTOR {
        StockTier::Critical
    } else if qty < min * LOW_FACTOR {
        StockTier::Low
    } else if qty < min {
        StockTier::BelowMin
    } else if qty > max * HIGH_FACTOR {
        StockTier::Overstock
    } else if qty > max {
        StockTier::High
    } else {
        StockTier::Normal
    }
}

/// Classify a stock level and attach its presentation constants
pub fn classify_stock(current_qty: f64, min_level: f64, max_level: f64) -> StockStatus {
    classify_tier(current_qty, min_level, max_level).status()
}

/// Classify raw sheet cells
pub fn classify_cells(current_qty: &str, min_level: &str, max_level: &str) -> StockStatus {
    StockLevel::from_cells(current_qty, min_level, max_level).status()
}

/// Position of the quantity between min and max, as a percentage in `[0, 100]`.
///
/// A falsy max defaults to `min × 2` here, unlike [`classify_tier`] which
/// treats it as unbounded.
pub fn stock_percentage(current_qty: f64, min_level: f64, max_level: f64) -> f64 {
    let min = or_default(min_level, 0.0);
    let max = if is_falsy(max_level) { min * 2.0 } else { max_level };
    let qty = or_default(current_qty, 0.0);

    if max == min {
        return 100.0;
    }

    let pct = (qty - min) / (max - min) * 100.0;
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

/// Percentage for raw sheet cells
pub fn percentage_cells(current_qty: &str, min_level: &str, max_level: &str) -> f64 {
    StockLevel::from_cells(current_qty, min_level, max_level).percentage()
}
