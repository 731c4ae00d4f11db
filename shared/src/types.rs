//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A row read from a sheet, keyed by the header of each column
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SheetRow {
    pub cells: HashMap<String, String>,
}

impl SheetRow {
    /// Build a row by zipping headers with cell values.
    /// Short rows are padded with empty cells, extra cells are dropped.
    pub fn from_values(headers: &[String], values: &[String]) -> Self {
        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = values.get(i).cloned().unwrap_or_default();
                (header.trim().to_string(), value)
            })
            .collect();
        Self { cells }
    }

    /// Cell value for a header, or an empty string when the column is absent
    pub fn get(&self, header: &str) -> &str {
        self.cells.get(header).map(String::as_str).unwrap_or("")
    }

    /// First non-empty value among several candidate headers
    pub fn get_any(&self, headers: &[&str]) -> &str {
        headers
            .iter()
            .map(|h| self.get(h))
            .find(|v| !v.trim().is_empty())
            .unwrap_or("")
    }
}

/// Coerce a sheet cell to a number the way the front-ends do.
///
/// Empty cells become `0`, thousands separators are ignored and anything
/// that does not parse becomes `NaN`.
pub fn coerce_number(cell: &str) -> f64 {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.replace(',', "").parse::<f64>().unwrap_or(f64::NAN)
}

/// `0` and `NaN` count as "not provided"
pub fn is_falsy(value: f64) -> bool {
    value == 0.0 || value.is_nan()
}

/// Replace a falsy number with a default
pub fn or_default(value: f64, default: f64) -> f64 {
    if is_falsy(value) {
        default
    } else {
        value
    }
}
