//! Stock settings (min/max/reorder levels per SKU) with a TTL cache

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use shared::{coerce_number, validate_stock_bounds, SheetRow};
use tokio::sync::RwLock;

use crate::external::SheetGateway;

/// Configured levels for one SKU
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct StockSettings {
    pub min_level: f64,
    pub max_level: f64,
    pub reorder_level: f64,
}

pub type SettingsTable = HashMap<String, StockSettings>;

/// Levels used when the settings sheet cannot be read
pub fn default_settings() -> SettingsTable {
    [
        ("SUN-25G", 500.0, 2000.0, 800.0),
        ("SUN-50G", 300.0, 1200.0, 450.0),
        ("SUN-100G", 200.0, 800.0, 300.0),
        ("SUN-250G", 100.0, 400.0, 150.0),
        ("SUN-1KG", 40.0, 160.0, 60.0),
    ]
    .into_iter()
    .map(|(sku, min_level, max_level, reorder_level)| {
        (
            sku.to_string(),
            StockSettings {
                min_level,
                max_level,
                reorder_level,
            },
        )
    })
    .collect()
}

/// Parse settings sheet rows; rows without a SKU or with invalid bounds are skipped
pub fn parse_settings(rows: &[SheetRow]) -> SettingsTable {
    rows.iter()
        .filter_map(|row| {
            let sku = row.get("SKU").trim();
            if sku.is_empty() {
                return None;
            }
            let settings = StockSettings {
                min_level: coerce_number(row.get("Min Level")),
                max_level: coerce_number(row.get("Max Level")),
                reorder_level: coerce_number(row.get("Reorder Level")),
            };
            if let Err(reason) = validate_stock_bounds(settings.min_level, settings.max_level) {
                tracing::warn!(sku, reason, "Skipping invalid stock settings row");
                return None;
            }
            Some((sku.to_string(), settings))
        })
        .collect()
}

struct CachedSettings {
    loaded_at: Instant,
    table: Arc<SettingsTable>,
}

/// Settings loaded from the sheet, kept for a fixed time
pub struct SettingsCache {
    ttl: Duration,
    state: RwLock<Option<CachedSettings>>,
}

impl SettingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(None),
        }
    }

    /// Cached table while fresh, otherwise reload from the settings range.
    ///
    /// A failed reload keeps serving the stale table, or the defaults when
    /// nothing was ever loaded.
    pub async fn get_or_load<G: SheetGateway>(&self, sheets: &G, range: &str) -> Arc<SettingsTable> {
        if let Some(cached) = self.state.read().await.as_ref() {
            if cached.loaded_at.elapsed() < self.ttl {
                return Arc::clone(&cached.table);
            }
        }

        let mut state = self.state.write().await;
        // another task may have refreshed while we waited for the lock
        if let Some(cached) = state.as_ref() {
            if cached.loaded_at.elapsed() < self.ttl {
                return Arc::clone(&cached.table);
            }
        }

        match sheets.read_rows(range).await {
            Ok(rows) => {
                let table = Arc::new(parse_settings(&rows));
                tracing::info!(skus = table.len(), "Loaded stock settings");
                *state = Some(CachedSettings {
                    loaded_at: Instant::now(),
                    table: Arc::clone(&table),
                });
                table
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load stock settings, using fallback");
                match state.as_ref() {
                    Some(cached) => Arc::clone(&cached.table),
                    None => Arc::new(default_settings()),
                }
            }
        }
    }

    /// Drop the cached table so the next read reloads it
    pub async fn invalidate(&self) {
        *self.state.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::memory::MemorySheets;

    const RANGE: &str = "Settings!A:Z";

    fn sheets() -> MemorySheets {
        MemorySheets::new().with_range(
            RANGE,
            &["SKU", "Min Level", "Max Level", "Reorder Level"],
            &[
                &["SUN-25G", "100", "500", "150"],
                &["", "1", "2", "3"],
                &["BAD", "500", "100", "0"],
                &["SUN-1KG", "", "80", ""],
            ],
        )
    }

    #[test]
    fn test_parse_settings_skips_invalid_rows() {
        let rows = rows_for(&sheets());
        let table = parse_settings(&rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table["SUN-25G"].max_level, 500.0);
        assert_eq!(table["SUN-1KG"].min_level, 0.0);
        assert!(!table.contains_key("BAD"));
    }

    fn rows_for(sheets: &MemorySheets) -> Vec<SheetRow> {
        crate::external::sheets::rows_from_values(sheets.values(RANGE))
    }

    #[tokio::test]
    async fn test_cache_serves_fresh_table_without_reloading() {
        let sheets = sheets();
        let cache = SettingsCache::new(Duration::from_secs(60));

        let first = cache.get_or_load(&sheets, RANGE).await;
        let second = cache.get_or_load(&sheets, RANGE).await;

        assert_eq!(sheets.read_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_expired_cache_reloads() {
        let sheets = sheets();
        let cache = SettingsCache::new(Duration::ZERO);

        cache.get_or_load(&sheets, RANGE).await;
        cache.get_or_load(&sheets, RANGE).await;

        assert_eq!(sheets.read_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_first_load_uses_defaults() {
        let sheets = sheets();
        sheets.set_fail_reads(true);
        let cache = SettingsCache::new(Duration::from_secs(60));

        let table = cache.get_or_load(&sheets, RANGE).await;
        assert_eq!(*table, default_settings());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_stale_table() {
        let sheets = sheets();
        let cache = SettingsCache::new(Duration::ZERO);

        cache.get_or_load(&sheets, RANGE).await;
        sheets.set_fail_reads(true);
        let table = cache.get_or_load(&sheets, RANGE).await;

        assert_eq!(table.len(), 2);
        assert!(table.contains_key("SUN-25G"));
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let sheets = sheets();
        let cache = SettingsCache::new(Duration::from_secs(60));

        cache.get_or_load(&sheets, RANGE).await;
        cache.invalidate().await;
        cache.get_or_load(&sheets, RANGE).await;

        assert_eq!(sheets.read_count(), 2);
    }
}
