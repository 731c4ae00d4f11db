//! In-memory sheet gateway for service tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use shared::SheetRow;

use super::sheets::{rows_from_values, SheetGateway};
use crate::error::{AppError, AppResult};

/// Ranges held as raw values, first row being the headers
#[derive(Default)]
pub struct MemorySheets {
    ranges: Mutex<HashMap<String, Vec<Vec<String>>>>,
    fail_reads: AtomicBool,
    fail_appends: Mutex<HashSet<String>>,
    reads: AtomicUsize,
}

impl MemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a range with headers and rows
    pub fn with_range(self, range: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        let mut values = vec![headers.iter().map(|h| h.to_string()).collect::<Vec<_>>()];
        values.extend(
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<_>>()),
        );
        self.ranges.lock().unwrap().insert(range.to_string(), values);
        self
    }

    /// Raw values currently stored for a range
    pub fn values(&self, range: &str) -> Vec<Vec<String>> {
        self.ranges
            .lock()
            .unwrap()
            .get(range)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every append to `range` fail
    pub fn fail_appends_to(&self, range: &str) {
        self.fail_appends.lock().unwrap().insert(range.to_string());
    }

    pub fn clear_failing_appends(&self) {
        self.fail_appends.lock().unwrap().clear();
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl SheetGateway for MemorySheets {
    async fn read_rows(&self, range: &str) -> AppResult<Vec<SheetRow>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::SheetsApi("simulated outage".to_string()));
        }
        Ok(rows_from_values(self.values(range)))
    }

    async fn append_rows(&self, range: &str, rows: Vec<Vec<String>>) -> AppResult<()> {
        if self.fail_appends.lock().unwrap().contains(range) {
            return Err(AppError::SheetsApi(format!("simulated append failure on {}", range)));
        }
        self.ranges
            .lock()
            .unwrap()
            .entry(range.to_string())
            .or_default()
            .extend(rows);
        Ok(())
    }
}
