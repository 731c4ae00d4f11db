//! External API integrations

pub mod sheets;

#[cfg(test)]
pub mod memory;

pub use sheets::{SheetGateway, SheetsClient};
