//! Business logic services for the stock tracking platform

pub mod packing;
pub mod settings;
pub mod stock;

pub use packing::PackingService;
pub use settings::SettingsCache;
pub use stock::StockService;
