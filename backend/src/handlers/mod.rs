//! HTTP handlers

mod health;
mod labels;
mod packing;
mod settings;
mod stock;

pub use health::*;
pub use labels::*;
pub use packing::*;
pub use settings::*;
pub use stock::*;
