//! Shared types and computations for the stock tracking platform
//!
//! This crate holds the pure logic shared between the backend service and the
//! browser front-ends (via WASM): stock tier classification, packet label
//! encoding and packing material estimation. Nothing here performs I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
