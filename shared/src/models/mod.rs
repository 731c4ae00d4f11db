//! Domain models for the stock tracking platform

mod packet_label;
mod packing;
mod priority;
mod region;
mod stock;

pub use packet_label::*;
pub use packing::*;
pub use priority::*;
pub use region::*;
pub use stock::*;
