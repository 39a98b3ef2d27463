//! Utility modules for geoform.

pub mod number;

pub use number::{json_number, round_to};
