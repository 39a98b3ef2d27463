//! Conversion between compact form values and GeoJSON.

pub mod compact;
pub mod precision;

pub use compact::{from_geojson, swap_axes, to_geojson};
pub use precision::{round_numbers, round_position};
