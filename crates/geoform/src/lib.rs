//! geoform: geometry values for data-entry forms.
//!
//! This crate validates typed form values and converts geometric ones
//! between the compact text operators type and GeoJSON, and runs
//! interactive edit sessions for those geometries on a map surface.
//!
//! # Overview
//!
//! Form fields declare a [`ValueType`]. Geometric values are written in a
//! compact JSON form with (latitude, longitude[, altitude]) positions:
//!
//! - Point: `[36.8, -121.9]`
//! - MultiPoint and LineString: `[[36.8, -121.9], [36.9, -122.0]]`
//! - Polygon: the outer ring only, at least three points, not closed
//!
//! GeoJSON uses (longitude, latitude) order, so conversions swap the axes.
//!
//! # Quick Start
//!
//! ```rust
//! use geoform::{ValueType, check_value, from_geojson, to_geojson};
//!
//! let value = "[36.8, -121.9]";
//! assert!(check_value(value, "Point", true, "").is_ok());
//!
//! let doc = to_geojson(value, ValueType::Point).unwrap();
//! assert_eq!(
//!     serde_json::to_string(&doc).unwrap(),
//!     r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[-121.9,36.8]}}"#
//! );
//!
//! let back = from_geojson(Some(&doc), ValueType::Point).unwrap();
//! assert_eq!(back, "[36.8,-121.9]");
//! ```
//!
//! # Modules
//!
//! - [`model`]: value types and the GeoJSON document model
//! - [`validate`]: checks for typed form values
//! - [`codec`]: compact value <-> GeoJSON conversion
//! - [`draw`]: edit sessions on a map surface
//! - [`config`]: draw session options
//! - [`error`]: error types
//! - [`limits`]: numeric limits and defaults

pub mod codec;
pub mod config;
pub mod draw;
pub mod error;
pub mod limits;
pub mod model;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{from_geojson, to_geojson};
pub use config::DrawOptions;
pub use draw::{
    DrawEntry, DrawEvent, DrawSessionManager, EditOutcome, EventOutcome, MapSurface, Shape,
    ShapeId, SurfaceRegistry,
};
pub use error::{ConfigError, ConvertError, ShapeError, SurfaceError, ValueError};
pub use model::{
    Feature, FeatureCollection, GeoJson, Geometry, ValueReference, ValueType,
    empty_feature_collection, is_geojson_type, is_numeric_type,
};
pub use validate::{check_value, validate_value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
