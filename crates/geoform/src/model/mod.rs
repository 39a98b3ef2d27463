//! Data model types for geoform.
//!
//! - Value types (the declared type of a form field)
//! - GeoJSON documents (the canonical geometry exchange shape)

pub mod geojson;
pub mod value_type;

pub use geojson::{
    Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Position, empty_feature_collection,
};
pub use value_type::{ValueReference, ValueType, is_geojson_type, is_numeric_type};
