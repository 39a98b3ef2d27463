//! Error types for value validation, conversion, and draw sessions.
//!
//! Errors come in two tiers. [`ValueError`] is a data-quality problem with
//! what the operator typed and renders as a human-readable message for the
//! form. [`ConvertError`] signals a caller or schema mismatch and is returned
//! from the conversion entry points instead of being shown to the operator.

use thiserror::Error;

use crate::model::ValueType;

/// Soft validation failure for a form value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("a value is required")]
    Required,

    #[error("invalid integer value")]
    InvalidInteger,

    #[error("invalid float value")]
    InvalidFloat,

    #[error("invalid boolean value")]
    InvalidBoolean,

    #[error("invalid {value_type}: {message}")]
    Json {
        value_type: ValueType,
        message: String,
    },

    #[error("not an array")]
    NotAnArray,

    #[error("not an array of 2 or 3 elements (found {len})")]
    WrongArity { len: usize },

    #[error("elements must be numbers")]
    NotNumeric,

    #[error("element {index} is not a point")]
    BadElement { index: usize },

    #[error("at least 3 points for a polygon (found {len})")]
    TooFewPoints { len: usize },

    #[error("unrecognized type: {name}")]
    UnrecognizedType { name: String },
}

/// Hard conversion failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("unrecognized type: {name}")]
    UnrecognizedType { name: String },

    #[error("{value_type} values have no geometry representation")]
    NotGeometric { value_type: ValueType },

    #[error("feature {index} is a {found}, expected a Point")]
    NotAPoint { index: usize, found: String },

    #[error("JSON serialization failed: {0}")]
    Serialize(String),
}

/// Failure reported by a map surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("map surface is unavailable")]
    Unavailable,

    #[error("unknown shape {id}")]
    UnknownShape { id: String },

    #[error("unknown control {id}")]
    UnknownControl { id: String },

    #[error("map surface rejected the request: {0}")]
    Rejected(String),
}

/// Failure converting between geometries and drawable shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("geometry kind {kind} cannot be drawn")]
    Unsupported { kind: String },

    #[error("shape groups nested deeper than {max}")]
    NestingTooDeep { max: usize },

    #[error("position has {len} coordinates, expected 2 or 3")]
    BadPosition { len: usize },
}

/// Failure loading options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be {expected}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
    },
}
