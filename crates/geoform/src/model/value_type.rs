//! Form value types.
//!
//! A [`ValueType`] drives both validation and the direction of the codec.
//! Type names are matched exactly as the schema spells them.

use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// The declared type of a form value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
    Point,
    MultiPoint,
    LineString,
    Polygon,
    /// A complete GeoJSON document held verbatim.
    GeoJson,
}

impl ValueType {
    /// All value types, in schema order.
    pub const ALL: [ValueType; 9] = [
        ValueType::String,
        ValueType::Integer,
        ValueType::Float,
        ValueType::Boolean,
        ValueType::Point,
        ValueType::MultiPoint,
        ValueType::LineString,
        ValueType::Polygon,
        ValueType::GeoJson,
    ];

    /// Returns the schema name of this type.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Point => "Point",
            ValueType::MultiPoint => "MultiPoint",
            ValueType::LineString => "LineString",
            ValueType::Polygon => "Polygon",
            ValueType::GeoJson => "GeoJSON",
        }
    }

    /// Parses a schema name, returning None for unknown names.
    pub fn from_name(name: &str) -> Option<ValueType> {
        ValueType::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Returns true if values of this type convert to GeoJSON.
    pub fn is_geometric(self) -> bool {
        matches!(
            self,
            ValueType::Point
                | ValueType::MultiPoint
                | ValueType::LineString
                | ValueType::Polygon
                | ValueType::GeoJson
        )
    }

    /// Returns true for `integer` and `float`.
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueType::Integer | ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::from_name(s).ok_or_else(|| ConvertError::UnrecognizedType {
            name: s.to_string(),
        })
    }
}

/// Returns true if `name` is a GeoJSON type name (RFC 7946 section 3) or `GeoJSON`.
pub fn is_geojson_type(name: &str) -> bool {
    matches!(
        name,
        "Point"
            | "MultiPoint"
            | "LineString"
            | "MultiLineString"
            | "Polygon"
            | "MultiPolygon"
            | "GeometryCollection"
            | "GeoJSON"
            | "Feature"
            | "FeatureCollection"
    )
}

/// Returns true if `name` is a numeric value type.
pub fn is_numeric_type(name: &str) -> bool {
    ValueType::from_name(name).is_some_and(ValueType::is_numeric)
}

/// What a field may hold instead of a literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueReference {
    /// Only literal values are accepted.
    #[default]
    None,
    /// The field may hold a symbolic reference that looks like an identifier.
    AnyString,
}

impl ValueReference {
    /// Parses the reference hint carried by a form field.
    ///
    /// Unknown hints fall back to [`ValueReference::None`].
    pub fn from_hint(hint: &str) -> ValueReference {
        match hint {
            "anyString" => ValueReference::AnyString,
            _ => ValueReference::None,
        }
    }

    /// Returns true if `value` may stand as a reference instead of a literal.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            ValueReference::None => false,
            ValueReference::AnyString => value
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_'),
        }
    }
}
