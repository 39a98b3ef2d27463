//! Typed GeoJSON documents (RFC 7946).
//!
//! Coordinates are in (longitude, latitude[, altitude]) order. Parsing never
//! fails: a document whose shape is not recognized is kept as
//! [`GeoJson::Other`] so that callers can still pass it along or print it.
//!
//! Every object keeps the members it does not model (`bbox`, `crs`, names
//! and so on) in `foreign_members`, so a parsed document prints back with
//! the same content. `properties` is printed only when the feature has it.

use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::util::json_number;

/// A single position: `[lon, lat]` or `[lon, lat, alt]`.
pub type Position = Vec<f64>;

/// A JSON object.
pub type JsonObject = Map<String, Value>;

/// A geometry with its typed coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(serialize_with = "print_coordinates")]
        coordinates: Position,
        #[serde(flatten)]
        foreign_members: JsonObject,
    },
    MultiPoint {
        #[serde(serialize_with = "print_coordinates")]
        coordinates: Vec<Position>,
        #[serde(flatten)]
        foreign_members: JsonObject,
    },
    LineString {
        #[serde(serialize_with = "print_coordinates")]
        coordinates: Vec<Position>,
        #[serde(flatten)]
        foreign_members: JsonObject,
    },
    MultiLineString {
        #[serde(serialize_with = "print_coordinates")]
        coordinates: Vec<Vec<Position>>,
        #[serde(flatten)]
        foreign_members: JsonObject,
    },
    /// Rings; the first is the outer boundary, the rest are holes.
    Polygon {
        #[serde(serialize_with = "print_coordinates")]
        coordinates: Vec<Vec<Position>>,
        #[serde(flatten)]
        foreign_members: JsonObject,
    },
    MultiPolygon {
        #[serde(serialize_with = "print_coordinates")]
        coordinates: Vec<Vec<Vec<Position>>>,
        #[serde(flatten)]
        foreign_members: JsonObject,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
        #[serde(flatten)]
        foreign_members: JsonObject,
    },
}

impl Geometry {
    pub fn point(coordinates: Position) -> Self {
        Geometry::Point {
            coordinates,
            foreign_members: Map::new(),
        }
    }

    pub fn multi_point(coordinates: Vec<Position>) -> Self {
        Geometry::MultiPoint {
            coordinates,
            foreign_members: Map::new(),
        }
    }

    pub fn line_string(coordinates: Vec<Position>) -> Self {
        Geometry::LineString {
            coordinates,
            foreign_members: Map::new(),
        }
    }

    pub fn polygon(coordinates: Vec<Vec<Position>>) -> Self {
        Geometry::Polygon {
            coordinates,
            foreign_members: Map::new(),
        }
    }

    /// Returns the GeoJSON `type` member of this geometry.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    /// Members besides `type` and the coordinates, such as `bbox`.
    pub fn foreign_members(&self) -> &JsonObject {
        match self {
            Geometry::Point {
                foreign_members, ..
            }
            | Geometry::MultiPoint {
                foreign_members, ..
            }
            | Geometry::LineString {
                foreign_members, ..
            }
            | Geometry::MultiLineString {
                foreign_members, ..
            }
            | Geometry::Polygon {
                foreign_members, ..
            }
            | Geometry::MultiPolygon {
                foreign_members, ..
            }
            | Geometry::GeometryCollection {
                foreign_members, ..
            } => foreign_members,
        }
    }

    /// Converts to a JSON value.
    pub fn to_value(&self) -> Value {
        to_json(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum FeatureType {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum FeatureCollectionType {
    #[default]
    FeatureCollection,
}

/// A feature: a geometry with properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// `null` and a missing member both read as None.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<JsonObject>,
    #[serde(flatten)]
    pub foreign_members: JsonObject,
}

impl Feature {
    /// Creates a feature holding `geometry` and no properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    /// Sets a property, creating the properties object if needed.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Looks up a property by key.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(key)
    }

    /// Converts to a JSON value.
    pub fn to_value(&self) -> Value {
        to_json(self)
    }
}

/// A collection of features.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: FeatureCollectionType,
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub foreign_members: JsonObject,
}

impl FeatureCollection {
    /// Creates a collection from features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            ..Self::default()
        }
    }

    /// Converts to a JSON value.
    pub fn to_value(&self) -> Value {
        to_json(self)
    }
}

/// A GeoJSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeoJson {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
    /// Anything that is not a recognized GeoJSON object, kept verbatim.
    Other(Value),
}

impl GeoJson {
    /// Classifies a JSON value.
    pub fn from_value(value: Value) -> GeoJson {
        match GeoJson::deserialize(&value) {
            Ok(doc) => doc,
            Err(_) => GeoJson::Other(value),
        }
    }

    /// Converts to a JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            GeoJson::Other(v) => v.clone(),
            doc => to_json(doc),
        }
    }

    /// Returns the `type` member, if the document has one.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            GeoJson::Geometry(g) => Some(g.type_name()),
            GeoJson::Feature(_) => Some("Feature"),
            GeoJson::FeatureCollection(_) => Some("FeatureCollection"),
            GeoJson::Other(v) => v.get("type").and_then(Value::as_str),
        }
    }

    /// Returns true for `null` and for an empty array.
    pub fn is_empty(&self) -> bool {
        match self {
            GeoJson::Other(Value::Null) => true,
            GeoJson::Other(Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }
}

impl From<Value> for GeoJson {
    fn from(value: Value) -> Self {
        GeoJson::from_value(value)
    }
}

impl From<GeoJson> for Value {
    fn from(doc: GeoJson) -> Self {
        doc.to_value()
    }
}

impl From<Geometry> for GeoJson {
    fn from(geometry: Geometry) -> Self {
        GeoJson::Geometry(geometry)
    }
}

impl From<Feature> for GeoJson {
    fn from(feature: Feature) -> Self {
        GeoJson::Feature(feature)
    }
}

impl From<FeatureCollection> for GeoJson {
    fn from(fc: FeatureCollection) -> Self {
        GeoJson::FeatureCollection(fc)
    }
}

impl FromStr for GeoJson {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

/// Returns an empty FeatureCollection.
pub fn empty_feature_collection() -> GeoJson {
    GeoJson::FeatureCollection(FeatureCollection::default())
}

// Documents hold only string-keyed JSON data, which always serializes.
fn to_json<T: Serialize>(doc: &T) -> Value {
    serde_json::to_value(doc).unwrap_or_default()
}

/// Nested coordinate arrays, printed with [`json_number`].
trait Coordinates {
    fn to_json(&self) -> Value;
}

impl Coordinates for f64 {
    fn to_json(&self) -> Value {
        json_number(*self)
    }
}

impl<T: Coordinates> Coordinates for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(Coordinates::to_json).collect())
    }
}

fn print_coordinates<T: Coordinates, S: Serializer>(
    coordinates: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    coordinates.to_json().serialize(serializer)
}

pub(crate) fn position_value(p: &[f64]) -> Value {
    Value::Array(p.iter().copied().map(json_number).collect())
}
