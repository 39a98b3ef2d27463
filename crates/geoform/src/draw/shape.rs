//! Drawable shapes and their mapping to and from GeoJSON.
//!
//! Shapes use (latitude, longitude) order like the map surface does; GeoJSON
//! positions are (longitude, latitude). Polygon rings are stored open and
//! closed again on export.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::codec::round_position;
use crate::error::ShapeError;
use crate::model::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Position};
use crate::util::json_number;

/// Property carrying a circle's radius in meters.
pub const RADIUS_PROPERTY: &str = "radius";

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
    pub alt: Option<f64>,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, alt: None }
    }

    pub fn with_alt(mut self, alt: f64) -> Self {
        self.alt = Some(alt);
        self
    }

    /// Reads a GeoJSON position. Components past the altitude are ignored.
    pub fn from_position(position: &[f64]) -> Result<Self, ShapeError> {
        match *position {
            [lng, lat] => Ok(Self::new(lat, lng)),
            [lng, lat, alt, ..] => Ok(Self::new(lat, lng).with_alt(alt)),
            _ => Err(ShapeError::BadPosition { len: position.len() }),
        }
    }

    /// Writes a GeoJSON position rounded to `precision` digits.
    pub fn to_position(&self, precision: u32) -> Position {
        let mut position = vec![self.lng, self.lat];
        position.extend(self.alt);
        round_position(&position, precision)
    }
}

/// Style options passed through to the surface untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeStyle(JsonObject);

impl ShapeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_object(options: JsonObject) -> Self {
        Self(options)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn color(&self) -> Option<&str> {
        self.0.get("color").and_then(Value::as_str)
    }

    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A shape on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Marker {
        position: LatLng,
        style: ShapeStyle,
    },
    /// A circle with its radius in meters.
    Circle {
        center: LatLng,
        radius: f64,
        style: ShapeStyle,
    },
    Polyline {
        path: Vec<LatLng>,
        style: ShapeStyle,
    },
    /// Open rings; the first is the outer boundary.
    Polygon {
        rings: Vec<Vec<LatLng>>,
        style: ShapeStyle,
    },
    Group(Vec<Shape>),
}

// ===== LOADING =====

impl Shape {
    /// Builds a shape from a GeoJSON document, applying `style` to every leaf.
    ///
    /// Multi-part geometries and collections become groups. A Point feature
    /// with a numeric `radius` property becomes a circle. A part of a group
    /// that cannot be drawn is logged and left out; the other parts load.
    pub fn from_geojson(doc: &GeoJson, style: &ShapeStyle) -> Result<Shape, ShapeError> {
        match doc {
            GeoJson::Geometry(geometry) => Shape::from_geometry(geometry, style),
            GeoJson::Feature(feature) => Shape::from_feature(feature, style),
            GeoJson::FeatureCollection(fc) => Ok(group_of(
                fc.features.iter().map(|f| Shape::from_feature(f, style)),
            )),
            GeoJson::Other(value) => Err(ShapeError::Unsupported {
                kind: doc
                    .type_name()
                    .map_or_else(|| json_kind(value).to_string(), str::to_string),
            }),
        }
    }

    /// Builds a shape from a feature. A feature without geometry is an empty group.
    pub fn from_feature(feature: &Feature, style: &ShapeStyle) -> Result<Shape, ShapeError> {
        match &feature.geometry {
            None => Ok(Shape::Group(Vec::new())),
            Some(Geometry::Point { coordinates, .. }) => {
                let center = LatLng::from_position(coordinates)?;
                match feature.property(RADIUS_PROPERTY).and_then(Value::as_f64) {
                    Some(radius) => Ok(Shape::Circle {
                        center,
                        radius,
                        style: style.clone(),
                    }),
                    None => Ok(Shape::Marker {
                        position: center,
                        style: style.clone(),
                    }),
                }
            }
            Some(geometry) => Shape::from_geometry(geometry, style),
        }
    }

    /// Builds a shape from a bare geometry.
    pub fn from_geometry(geometry: &Geometry, style: &ShapeStyle) -> Result<Shape, ShapeError> {
        let shape = match geometry {
            Geometry::Point { coordinates, .. } => Shape::Marker {
                position: LatLng::from_position(coordinates)?,
                style: style.clone(),
            },
            Geometry::MultiPoint { coordinates, .. } => group_of(coordinates.iter().map(|p| {
                LatLng::from_position(p).map(|position| Shape::Marker {
                    position,
                    style: style.clone(),
                })
            })),
            Geometry::LineString { coordinates, .. } => Shape::Polyline {
                path: path_from(coordinates)?,
                style: style.clone(),
            },
            Geometry::MultiLineString { coordinates, .. } => {
                group_of(coordinates.iter().map(|line| {
                    path_from(line).map(|path| Shape::Polyline {
                        path,
                        style: style.clone(),
                    })
                }))
            }
            Geometry::Polygon { coordinates, .. } => polygon_from(coordinates, style)?,
            Geometry::MultiPolygon { coordinates, .. } => {
                group_of(coordinates.iter().map(|rings| polygon_from(rings, style)))
            }
            Geometry::GeometryCollection { geometries, .. } => {
                group_of(geometries.iter().map(|g| Shape::from_geometry(g, style)))
            }
        };
        Ok(shape)
    }

    /// Unwraps groups and returns the leaf shapes in order.
    ///
    /// `max_depth` is the number of group levels allowed; a group nested
    /// below that is an error rather than unbounded recursion.
    pub fn flatten(self, max_depth: usize) -> Result<Vec<Shape>, ShapeError> {
        let mut leaves = Vec::new();
        self.flatten_into(0, max_depth, &mut leaves)?;
        Ok(leaves)
    }

    /// Like [`Shape::flatten`], but a group nested too deep is logged and
    /// left out while the shapes above it are kept.
    pub fn flatten_lossy(self, max_depth: usize) -> Vec<Shape> {
        match self {
            Shape::Group(children) if max_depth > 0 => children
                .into_iter()
                .flat_map(|child| child.flatten_lossy(max_depth - 1))
                .collect(),
            Shape::Group(children) => {
                let err = ShapeError::NestingTooDeep { max: max_depth };
                warn!(%err, dropped = children.len(), "skipping nested shapes");
                Vec::new()
            }
            leaf => vec![leaf],
        }
    }

    fn flatten_into(
        self,
        depth: usize,
        max_depth: usize,
        leaves: &mut Vec<Shape>,
    ) -> Result<(), ShapeError> {
        match self {
            Shape::Group(children) => {
                if depth >= max_depth {
                    return Err(ShapeError::NestingTooDeep { max: max_depth });
                }
                for child in children {
                    child.flatten_into(depth + 1, max_depth, leaves)?;
                }
            }
            leaf => leaves.push(leaf),
        }
        Ok(())
    }
}

/// Collects the parts that converted into a group.
fn group_of(parts: impl Iterator<Item = Result<Shape, ShapeError>>) -> Shape {
    Shape::Group(
        parts
            .enumerate()
            .filter_map(|(index, part)| {
                part.map_err(|err| warn!(index, %err, "skipping shape that cannot be drawn"))
                    .ok()
            })
            .collect(),
    )
}

fn path_from(positions: &[Position]) -> Result<Vec<LatLng>, ShapeError> {
    positions.iter().map(|p| LatLng::from_position(p)).collect()
}

fn polygon_from(rings: &[Vec<Position>], style: &ShapeStyle) -> Result<Shape, ShapeError> {
    let rings = rings
        .iter()
        .map(|ring| {
            let mut ring = path_from(ring)?;
            if ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            Ok(ring)
        })
        .collect::<Result<_, ShapeError>>()?;
    Ok(Shape::Polygon {
        rings,
        style: style.clone(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ===== EXPORT =====

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Marker { .. } => "marker",
            Shape::Circle { .. } => "circle",
            Shape::Polyline { .. } => "polyline",
            Shape::Polygon { .. } => "polygon",
            Shape::Group(_) => "group",
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Shape::Circle { .. })
    }

    pub fn radius(&self) -> Option<f64> {
        match self {
            Shape::Circle { radius, .. } => Some(*radius),
            _ => None,
        }
    }

    pub fn style(&self) -> Option<&ShapeStyle> {
        match self {
            Shape::Marker { style, .. }
            | Shape::Circle { style, .. }
            | Shape::Polyline { style, .. }
            | Shape::Polygon { style, .. } => Some(style),
            Shape::Group(_) => None,
        }
    }

    /// Exports a leaf shape as a feature. Groups have no single feature.
    ///
    /// A circle becomes a Point feature with its radius in the `radius`
    /// property.
    pub fn to_feature(&self, precision: u32) -> Option<Feature> {
        let mut feature = match self {
            Shape::Marker { position, .. } => {
                Feature::new(Geometry::point(position.to_position(precision)))
            }
            Shape::Circle { center, radius, .. } => {
                Feature::new(Geometry::point(center.to_position(precision)))
                    .with_property(RADIUS_PROPERTY, json_number(*radius))
            }
            Shape::Polyline { path, .. } => {
                Feature::new(Geometry::line_string(positions(path, precision)))
            }
            Shape::Polygon { rings, .. } => Feature::new(Geometry::polygon(
                rings.iter().map(|ring| closed_ring(ring, precision)).collect(),
            )),
            Shape::Group(_) => return None,
        };
        // Exported features always carry a properties object.
        feature.properties.get_or_insert_with(JsonObject::new);
        Some(feature)
    }

    /// Exports every leaf under this shape.
    pub fn to_features(&self, precision: u32) -> Vec<Feature> {
        match self {
            Shape::Group(children) => children
                .iter()
                .flat_map(|child| child.to_features(precision))
                .collect(),
            leaf => leaf.to_feature(precision).into_iter().collect(),
        }
    }
}

/// Exports shapes as a feature collection.
pub fn shapes_to_feature_collection<'a>(
    shapes: impl IntoIterator<Item = &'a Shape>,
    precision: u32,
) -> FeatureCollection {
    FeatureCollection::new(
        shapes
            .into_iter()
            .flat_map(|shape| shape.to_features(precision))
            .collect(),
    )
}

fn positions(path: &[LatLng], precision: u32) -> Vec<Position> {
    path.iter().map(|p| p.to_position(precision)).collect()
}

fn closed_ring(ring: &[LatLng], precision: u32) -> Vec<Position> {
    let mut positions = positions(ring, precision);
    if positions.first() != positions.last() {
        if let Some(first) = positions.first().cloned() {
            positions.push(first);
        }
    }
    positions
}
