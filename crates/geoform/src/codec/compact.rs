//! Conversion between compact form values and GeoJSON.
//!
//! A compact value lists positions in (latitude, longitude[, altitude])
//! order, the way an operator types them. GeoJSON stores (longitude,
//! latitude[, altitude]). Conversion swaps the first two axes and carries
//! the altitude through.
//!
//! The two directions are not symmetric:
//! - `to_geojson` always wraps a geometry in a `Feature`.
//! - `from_geojson` keeps only the outer ring of a polygon and only the first
//!   feature of a collection (except for `MultiPoint`, which gathers every
//!   point feature).
//! - Geometry kinds with no compact form print as JSON with bounded precision.

use serde_json::Value;
use tracing::{debug, warn};

use crate::codec::precision::round_numbers;
use crate::error::ConvertError;
use crate::limits::COORDINATE_PRECISION;
use crate::model::geojson::position_value;
use crate::model::{
    Feature, FeatureCollection, GeoJson, Geometry, Position, ValueType, empty_feature_collection,
};
use crate::validate::validate_value;

// =============================================================================
// COMPACT -> GEOJSON
// =============================================================================

/// Converts a compact form value into a GeoJSON document.
///
/// Bad data is not an error here: an invalid or empty value is logged and
/// yields an empty `FeatureCollection`. Asking to convert a scalar type is a
/// contract violation and returns [`ConvertError::NotGeometric`].
pub fn to_geojson(value: &str, value_type: ValueType) -> Result<GeoJson, ConvertError> {
    debug!(value, %value_type, "to_geojson");
    if !value_type.is_geometric() {
        return Err(ConvertError::NotGeometric { value_type });
    }

    if let Err(err) = validate_value(value, value_type) {
        warn!(value, %value_type, %err, "to_geojson: invalid value");
        return Ok(empty_feature_collection());
    }

    let value = value.trim();
    if value.is_empty() {
        debug!(%value_type, "to_geojson: empty value");
        return Ok(empty_feature_collection());
    }
    let json = match serde_json::from_str::<Value>(value) {
        Ok(json) if is_falsy(&json) => {
            warn!(value, %value_type, "to_geojson: could not parse value");
            return Ok(empty_feature_collection());
        }
        Ok(json) => json,
        // Only reachable for GeoJSON, which is not validated.
        Err(err) => {
            warn!(value, %value_type, %err, "to_geojson: not JSON");
            return Ok(empty_feature_collection());
        }
    };

    if value_type == ValueType::GeoJson {
        return Ok(GeoJson::from_value(json));
    }

    let geometry = match value_type {
        ValueType::Point => read_position(&json).map(|p| Geometry::point(swap_axes(&p))),
        ValueType::MultiPoint => read_positions(&json).map(Geometry::multi_point),
        ValueType::LineString => read_positions(&json).map(Geometry::line_string),
        ValueType::Polygon => read_positions(&json).map(|ring| Geometry::polygon(vec![ring])),
        _ => return Err(ConvertError::NotGeometric { value_type }),
    };

    match geometry {
        Some(geometry) => Ok(GeoJson::Feature(Feature::new(geometry))),
        None => {
            warn!(value, %value_type, "to_geojson: unreadable coordinates");
            Ok(empty_feature_collection())
        }
    }
}

/// `null`, `false`, `0` and `""` carry no geometry.
fn is_falsy(json: &Value) -> bool {
    match json {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Reads one compact position as is.
fn read_position(json: &Value) -> Option<Position> {
    json.as_array()?.iter().map(Value::as_f64).collect()
}

/// Reads a list of compact positions, swapping each into GeoJSON order.
fn read_positions(json: &Value) -> Option<Vec<Position>> {
    json.as_array()?
        .iter()
        .map(|p| read_position(p).map(|p| swap_axes(&p)))
        .collect()
}

/// Swaps the first two axes, keeping any altitude.
pub fn swap_axes(position: &[f64]) -> Position {
    let mut swapped = position.to_vec();
    if swapped.len() >= 2 {
        swapped.swap(0, 1);
    }
    swapped
}

// =============================================================================
// GEOJSON -> COMPACT
// =============================================================================

/// Converts a GeoJSON document into a compact form value.
///
/// Returns an empty string for a missing, `null` or empty document. With
/// [`ValueType::GeoJson`] the document is printed back with every member it
/// was read with (two-space indentation). A `MultiPoint` value gathered from
/// a feature collection holding anything other than points is reported as
/// [`ConvertError::NotAPoint`].
pub fn from_geojson(doc: Option<&GeoJson>, value_type: ValueType) -> Result<String, ConvertError> {
    let Some(doc) = doc.filter(|d| !d.is_empty()) else {
        return Ok(String::new());
    };
    debug!(%value_type, kind = doc.type_name(), "from_geojson");

    if value_type == ValueType::GeoJson {
        return serde_json::to_string_pretty(&doc.to_value())
            .map_err(|e| ConvertError::Serialize(e.to_string()));
    }

    match doc {
        GeoJson::Feature(feature) => Ok(feature_to_compact(feature)),
        GeoJson::Geometry(geometry) => Ok(geometry_to_compact(geometry)),
        GeoJson::FeatureCollection(fc) => collection_to_compact(fc, value_type),
        GeoJson::Other(raw) => Ok(round_numbers(raw, COORDINATE_PRECISION).to_string()),
    }
}

fn feature_to_compact(feature: &Feature) -> String {
    feature
        .geometry
        .as_ref()
        .map_or_else(String::new, geometry_to_compact)
}

fn geometry_to_compact(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Point { coordinates, .. } => position_value(&swap_axes(coordinates)).to_string(),
        Geometry::MultiPoint { coordinates, .. } | Geometry::LineString { coordinates, .. } => {
            positions_to_compact(coordinates)
        }
        Geometry::Polygon { coordinates, .. } => match coordinates.first() {
            Some(outer) => positions_to_compact(outer),
            None => String::new(),
        },
        other => round_numbers(&other.to_value(), COORDINATE_PRECISION).to_string(),
    }
}

fn positions_to_compact(positions: &[Position]) -> String {
    Value::Array(
        positions
            .iter()
            .map(|p| position_value(&swap_axes(p)))
            .collect(),
    )
    .to_string()
}

fn collection_to_compact(
    fc: &FeatureCollection,
    value_type: ValueType,
) -> Result<String, ConvertError> {
    let Some(first) = fc.features.first() else {
        return Ok(String::new());
    };

    if value_type == ValueType::MultiPoint {
        let points = fc
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| match &feature.geometry {
                Some(Geometry::Point { coordinates, .. }) => Ok(coordinates.clone()),
                Some(other) => Err(ConvertError::NotAPoint {
                    index,
                    found: other.type_name().to_string(),
                }),
                None => Err(ConvertError::NotAPoint {
                    index,
                    found: "feature without geometry".to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(positions_to_compact(&points));
    }

    if fc.features.len() > 1 {
        warn!(
            count = fc.features.len(),
            "from_geojson: only the first feature of the collection is kept"
        );
    }
    Ok(feature_to_compact(first))
}


#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> GeoJson {
        GeoJson::from_value(value)
    }

    fn point_feature(coordinates: Value) -> Value {
        json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": coordinates}})
    }

    fn line_feature(coordinates: Value) -> Value {
        json!({"type": "Feature", "geometry": {"type": "LineString", "coordinates": coordinates}})
    }

    #[test]
    fn test_point_axis_swap() {
        let result = to_geojson("[10,20]", ValueType::Point).unwrap();
        assert_eq!(result.to_value(), point_feature(json!([20, 10])));
    }

    #[test]
    fn test_point_keeps_altitude() {
        let result = to_geojson("[36.8, -121.9, -100]", ValueType::Point).unwrap();
        let GeoJson::Feature(f) = &result else {
            panic!("expected a feature");
        };
        assert_eq!(f.geometry, Some(Geometry::point(vec![-121.9, 36.8, -100.0])));
        assert_eq!(
            from_geojson(Some(&result), ValueType::Point).unwrap(),
            "[36.8,-121.9,-100]"
        );
    }

    #[test]
    fn test_polygon_wraps_single_ring() {
        let result = to_geojson("[[0,0],[0,1],[1,1]]", ValueType::Polygon).unwrap();
        let GeoJson::Feature(f) = result else {
            panic!("expected a feature");
        };
        assert_eq!(
            f.geometry,
            Some(Geometry::polygon(vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
            ]]))
        );
    }

    #[test]
    fn test_invalid_value_degrades_to_empty_collection() {
        let empty = empty_feature_collection();
        assert_eq!(to_geojson("[10]", ValueType::Point).unwrap(), empty);
        assert_eq!(to_geojson("[[1,2]]", ValueType::Polygon).unwrap(), empty);
        assert_eq!(to_geojson("", ValueType::LineString).unwrap(), empty);
        assert_eq!(to_geojson("{oops", ValueType::GeoJson).unwrap(), empty);
        assert_eq!(to_geojson("null", ValueType::GeoJson).unwrap(), empty);
    }

    #[test]
    fn test_falsy_geojson_degrades_to_empty_collection() {
        for value in ["false", "0", "0.0", r#""""#] {
            assert_eq!(
                to_geojson(value, ValueType::GeoJson).unwrap(),
                empty_feature_collection(),
                "{value}"
            );
        }
        assert_eq!(to_geojson("1", ValueType::GeoJson).unwrap(), GeoJson::Other(json!(1)));
        assert_eq!(to_geojson("true", ValueType::GeoJson).unwrap(), GeoJson::Other(json!(true)));
    }

    #[test]
    fn test_scalar_type_is_a_hard_error() {
        assert_eq!(
            to_geojson("12", ValueType::Integer),
            Err(ConvertError::NotGeometric { value_type: ValueType::Integer })
        );
        assert!(to_geojson("abc", ValueType::String).is_err());
    }

    #[test]
    fn test_geojson_pass_through() {
        let text = r#"{"type":"MultiPolygon","coordinates":[[[[1,2],[3,4],[5,6],[1,2]]]]}"#;
        let result = to_geojson(text, ValueType::GeoJson).unwrap();
        assert_eq!(result.to_value(), serde_json::from_str::<Value>(text).unwrap());

        let odd = r#"{"hello": [1, 2]}"#;
        let result = to_geojson(odd, ValueType::GeoJson).unwrap();
        assert_eq!(result, GeoJson::Other(json!({"hello": [1, 2]})));
    }

    #[test]
    fn test_geojson_round_trip_keeps_geometry_members() {
        let text = concat!(
            r#"{"type":"Feature","#,
            r#""geometry":{"type":"Point","coordinates":[1,2],"bbox":[1,2,1,2]}}"#
        );
        let result = to_geojson(text, ValueType::GeoJson).unwrap();
        let printed = from_geojson(Some(&result), ValueType::GeoJson).unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&printed).unwrap(),
            serde_json::from_str::<Value>(text).unwrap()
        );
        assert_eq!(serde_json::to_string(&result).unwrap(), text);
    }

    #[test]
    fn test_geojson_round_trip_keeps_collection_members() {
        let text = concat!(
            r#"{"type":"FeatureCollection","name":"stops","bbox":[0,0,3,4],"features":["#,
            r#"{"type":"Feature","id":"a","geometry":null,"properties":{"z":1,"a":2}},"#,
            r#"{"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[3,4]]},"#,
            r#""title":"route"}]}"#
        );
        let result = to_geojson(text, ValueType::GeoJson).unwrap();
        assert!(matches!(result, GeoJson::FeatureCollection(_)));
        let printed = from_geojson(Some(&result), ValueType::GeoJson).unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&printed).unwrap(),
            serde_json::from_str::<Value>(text).unwrap()
        );
    }

    #[test]
    fn test_from_geojson_empty_inputs() {
        assert_eq!(from_geojson(None, ValueType::Point).unwrap(), "");
        let empty_fc = doc(json!({"type": "FeatureCollection", "features": []}));
        assert_eq!(from_geojson(Some(&empty_fc), ValueType::Point).unwrap(), "");
        let empty_array = GeoJson::Other(json!([]));
        assert_eq!(from_geojson(Some(&empty_array), ValueType::LineString).unwrap(), "");
        let null = GeoJson::Other(Value::Null);
        assert_eq!(from_geojson(Some(&null), ValueType::GeoJson).unwrap(), "");
    }

    #[test]
    fn test_from_geojson_pretty_prints_geojson() {
        let d = doc(json!({"type": "Point", "coordinates": [1, 2]}));
        let text = from_geojson(Some(&d), ValueType::GeoJson).unwrap();
        assert_eq!(text, "{\n  \"type\": \"Point\",\n  \"coordinates\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn test_from_geojson_polygon_drops_holes() {
        let d = doc(json!({
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [4, 0], [4, 4], [0, 0]],
                [[1, 1], [2, 1], [2, 2], [1, 1]]
            ]
        }));
        assert_eq!(
            from_geojson(Some(&d), ValueType::Polygon).unwrap(),
            "[[0,0],[0,4],[4,4],[0,0]]"
        );
        let no_rings = GeoJson::Geometry(Geometry::polygon(vec![]));
        assert_eq!(from_geojson(Some(&no_rings), ValueType::Polygon).unwrap(), "");
    }

    #[test]
    fn test_from_geojson_feature_without_geometry() {
        let d = doc(json!({"type": "Feature", "geometry": null, "properties": {}}));
        assert_eq!(from_geojson(Some(&d), ValueType::Point).unwrap(), "");
    }

    #[test]
    fn test_from_geojson_collection_keeps_first_feature() {
        let d = doc(json!({
            "type": "FeatureCollection",
            "features": [line_feature(json!([[1, 2], [3, 4]])), point_feature(json!([9, 9]))]
        }));
        assert_eq!(from_geojson(Some(&d), ValueType::LineString).unwrap(), "[[2,1],[4,3]]");
    }

    #[test]
    fn test_from_geojson_collection_as_multi_point() {
        let mut circle = point_feature(json!([3, 4]));
        circle["properties"] = json!({"radius": 5});
        let d = doc(json!({
            "type": "FeatureCollection",
            "features": [point_feature(json!([1, 2])), circle]
        }));
        assert_eq!(from_geojson(Some(&d), ValueType::MultiPoint).unwrap(), "[[2,1],[4,3]]");
    }

    #[test]
    fn test_from_geojson_multi_point_rejects_other_features() {
        let d = doc(json!({
            "type": "FeatureCollection",
            "features": [point_feature(json!([1, 2])), line_feature(json!([[1, 2], [3, 4]]))]
        }));
        assert_eq!(
            from_geojson(Some(&d), ValueType::MultiPoint),
            Err(ConvertError::NotAPoint { index: 1, found: "LineString".to_string() })
        );
    }

    #[test]
    fn test_from_geojson_fallback_rounds() {
        let d = doc(json!({
            "type": "MultiLineString",
            "coordinates": [[[-121.123456789, 36.5], [1, 2]]]
        }));
        assert_eq!(
            from_geojson(Some(&d), ValueType::LineString).unwrap(),
            r#"{"type":"MultiLineString","coordinates":[[[-121.123457,36.5],[1,2]]]}"#
        );

        let odd = GeoJson::Other(json!({"type": "Circle", "r": 0.1234567}));
        assert_eq!(
            from_geojson(Some(&odd), ValueType::Point).unwrap(),
            r#"{"type":"Circle","r":0.123457}"#
        );
    }

    fn position() -> impl Strategy<Value = Vec<f64>> {
        let lat = (-90_000_000i64..=90_000_000).prop_map(|v| v as f64 / 1e6);
        let lon = (-180_000_000i64..=180_000_000).prop_map(|v| v as f64 / 1e6);
        let alt = proptest::option::of((-10_000i64..=10_000).prop_map(|v| v as f64 / 10.0));
        (lat, lon, alt).prop_map(|(lat, lon, alt)| {
            let mut p = vec![lat, lon];
            p.extend(alt);
            p
        })
    }

    fn compact(positions: &[Vec<f64>]) -> String {
        Value::Array(positions.iter().map(|p| position_value(p)).collect()).to_string()
    }

    proptest! {
        #[test]
        fn prop_point_roundtrip(p in position()) {
            let value = position_value(&p).to_string();
            let doc = to_geojson(&value, ValueType::Point).unwrap();
            prop_assert_eq!(from_geojson(Some(&doc), ValueType::Point).unwrap(), value);
        }

        #[test]
        fn prop_multi_point_roundtrip(ps in proptest::collection::vec(position(), 0..8)) {
            let value = compact(&ps);
            let doc = to_geojson(&value, ValueType::MultiPoint).unwrap();
            prop_assert_eq!(from_geojson(Some(&doc), ValueType::MultiPoint).unwrap(), value);
        }

        #[test]
        fn prop_line_string_roundtrip(ps in proptest::collection::vec(position(), 1..8)) {
            let value = compact(&ps);
            let doc = to_geojson(&value, ValueType::LineString).unwrap();
            prop_assert_eq!(from_geojson(Some(&doc), ValueType::LineString).unwrap(), value);
        }

        #[test]
        fn prop_polygon_roundtrip(ps in proptest::collection::vec(position(), 3..10)) {
            let value = compact(&ps);
            let doc = to_geojson(&value, ValueType::Polygon).unwrap();
            prop_assert_eq!(from_geojson(Some(&doc), ValueType::Polygon).unwrap(), value);
        }
    }
}
