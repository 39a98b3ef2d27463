//! Validation of typed form values.
//!
//! Values arrive as text together with their declared type name. Geometric
//! values are JSON arrays of positions in (latitude, longitude[, altitude])
//! order. Checks only look at structure: a polygon of three collinear points
//! passes, and a line string may hold a single point.
//!
//! Every failure is a [`ValueError`] whose `Display` is meant for the
//! operator. Malformed JSON is reported the same way, never as a panic.

use serde_json::Value;

use crate::error::ValueError;
use crate::limits::{MAX_POSITION_LEN, MIN_POLYGON_POINTS, MIN_POSITION_LEN};
use crate::model::{ValueReference, ValueType};

/// Checks a form value against its declared type.
///
/// `can_reference` is the field's reference hint; with `"anyString"` a value
/// that fails the type check is still accepted when it looks like an
/// identifier, since the field may name a reference instead of holding a
/// literal.
pub fn check_value(
    value: &str,
    value_type: &str,
    required: bool,
    can_reference: &str,
) -> Result<(), ValueError> {
    check_value_with(value, value_type, required, ValueReference::from_hint(can_reference))
}

/// Same as [`check_value`] with an already parsed reference hint.
pub fn check_value_with(
    value: &str,
    value_type: &str,
    required: bool,
    reference: ValueReference,
) -> Result<(), ValueError> {
    let value = value.trim();
    if value.is_empty() {
        return if required { Err(ValueError::Required) } else { Ok(()) };
    }
    match check_value_by_type(value, value_type) {
        Err(_) if reference.accepts(value) => Ok(()),
        result => result,
    }
}

/// Checks a non-empty value against a type name.
pub fn check_value_by_type(value: &str, value_type: &str) -> Result<(), ValueError> {
    match ValueType::from_name(value_type) {
        Some(value_type) => check_typed(value, value_type),
        None => Err(ValueError::UnrecognizedType {
            name: value_type.to_string(),
        }),
    }
}

/// Checks an optional value against a known type.
///
/// Empty (or blank) values pass. This is the check the codec repeats before
/// converting.
pub fn validate_value(value: &str, value_type: ValueType) -> Result<(), ValueError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    check_typed(value, value_type)
}

fn check_typed(value: &str, value_type: ValueType) -> Result<(), ValueError> {
    match value_type {
        ValueType::String | ValueType::GeoJson => Ok(()),
        ValueType::Integer => check_integer(value),
        ValueType::Float => check_float(value),
        ValueType::Boolean => check_boolean(value),
        ValueType::Point => check_point_str(value),
        ValueType::MultiPoint => check_multi_point_str(value),
        ValueType::LineString => check_line_string_str(value),
        ValueType::Polygon => check_polygon_str(value),
    }
}

/// Accepts `-?[0-9]+`.
pub fn check_integer(value: &str) -> Result<(), ValueError> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValueError::InvalidInteger)
    }
}

/// Accepts `nan` in any case, or any finite number.
pub fn check_float(value: &str) -> Result<(), ValueError> {
    if value.eq_ignore_ascii_case("nan") {
        return Ok(());
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(()),
        _ => Err(ValueError::InvalidFloat),
    }
}

/// Accepts exactly `true` or `false`.
pub fn check_boolean(value: &str) -> Result<(), ValueError> {
    match value {
        "true" | "false" => Ok(()),
        _ => Err(ValueError::InvalidBoolean),
    }
}

pub fn check_point_str(value: &str) -> Result<(), ValueError> {
    check_point(&parse_json(value, ValueType::Point)?)
}

pub fn check_multi_point_str(value: &str) -> Result<(), ValueError> {
    check_point_list(&parse_json(value, ValueType::MultiPoint)?)
}

pub fn check_line_string_str(value: &str) -> Result<(), ValueError> {
    check_point_list(&parse_json(value, ValueType::LineString)?)
}

pub fn check_polygon_str(value: &str) -> Result<(), ValueError> {
    check_polygon(&parse_json(value, ValueType::Polygon)?)
}

/// A point is an array of 2 or 3 numbers.
pub fn check_point(json: &Value) -> Result<(), ValueError> {
    let items = json.as_array().ok_or(ValueError::NotAnArray)?;
    if !(MIN_POSITION_LEN..=MAX_POSITION_LEN).contains(&items.len()) {
        return Err(ValueError::WrongArity { len: items.len() });
    }
    if items.iter().all(Value::is_number) {
        Ok(())
    } else {
        Err(ValueError::NotNumeric)
    }
}

/// An array of points, possibly empty.
pub fn check_point_list(json: &Value) -> Result<(), ValueError> {
    let items = json.as_array().ok_or(ValueError::NotAnArray)?;
    check_elements(items)
}

/// An array of at least three points.
pub fn check_polygon(json: &Value) -> Result<(), ValueError> {
    let items = json.as_array().ok_or(ValueError::NotAnArray)?;
    if items.len() < MIN_POLYGON_POINTS {
        return Err(ValueError::TooFewPoints { len: items.len() });
    }
    check_elements(items)
}

fn check_elements(items: &[Value]) -> Result<(), ValueError> {
    for (index, item) in items.iter().enumerate() {
        check_point(item).map_err(|_| ValueError::BadElement { index })?;
    }
    Ok(())
}

fn parse_json(value: &str, value_type: ValueType) -> Result<Value, ValueError> {
    serde_json::from_str(value).map_err(|e| ValueError::Json {
        value_type,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_respects_required() {
        for t in ValueType::ALL {
            assert!(check_value("", t.name(), false, "").is_ok(), "{t}");
            assert!(check_value("   ", t.name(), false, "").is_ok(), "{t}");
            assert_eq!(check_value("", t.name(), true, ""), Err(ValueError::Required), "{t}");
        }
    }

    #[test]
    fn test_integer() {
        assert!(check_value("12", "integer", false, "").is_ok());
        assert!(check_value("-7", "integer", false, "").is_ok());
        assert!(check_value(" 42 ", "integer", false, "").is_ok());
        assert_eq!(check_value("12.5", "integer", false, ""), Err(ValueError::InvalidInteger));
        assert!(check_value("-", "integer", false, "").is_err());
        assert!(check_value("+3", "integer", false, "").is_err());
        assert!(check_value("1e3", "integer", false, "").is_err());
    }

    #[test]
    fn test_float() {
        assert!(check_value("nan", "float", false, "").is_ok());
        assert!(check_value("NaN", "float", false, "").is_ok());
        assert!(check_value("3.25", "float", false, "").is_ok());
        assert!(check_value("-1e-3", "float", false, "").is_ok());
        assert!(check_value("7", "float", false, "").is_ok());
        assert_eq!(check_value("abc", "float", false, ""), Err(ValueError::InvalidFloat));
        assert!(check_value("inf", "float", false, "").is_err());
        assert!(check_value("1e400", "float", false, "").is_err());
    }

    #[test]
    fn test_boolean() {
        assert!(check_value("true", "boolean", false, "").is_ok());
        assert!(check_value("false", "boolean", false, "").is_ok());
        assert_eq!(check_value("True", "boolean", false, ""), Err(ValueError::InvalidBoolean));
        assert!(check_value("1", "boolean", false, "").is_err());
    }

    #[test]
    fn test_string_and_geojson_always_pass() {
        assert!(check_value("anything at all", "string", false, "").is_ok());
        assert!(check_value("{not json", "GeoJSON", false, "").is_ok());
    }

    #[test]
    fn test_point() {
        assert!(check_value("[36.8, -121.9]", "Point", false, "").is_ok());
        assert!(check_value("[36.8, -121.9, -50]", "Point", false, "").is_ok());
        assert_eq!(
            check_value("[36.8]", "Point", false, ""),
            Err(ValueError::WrongArity { len: 1 })
        );
        assert_eq!(
            check_value("[1, 2, 3, 4]", "Point", false, ""),
            Err(ValueError::WrongArity { len: 4 })
        );
        assert_eq!(check_value("[1, \"2\"]", "Point", false, ""), Err(ValueError::NotNumeric));
        assert_eq!(check_value("{\"lat\": 1}", "Point", false, ""), Err(ValueError::NotAnArray));
    }

    #[test]
    fn test_malformed_json_is_a_message() {
        let err = check_value("[1, 2", "Point", false, "").unwrap_err();
        assert!(matches!(err, ValueError::Json { value_type: ValueType::Point, .. }));
        assert!(err.to_string().starts_with("invalid Point: "));
    }

    #[test]
    fn test_multi_point_and_line_string() {
        assert!(check_value("[[1, 2], [3, 4, 5]]", "MultiPoint", false, "").is_ok());
        assert!(check_value("[]", "MultiPoint", false, "").is_ok());
        assert_eq!(
            check_value("[[1, 2], [3]]", "MultiPoint", false, ""),
            Err(ValueError::BadElement { index: 1 })
        );
        // No minimum length for line strings.
        assert!(check_value("[[1, 2]]", "LineString", false, "").is_ok());
        assert_eq!(
            check_value("[1, 2]", "LineString", false, ""),
            Err(ValueError::BadElement { index: 0 })
        );
    }

    #[test]
    fn test_polygon() {
        assert_eq!(
            check_value("[[0, 0], [1, 1]]", "Polygon", false, ""),
            Err(ValueError::TooFewPoints { len: 2 })
        );
        // Collinear points are not rejected.
        assert!(check_value("[[0, 0], [1, 1], [2, 2]]", "Polygon", false, "").is_ok());
        assert_eq!(
            check_value("[[0, 0], [1, 1], [2]]", "Polygon", false, ""),
            Err(ValueError::BadElement { index: 2 })
        );
    }

    #[test]
    fn test_unrecognized_type() {
        assert_eq!(
            check_value("1", "double", false, ""),
            Err(ValueError::UnrecognizedType { name: "double".to_string() })
        );
    }

    #[test]
    fn test_reference_hint() {
        assert!(check_value("depth_var", "float", false, "anyString").is_ok());
        assert!(check_value("_x", "Point", false, "anyString").is_ok());
        assert!(check_value("9abc", "float", false, "anyString").is_err());
        assert!(check_value("depth_var", "float", false, "").is_err());
        assert!(check_value("depth_var", "float", false, "other").is_err());
    }

    #[test]
    fn test_validate_value() {
        assert!(validate_value("", ValueType::Polygon).is_ok());
        assert!(validate_value("[10, 20]", ValueType::Point).is_ok());
        assert!(validate_value("[10]", ValueType::Point).is_err());
    }
}
