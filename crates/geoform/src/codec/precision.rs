//! Bounded numeric precision for printed geometry.

use serde_json::Value;

use crate::model::Position;
use crate::util::{json_number, round_to};

/// Rounds every floating-point leaf of a JSON value to `digits` decimals.
///
/// Integer leaves are left untouched; a float that rounds to an integral
/// value prints as an integer.
pub fn round_numbers(value: &Value, digits: u32) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) => json_number(round_to(f, digits)),
            None => value.clone(),
        },
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| round_numbers(v, digits)).collect())
        }
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), round_numbers(v, digits)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Rounds each coordinate of a position.
pub fn round_position(position: &[f64], digits: u32) -> Position {
    position.iter().map(|&c| round_to(c, digits)).collect()
}
