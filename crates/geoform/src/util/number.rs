//! JSON number helpers.
//!
//! Coordinates are held as `f64` but are printed the way a JavaScript form
//! layer prints them: integral values without a fractional part, so that
//! `[10, 20]` survives a round trip as `[10,20]` rather than `[10.0,20.0]`.

use serde_json::{Number, Value};

/// 2^53, the largest magnitude below which every integer is exact in f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Converts a float to a JSON number value.
///
/// Integral values become JSON integers. Non-finite values have no JSON
/// representation and become `null`.
pub fn json_number(v: f64) -> Value {
    if !v.is_finite() {
        return Value::Null;
    }
    if v.fract() == 0.0 && v.abs() < MAX_SAFE_INTEGER {
        return Value::Number(Number::from(v as i64));
    }
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

/// Rounds to the given number of decimal digits.
pub fn round_to(v: f64, digits: u32) -> f64 {
    // Nothing left to round at this magnitude.
    if !v.is_finite() || v.abs() >= 1e15 {
        return v;
    }
    let factor = 10f64.powi(digits as i32);
    (v * factor).round() / factor
}
