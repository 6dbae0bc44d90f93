//! Structural comparison helpers.

use serde_json::Value;

/// Deep structural equality over JSON values.
///
/// Object key order never matters; arrays compare element-wise.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    a == b
}

/// Loose equality with the coercions chart data needs: numeric strings
/// compare equal to numbers, and integral floats compare equal to integers.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (as_f64(a), as_f64(b)) {
        (Some(x), Some(y)) => (x - y).abs() < f64::EPSILON,
        _ => false,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
