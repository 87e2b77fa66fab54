//! Numeric coercion for [`crate::types::Value`].
//!
//! All four algorithms funnel "is this cell a number" through
//! [`coerce_number`] so that the policy lives in exactly one place. The
//! policy is pinned (not inherited from any host language's implicit
//! conversion rules):
//!
//! | input                     | result        |
//! |---------------------------|---------------|
//! | `Number(n)`               | `Some(n)`     |
//! | `Bool(true)`              | `Some(1.0)`   |
//! | `Bool(false)`             | `Some(0.0)`   |
//! | `Null` / absent cell      | `None`        |
//! | `Utf8` parsing as `f64`   | `Some(parsed)`|
//! | `Utf8` empty or unparsable| `None`        |
//!
//! String parsing trims leading/trailing whitespace first; an empty or
//! whitespace-only string is `None`, not zero.

use crate::types::Value;

/// Coerce a cell value to a number, or `None` when it has no numeric
/// reading under the policy above.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => None,
        Value::Utf8(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()
        }
    }
}

/// Coerce an optional cell (absent key in a record) the same way as
/// [`coerce_number`], with absent behaving like [`Value::Null`].
pub fn coerce_cell(cell: Option<&Value>) -> Option<f64> {
    cell.and_then(coerce_number)
}
