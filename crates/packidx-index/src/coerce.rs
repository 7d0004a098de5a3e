//! Loose text coercion of JSON values.
//!
//! The `source` rule and the `id@version` identity key operate on whatever
//! value an entry holds, not only on strings. Values are rendered the way a
//! permissive template would print them: absent fields read as `undefined`,
//! `null` as `null`, integral numbers without a fraction, magnitudes below
//! `1e-6` or from `1e21` up in exponent form (`1e-7`, `1e+21`), arrays as
//! their comma-joined elements, and objects as `[object Object]`.

use serde_json::{Number, Value};

/// Text used for a field that is absent from its entry.
pub const UNDEFINED: &str = "undefined";

/// Render an optional field value as loose text.
pub fn loose_text(value: Option<&Value>) -> String {
    match value {
        None => UNDEFINED.to_string(),
        Some(value) => value_text(value),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        exponent_text(f)
    } else if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

// `{:e}` omits the sign of a positive exponent.
fn exponent_text(f: f64) -> String {
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Short name of a JSON value's kind, for diagnostics.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
