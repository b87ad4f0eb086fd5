//! Total conversions between script values and numbers, strings and booleans.
//!
//! None of these can fail. Malformed numeric strings become NaN and objects without a usable
//! string form fall back to the configured placeholder.

use crate::runner::ds::operations::object::call_property;
use crate::runner::ds::realm::Context;
use crate::runner::ds::value::ScriptValue;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

pub fn get_type(a: &ScriptValue) -> &'static str {
    match a {
        ScriptValue::Undefined => TYPE_STR_UNDEFINED,
        ScriptValue::Null => TYPE_STR_NULL,
        ScriptValue::Boolean(_) => TYPE_STR_BOOLEAN,
        ScriptValue::String(_) => TYPE_STR_STRING,
        ScriptValue::Number(_) => TYPE_STR_NUMBER,
        ScriptValue::Object(o) => {
            if (**o).borrow().is_callable() {
                TYPE_STR_FUNCTION
            } else {
                TYPE_STR_OBJECT
            }
        }
    }
}

pub fn to_number(v: &ScriptValue) -> f64 {
    match v {
        ScriptValue::Undefined => f64::NAN,
        ScriptValue::Null => 0.0,
        ScriptValue::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        ScriptValue::Number(n) => *n,
        ScriptValue::String(s) => string_to_number(s),
        ScriptValue::Object(_) => f64::NAN,
    }
}

/// Truncating integer conversion; NaN becomes 0 and infinities are kept.
pub fn to_integer(v: &ScriptValue) -> f64 {
    let n = to_number(v);
    if n.is_nan() {
        0.0
    } else {
        n.trunc()
    }
}

pub fn to_boolean(v: &ScriptValue) -> bool {
    match v {
        ScriptValue::Undefined | ScriptValue::Null => false,
        ScriptValue::Boolean(b) => *b,
        ScriptValue::Number(n) => !(*n == 0.0 || n.is_nan()),
        ScriptValue::String(s) => !s.is_empty(),
        ScriptValue::Object(_) => true,
    }
}

/// Objects are asked for their `toString`; a non-primitive answer (or none) gives the placeholder.
pub fn to_string_value(ctx: &Context, v: &ScriptValue) -> String {
    match v {
        ScriptValue::Undefined => TYPE_STR_UNDEFINED.to_string(),
        ScriptValue::Null => TYPE_STR_NULL.to_string(),
        ScriptValue::Boolean(b) => b.to_string(),
        ScriptValue::Number(n) => number_to_string(*n),
        ScriptValue::String(s) => s.to_string(),
        ScriptValue::Object(o) => match call_property(ctx, o, "toString", &[]) {
            ScriptValue::Object(_) | ScriptValue::Undefined => ctx.config().object_placeholder.clone(),
            primitive => to_string_value(ctx, &primitive),
        },
    }
}

/// Shortest round-trip decimal form, switching to exponent notation outside [1e-7, 1e21).
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-7..1e21).contains(&abs) {
        format!("{}", n)
    } else {
        let s = format!("{:e}", n);
        if s.contains("e-") {
            s
        } else {
            s.replacen('e', "e+", 1)
        }
    }
}

/// Parses a trimmed numeric literal: optional sign, decimal with optional fraction and exponent,
/// `Infinity`, or hexadecimal with a `0x` prefix. Anything else is NaN, including the empty string.
pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    let (sign, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned.is_empty() {
        return f64::NAN;
    }
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        return sign * parse_hex(hex);
    }
    if !is_decimal_literal(unsigned) {
        return f64::NAN;
    }
    match unsigned.parse::<f64>() {
        Ok(n) => sign * n,
        Err(_) => f64::NAN,
    }
}

fn parse_hex(digits: &str) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0;
    for c in digits.chars() {
        match c.to_digit(16) {
            Some(d) => value = value * 16.0 + d as f64,
            None => return f64::NAN,
        }
    }
    value
}

// digits [ '.' digits ] [ (e|E) [sign] digits ], with at least one mantissa digit
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}
