use std::{borrow::Cow, cmp::Ordering, collections::HashMap};

/// A value flowing through a Cordon expression.
///
/// Context data arrives as one of these (usually converted from JSON), and
/// every expression reduces to one.
///
/// # Coercion
///
/// The operators follow the familiar scripting-language rules condition
/// authors already expect:
/// - `false`, `0`, `NaN`, `""`, `null` and `undefined` are falsy, everything
///   else (including empty arrays and objects) is truthy
/// - arithmetic coerces both sides to numbers
/// - `+` concatenates as soon as either side is a string
/// - `==` coerces, `===` does not
///
/// # Examples
///
/// ```
/// use cordon_lang::Value;
/// use std::collections::HashMap;
///
/// let undefined = Value::Undefined;
/// let number = Value::Number(42.0);
/// let string = Value::String("42".to_string());
///
/// assert!(number.loose_eq(&string));
/// assert!(!number.strict_eq(&string));
/// assert!(!undefined.is_truthy());
///
/// let mut obj = HashMap::new();
/// obj.insert("status".to_string(), Value::String("paid".to_string()));
/// assert!(Value::Object(obj).is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Result of any missing binding or property
    Undefined,

    /// Explicit null
    Null,

    Boolean(bool),

    /// All numbers are doubles
    Number(f64),

    String(String),

    Array(Vec<Value>),

    Object(HashMap<String, Value>),
}

impl Value {
    /// Human-readable type name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// `null` or `undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Check if the value is truthy (for conditions)
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Undefined | Null => false,
            Boolean(b) => *b,
            Number(n) => !(*n == 0.0 || n.is_nan()),
            String(s) => !s.is_empty(),
            Array(_) | Object(_) => true,
        }
    }

    /// Numeric coercion. Never fails; unconvertible input becomes `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
            Value::Array(_) | Value::Object(_) => string_to_number(&self.to_js_string()),
        }
    }

    /// String coercion, as used by `+` and by container comparisons.
    pub fn to_js_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    if item.is_nullish() {
                        String::new()
                    } else {
                        item.to_js_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
        }
    }

    /// Containers collapse to their string form; scalars pass through.
    fn to_primitive(&self) -> Cow<'_, Value> {
        match self {
            Value::Array(_) | Value::Object(_) => Cow::Owned(Value::String(self.to_js_string())),
            _ => Cow::Borrowed(self),
        }
    }

    /// `===`: same type and same value. `NaN` is not equal to itself and
    /// containers compare by content.
    pub fn strict_eq(&self, other: &Value) -> bool {
        self == other
    }

    /// `==`: equality after coercion.
    pub fn loose_eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Undefined | Null, Undefined | Null) => true,
            (Undefined | Null, _) | (_, Undefined | Null) => false,
            (Number(a), Number(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Array(_) | Object(_), Array(_) | Object(_)) => self == other,
            (Boolean(_), _) => Value::Number(self.to_number()).loose_eq(other),
            (_, Boolean(_)) => self.loose_eq(&Value::Number(other.to_number())),
            (Number(a), String(_)) => *a == other.to_number(),
            (String(_), Number(b)) => self.to_number() == *b,
            (Array(_) | Object(_), _) => Value::String(self.to_js_string()).loose_eq(other),
            (_, Array(_) | Object(_)) => self.loose_eq(&Value::String(other.to_js_string())),
        }
    }

    /// Ordering for the relational operators.
    ///
    /// Two strings compare by UTF-16 code unit; anything else compares
    /// numerically. `None` means the operands are unordered (a `NaN` was
    /// involved), which makes every relational operator false.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        let (left, right) = (self.to_primitive(), other.to_primitive());
        match (left.as_ref(), right.as_ref()) {
            (Value::String(a), Value::String(b)) => Some(a.encode_utf16().cmp(b.encode_utf16())),
            (a, b) => a.to_number().partial_cmp(&b.to_number()),
        }
    }

    /// `+`: concatenation if either side is a string, addition otherwise.
    pub fn add(&self, other: &Value) -> Value {
        let (left, right) = (self.to_primitive(), other.to_primitive());
        if matches!(left.as_ref(), Value::String(_)) || matches!(right.as_ref(), Value::String(_)) {
            let mut joined = left.to_js_string();
            joined.push_str(&right.to_js_string());
            Value::String(joined)
        } else {
            Value::Number(left.to_number() + right.to_number())
        }
    }

    /// Looks up `key` on this value.
    ///
    /// Only own data is reachable: object entries, array elements, string
    /// characters and the `length` of arrays and strings. Any other lookup,
    /// including one on `null`/`undefined` or with a key that is neither a
    /// string nor a number, yields `undefined`.
    pub fn member(&self, key: &Value) -> Cow<'_, Value> {
        match self {
            Value::Object(map) => match property_key(key) {
                Some(k) => map
                    .get(&k)
                    .map(Cow::Borrowed)
                    .unwrap_or(Cow::Owned(Value::Undefined)),
                None => Cow::Owned(Value::Undefined),
            },
            Value::Array(items) => match key {
                Value::String(s) if s == "length" => Cow::Owned(Value::Number(items.len() as f64)),
                _ => match array_index(key) {
                    Some(i) => items
                        .get(i)
                        .map(Cow::Borrowed)
                        .unwrap_or(Cow::Owned(Value::Undefined)),
                    None => Cow::Owned(Value::Undefined),
                },
            },
            Value::String(s) => match key {
                Value::String(k) if k == "length" => {
                    Cow::Owned(Value::Number(s.encode_utf16().count() as f64))
                }
                // both `length` and indexing count UTF-16 units; half of a
                // surrogate pair comes back as U+FFFD
                _ => match array_index(key).and_then(|i| s.encode_utf16().nth(i)) {
                    Some(unit) => Cow::Owned(Value::String(String::from_utf16_lossy(&[unit]))),
                    None => Cow::Owned(Value::Undefined),
                },
            },
            Value::Undefined | Value::Null | Value::Boolean(_) | Value::Number(_) => {
                Cow::Owned(Value::Undefined)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_js_string())
    }
}

/// Object keys accept strings as-is and numbers in their string form.
fn property_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(*n)),
        _ => None,
    }
}

/// Array positions: non-negative integral numbers, or their canonical
/// string form (`"2"` but not `"02"`).
fn array_index(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n < usize::MAX as f64 => {
            Some(*n as usize)
        }
        Value::String(s) => s.parse::<usize>().ok().filter(|i| i.to_string() == *s),
        _ => None,
    }
}

fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust's float parser also takes "inf" and "nan"; those are not numbers here.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Formats a number the way condition authors see it printed elsewhere:
/// `1` rather than `1.0`, exponent form outside `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let name = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return name.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}
