//! Cell values and their normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar read from one spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value. Blank cells and NaN markers both end up here.
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Map "not-a-number" floats to [`CellValue::Empty`], pass everything else through.
///
/// NaN is detected by value (a NaN never equals itself), so any NaN bit
/// pattern produced by a reader is caught, not just the canonical one.
pub fn normalize(value: CellValue) -> CellValue {
    match value {
        CellValue::Float(v) if v.is_nan() => CellValue::Empty,
        other => other,
    }
}

impl CellValue {
    /// `true` for [`CellValue::Empty`] and for NaN floats.
    pub fn is_absent(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of number-typed cells. Strings are not parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Coerce to a float the way a numeric column is coerced: numbers as-is,
    /// strings parsed after trimming surrounding whitespace.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CellValue::String(s) => s.trim().parse().ok(),
            other => other.as_number(),
        }
    }

    /// Text form used for codes: integral floats drop their fractional part,
    /// since spreadsheet readers hand back whole-number cells as floats.
    pub fn code_text(&self) -> String {
        match self {
            CellValue::Float(v) => match integral(*v) {
                Some(i) => i.to_string(),
                None => format_float(*v),
            },
            other => other.to_string(),
        }
    }

    /// Grouping key, or `None` when the value is absent.
    pub fn key(&self) -> Option<ValueKey> {
        Some(match self {
            CellValue::Empty => return None,
            CellValue::Bool(v) => ValueKey::Bool(*v),
            CellValue::Int(v) => ValueKey::Int(*v),
            CellValue::Float(v) if v.is_nan() => return None,
            CellValue::Float(v) => match integral(*v) {
                Some(i) => ValueKey::Int(i),
                None => ValueKey::Float(v.to_bits()),
            },
            CellValue::String(v) => ValueKey::Text(v.clone()),
        })
    }
}

/// Hashable identity of a non-absent cell value.
///
/// `Int(3)` and `Float(3.0)` share a key; text compares exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(String),
}

fn integral(v: f64) -> Option<i64> {
    // 2^63 is the first float past i64::MAX
    if v.fract() == 0.0 && v >= -9.223_372_036_854_775_808e18 && v < 9.223_372_036_854_775_808e18 {
        Some(v as i64)
    } else {
        None
    }
}

/// Render a float the way the invoicing software expects numbers: shortest
/// round-trip digits, always with a decimal point, and exponent notation
/// outside `[1e-4, 1e16)`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".into();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".into() } else { "-inf".into() };
    }

    let magnitude = v.abs();
    if v == 0.0 || (1e-4..1e16).contains(&magnitude) {
        let s = if v == 0.0 && v.is_sign_negative() { "-0".to_string() } else { v.to_string() };
        return if s.contains('.') { s } else { format!("{s}.0") };
    }

    let s = format!("{v:e}");
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => f.write_str(&format_float(*v)),
            CellValue::String(v) => f.write_str(v),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}
