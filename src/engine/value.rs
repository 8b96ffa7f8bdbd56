use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Runtime value of an evaluable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "integer",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Text(_) => "text",
            FieldValue::Boolean(_) => "boolean",
        }
    }

    /// Parse a rule literal into the same variant as `self`.
    ///
    /// Returns `None` when the literal does not parse as that type.
    pub fn coerce_literal(&self, literal: &str) -> Option<FieldValue> {
        match self {
            FieldValue::Integer(_) => literal.parse::<i64>().ok().map(FieldValue::Integer),
            FieldValue::Decimal(_) => Decimal::from_str(literal).ok().map(FieldValue::Decimal),
            FieldValue::Text(_) => Some(FieldValue::Text(literal.to_string())),
            FieldValue::Boolean(_) => parse_bool(literal).map(FieldValue::Boolean),
        }
    }

    /// Ordering against another value of the same variant.
    ///
    /// Booleans and mixed variants have no ordering.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Decimal(a), FieldValue::Decimal(b)) => Some(a.cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn parse_bool(literal: &str) -> Option<bool> {
    if literal.eq_ignore_ascii_case("true") {
        Some(true)
    } else if literal.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}
