//! Serde helpers for numeric columns that arrive as numbers, numeric strings or null.
//!
//! Postgres `numeric` values usually come back from JSON row exports as strings
//! (`"12.50"`), while hand-written fixtures use plain numbers.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Parse a decimal from a JSON value. Null and blank strings are absent.
pub fn decimal_from_value(value: &Value) -> Result<Option<Decimal>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => parse_decimal(s.trim()).map(Some),
        Value::Number(n) => parse_decimal(&n.to_string()).map(Some),
        other => Err(format!("expected a decimal, got {}", other)),
    }
}

/// Parse an integer from a JSON value. Null and blank strings are absent.
pub fn integer_from_value(value: &Value) -> Result<Option<i64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("expected an integer, got \"{}\"", s)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
                _ => Err(format!("expected an integer, got {}", n)),
            }
        }
        other => Err(format!("expected an integer, got {}", other)),
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| format!("expected a decimal, got \"{}\"", s))
}

pub mod decimal {
    use rust_decimal::Decimal;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_str(&d.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        super::decimal_from_value(&value).map_err(D::Error::custom)
    }
}

pub mod integer {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(i) => serializer.serialize_i64(*i),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        super::integer_from_value(&value).map_err(D::Error::custom)
    }
}
