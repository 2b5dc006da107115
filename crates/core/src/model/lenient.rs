//! Tolerant numeric decoding for documents written by older clients.
//!
//! Session payloads and stored career documents may carry numbers as strings,
//! floats, `null`, or garbage. Anything that is not a usable non-negative
//! number decodes as zero instead of failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Fallback topic for submissions that do not name their course.
pub const UNKNOWN_TOPIC: &str = "unknown";

fn coerce_f64(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|v| v.is_finite() && *v > 0.0)
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coerce_u32(value: &Value) -> u32 {
    // Truncation is intended: 3.9 correct answers counts as 3.
    coerce_f64(value).map_or(0, |v| {
        if v >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            v as u32
        }
    })
}

#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn coerce_u64(value: &Value) -> u64 {
    coerce_f64(value).map_or(0, |v| {
        if v >= u64::MAX as f64 {
            u64::MAX
        } else {
            v as u64
        }
    })
}

#[must_use]
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(_) => coerce_f64(value).is_some(),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

/// Returns the trimmed topic, or [`UNKNOWN_TOPIC`] when it is missing or blank.
#[must_use]
pub fn normalize_topic(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(topic) if !topic.is_empty() => topic.to_string(),
        _ => UNKNOWN_TOPIC.to_string(),
    }
}

pub(crate) fn de_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(coerce_u32(&Value::deserialize(d)?))
}

pub(crate) fn de_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(coerce_u64(&Value::deserialize(d)?))
}

pub(crate) fn de_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(coerce_bool(&Value::deserialize(d)?))
}

pub(crate) fn de_topic<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(normalize_topic(value.as_str()))
}

pub(crate) fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

pub(crate) fn unknown_topic() -> String {
    UNKNOWN_TOPIC.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_numeric_values_become_zero() {
        assert_eq!(coerce_u32(&json!("abc")), 0);
        assert_eq!(coerce_u32(&json!(null)), 0);
        assert_eq!(coerce_u32(&json!([1, 2])), 0);
        assert_eq!(coerce_u32(&json!(-4)), 0);
        assert_eq!(coerce_u32(&json!(f64::NAN.to_string())), 0);
    }

    #[test]
    fn numeric_strings_and_floats_are_accepted() {
        assert_eq!(coerce_u32(&json!("12")), 12);
        assert_eq!(coerce_u32(&json!(7.9)), 7);
        assert_eq!(coerce_u64(&json!(" 1500 ")), 1500);
        assert_eq!(coerce_u32(&json!(1e12)), u32::MAX);
    }

    #[test]
    fn bools_accept_common_spellings() {
        assert!(coerce_bool(&json!(true)));
        assert!(coerce_bool(&json!("yes")));
        assert!(coerce_bool(&json!(1)));
        assert!(!coerce_bool(&json!(0)));
        assert!(!coerce_bool(&json!(null)));
    }

    #[test]
    fn blank_topic_is_unknown() {
        assert_eq!(normalize_topic(None), UNKNOWN_TOPIC);
        assert_eq!(normalize_topic(Some("   ")), UNKNOWN_TOPIC);
        assert_eq!(normalize_topic(Some(" math ")), "math");
    }
}
