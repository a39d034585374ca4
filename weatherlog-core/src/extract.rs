use serde_json::Value;
use thiserror::Error;

use crate::model::WeatherReading;

/// Truncation cap for the location name and the condition text.
pub const MAX_TEXT_LEN: usize = 50;
/// Truncation cap for the local timestamp.
pub const MAX_TIMESTAMP_LEN: usize = 19;

/// Extraction failure.
///
/// A required field being absent (or a text field not being a string) is
/// fatal. Malformed *content* of a present numeric field is not: it degrades
/// to a default instead. Callers rely on that split, so "fixing" a garbage
/// `temp_c` into an error would change observable behavior.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to parse weather response as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Weather response is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Extract the five fields of a [`WeatherReading`] from a raw response body.
///
/// Text fields are truncated to their caps; over-length values are silently
/// shortened. Numeric fields accept JSON numbers or strings with a numeric
/// prefix, and fall back to `0.0` / `0` for anything else.
pub fn extract(body: &[u8]) -> Result<WeatherReading, ExtractError> {
    let doc: Value = serde_json::from_slice(body)?;

    let location = text_field(&doc, &["location", "name"], "location.name", MAX_TEXT_LEN)?;
    let timestamp =
        text_field(&doc, &["location", "localtime"], "location.localtime", MAX_TIMESTAMP_LEN)?;
    let condition =
        text_field(&doc, &["current", "condition", "text"], "current.condition.text", MAX_TEXT_LEN)?;

    let temp = lookup(&doc, &["current", "temp_c"])
        .ok_or(ExtractError::MissingField("current.temp_c"))?;
    let humidity = lookup(&doc, &["current", "humidity"])
        .ok_or(ExtractError::MissingField("current.humidity"))?;

    Ok(WeatherReading {
        location,
        temperature_c: coerce_f64(temp),
        humidity_pct: coerce_i64(humidity),
        condition,
        timestamp,
    })
}

fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(doc, |value, key| value.get(key))
}

/// A text field must be present *and* a JSON string; anything else is treated
/// as missing.
fn text_field(
    doc: &Value,
    path: &[&str],
    name: &'static str,
    cap: usize,
) -> Result<String, ExtractError> {
    lookup(doc, path)
        .and_then(Value::as_str)
        .map(|s| s.chars().take(cap).collect())
        .ok_or(ExtractError::MissingField(name))
}

fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => numeric_prefix(s, true).parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Value::String(s) => numeric_prefix(s, false).parse().unwrap_or(0),
        _ => 0,
    }
}

/// Longest leading slice of `s` (after leading whitespace) that looks like a
/// signed decimal number.
fn numeric_prefix(s: &str, allow_fraction: bool) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut seen_dot = false;

    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => end += 1,
            b'.' if allow_fraction && !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    &s[..end]
}
