//! Coercion of user-entered text into stored values.

use serde::{Deserialize, Deserializer};

/// Trims a name or title and upper-cases it for storage.
///
/// Returns `None` when nothing but whitespace was entered; callers treat
/// that as a no-op rather than an error.
pub fn normalize_label(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Parses a non-negative integer field, falling back to 0.
///
/// Empty, non-numeric and negative input all become 0. A fractional value
/// keeps its integer part, so `"1.5"` reads as 1.
pub fn parse_non_negative_int(text: &str) -> u32 {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => coerce_number(value),
        Err(_) => 0,
    }
}

/// Clamps an arbitrary JSON number into the stored range.
pub fn coerce_number(value: f64) -> u32 {
    if value.is_finite() && value >= 0.0 {
        value.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Deserializes a count that may have been stored as a number, as text
/// from a form field, as `null`, or not at all.
pub(crate) fn deserialize_loose_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseCount {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<LooseCount>::deserialize(deserializer)? {
        Some(LooseCount::Number(value)) => coerce_number(value),
        Some(LooseCount::Text(text)) => parse_non_negative_int(&text),
        None => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  core sync "), Some("CORE SYNC".to_string()));
        assert_eq!(normalize_label("Boot_Sequence"), Some("BOOT_SEQUENCE".to_string()));
        assert_eq!(normalize_label(""), None);
        assert_eq!(normalize_label(" \t\n"), None);
    }

    #[test]
    fn test_parse_non_negative_int() {
        assert_eq!(parse_non_negative_int("30"), 30);
        assert_eq!(parse_non_negative_int(" 90 "), 90);
        assert_eq!(parse_non_negative_int(""), 0);
        assert_eq!(parse_non_negative_int("abc"), 0);
        assert_eq!(parse_non_negative_int("-4"), 0);
        assert_eq!(parse_non_negative_int("1.5"), 1);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(2.0), 2);
        assert_eq!(coerce_number(-1.0), 0);
        assert_eq!(coerce_number(f64::NAN), 0);
        assert_eq!(coerce_number(1e12), u32::MAX);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "deserialize_loose_count")]
        value: u32,
    }

    #[test]
    fn test_deserialize_loose_count() {
        let read = |json: &str| serde_json::from_str::<Loose>(json).unwrap().value;
        assert_eq!(read(r#"{"value": 45}"#), 45);
        assert_eq!(read(r#"{"value": "45"}"#), 45);
        assert_eq!(read(r#"{"value": ""}"#), 0);
        assert_eq!(read(r#"{"value": null}"#), 0);
        assert_eq!(read(r#"{"value": -3}"#), 0);
        assert_eq!(read(r#"{}"#), 0);
    }
}
