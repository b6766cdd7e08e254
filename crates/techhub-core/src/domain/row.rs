//! Lenient field access over raw store rows.
//!
//! Required fields go through [`RowReader::required_text`] /
//! [`RowReader::required_id`] and fail with a [`DecodeError`]; everything
//! else returns `None` on absence or a wrong type so the entity decoder can
//! substitute its documented default.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::DecodeError;
use crate::ports::Row;

pub(crate) struct RowReader<'a> {
    entity: &'static str,
    row: &'a Row,
}

impl<'a> RowReader<'a> {
    pub(crate) fn new(entity: &'static str, row: &'a Row) -> Self {
        Self { entity, row }
    }

    fn value(&self, field: &str) -> Option<&'a Value> {
        match self.row.get(field) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    /// Primary keys may be text (uuid) or integers (bigserial).
    pub(crate) fn required_id(&self, field: &'static str) -> Result<String, DecodeError> {
        match self.value(field) {
            None => Err(self.missing(field)),
            Some(Value::String(s)) if s.trim().is_empty() => Err(self.missing(field)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(DecodeError::InvalidField {
                entity: self.entity,
                field,
                reason: format!("expected text or integer, got {}", type_name(other)),
            }),
        }
    }

    pub(crate) fn required_text(&self, field: &'static str) -> Result<String, DecodeError> {
        self.text(field).ok_or_else(|| self.missing(field))
    }

    /// Non-blank text value.
    pub(crate) fn text(&self, field: &str) -> Option<String> {
        match self.value(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// First non-blank text among several column spellings.
    pub(crate) fn text_any(&self, fields: &[&str]) -> Option<String> {
        fields.iter().find_map(|field| self.text(field))
    }

    /// Non-negative counter; accepts numbers and numeric strings.
    pub(crate) fn count(&self, field: &str) -> Option<u64> {
        match self.value(field)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_i64().map(|v| v.max(0) as u64))
                .or_else(|| n.as_f64().map(|v| v.max(0.0) as u64)),
            Value::String(s) => s.trim().parse::<i64>().ok().map(|v| v.max(0) as u64),
            _ => None,
        }
    }

    pub(crate) fn flag(&self, field: &str) -> Option<bool> {
        match self.value(field)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Some(true),
                "false" | "f" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// String array; non-string and blank elements are dropped.
    pub(crate) fn tags(&self, field: &str) -> Vec<String> {
        match self.value(field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.text(field).and_then(|raw| parse_timestamp(&raw))
    }

    pub(crate) fn object(&self, field: &str) -> Option<&'a Row> {
        self.value(field)?.as_object()
    }

    fn missing(&self, field: &'static str) -> DecodeError {
        DecodeError::MissingField {
            entity: self.entity,
            field,
        }
    }
}

/// Parses `timestamptz` output, bare `timestamp` output (read as UTC) and
/// RFC 2822 dates as produced by RSS feeds.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_numeric_ids_are_stringified() {
        let row = row(json!({ "id": 42 }));
        let reader = RowReader::new("post", &row);
        assert_eq!(reader.required_id("id").unwrap(), "42");
    }

    #[test]
    fn test_object_id_is_invalid() {
        let row = row(json!({ "id": { "nested": true } }));
        let reader = RowReader::new("post", &row);
        assert!(matches!(
            reader.required_id("id"),
            Err(DecodeError::InvalidField { field: "id", .. })
        ));
    }

    #[test]
    fn test_count_clamps_negative_and_rejects_garbage() {
        let row = row(json!({ "a": -5, "b": "12", "c": "N/A", "d": null }));
        let reader = RowReader::new("video", &row);
        assert_eq!(reader.count("a"), Some(0));
        assert_eq!(reader.count("b"), Some(12));
        assert_eq!(reader.count("c"), None);
        assert_eq!(reader.count("d"), None);
    }

    #[test]
    fn test_tags_skip_non_strings() {
        let row = row(json!({ "tags": ["Vue", 3, "  ", "Nuxt"] }));
        let reader = RowReader::new("post", &row);
        assert_eq!(reader.tags("tags"), vec!["Vue", "Nuxt"]);
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = "2026-01-28T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(parse_timestamp("2026-01-28T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-01-28T10:00:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-01-28T10:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2026-01-28 10:00:00+00"), Some(expected));
        assert_eq!(
            parse_timestamp("Wed, 28 Jan 2026 10:00:00 +0000"),
            Some(expected)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
