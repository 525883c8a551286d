//! Analysis document model.
//!
//! # Responsibility
//! - Hold the precomputed theme hierarchy exactly as produced upstream.
//! - Convert arbitrary JSON into that hierarchy without ever failing.
//!
//! # Invariants
//! - Missing or mistyped `summary_list`/`points`/`original_content` become
//!   empty sequences.
//! - A non-object root yields an empty document.
//! - Quotation sequences keep their raw length, so counts match the input.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const FIELD_SUMMARY_LIST: &str = "summary_list";
const FIELD_SUMMARY: &str = "summary";
const FIELD_POINTS: &str = "points";
const FIELD_POINT: &str = "point";
const FIELD_ORIGINAL_CONTENT: &str = "original_content";

/// Whole analysis result keyed by theme name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Themes in input key order.
    pub themes: Vec<Theme>,
}

/// Top-level topic grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    /// Raw theme key. May contain decorative `*` markers.
    pub name: String,
    /// Summaries in insertion order.
    pub summary_list: Vec<Summary>,
}

/// One synthesized statement inside a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Display label; treated as unique within its theme.
    pub summary: String,
    pub points: Vec<Point>,
}

/// Sub-claim supporting a summary, with verbatim user quotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub point: String,
    pub original_content: Vec<String>,
}

impl Document {
    /// Builds a document from any JSON value.
    ///
    /// Never fails: shapes that do not match the contract degrade to empty
    /// sequences instead of errors.
    pub fn from_value(value: &Value) -> Self {
        let themes = value
            .as_object()
            .map(|root| {
                root.iter()
                    .map(|(name, theme)| Theme::from_value(name, theme))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        Self { themes }
    }

    /// Returns whether there is nothing to display at all.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Looks up one theme by its raw key.
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.name == name)
    }

    /// Total quotations across every theme.
    pub fn quotation_count(&self) -> usize {
        self.themes
            .iter()
            .flat_map(|theme| theme.summary_list.iter())
            .flat_map(|summary| summary.points.iter())
            .map(|point| point.original_content.len())
            .sum()
    }
}

impl Theme {
    fn from_value(name: &str, value: &Value) -> Self {
        let summary_list = array_field(value, FIELD_SUMMARY_LIST)
            .iter()
            .map(Summary::from_value)
            .collect();
        Self {
            name: name.to_string(),
            summary_list,
        }
    }
}

impl Summary {
    fn from_value(value: &Value) -> Self {
        Self {
            summary: string_field(value, FIELD_SUMMARY),
            points: array_field(value, FIELD_POINTS)
                .iter()
                .map(Point::from_value)
                .collect(),
        }
    }
}

impl Point {
    fn from_value(value: &Value) -> Self {
        Self {
            point: string_field(value, FIELD_POINT),
            original_content: array_field(value, FIELD_ORIGINAL_CONTENT)
                .iter()
                .map(quotation_text)
                .collect(),
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.themes.len()))?;
        for theme in &self.themes {
            map.serialize_entry(&theme.name, &ThemeBody(theme))?;
        }
        map.end()
    }
}

// Serialized shape of a theme value: the name lives in the parent key.
struct ThemeBody<'a>(&'a Theme);

impl Serialize for ThemeBody<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut body = serializer.serialize_struct("Theme", 1)?;
        body.serialize_field(FIELD_SUMMARY_LIST, &self.0.summary_list)?;
        body.end()
    }
}

fn array_field<'a>(value: &'a Value, field: &str) -> &'a [Value] {
    value
        .as_object()
        .and_then(|map| map.get(field))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string_field(value: &Value, field: &str) -> String {
    match value.as_object().and_then(|map| map.get(field)) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn quotation_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use serde_json::json;

    #[test]
    fn from_value_keeps_input_key_order() {
        let doc = Document::from_value(&json!({
            "zeta": {"summary_list": []},
            "alpha": {"summary_list": []},
        }));
        let names = doc.themes.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn from_value_degrades_non_object_root() {
        assert!(Document::from_value(&json!([1, 2, 3])).is_empty());
        assert!(Document::from_value(&json!("text")).is_empty());
        assert!(Document::from_value(&json!(null)).is_empty());
    }

    #[test]
    fn non_string_quotations_keep_raw_length() {
        let doc = Document::from_value(&json!({
            "t": {"summary_list": [{"summary": "s", "points": [
                {"point": "p", "original_content": ["a", 7, null]}
            ]}]}
        }));
        let quotes = &doc.themes[0].summary_list[0].points[0].original_content;
        assert_eq!(quotes, &vec!["a".to_string(), "7".to_string(), String::new()]);
        assert_eq!(doc.quotation_count(), 3);
    }
}
