//! Raw shift objects from the shift API, and the values found inside them.
//!
//! A shift object spreads the same logical field across up to three
//! sub-maps (`attributes`, `nice`, `object`) under different keys, and a
//! value may be a plain scalar or a nested object wrapping one.

use serde_json::{Map, Value};

/// The sub-maps of a raw shift object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Stored post meta, including the `custom_*` fields.
    Attributes,
    /// Display-ready values computed upstream.
    Nice,
    /// The underlying post object.
    Object,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Attributes, Section::Nice, Section::Object];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Section::Attributes => "attributes",
            Section::Nice => "nice",
            Section::Object => "object",
        }
    }
}

/// One element of a shift API response, kept as upstream sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawShiftPayload(Value);

impl From<Value> for RawShiftPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl RawShiftPayload {
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The named sub-map, if present and actually a map. Upstream sends `[]`
    /// for empty maps, which reads as absent here.
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&Map<String, Value>> {
        self.0.get(section.key()).and_then(Value::as_object)
    }

    /// Whether the payload is an object with at least one usable sub-map.
    #[must_use]
    pub fn has_sections(&self) -> bool {
        Section::ALL.iter().any(|s| self.section(*s).is_some())
    }

    /// The value stored under `key` in `section`, if it carries anything.
    #[must_use]
    pub fn field(&self, section: Section, key: &str) -> Option<FieldValue<'_>> {
        self.section(section)?.get(key).and_then(FieldValue::from_json)
    }

    /// Keys across all sub-maps that look schedule-related, as
    /// `section.key` strings.
    #[must_use]
    pub fn schedule_keys(&self) -> Vec<String> {
        const HINTS: [&str; 6] = ["time", "day", "date", "start", "end", "timestamp"];
        Section::ALL
            .iter()
            .filter_map(|s| self.section(*s).map(|map| (s.key(), map)))
            .flat_map(|(name, map)| {
                map.keys()
                    .filter(|k| HINTS.iter().any(|h| k.contains(h)))
                    .map(move |k| format!("{name}.{k}"))
            })
            .collect()
    }
}

/// A field value that is either already text or a structure wrapping it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Scalar(String),
    Structured(&'a Value),
}

impl<'a> FieldValue<'a> {
    /// Classifies a JSON value. Null, `false`, zero and the empty string
    /// carry nothing and yield `None`.
    #[must_use]
    pub fn from_json(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(_) | Value::Array(_) => Some(FieldValue::Structured(value)),
            scalar => scalar_text(scalar).map(FieldValue::Scalar),
        }
    }

    /// Collapses the value to text. Never fails and never returns an empty
    /// string: structures are probed for `value`, `label` and `name` in that
    /// order, and otherwise rendered whole as compact JSON.
    #[must_use]
    pub fn resolve(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::Structured(value) => ["value", "label", "name"]
                .iter()
                .find_map(|k| value.get(*k).and_then(scalar_text))
                .unwrap_or_else(|| value.to_string()),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_string_is_used_as_is() {
        let v = json!("09:30");
        assert_eq!(FieldValue::from_json(&v).unwrap().resolve(), "09:30");
    }

    #[test]
    fn empty_and_falsy_values_carry_nothing() {
        for v in [json!(""), json!(null), json!(false), json!(0)] {
            assert_eq!(FieldValue::from_json(&v), None, "value {v}");
        }
    }

    #[test]
    fn numbers_render_as_text() {
        let v = json!(3);
        assert_eq!(FieldValue::from_json(&v).unwrap().resolve(), "3");
    }

    #[test]
    fn structured_value_probes_value_then_label_then_name() {
        let v = json!({"name": "n", "label": "l", "value": "v"});
        assert_eq!(FieldValue::from_json(&v).unwrap().resolve(), "v");

        let v = json!({"name": "n", "label": "l"});
        assert_eq!(FieldValue::from_json(&v).unwrap().resolve(), "l");

        let v = json!({"name": "n", "value": ""});
        assert_eq!(FieldValue::from_json(&v).unwrap().resolve(), "n");
    }

    #[test]
    fn structured_value_without_known_keys_is_serialized() {
        let v = json!({"id": 7});
        assert_eq!(FieldValue::from_json(&v).unwrap().resolve(), r#"{"id":7}"#);

        let v = json!(["Mon", "Wed"]);
        assert_eq!(FieldValue::from_json(&v).unwrap().resolve(), r#"["Mon","Wed"]"#);
    }

    #[test]
    fn nested_structure_under_probe_key_is_skipped() {
        let v = json!({"value": {"deep": 1}, "label": "Wednesday"});
        assert_eq!(FieldValue::from_json(&v).unwrap().resolve(), "Wednesday");
    }

    #[test]
    fn sections_that_are_not_maps_read_as_absent() {
        let payload = RawShiftPayload::from(json!({"attributes": [], "nice": {"a": "b"}}));
        assert!(payload.section(Section::Attributes).is_none());
        assert!(payload.section(Section::Nice).is_some());
        assert!(payload.has_sections());
    }

    #[test]
    fn non_object_payload_has_no_sections() {
        assert!(!RawShiftPayload::from(json!("oops")).has_sections());
        assert!(!RawShiftPayload::from(json!({})).has_sections());
    }

    #[test]
    fn schedule_keys_lists_time_like_keys_per_section() {
        let payload = RawShiftPayload::from(json!({
            "attributes": {"custom_start_time": "", "custom_van_asset": "Van"},
            "nice": {"start_timestamp__dayofweek": "Wed"},
            "object": {"post_date": "2025-06-25", "post_title": "x"}
        }));
        assert_eq!(
            payload.schedule_keys(),
            vec![
                "attributes.custom_start_time",
                "nice.start_timestamp__dayofweek",
                "object.post_date",
            ]
        );
    }
}
