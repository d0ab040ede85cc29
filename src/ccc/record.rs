//! Population report record as returned by the CCC search endpoint

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Grade tiers watched for new pops, highest tier first
pub const GRADE_FIELDS: [&str; 6] = ["note10g", "note10b", "note10", "note95", "note9", "note8"];

/// One card entry of the population report.
///
/// Only the fields used for matching and diffing are typed; they are kept as raw JSON
/// values so a record written back to the state file is identical to what the API sent,
/// explicit `null`s and key order included. Everything else lives in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct CardRecord {
    pub custom_extension_number: Option<Value>,
    pub extension: Option<Value>,
    pub notes_total: Option<Value>,
    pub note10g: Option<Value>,
    pub note10b: Option<Value>,
    pub note10: Option<Value>,
    pub note95: Option<Value>,
    pub note9: Option<Value>,
    pub note8: Option<Value>,
    pub extra: Map<String, Value>,
    /// Keys in the order the API sent them
    key_order: Vec<String>,
}

impl From<Map<String, Value>> for CardRecord {
    fn from(mut map: Map<String, Value>) -> Self {
        let key_order = map.keys().cloned().collect();
        Self {
            custom_extension_number: map.remove("customExtensionNumber"),
            extension: map.remove("extension"),
            notes_total: map.remove("notesTotal"),
            note10g: map.remove("note10g"),
            note10b: map.remove("note10b"),
            note10: map.remove("note10"),
            note95: map.remove("note95"),
            note9: map.remove("note9"),
            note8: map.remove("note8"),
            extra: map,
            key_order,
        }
    }
}

impl From<CardRecord> for Map<String, Value> {
    fn from(record: CardRecord) -> Self {
        let mut fields = record.extra;
        let typed = [
            ("customExtensionNumber", record.custom_extension_number),
            ("extension", record.extension),
            ("notesTotal", record.notes_total),
            ("note10g", record.note10g),
            ("note10b", record.note10b),
            ("note10", record.note10),
            ("note95", record.note95),
            ("note9", record.note9),
            ("note8", record.note8),
        ];
        for (key, value) in typed {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        }

        // Keys seen on load keep their position; keys added since go last
        let mut map = Map::new();
        for key in &record.key_order {
            if let Some(value) = fields.remove(key) {
                map.insert(key.clone(), value);
            }
        }
        map.extend(fields);
        map
    }
}

/// Interpret a count field; missing, null or non-numeric values count as zero
fn count_of(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Render a scalar as the API would print it; null and missing become ""
fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl CardRecord {
    /// Raw value of a named field, typed or pass-through
    pub fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "customExtensionNumber" => self.custom_extension_number.as_ref(),
            "extension" => self.extension.as_ref(),
            "notesTotal" => self.notes_total.as_ref(),
            "note10g" => self.note10g.as_ref(),
            "note10b" => self.note10b.as_ref(),
            "note10" => self.note10.as_ref(),
            "note95" => self.note95.as_ref(),
            "note9" => self.note9.as_ref(),
            "note8" => self.note8.as_ref(),
            _ => self.extra.get(name),
        }
    }

    /// Count held by a grade field (0 when missing)
    pub fn count(&self, field: &str) -> u64 {
        count_of(self.field(field))
    }

    /// Total number of graded copies
    pub fn total(&self) -> u64 {
        count_of(self.notes_total.as_ref())
    }

    /// Number within the set, either bare ("104") or "N/M" style ("104/203")
    pub fn number(&self) -> String {
        text_of(self.custom_extension_number.as_ref())
    }

    /// Set name, taken from the nested extension document or a scalar fallback
    pub fn set_name(&self) -> String {
        match self.extension.as_ref() {
            Some(Value::Object(ext)) => text_of(ext.get("name")),
            other => text_of(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CardRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn reads_typed_fields() {
        let card = record(json!({
            "customExtensionNumber": "104/203",
            "extension": { "name": "Destinées Occultes", "code": "XY" },
            "notesTotal": 42,
            "note10g": 3,
            "note9": null
        }));

        assert_eq!(card.number(), "104/203");
        assert_eq!(card.set_name(), "Destinées Occultes");
        assert_eq!(card.total(), 42);
        assert_eq!(card.count("note10g"), 3);
        assert_eq!(card.count("note9"), 0);
        assert_eq!(card.count("note8"), 0);
    }

    #[test]
    fn numeric_number_and_scalar_extension() {
        let card = record(json!({ "customExtensionNumber": 233, "extension": "Noir et Blanc" }));
        assert_eq!(card.number(), "233");
        assert_eq!(card.set_name(), "Noir et Blanc");
    }

    #[test]
    fn missing_metadata_is_empty() {
        let card = record(json!({ "name": "Kyogre" }));
        assert_eq!(card.number(), "");
        assert_eq!(card.set_name(), "");
        assert_eq!(card.total(), 0);

        let card = record(json!({ "extension": { "id": 7 } }));
        assert_eq!(card.set_name(), "");
    }

    #[test]
    fn counts_tolerate_strings_and_garbage() {
        let card = record(json!({ "note10": "7", "note95": "n/a", "note8": -2 }));
        assert_eq!(card.count("note10"), 7);
        assert_eq!(card.count("note95"), 0);
        assert_eq!(card.count("note8"), 0);
    }

    #[test]
    fn unknown_fields_are_reachable_by_name() {
        let card = record(json!({ "note7": 12, "@id": "/api/v2/cards/1" }));
        assert_eq!(card.count("note7"), 12);
        assert_eq!(card.field("@id"), Some(&json!("/api/v2/cards/1")));
    }

    #[test]
    fn reserialization_keeps_document_intact() {
        let original = json!({
            "@id": "/api/v2/cards/981",
            "customExtensionNumber": "233/198",
            "extension": { "name": "Écarlate et Violet", "code": "SV1" },
            "notesTotal": 17,
            "note10g": 2,
            "note10b": null,
            "pictures": ["front.jpg", "back.jpg"]
        });

        let card = record(original.clone());
        let back = serde_json::to_value(&card).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn reserialization_keeps_key_order() {
        let original =
            r#"{"zeta":1,"customExtensionNumber":"104","@id":"/x","note10":null,"alpha":2}"#;

        let card: CardRecord = serde_json::from_str(original).unwrap();
        assert_eq!(serde_json::to_string(&card).unwrap(), original);
    }

    #[test]
    fn updated_and_new_fields_are_written() {
        let mut card: CardRecord =
            serde_json::from_str(r#"{"note10g":1,"@id":"/x"}"#).unwrap();
        card.note10g = Some(json!(2));
        card.note9 = Some(json!(5));

        assert_eq!(
            serde_json::to_string(&card).unwrap(),
            r#"{"note10g":2,"@id":"/x","note9":5}"#
        );
    }
}
