//! The `Record` trait and the untyped `Document` record.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::ids::RecordId;

/// A value stored in a collection, identified by a string `id` field.
///
/// The store compares ids by string equality and never checks uniqueness;
/// callers generate non-colliding ids (see [`RecordId::generate`]).
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The record's id within its collection.
    fn id(&self) -> &str;
}

/// A record whose shape is not modeled: a JSON object with an `id` field.
///
/// Every field round-trips untouched, so a `Document` collection keeps data
/// written by other clients intact. An `id`, when present, is always a
/// non-empty string; deserialization enforces this too.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Document(Map<String, Value>);

impl Document {
    /// Wrap a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a document from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotARecord` if the value is not a JSON object or
    /// carries an `id` that is not a string, and `CoreError::InvalidId` if
    /// the `id` is blank.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Self::try_from(fields),
            other => Err(CoreError::NotARecord(format!("expected a JSON object, got {other}"))),
        }
    }

    /// Assign a freshly generated id if the document has none.
    #[must_use]
    pub fn with_generated_id(mut self) -> Self {
        if !self.0.contains_key("id") {
            self.0
                .insert("id".to_string(), Value::String(RecordId::generate().into_string()));
        }
        self
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Borrow the underlying JSON object.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the document and return the underlying JSON object.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Map<String, Value>> for Document {
    type Error = CoreError;

    fn try_from(fields: Map<String, Value>) -> Result<Self> {
        match fields.get("id") {
            None => {}
            Some(Value::String(id)) => {
                RecordId::from_str(id)?;
            }
            Some(other) => {
                return Err(CoreError::NotARecord(format!("id must be a string, got {other}")));
            }
        }
        Ok(Self(fields))
    }
}

impl Record for Document {
    fn id(&self) -> &str {
        self.0.get("id").and_then(Value::as_str).unwrap_or_default()
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Self::Object(doc.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_reads_id_field() {
        let doc = Document::from_value(json!({"id": "st1", "name": "Ivanov"})).unwrap();
        assert_eq!(doc.id(), "st1");
        assert_eq!(doc.get("name"), Some(&json!("Ivanov")));
    }

    #[test]
    fn document_rejects_non_objects() {
        assert!(matches!(
            Document::from_value(json!([1, 2])),
            Err(CoreError::NotARecord(_))
        ));
        assert!(matches!(
            Document::from_value(json!({"id": 7})),
            Err(CoreError::NotARecord(_))
        ));
    }

    #[test]
    fn document_rejects_blank_ids() {
        assert!(matches!(
            Document::from_value(json!({"id": "  ", "name": "Ivanov"})),
            Err(CoreError::InvalidId(_))
        ));
    }

    #[test]
    fn deserializing_checks_the_id() {
        assert!(serde_json::from_str::<Document>(r#"{"id": 7}"#).is_err());
        assert!(serde_json::from_str::<Document>(r#"{"id": ""}"#).is_err());
        assert!(serde_json::from_str::<Document>(r#"[{"id": "m1"}]"#).is_err());

        let doc: Document = serde_json::from_str(r#"{"text": "no id yet"}"#).unwrap();
        assert_eq!(doc.id(), "");
    }

    #[test]
    fn generated_id_only_when_missing() {
        let doc = Document::from_value(json!({"name": "Petrova"}))
            .unwrap()
            .with_generated_id();
        assert!(!doc.id().is_empty());

        let kept = Document::from_value(json!({"id": "st2"}))
            .unwrap()
            .with_generated_id();
        assert_eq!(kept.id(), "st2");
    }

    #[test]
    fn unknown_fields_roundtrip() {
        let raw = json!({"id": "m1", "extra": {"nested": [1, 2, 3]}, "flag": true});
        let doc: Document = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }
}
