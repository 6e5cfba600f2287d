//! The keyed collection store.
//!
//! Every collection is one JSON array under one key. Each mutation reads the
//! whole array (or the caller's default if nothing is stored), changes it in
//! memory, writes the whole array back and returns it.
//!
//! None of the public operations fail. A write that the backend rejects is
//! logged and dropped; a read that fails or does not parse yields the
//! caller's default. The caller's in-memory copy stays authoritative for the
//! session either way.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use campus_core::Record;

use crate::backend::Backend;
use crate::error::{Result, StoreError};

/// Persists named collections of id-keyed records in a [`Backend`].
pub struct CollectionStore<B: Backend> {
    backend: B,
}

impl<B: Backend> CollectionStore<B> {
    /// Create a store over the given backend.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get a reference to the backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Serialize `data` and write it under `key`, replacing any previous value.
    ///
    /// Failures are logged and the write is dropped.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, data: &T) {
        if let Err(e) = self.try_save(key, data) {
            tracing::warn!(key = %key, error = %e, "Dropping write, storage rejected it");
        }
    }

    /// Read and deserialize the value under `key`.
    ///
    /// Returns `default` if nothing is stored, the backend fails, or the stored
    /// text does not deserialize as `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Unreadable value, using default");
                default
            }
        }
    }

    /// Whether any value is stored under `key`.
    ///
    /// Backend failures count as "nothing stored".
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        match self.backend.get(key) {
            Ok(value) => value.is_some(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Presence check failed");
                false
            }
        }
    }

    /// Seed `key` with `default_data` unless something is already stored there.
    ///
    /// Calling this again with any data leaves storage untouched.
    pub fn initialize<T: Serialize + ?Sized>(&self, key: &str, default_data: &T) {
        match self.backend.get(key) {
            Ok(Some(_)) => {
                tracing::debug!(key = %key, "Collection already present, not seeding");
            }
            Ok(None) => {
                tracing::debug!(key = %key, "Seeding collection");
                self.save(key, default_data);
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cannot check collection, not seeding");
            }
        }
    }

    /// Prepend `record` to the collection and persist it.
    ///
    /// The new record always lands at index 0 so list views show newest first.
    pub fn insert_front<T: Record>(&self, key: &str, record: T, default: &[T]) -> Vec<T> {
        let mut records = self.load_collection(key, default);
        records.insert(0, record);
        self.save(key, &records);
        records
    }

    /// Shallow-merge `patch` into the record whose id is `id`, then persist.
    ///
    /// Fields present in `patch` overwrite the record's fields; the rest are
    /// kept. Other records are not touched. If no record matches, the
    /// collection is written back unchanged. A patch that is not a JSON object,
    /// or that would leave the record unreadable as `T`, is skipped.
    pub fn patch_by_id<T: Record>(
        &self,
        key: &str,
        id: &str,
        patch: &Value,
        default: &[T],
    ) -> Vec<T> {
        let mut records = self.load_collection(key, default);

        if let Some(fields) = patch.as_object() {
            for record in records.iter_mut().filter(|r| r.id() == id) {
                match merge_fields(record, fields) {
                    Ok(merged) => *record = merged,
                    Err(e) => {
                        tracing::warn!(key = %key, id = %id, error = %e, "Patch rejected");
                    }
                }
            }
        } else {
            tracing::warn!(key = %key, id = %id, "Patch is not a JSON object, ignoring");
        }

        self.save(key, &records);
        records
    }

    /// Remove every record whose id is `id`, then persist the rest.
    ///
    /// Removing an id that is not present writes the collection back unchanged.
    pub fn remove_by_id<T: Record>(&self, key: &str, id: &str, default: &[T]) -> Vec<T> {
        let mut records = self.load_collection(key, default);
        let before = records.len();
        records.retain(|r| r.id() != id);

        if before - records.len() > 1 {
            tracing::warn!(
                key = %key,
                id = %id,
                removed = before - records.len(),
                "Removed duplicate ids"
            );
        }

        self.save(key, &records);
        records
    }

    /// Find the first record with the given id by scanning the collection.
    #[must_use]
    pub fn find_by_id<T: Record>(&self, key: &str, id: &str, default: &[T]) -> Option<T> {
        self.load_collection(key, default)
            .into_iter()
            .find(|r| r.id() == id)
    }

    /// List the keys that hold a stored value, sorted.
    ///
    /// Returns an empty list if the backend cannot be read.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        match self.backend.keys() {
            Ok(mut keys) => {
                keys.sort_unstable();
                keys
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot list stored keys");
                Vec::new()
            }
        }
    }

    /// Bind a key and its default into a typed handle.
    #[must_use]
    pub fn collection<'a, T: Record>(
        &'a self,
        key: &'a str,
        default: Vec<T>,
    ) -> Collection<'a, B, T> {
        Collection {
            store: self,
            key,
            default,
        }
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<()> {
        let text = serde_json::to_string(data)?;
        self.backend.set(key, &text)
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.backend
            .get(key)?
            .map(|text| serde_json::from_str(&text).map_err(StoreError::from))
            .transpose()
    }

    fn load_collection<T: Record>(&self, key: &str, default: &[T]) -> Vec<T> {
        match self.try_load(key) {
            Ok(Some(records)) => records,
            Ok(None) => default.to_vec(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Unreadable collection, using default");
                default.to_vec()
            }
        }
    }
}

/// Overlay `patch` on the record's JSON fields and read it back as `T`.
///
/// A patch may rename a record but never leave it without a usable id.
fn merge_fields<T: Record>(record: &T, patch: &Map<String, Value>) -> Result<T> {
    if let Some(id) = patch.get("id") {
        if !id.as_str().is_some_and(|id| !id.trim().is_empty()) {
            return Err(StoreError::Serialization(format!("patch would set id to {id}")));
        }
    }

    let mut value = serde_json::to_value(record)?;
    let Value::Object(fields) = &mut value else {
        return Err(StoreError::Serialization(
            "record does not serialize to a JSON object".to_string(),
        ));
    };

    for (field, new_value) in patch {
        fields.insert(field.clone(), new_value.clone());
    }

    Ok(serde_json::from_value(value)?)
}

/// A collection key bound to its store and first-run default.
pub struct Collection<'a, B: Backend, T: Record> {
    store: &'a CollectionStore<B>,
    key: &'a str,
    default: Vec<T>,
}

impl<B: Backend, T: Record> Collection<'_, B, T> {
    /// The storage key.
    #[must_use]
    pub const fn key(&self) -> &str {
        self.key
    }

    /// Seed the collection with its default if nothing is stored yet.
    pub fn initialize(&self) {
        self.store.initialize(self.key, &self.default);
    }

    /// Load the collection, falling back to the default.
    #[must_use]
    pub fn load(&self) -> Vec<T> {
        self.store.load_collection(self.key, &self.default)
    }

    /// Replace the whole collection.
    pub fn save(&self, records: &[T]) {
        self.store.save(self.key, records);
    }

    /// See [`CollectionStore::insert_front`].
    pub fn insert_front(&self, record: T) -> Vec<T> {
        self.store.insert_front(self.key, record, &self.default)
    }

    /// See [`CollectionStore::patch_by_id`].
    pub fn patch_by_id(&self, id: &str, patch: &Value) -> Vec<T> {
        self.store.patch_by_id(self.key, id, patch, &self.default)
    }

    /// See [`CollectionStore::remove_by_id`].
    pub fn remove_by_id(&self, id: &str) -> Vec<T> {
        self.store.remove_by_id(self.key, id, &self.default)
    }

    /// See [`CollectionStore::find_by_id`].
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.store.find_by_id(self.key, id, &self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::keys;
    use crate::types::Grade;
    use campus_core::{Document, RecordId};
    use chrono::NaiveDate;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        name: String,
        age: u32,
    }

    impl Record for Row {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, name: &str, age: u32) -> Row {
        Row {
            id: id.to_string(),
            name: name.to_string(),
            age,
        }
    }

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    fn create_test_store() -> CollectionStore<MemoryBackend> {
        CollectionStore::new(MemoryBackend::new())
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = create_test_store();
        let data = vec![row("1", "A", 10), row("2", "B", 20)];

        store.save("rows", &data);
        let loaded: Vec<Row> = store.load("rows", vec![row("x", "default", 0)]);
        assert_eq!(loaded, data);

        // Any serializable value, not just collections.
        store.save("answer", &42u32);
        assert_eq!(store.load("answer", 0u32), 42);
    }

    #[test]
    fn load_missing_key_returns_default() {
        let store = create_test_store();
        let default = vec![row("1", "A", 10)];
        assert_eq!(store.load("never-saved", default.clone()), default);
        assert!(!store.contains("never-saved"));
    }

    #[test]
    fn load_corrupt_or_mismatched_value_returns_default() {
        let store = create_test_store();
        store.backend().set("rows", "{not json").unwrap();
        assert_eq!(store.load("rows", Vec::<Row>::new()), Vec::new());

        // Valid JSON of the wrong shape is not partially parsed.
        store.backend().set("rows", r#"[{"id":"1","name":"A"}]"#).unwrap();
        let fallback = vec![row("d", "D", 1)];
        assert_eq!(store.load("rows", fallback.clone()), fallback);
    }

    #[test]
    fn initialize_is_idempotent() {
        let store = create_test_store();
        store.initialize("rows", &vec![row("1", "A", 10)]);
        let first = store.backend().get("rows").unwrap();

        store.initialize("rows", &vec![row("2", "Other", 99)]);
        assert_eq!(store.backend().get("rows").unwrap(), first);
        assert_eq!(store.load("rows", Vec::<Row>::new()), vec![row("1", "A", 10)]);
    }

    #[test]
    fn initialize_does_not_clobber_edits() {
        let store = create_test_store();
        let seed = vec![row("1", "A", 10)];
        store.initialize("rows", &seed);
        store.insert_front("rows", row("2", "B", 20), &seed);

        store.initialize("rows", &seed);
        assert_eq!(store.load("rows", Vec::<Row>::new()).len(), 2);
    }

    #[test]
    fn insert_front_prepends() {
        let store = create_test_store();
        store.save("rows", &vec![row("a", "A", 1), row("b", "B", 2), row("c", "C", 3)]);

        let result = store.insert_front("rows", row("x", "X", 0), &[]);
        let ids: Vec<&str> = result.iter().map(Record::id).collect();
        assert_eq!(ids, vec!["x", "a", "b", "c"]);
        assert_eq!(store.load("rows", Vec::<Row>::new()), result);
    }

    #[test]
    fn insert_front_on_empty_key_uses_default() {
        let store = create_test_store();
        let default = vec![row("seed", "S", 1)];

        let result = store.insert_front("rows", row("new", "N", 2), &default);
        assert_eq!(result, vec![row("new", "N", 2), row("seed", "S", 1)]);
    }

    #[test]
    fn patch_preserves_untouched_fields() {
        let store = create_test_store();
        store.save("rows", &vec![row("1", "A", 10), row("2", "B", 20)]);
        let other_before = serde_json::to_string(&row("2", "B", 20)).unwrap();

        let result = store.patch_by_id::<Row>("rows", "1", &json!({"age": 11}), &[]);
        assert_eq!(result[0], row("1", "A", 11));
        assert_eq!(serde_json::to_string(&result[1]).unwrap(), other_before);
        assert_eq!(store.load("rows", Vec::<Row>::new()), result);
    }

    #[test]
    fn patch_missing_id_is_noop() {
        let store = create_test_store();
        let original = vec![row("1", "A", 10)];
        store.save("rows", &original);
        let stored_before = store.backend().get("rows").unwrap();

        let result = store.patch_by_id::<Row>("rows", "2", &json!({"name": "Z"}), &[]);
        assert_eq!(result, original);
        assert_eq!(store.backend().get("rows").unwrap(), stored_before);
    }

    #[test]
    fn patch_that_breaks_record_shape_is_skipped() {
        let store = create_test_store();
        store.save("rows", &vec![row("1", "A", 10)]);

        let result = store.patch_by_id::<Row>("rows", "1", &json!({"age": "eleven"}), &[]);
        assert_eq!(result, vec![row("1", "A", 10)]);

        let result = store.patch_by_id::<Row>("rows", "1", &json!(["not", "an", "object"]), &[]);
        assert_eq!(result, vec![row("1", "A", 10)]);
    }

    #[test]
    fn patch_keeps_unmodeled_fields_on_documents() {
        let store = create_test_store();
        store.save(
            "messages",
            &vec![doc(json!({"id": "m1", "text": "hi", "meta": {"pinned": true}}))],
        );

        let result = store.patch_by_id::<Document>("messages", "m1", &json!({"read": true}), &[]);
        assert_eq!(
            Value::from(result[0].clone()),
            json!({"id": "m1", "text": "hi", "meta": {"pinned": true}, "read": true})
        );
    }

    #[test]
    fn patch_cannot_strip_a_record_id() {
        let store = create_test_store();
        store.save("messages", &vec![doc(json!({"id": "m1", "text": "hi"}))]);

        for bad in [json!({"id": 7}), json!({"id": null}), json!({"id": " "})] {
            let result = store.patch_by_id::<Document>("messages", "m1", &bad, &[]);
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].id(), "m1");
        }

        // Nothing is addressable by the empty id afterwards.
        let result = store.remove_by_id::<Document>("messages", "", &[]);
        assert_eq!(result.len(), 1);
        assert_eq!(
            store.find_by_id::<Document>("messages", "m1", &[]).map(Value::from),
            Some(json!({"id": "m1", "text": "hi"}))
        );

        store.save("rows", &vec![row("1", "A", 10)]);
        let result = store.patch_by_id::<Row>("rows", "1", &json!({"id": ""}), &[]);
        assert_eq!(result, vec![row("1", "A", 10)]);
    }

    #[test]
    fn patch_may_change_an_id_to_another_string() {
        let store = create_test_store();
        store.save("rows", &vec![row("1", "A", 10)]);

        let result = store.patch_by_id::<Row>("rows", "1", &json!({"id": "1b"}), &[]);
        assert_eq!(result, vec![row("1b", "A", 10)]);
    }

    #[test]
    fn remove_deletes_matching_id() {
        let store = create_test_store();
        store.save(
            "rows",
            &vec![row("1", "A", 1), row("2", "B", 2), row("3", "C", 3)],
        );

        let result = store.remove_by_id::<Row>("rows", "2", &[]);
        assert_eq!(result, vec![row("1", "A", 1), row("3", "C", 3)]);
        assert_eq!(store.load("rows", Vec::<Row>::new()), result);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let store = create_test_store();
        let original = vec![row("1", "A", 1)];
        store.save("rows", &original);

        assert_eq!(store.remove_by_id::<Row>("rows", "9", &[]), original);
    }

    #[test]
    fn remove_drops_all_duplicates() {
        let store = create_test_store();
        store.save("rows", &vec![row("1", "A", 1), row("1", "A2", 2), row("2", "B", 3)]);

        let result = store.remove_by_id::<Row>("rows", "1", &[]);
        assert_eq!(result, vec![row("2", "B", 3)]);
    }

    #[test]
    fn students_scenario() {
        let store = create_test_store();
        store.initialize(
            keys::STUDENTS,
            &vec![doc(json!({"id": "st1", "name": "Ivanov"}))],
        );
        store.insert_front(
            keys::STUDENTS,
            doc(json!({"id": "st2", "name": "Petrova"})),
            &[],
        );

        let loaded: Vec<Document> = store.load(keys::STUDENTS, Vec::new());
        let loaded: Vec<Value> = loaded.into_iter().map(Value::from).collect();
        assert_eq!(
            loaded,
            vec![
                json!({"id": "st2", "name": "Petrova"}),
                json!({"id": "st1", "name": "Ivanov"}),
            ]
        );
    }

    #[test]
    fn grades_scenario() {
        let store = create_test_store();
        let date = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
        store.save(
            keys::GRADES,
            &vec![Grade {
                id: RecordId::new("g1"),
                student_id: RecordId::new("st1"),
                subject_id: RecordId::new("sub1"),
                grade: 5,
                date,
                comment: None,
            }],
        );

        store.patch_by_id::<Grade>(keys::GRADES, "g1", &json!({"grade": 4}), &[]);

        let reloaded: Vec<Grade> = store.load(keys::GRADES, Vec::new());
        assert_eq!(reloaded[0].grade, 4);
        assert_eq!(reloaded[0].student_id, "st1");
        assert_eq!(reloaded[0].date, date);
    }

    #[test]
    fn failed_writes_are_dropped_and_reads_fall_back() {
        let store = CollectionStore::new(MemoryBackend::disabled());
        let default = vec![row("1", "A", 1)];

        store.initialize("rows", &default);
        store.save("rows", &default);
        assert_eq!(store.load("rows", Vec::<Row>::new()), Vec::new());

        // Mutations still return the in-memory result.
        let result = store.insert_front("rows", row("2", "B", 2), &default);
        assert_eq!(result, vec![row("2", "B", 2), row("1", "A", 1)]);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn quota_exceeded_keeps_previous_value() {
        let store = CollectionStore::new(MemoryBackend::with_quota(64));
        store.save("rows", &vec![row("1", "A", 1)]);
        let stored_before = store.backend().get("rows").unwrap();

        let big: Vec<Row> = (0..20).map(|i| row(&i.to_string(), "Name", i)).collect();
        store.save("rows", &big);
        assert_eq!(store.backend().get("rows").unwrap(), stored_before);
    }

    #[test]
    fn find_and_keys() {
        let store = create_test_store();
        store.save("teachers", &vec![row("t1", "Smirnov", 50)]);
        store.save("grades", &Vec::<Row>::new());

        assert_eq!(
            store.find_by_id::<Row>("teachers", "t1", &[]).map(|r| r.name),
            Some("Smirnov".to_string())
        );
        assert!(store.find_by_id::<Row>("teachers", "t2", &[]).is_none());
        assert_eq!(store.keys(), vec!["grades".to_string(), "teachers".to_string()]);
    }

    #[test]
    fn typed_handle_binds_key_and_default() {
        let store = create_test_store();
        let rows = store.collection("rows", vec![row("1", "A", 10)]);
        assert_eq!(rows.key(), "rows");

        rows.initialize();
        rows.insert_front(row("2", "B", 20));
        rows.patch_by_id("1", &json!({"name": "AA"}));
        assert_eq!(rows.load(), vec![row("2", "B", 20), row("1", "AA", 10)]);

        rows.remove_by_id("2");
        assert_eq!(rows.find_by_id("1"), Some(row("1", "AA", 10)));
        assert_eq!(rows.load().len(), 1);

        rows.save(&[]);
        assert!(rows.load().is_empty());
    }
}
