//! Command handlers.
//!
//! Each handler runs one store operation and returns the text to print, so
//! the handlers can be exercised against an in-memory store.

use anyhow::{bail, Context};
use campus_core::{Document, Record};
use campus_store::{keys, Backend, CampusState, CollectionStore};
use serde_json::Value;

/// Seed every collection that has never been stored.
pub fn seed<B: Backend>(store: &CollectionStore<B>) -> String {
    let state = CampusState::bootstrap(store);
    format!(
        "students: {}\nteachers: {}\ngrades: {}\nmaterials: {}\nattendance: {}\nmessages: {}",
        state.students.len(),
        state.teachers.len(),
        state.grades.len(),
        state.materials.len(),
        state.attendance.len(),
        state.messages.len(),
    )
}

/// List the keys that hold a stored collection.
pub fn collections<B: Backend>(store: &CollectionStore<B>) -> String {
    store.keys().join("\n")
}

/// Print a collection as pretty JSON.
///
/// # Errors
///
/// Returns an error if the collection cannot be rendered.
pub fn list<B: Backend>(store: &CollectionStore<B>, key: &str) -> anyhow::Result<String> {
    warn_unknown_key(key);
    let records: Vec<Document> = store.load(key, Vec::new());
    serde_json::to_string_pretty(&records).context("failed to render collection")
}

/// Insert a JSON object at the front of a collection.
///
/// # Errors
///
/// Returns an error if `json` is not a JSON object with a string id.
pub fn add<B: Backend>(
    store: &CollectionStore<B>,
    key: &str,
    json: &str,
) -> anyhow::Result<String> {
    warn_unknown_key(key);
    let record = Document::from_value(parse_json(json)?)?.with_generated_id();
    let id = record.id().to_string();
    let records = store.insert_front(key, record, &[]);
    Ok(format!("added {id} ({} records)", records.len()))
}

/// Merge a JSON object into the record with the given id.
///
/// # Errors
///
/// Returns an error if `json` is not a JSON object or no record has `id`.
pub fn patch<B: Backend>(
    store: &CollectionStore<B>,
    key: &str,
    id: &str,
    json: &str,
) -> anyhow::Result<String> {
    let patch = parse_json(json)?;
    if !patch.is_object() {
        bail!("patch must be a JSON object");
    }

    let records = store.patch_by_id::<Document>(key, id, &patch, &[]);
    let Some(record) = records.into_iter().find(|r| r.id() == id) else {
        bail!("no record {id} in {key}");
    };
    serde_json::to_string_pretty(&record).context("failed to render record")
}

/// Remove the record with the given id.
pub fn remove<B: Backend>(store: &CollectionStore<B>, key: &str, id: &str) -> String {
    let before = store.load::<Vec<Document>>(key, Vec::new()).len();
    let records = store.remove_by_id::<Document>(key, id, &[]);
    if records.len() == before {
        format!("no record {id} in {key}")
    } else {
        format!("removed {id} ({} records left)", records.len())
    }
}

fn parse_json(json: &str) -> anyhow::Result<Value> {
    serde_json::from_str(json).context("argument is not valid JSON")
}

fn warn_unknown_key(key: &str) {
    if !keys::all_collections().contains(&key) {
        tracing::warn!(key = %key, "Not one of the application's collections");
    }
}
