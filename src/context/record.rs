//! Context record attached to a request scope.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::{Map, Value};

use crate::request_id::REQUEST_ID_KEY;

/// Mutable key/value record carried by a context scope.
///
/// Cloning yields another handle to the same record, so a field inserted
/// through one handle is visible through every other handle. Consumers add
/// or overwrite fields; the record itself is never swapped out of a scope.
#[derive(Clone, Default)]
pub struct ContextRecord {
    fields: Arc<DashMap<String, Value>>,
}

impl ContextRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record seeded with `requestId`.
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        let record = Self::new();
        record.set_request_id(request_id);
        record
    }

    /// Returns the correlation id, if one has been set and is non-empty.
    pub fn request_id(&self) -> Option<String> {
        self.fields
            .get(REQUEST_ID_KEY)
            .and_then(|v| v.as_str().map(str::to_owned))
            .filter(|id| !id.is_empty())
    }

    pub fn set_request_id(&self, request_id: impl Into<String>) {
        self.insert(REQUEST_ID_KEY, Value::String(request_id.into()));
    }

    /// Inserts a field, returning the previous value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Returns a copy of a field.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.fields.get(key).map(|v| v.value().clone())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.fields.remove(key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Snapshot of all fields as a JSON object.
    pub fn to_map(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Returns true if both handles point at the same record.
    pub fn ptr_eq(&self, other: &ContextRecord) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }
}

impl fmt::Debug for ContextRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextRecord")
            .field("fields", &self.to_map())
            .finish()
    }
}
