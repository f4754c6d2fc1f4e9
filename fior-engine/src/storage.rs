//! Pipeline document persistence boundary
//!
//! The engine never performs I/O. Embedders supply a `DocumentStore`
//! (browser localStorage in the original editor) holding the serialized
//! document under an opaque string key. Loading is fail-soft: a missing
//! or malformed stored value yields the empty document, so the engine
//! only ever sees well-formed structures.

use std::collections::HashMap;

use tracing::warn;

use crate::document::FiorData;
use crate::error::Result;

/// Key-value persistence supplied by the embedding application.
pub trait DocumentStore {
    /// Load the raw serialized document stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;
    /// Store the serialized document under `key`.
    fn store(&mut self, key: &str, value: &str);
}

/// Serialize a document for storage.
pub fn encode_document(data: &FiorData) -> Result<String> {
    Ok(serde_json::to_string(data)?)
}

/// Deserialize a stored document. Malformed input normalizes to the
/// empty document rather than surfacing an error.
pub fn decode_document(raw: &str) -> FiorData {
    match serde_json::from_str(raw) {
        Ok(data) => data,
        Err(err) => {
            warn!(%err, "stored document failed to parse, starting empty");
            FiorData::default()
        }
    }
}

/// Load the document stored under `key`, or the empty document.
pub fn load_document(store: &impl DocumentStore, key: &str) -> FiorData {
    store
        .load(key)
        .map(|raw| decode_document(&raw))
        .unwrap_or_default()
}

/// Serialize and store `data` under `key`.
pub fn store_document(store: &mut impl DocumentStore, key: &str, data: &FiorData) -> Result<()> {
    let raw = encode_document(data)?;
    store.store(key, &raw);
    Ok(())
}

/// In-memory store for tests and embeddings without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl DocumentStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_loads_empty_document() {
        let store = MemoryStore::default();
        let data = load_document(&store, "fiorData");
        assert!(data.columns.is_empty());
    }

    #[test]
    fn malformed_stored_value_loads_empty_document() {
        let mut store = MemoryStore::default();
        store.store("fiorData", "{not json");
        let data = load_document(&store, "fiorData");
        assert!(data.columns.is_empty());
    }

    #[test]
    fn store_then_load_round_trips() {
        let mut store = MemoryStore::default();
        let mut data = FiorData::new();
        let column = data.add_column("fior-0");
        data.set_column_playlists(column, vec!["PL1".to_string()])
            .unwrap();
        store_document(&mut store, "fiorData", &data).unwrap();
        assert_eq!(load_document(&store, "fiorData"), data);
    }
}
