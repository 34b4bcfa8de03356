use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::KvBackend;
use crate::error::StoreError;

/// Generic persistence over named collections, each stored as one JSON
/// array blob under `<prefix>_<name>`.
///
/// Every mutation is a whole-collection read-modify-write: O(collection
/// size) per write. Collections are expected to stay at thousands of
/// records, not millions.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KvBackend>,
    prefix: String,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KvBackend>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    pub fn backend(&self) -> Arc<dyn KvBackend> {
        Arc::clone(&self.backend)
    }

    fn collection_key(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }

    /// Reads a full collection in stored order.
    ///
    /// An absent key is an empty collection. A blob that no longer parses
    /// is also treated as empty so one corrupt value cannot wedge the
    /// store; the condition is logged, not surfaced.
    pub async fn read_collection<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Vec<T>, StoreError> {
        let key = self.collection_key(name);
        let Some(raw) = self.backend.get(&key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                tracing::warn!(
                    component = "record_store",
                    collection = name,
                    error = %err,
                    "malformed collection blob, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replaces a collection with the given ordered sequence in a single
    /// backend `set`.
    pub async fn write_collection<T: Serialize>(
        &self,
        name: &str,
        items: &[T],
    ) -> Result<(), StoreError> {
        let key = self.collection_key(name);
        let raw = serde_json::to_string(items)?;
        self.backend.set(&key, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, MemoryBackend};
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    struct FailingBackend;

    impl KvBackend for FailingBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, BackendError> {
            Err(BackendError::Unavailable("backend offline".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("backend offline".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("backend offline".to_string()))
        }
    }

    fn memory_store() -> (Arc<MemoryBackend>, RecordStore) {
        let backend = Arc::new(MemoryBackend::new());
        let store = RecordStore::new(backend.clone(), "devbrew");
        (backend, store)
    }

    #[tokio::test]
    async fn write_then_read_preserves_order_and_fields() {
        let (_, store) = memory_store();

        let notes = vec![
            Note {
                id: "n1".to_string(),
                body: "first".to_string(),
            },
            Note {
                id: "n2".to_string(),
                body: "second".to_string(),
            },
        ];

        store.write_collection("notes", &notes).await.expect("write");
        let loaded: Vec<Note> = store.read_collection("notes").await.expect("read");

        assert_eq!(loaded, notes);
    }

    #[tokio::test]
    async fn absent_collection_reads_empty() {
        let (_, store) = memory_store();
        let loaded: Vec<Note> = store.read_collection("notes").await.expect("read");
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn malformed_blob_reads_empty_instead_of_failing() {
        let (backend, store) = memory_store();
        backend
            .set("devbrew_notes", "{not valid json")
            .expect("plant corrupt blob");

        let loaded: Vec<Note> = store.read_collection("notes").await.expect("read");
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn wrong_shape_blob_reads_empty() {
        let (backend, store) = memory_store();
        backend
            .set("devbrew_notes", r#"{"id":"n1"}"#)
            .expect("plant object where array expected");

        let loaded: Vec<Note> = store.read_collection("notes").await.expect("read");
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn backend_failures_propagate() {
        let store = RecordStore::new(Arc::new(FailingBackend), "devbrew");

        let read = store.read_collection::<Note>("notes").await;
        assert!(matches!(read, Err(StoreError::Backend(_))));

        let write = store.write_collection("notes", &[] as &[Note]).await;
        assert!(matches!(write, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn collections_are_namespaced_by_prefix() {
        let backend = Arc::new(MemoryBackend::new());
        let store = RecordStore::new(backend.clone(), "devbrew");

        store
            .write_collection(
                "notes",
                &[Note {
                    id: "n1".to_string(),
                    body: "hello".to_string(),
                }],
            )
            .await
            .expect("write");

        assert!(backend.get("devbrew_notes").expect("get").is_some());
        assert!(backend.get("notes").expect("get").is_none());
    }
}
