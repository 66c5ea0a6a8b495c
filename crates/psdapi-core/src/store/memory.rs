//! In-memory record source.
//!
//! Holds raw JSON documents and applies the same filter the Cosmos query
//! does. Used by tests and local runs without a Cosmos account.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::lookup::{MAIN_PARENT_DTYPE, MainParentRecord, ParentRecordSource};

/// Document store kept in process memory.
#[derive(Debug)]
pub struct InMemoryStore {
    documents: RwLock<Vec<serde_json::Value>>,
    next_ts: AtomicI64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            next_ts: AtomicI64::new(Utc::now().timestamp()),
        }
    }

    /// Insert a document.
    ///
    /// Objects without `_ts` get one that increases with every insert, so
    /// later inserts count as more recently written.
    pub fn insert(&self, mut document: serde_json::Value) {
        let ts = self.next_ts.fetch_add(1, Ordering::Relaxed);
        if let Some(object) = document.as_object_mut() {
            object
                .entry("_ts")
                .or_insert_with(|| serde_json::Value::from(ts));
        }
        self.documents.write().push(document);
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Whether the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

fn is_active_main_parent(document: &serde_json::Value, psd_number: &str) -> bool {
    document.get("dType").and_then(serde_json::Value::as_str) == Some(MAIN_PARENT_DTYPE)
        && document.get("psd_number").and_then(serde_json::Value::as_str) == Some(psd_number)
        && document.get("active").and_then(serde_json::Value::as_bool) == Some(true)
}

#[async_trait::async_trait]
impl ParentRecordSource for InMemoryStore {
    async fn find_active_main_parents(
        &self,
        psd_number: &str,
    ) -> Result<Vec<MainParentRecord>, StoreError> {
        self.documents
            .read()
            .iter()
            .filter(|doc| is_active_main_parent(doc, psd_number))
            .map(|doc| {
                serde_json::from_value::<MainParentRecord>(doc.clone())
                    .map_err(|e| StoreError::Decode(e.to_string()))
            })
            .collect()
    }
}
