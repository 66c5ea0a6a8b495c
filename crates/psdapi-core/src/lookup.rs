//! Parent ID lookup by PSD number.
//!
//! The lookup reads active `main_parent` records for a PSD number from a
//! [`ParentRecordSource`] and picks one winner:
//!
//! - no records: [`LookupOutcome::NotFound`]
//! - several records: the one with the greatest `_ts` wins; ties keep the
//!   first record in source order
//! - winner without a usable `main_parent_id`: [`LookupOutcome::NotFound`]

use std::fmt;
use std::sync::Arc;

use psdapi_model::ParentId;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::StoreError;

/// Discriminator value of the records the lookup reads.
pub const MAIN_PARENT_DTYPE: &str = "main_parent";

/// The projection of a `main_parent` record the lookup needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainParentRecord {
    /// The parent ID. Absent, `null`, or empty means the record has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_parent_id: Option<serde_json::Value>,

    /// Store write timestamp (epoch seconds).
    #[serde(rename = "_ts", default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl MainParentRecord {
    /// Build a record with a string parent ID and a write timestamp.
    #[must_use]
    pub fn new(main_parent_id: impl Into<String>, ts: i64) -> Self {
        Self {
            main_parent_id: Some(serde_json::Value::String(main_parent_id.into())),
            ts: Some(ts),
        }
    }

    /// The record's parent ID, if it carries a usable one.
    ///
    /// Strings are taken as-is and non-zero numbers in their JSON form; empty
    /// strings, zero, `null`, and other JSON types yield `None`.
    #[must_use]
    pub fn parent_id(&self) -> Option<ParentId> {
        match self.main_parent_id.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(ParentId::new(s.as_str())),
            serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => {
                Some(ParentId::new(n.to_string()))
            }
            _ => None,
        }
    }
}

/// Result of a parent ID lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// An active record carried this parent ID.
    Found(ParentId),
    /// No active record, or the winning record had no parent ID.
    NotFound,
}

/// Source of active `main_parent` records.
///
/// Implementations run one logical query for records where
/// `dType = "main_parent"`, `psd_number = <psd_number>` and `active = true`,
/// across all partitions, and return them in store order.
#[async_trait::async_trait]
pub trait ParentRecordSource: Send + Sync + fmt::Debug {
    /// Fetch every active `main_parent` record for `psd_number`.
    async fn find_active_main_parents(
        &self,
        psd_number: &str,
    ) -> Result<Vec<MainParentRecord>, StoreError>;
}

/// Pick the most recently written record.
///
/// Records without `_ts` sort before any record that has one.
#[must_use]
pub fn select_most_recent(records: &[MainParentRecord]) -> Option<&MainParentRecord> {
    records.iter().fold(None, |best, record| match best {
        Some(current) if record.ts <= current.ts => Some(current),
        _ => Some(record),
    })
}

/// Resolves parent IDs through an injected record source.
#[derive(Debug, Clone)]
pub struct ParentIdLookup {
    source: Arc<dyn ParentRecordSource>,
}

impl ParentIdLookup {
    /// Create a lookup over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn ParentRecordSource>) -> Self {
        Self { source }
    }

    /// Resolve the parent ID for `psd_number`.
    ///
    /// The PSD number is passed to the source unchanged. Store failures are
    /// returned as-is and never retried.
    pub async fn lookup_parent_id(&self, psd_number: &str) -> Result<LookupOutcome, StoreError> {
        let records = self
            .source
            .find_active_main_parents(psd_number)
            .await
            .inspect_err(|e| {
                error!(psd_number, error = %e, "error fetching parent ID");
            })?;

        let Some(record) = select_most_recent(&records) else {
            warn!(psd_number, "no document found with PSD number");
            return Ok(LookupOutcome::NotFound);
        };

        if records.len() > 1 {
            warn!(
                psd_number,
                matches = records.len(),
                ts = ?record.ts,
                "multiple active records, using the most recently written",
            );
        }

        match record.parent_id() {
            Some(parent_id) => {
                info!(psd_number, parent_id = %parent_id, "found parent ID");
                Ok(LookupOutcome::Found(parent_id))
            }
            None => {
                warn!(psd_number, "document found but it has no parent ID");
                Ok(LookupOutcome::NotFound)
            }
        }
    }
}
