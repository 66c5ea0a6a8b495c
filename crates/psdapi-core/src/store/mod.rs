//! Record sources backing the parent ID lookup.

pub mod auth;
pub mod cosmos;
pub mod memory;

use crate::error::StoreError;
use crate::lookup::{MainParentRecord, ParentRecordSource};

/// Stand-in source used when the store could not be configured.
///
/// Every lookup fails with the configuration error captured at startup, so
/// the service keeps serving requests that do not need the store.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    /// Create a source that always fails with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl ParentRecordSource for UnavailableStore {
    async fn find_active_main_parents(
        &self,
        _psd_number: &str,
    ) -> Result<Vec<MainParentRecord>, StoreError> {
        Err(StoreError::config(self.reason.clone()))
    }
}
