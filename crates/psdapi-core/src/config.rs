//! Cosmos DB connection configuration.

use std::env;
use std::fmt;

/// Default partition-key path of the lookup container.
pub const DEFAULT_PARTITION_KEY_PATH: &str = "/dType";

/// Cosmos DB connection settings.
///
/// Read once at startup and handed to [`CosmosStore`](crate::store::cosmos::CosmosStore).
/// Every field is optional here; missing values are reported when the store
/// is constructed, so the rest of the service can run without a store.
#[derive(Clone, Default)]
pub struct CosmosConfig {
    /// Account endpoint, e.g. `https://myaccount.documents.azure.com:443/`.
    pub endpoint: Option<String>,
    /// Base64 master key.
    pub key: Option<String>,
    /// Database name.
    pub database: Option<String>,
    /// Container name.
    pub container: Option<String>,
    /// Partition-key path, always starting with `/`.
    pub partition_key_path: String,
}

impl CosmosConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `COSMOS_DB_URL` | `endpoint` |
    /// | `COSMOS_DB_KEY` | `key` |
    /// | `COSMOS_DB_DATABASE` | `database` |
    /// | `COSMOS_DB_CONTAINER` | `container` |
    /// | `COSMOS_DB_LOG_PARTITION_KEY` | `partition_key_path` (default `/dType`) |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            endpoint: non_empty("COSMOS_DB_URL"),
            key: non_empty("COSMOS_DB_KEY"),
            database: non_empty("COSMOS_DB_DATABASE"),
            container: non_empty("COSMOS_DB_CONTAINER"),
            partition_key_path: normalize_partition_path(
                &non_empty("COSMOS_DB_LOG_PARTITION_KEY")
                    .unwrap_or_else(|| DEFAULT_PARTITION_KEY_PATH.to_owned()),
            ),
        }
    }
}

impl fmt::Debug for CosmosConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmosConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("container", &self.container)
            .field("partition_key_path", &self.partition_key_path)
            .finish()
    }
}

/// Prefix a partition-key path with `/` when it lacks one.
#[must_use]
pub fn normalize_partition_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}
