//! PSD API core business logic.
//!
//! - [`filename`]: extracts the PSD number from a mapping-sheet filename
//! - [`lookup`]: resolves a parent ID for a PSD number through a
//!   [`ParentRecordSource`](lookup::ParentRecordSource)
//! - [`store`]: record sources (Cosmos DB over REST, in-memory)
//! - [`handler`]: bridges the HTTP layer to the two operations
#![allow(clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod filename;
pub mod handler;
pub mod lookup;
pub mod store;

pub use config::CosmosConfig;
pub use error::{FilenameError, StoreError};
pub use filename::parse_psd;
pub use handler::PsdApiCoreHandler;
pub use lookup::{LookupOutcome, MainParentRecord, ParentIdLookup, ParentRecordSource};
