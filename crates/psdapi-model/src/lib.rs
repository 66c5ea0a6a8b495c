//! Model types for the PSD API.
//!
//! Hand-written serde types for the two lookup operations, the JSON response
//! envelopes they produce, and the error type shared by the HTTP layer and
//! the business logic.
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)]

pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use error::{PsdApiError, PsdApiErrorCode};
pub use input::PsdApiInput;
pub use operations::PsdApiOperation;
pub use types::{ParentId, PsdNumber};
