//! PSD API input types.
//!
//! Inputs are built by the HTTP layer from the request query string once the
//! required parameter has been found and checked to be non-empty.

use serde::{Deserialize, Serialize};

use crate::operations::PsdApiOperation;

/// Input for the `ResolvePsd` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvePsdInput {
    /// The filename to extract the PSD number from.
    pub filename: String,
}

/// Input for the `ResolveParentId` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveParentIdInput {
    /// The PSD number to look up. Passed to the store as-is.
    pub psd_number: String,
}

/// A validated operation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsdApiInput {
    /// `GET /api/psd`
    ResolvePsd(ResolvePsdInput),
    /// `GET /api/id`
    ResolveParentId(ResolveParentIdInput),
}

impl PsdApiInput {
    /// Build the input for `op` from the value of its required parameter.
    #[must_use]
    pub fn new(op: PsdApiOperation, value: String) -> Self {
        match op {
            PsdApiOperation::ResolvePsd => Self::ResolvePsd(ResolvePsdInput { filename: value }),
            PsdApiOperation::ResolveParentId => {
                Self::ResolveParentId(ResolveParentIdInput { psd_number: value })
            }
        }
    }

    /// The operation this input belongs to.
    #[must_use]
    pub fn operation(&self) -> PsdApiOperation {
        match self {
            Self::ResolvePsd(_) => PsdApiOperation::ResolvePsd,
            Self::ResolveParentId(_) => PsdApiOperation::ResolveParentId,
        }
    }
}
