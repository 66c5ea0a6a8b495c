//! PSD API output types and JSON response envelopes.
//!
//! Successful responses wrap their payload as
//! `{"status": "success", "data": {...}}`; message responses (errors and the
//! lookup not-found result) are `{"status": "...", "message": "..."}`.

use serde::{Deserialize, Serialize};

use crate::types::{ParentId, PsdNumber};

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// The `status` field of a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The operation produced a result.
    Success,
    /// The operation failed.
    Error,
    /// The lookup completed but nothing matched.
    NotFound,
}

/// `{"status": "success", "data": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub status: ResponseStatus,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    /// Wrap `data` in a success envelope.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data,
        }
    }
}

/// `{"status": ..., "message": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl MessageResponse {
    /// An error envelope.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }

    /// A not-found envelope.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::NotFound,
            message: message.into(),
        }
    }
}

/// One entry of a parameter validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    pub input: Option<String>,
}

/// `{"detail": [...]}`, returned with 422 when a required parameter is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub detail: Vec<ValidationErrorDetail>,
}

impl ValidationErrorResponse {
    /// Report a missing query parameter.
    #[must_use]
    pub fn missing_query_parameter(name: &str, msg: impl Into<String>) -> Self {
        Self {
            detail: vec![ValidationErrorDetail {
                kind: "missing".to_owned(),
                loc: vec!["query".to_owned(), name.to_owned()],
                msg: msg.into(),
                input: None,
            }],
        }
    }
}

/// `{"detail": "..."}`, returned for routing failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Health probe payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

// ---------------------------------------------------------------------------
// Operation outputs
// ---------------------------------------------------------------------------

/// Output for the `ResolvePsd` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvePsdOutput {
    /// The filename as received.
    pub filename: String,
    /// The PSD number extracted from it.
    pub psd_number: PsdNumber,
}

/// Output for the `ResolveParentId` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveParentIdOutput {
    /// The PSD number as received.
    pub psd_number: String,
    /// The parent ID of the winning active record.
    pub parent_id: ParentId,
}
