//! PSD API handler implementation bridging HTTP to business logic.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};

use psdapi_http::body::PsdApiResponseBody;
use psdapi_http::dispatch::{HandlerFuture, PsdApiHandler};
use psdapi_http::response::serialize_response;
use psdapi_model::error::PsdApiError;
use psdapi_model::input::{PsdApiInput, ResolveParentIdInput, ResolvePsdInput};
use psdapi_model::output::{
    MessageResponse, ResolveParentIdOutput, ResolvePsdOutput, SuccessResponse,
};

use crate::filename::parse_psd;
use crate::lookup::{LookupOutcome, ParentIdLookup};

/// Handler that bridges the HTTP layer to filename parsing and the lookup.
#[derive(Debug, Clone)]
pub struct PsdApiCoreHandler {
    lookup: Arc<ParentIdLookup>,
}

impl PsdApiCoreHandler {
    /// Create a new handler over a parent ID lookup.
    #[must_use]
    pub fn new(lookup: Arc<ParentIdLookup>) -> Self {
        Self { lookup }
    }
}

impl PsdApiHandler for PsdApiCoreHandler {
    fn handle_operation(&self, input: PsdApiInput) -> HandlerFuture {
        let lookup = Arc::clone(&self.lookup);
        Box::pin(async move {
            match input {
                PsdApiInput::ResolvePsd(input) => resolve_psd(&input),
                PsdApiInput::ResolveParentId(input) => {
                    resolve_parent_id(lookup.as_ref(), input).await
                }
            }
        })
    }
}

fn resolve_psd(
    input: &ResolvePsdInput,
) -> Result<http::Response<PsdApiResponseBody>, PsdApiError> {
    let psd_number = parse_psd(&input.filename).map_err(|e| {
        warn!(filename = %input.filename, "invalid filename pattern");
        PsdApiError::invalid_filename(e.to_string()).with_source(e)
    })?;

    respond(
        http::StatusCode::OK,
        &SuccessResponse::new(ResolvePsdOutput {
            filename: input.filename.clone(),
            psd_number,
        }),
    )
}

async fn resolve_parent_id(
    lookup: &ParentIdLookup,
    input: ResolveParentIdInput,
) -> Result<http::Response<PsdApiResponseBody>, PsdApiError> {
    let outcome = lookup
        .lookup_parent_id(&input.psd_number)
        .await
        .map_err(|e| PsdApiError::lookup_failed(&e).with_source(e))?;

    match outcome {
        LookupOutcome::Found(parent_id) => respond(
            http::StatusCode::OK,
            &SuccessResponse::new(ResolveParentIdOutput {
                psd_number: input.psd_number,
                parent_id,
            }),
        ),
        LookupOutcome::NotFound => respond(
            http::StatusCode::NOT_FOUND,
            &MessageResponse::not_found(format!(
                "No parent ID found for PSD: {}",
                input.psd_number
            )),
        ),
    }
}

/// Serialize a response envelope.
fn respond<T: Serialize>(
    status: http::StatusCode,
    value: &T,
) -> Result<http::Response<PsdApiResponseBody>, PsdApiError> {
    serialize_response(status, value).map_err(|e| {
        error!(error = %e, "failed to serialize response");
        PsdApiError::internal_error().with_source(e)
    })
}
