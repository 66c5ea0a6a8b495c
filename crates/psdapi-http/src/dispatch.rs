//! PSD API handler trait and operation dispatch.

use std::future::Future;
use std::pin::Pin;

use psdapi_model::error::PsdApiError;
use psdapi_model::input::PsdApiInput;

use crate::body::PsdApiResponseBody;

/// Boxed future returned by [`PsdApiHandler::handle_operation`].
pub type HandlerFuture =
    Pin<Box<dyn Future<Output = Result<http::Response<PsdApiResponseBody>, PsdApiError>> + Send>>;

/// Trait that the PSD API business logic must implement.
///
/// The handler receives a validated operation input and returns a complete
/// HTTP response. Domain outcomes that have their own status (such as a
/// lookup that found nothing) are returned as `Ok` responses; `Err` is
/// rendered by the service through
/// [`error_to_response`](crate::response::error_to_response).
pub trait PsdApiHandler: Send + Sync + 'static {
    /// Handle a PSD API operation and produce an HTTP response.
    fn handle_operation(&self, input: PsdApiInput) -> HandlerFuture;
}

/// Dispatch a PSD API operation to the handler.
pub async fn dispatch_operation<H: PsdApiHandler>(
    handler: &H,
    input: PsdApiInput,
) -> Result<http::Response<PsdApiResponseBody>, PsdApiError> {
    tracing::debug!(operation = %input.operation(), "dispatching PSD API operation");
    handler.handle_operation(input).await
}
