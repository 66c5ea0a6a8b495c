//! PSD API request router.
//!
//! Both operations are `GET` requests addressed purely by path:
//!
//! ```text
//! GET /api/psd?filename=LegalEntityMapping_SFDC-PSD-076858_1767096012389.csv
//! GET /api/id?psd_number=SFDC-PSD-076858
//! ```

use psdapi_model::error::PsdApiError;
use psdapi_model::operations::PsdApiOperation;

/// Resolve a PSD API operation from the request method and path.
///
/// A single trailing slash is ignored. Unknown paths yield a route-not-found
/// error; known paths requested with anything but `GET` yield
/// method-not-allowed.
pub fn resolve_operation(
    method: &http::Method,
    path: &str,
) -> Result<PsdApiOperation, PsdApiError> {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };

    let op = PsdApiOperation::from_path(path).ok_or_else(PsdApiError::route_not_found)?;

    if *method != http::Method::GET {
        return Err(PsdApiError::method_not_allowed());
    }

    Ok(op)
}

/// Check if the request is a health check probe.
#[must_use]
pub fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && (path == "/health" || path == "/_health")
}
