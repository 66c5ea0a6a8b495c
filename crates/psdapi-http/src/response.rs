//! PSD API response serialization and error formatting.

use serde::Serialize;

use psdapi_model::error::{PsdApiError, PsdApiErrorCode};
use psdapi_model::output::{DetailResponse, MessageResponse, ValidationErrorResponse};

use crate::body::PsdApiResponseBody;

/// Content type for all PSD API responses.
pub const CONTENT_TYPE: &str = "application/json";

/// Serialize a `PsdApiError` into its JSON response body.
///
/// ```json
/// {"status": "error", "message": "Failed to fetch parent ID: ..."}
/// ```
///
/// Parameter validation failures use the `detail` list format and routing
/// failures a bare `{"detail": "Not Found"}`.
#[must_use]
pub fn error_to_json(error: &PsdApiError) -> Vec<u8> {
    let json = match error.code {
        PsdApiErrorCode::MissingParameter => {
            let name = error.parameter.as_deref().unwrap_or_default();
            serde_json::to_vec(&ValidationErrorResponse::missing_query_parameter(
                name,
                error.message.as_str(),
            ))
        }
        PsdApiErrorCode::RouteNotFound | PsdApiErrorCode::MethodNotAllowed => {
            serde_json::to_vec(&DetailResponse {
                detail: error.message.clone(),
            })
        }
        _ => serde_json::to_vec(&MessageResponse::error(error.message.as_str())),
    };
    json.expect("JSON serialization of error cannot fail")
}

/// Convert a `PsdApiError` into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &PsdApiError) -> http::Response<PsdApiResponseBody> {
    let json = error_to_json(error);
    let mut builder = http::Response::builder()
        .status(error.status_code)
        .header("content-type", CONTENT_TYPE);

    if error.code == PsdApiErrorCode::MethodNotAllowed {
        builder = builder.header("allow", "GET");
    }

    builder
        .body(PsdApiResponseBody::from_json(json))
        .expect("valid error response")
}

/// Build a response from already-serialized JSON bytes.
#[must_use]
pub fn json_response(
    status: http::StatusCode,
    json: Vec<u8>,
) -> http::Response<PsdApiResponseBody> {
    http::Response::builder()
        .status(status)
        .header("content-type", CONTENT_TYPE)
        .body(PsdApiResponseBody::from_json(json))
        .expect("valid JSON response")
}

/// Serialize `value` and build a response with the given status.
pub fn serialize_response<T: Serialize>(
    status: http::StatusCode,
    value: &T,
) -> Result<http::Response<PsdApiResponseBody>, serde_json::Error> {
    let json = serde_json::to_vec(value)?;
    Ok(json_response(status, json))
}
