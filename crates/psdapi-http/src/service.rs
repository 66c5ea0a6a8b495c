//! PSD API HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use psdapi_model::output::HealthResponse;

use crate::body::PsdApiResponseBody;
use crate::dispatch::{PsdApiHandler, dispatch_operation};
use crate::request::extract_input;
use crate::response::{CONTENT_TYPE, error_to_response, serialize_response};
use crate::router::{is_health_check, resolve_operation};

/// Name reported by the health probe and the `server` header.
pub const SERVICE_NAME: &str = "psdapi";

/// Configuration for the PSD API HTTP service.
#[derive(Debug, Clone)]
pub struct PsdApiHttpConfig {
    /// Version reported by the health probe.
    pub version: String,
}

impl Default for PsdApiHttpConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Hyper `Service` implementation for the PSD API.
///
/// Wraps a [`PsdApiHandler`] and routes incoming requests to it. The request
/// body is never read, so the service accepts any body type.
#[derive(Debug)]
pub struct PsdApiHttpService<H: PsdApiHandler> {
    handler: Arc<H>,
    config: Arc<PsdApiHttpConfig>,
}

impl<H: PsdApiHandler> PsdApiHttpService<H> {
    /// Create a new `PsdApiHttpService`.
    pub fn new(handler: Arc<H>, config: PsdApiHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
        }
    }
}

impl<H: PsdApiHandler> Clone for PsdApiHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H, B> hyper::service::Service<http::Request<B>> for PsdApiHttpService<H>
where
    H: PsdApiHandler,
    B: Send + 'static,
{
    type Response = http::Response<PsdApiResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let config = Arc::clone(&self.config);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let (parts, _body) = req.into_parts();
            let response = process_request(&parts, handler.as_ref(), &config).await;
            tracing::debug!(
                method = %parts.method,
                path = %parts.uri.path(),
                status = response.status().as_u16(),
                request_id = %request_id,
                "request completed",
            );
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a single PSD API request through the full pipeline.
async fn process_request<H: PsdApiHandler>(
    parts: &http::request::Parts,
    handler: &H,
    config: &PsdApiHttpConfig,
) -> http::Response<PsdApiResponseBody> {
    let path = parts.uri.path();

    // 1. Health probes are answered here, never by the handler.
    if is_health_check(&parts.method, path) {
        return health_check_response(config);
    }

    // 2. Route: method and path select the operation.
    let op = match resolve_operation(&parts.method, path) {
        Ok(op) => op,
        Err(err) => return error_to_response(&err),
    };

    // 3. Validate the required query parameter.
    let input = match extract_input(op, parts.uri.query()) {
        Ok(input) => input,
        Err(err) => {
            tracing::warn!(
                operation = %op,
                parameter = op.required_parameter(),
                "missing required query parameter",
            );
            return error_to_response(&err);
        }
    };

    // 4. Dispatch to handler.
    match dispatch_operation(handler, input).await {
        Ok(response) => response,
        Err(err) => error_to_response(&err),
    }
}

/// Produce the health check response.
fn health_check_response(config: &PsdApiHttpConfig) -> http::Response<PsdApiResponseBody> {
    let health = HealthResponse {
        status: "running".to_owned(),
        service: SERVICE_NAME.to_owned(),
        version: config.version.clone(),
    };
    serialize_response(http::StatusCode::OK, &health)
        .expect("health response serialization cannot fail")
}

/// Add common response headers to every PSD API response.
fn add_common_headers(
    mut response: http::Response<PsdApiResponseBody>,
    request_id: &str,
) -> http::Response<PsdApiResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(hv);
    }

    headers
        .entry("content-type")
        .or_insert(http::HeaderValue::from_static(CONTENT_TYPE));

    headers.insert("server", http::HeaderValue::from_static(SERVICE_NAME));

    response
}
