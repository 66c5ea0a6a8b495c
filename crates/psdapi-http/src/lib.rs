//! HTTP service layer for the PSD API.
//!
//! - **Router**: maps `GET /api/psd` and `GET /api/id` to operations
//! - **Request**: decodes the query string and checks the required parameter
//! - **Handler trait**: the boundary between HTTP and business logic
//! - **Service**: hyper `Service` implementation, health probe, common headers
//! - **Response helpers**: JSON success/error response formatting

pub mod body;
pub mod dispatch;
pub mod request;
pub mod response;
pub mod router;
pub mod service;

pub use body::PsdApiResponseBody;
pub use dispatch::{HandlerFuture, PsdApiHandler};
pub use service::{PsdApiHttpConfig, PsdApiHttpService};
