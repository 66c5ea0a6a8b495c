//! PSD API error types.
//!
//! Every error carries the HTTP status it maps to. The JSON body shape depends
//! on the code: parameter validation failures use the `detail` list format,
//! routing failures a bare `detail` string, and everything else the
//! `{"status": "error", "message": ...}` envelope.

use std::fmt;

/// Well-known PSD API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum PsdApiErrorCode {
    /// A required query parameter is missing or empty.
    MissingParameter,
    /// The filename does not match the expected pattern.
    InvalidFilename,
    /// No route matches the request path.
    RouteNotFound,
    /// The route exists but does not accept the request method.
    MethodNotAllowed,
    /// The parent ID lookup failed in the document store.
    LookupFailed,
    /// Any other failure.
    #[default]
    InternalError,
}

impl PsdApiErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingParameter => "MissingParameter",
            Self::InvalidFilename => "InvalidFilename",
            Self::RouteNotFound => "RouteNotFound",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::LookupFailed => "LookupFailed",
            Self::InternalError => "InternalError",
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::MissingParameter => http::StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidFilename => http::StatusCode::BAD_REQUEST,
            Self::RouteNotFound => http::StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::LookupFailed | Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for PsdApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A PSD API error response.
#[derive(Debug)]
pub struct PsdApiError {
    /// The error code.
    pub code: PsdApiErrorCode,
    /// The message returned to the caller.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The query parameter at fault, for parameter validation errors.
    pub parameter: Option<String>,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for PsdApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PsdApiError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for PsdApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl PsdApiError {
    /// Create a new `PsdApiError` with a custom message.
    #[must_use]
    pub fn with_message(code: PsdApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            parameter: None,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -- Convenience constructors --

    /// A required query parameter is missing or empty.
    #[must_use]
    pub fn missing_parameter(name: &str) -> Self {
        let mut err = Self::with_message(PsdApiErrorCode::MissingParameter, "Field required");
        err.parameter = Some(name.to_owned());
        err
    }

    /// The filename failed pattern validation.
    #[must_use]
    pub fn invalid_filename(message: impl Into<String>) -> Self {
        Self::with_message(PsdApiErrorCode::InvalidFilename, message)
    }

    /// No route matches the request path.
    #[must_use]
    pub fn route_not_found() -> Self {
        Self::with_message(PsdApiErrorCode::RouteNotFound, "Not Found")
    }

    /// The route does not accept the request method.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::with_message(PsdApiErrorCode::MethodNotAllowed, "Method Not Allowed")
    }

    /// The parent ID lookup failed; `detail` is exposed to the caller.
    #[must_use]
    pub fn lookup_failed(detail: impl fmt::Display) -> Self {
        Self::with_message(
            PsdApiErrorCode::LookupFailed,
            format!("Failed to fetch parent ID: {detail}"),
        )
    }

    /// Unexpected failure; the message is generic so nothing internal leaks.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::with_message(
            PsdApiErrorCode::InternalError,
            "An unexpected error occurred",
        )
    }
}
