//! PSD API operation enum.

use std::fmt;

/// All supported PSD API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PsdApiOperation {
    /// Extract the PSD number from a filename (`GET /api/psd`).
    ResolvePsd,
    /// Look up the parent ID for a PSD number (`GET /api/id`).
    ResolveParentId,
}

impl PsdApiOperation {
    /// All operations, in routing order.
    pub const ALL: [Self; 2] = [Self::ResolvePsd, Self::ResolveParentId];

    /// Returns the operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResolvePsd => "ResolvePsd",
            Self::ResolveParentId => "ResolveParentId",
        }
    }

    /// Returns the request path this operation is served on.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::ResolvePsd => "/api/psd",
            Self::ResolveParentId => "/api/id",
        }
    }

    /// Returns the name of the required query parameter.
    #[must_use]
    pub fn required_parameter(&self) -> &'static str {
        match self {
            Self::ResolvePsd => "filename",
            Self::ResolveParentId => "psd_number",
        }
    }

    /// Find the operation served on `path`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.path() == path)
    }
}

impl fmt::Display for PsdApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
