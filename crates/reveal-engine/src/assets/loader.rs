use crate::api::config::PageConfig;
use crate::api::error::LoadError;

/// A single static-file request. No headers, query parameters or auth.
///
/// Always fetched with `cache: "no-store"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub path: String,
}

impl AssetRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The SVG request for a page.
    pub fn svg(config: &PageConfig) -> Self {
        Self::new(config.svg_path.clone())
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: u16,
    pub body: String,
}

impl AssetResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// The body text, or a `LoadError` carrying the status.
    pub fn into_text(self) -> Result<String, LoadError> {
        if !self.is_ok() {
            return Err(LoadError {
                status: self.status,
            });
        }
        Ok(self.body)
    }
}
