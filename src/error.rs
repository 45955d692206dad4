//! Unified error handling
//!
//! Domain modules define their own thiserror enums ([`FetchError`],
//! [`LayoutError`], [`RenderError`]); this module wraps them in a
//! single [`Error`] type for use across module boundaries, classified
//! by [`ErrorCategory`] for handling strategies.

use std::io;
use thiserror::Error;

pub use crate::api::FetchError;
pub use crate::layout::LayoutError;
pub use crate::render::RenderError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Backend API and transport errors
    Network,
    /// Layout registry and selection errors
    Layout,
    /// Template and rendering errors
    Rendering,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the sentinel-digest crate
#[derive(Error, Debug)]
pub enum Error {
    /// Content API errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Layout registry errors
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Template rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Check if this error is recoverable (worth retrying)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Layout(_) | Self::Render(_) | Self::Json(_) | Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(_) => ErrorCategory::Network,
            Self::Layout(_) => ErrorCategory::Layout,
            Self::Render(_) => ErrorCategory::Rendering,
            Self::Config(_) => ErrorCategory::Config,
            Self::Io(_) | Self::Json(_) | Self::Other { .. } => ErrorCategory::Other,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let fetch = Error::Fetch(FetchError::MaxRetriesExceeded);
        assert_eq!(fetch.category(), ErrorCategory::Network);

        let layout = Error::Layout(LayoutError::RegistryTooSmall(1));
        assert_eq!(layout.category(), ErrorCategory::Layout);

        let config = Error::config("bad base url");
        assert_eq!(config.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::Fetch(FetchError::MaxRetriesExceeded).is_recoverable());
        assert!(!Error::Fetch(FetchError::NotFound("/x".into())).is_recoverable());
        assert!(!Error::Layout(LayoutError::RegistryTooSmall(0)).is_recoverable());
    }

    #[test]
    fn test_error_conversion() {
        let unified: Error = FetchError::MaxRetriesExceeded.into();
        assert!(matches!(unified, Error::Fetch(_)));

        let unified: Error = LayoutError::DuplicateName("grid".into()).into();
        assert!(matches!(unified, Error::Layout(_)));
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("something went sideways");
        assert_eq!(err.category(), ErrorCategory::Other);
        assert!(!err.is_recoverable());
    }
}
