//! Error types for the cinefind plugin.
//!
//! Two families live here. [`CinefindError`] covers failures of the plugin
//! itself (configuration, themes, building or decoding catalog traffic) and is
//! propagated with `?` through the [`Result`] alias. [`FetchError`] is the
//! outcome of a single catalog lookup; it is never propagated, it is stored as
//! the `failed` state of the key that produced it.

use thiserror::Error;

/// The main error type for cinefind operations.
///
/// # Examples
///
/// ```
/// use cinefind::domain::CinefindError;
///
/// fn validate_token(token: Option<&str>) -> Result<(), CinefindError> {
///     token
///         .map(|_| ())
///         .ok_or_else(|| CinefindError::Config("api_token is not set".to_string()))
/// }
///
/// assert!(validate_token(None).is_err());
/// ```
#[derive(Debug, Error)]
pub enum CinefindError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A catalog request could not be built (bad base URL, unusable key).
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A host response could not be matched back to the request that caused it.
    ///
    /// Raised when the request context map is missing the key or ticket
    /// fields, which means the response cannot be attributed to any key.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// A specialized `Result` type for cinefind operations.
pub type Result<T> = std::result::Result<T, CinefindError>;

/// Failure of one catalog lookup.
///
/// Stored in the result cache as the terminal `failed` state of a key and
/// surfaced to the presentation layer only through `is_error()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The catalog answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code returned by the catalog.
        status: u16,
        /// Catalog-provided status message, or the raw body when absent.
        message: String,
    },

    /// The catalog answered 2xx but the body was not a search page.
    #[error("malformed catalog response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether the failure looks like rejected credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_status() {
        let err = FetchError::Http {
            status: 404,
            message: "The resource you requested could not be found.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 404: The resource you requested could not be found."
        );
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unauthorized_statuses_are_detected() {
        let err = FetchError::Http {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!FetchError::Network("dns".to_string()).is_unauthorized());
    }
}
