//! Error types exposed by the catalog layer.

use thiserror::Error;

/// Errors surfaced while configuring or talking to the catalog service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A URL could not be parsed or joined onto the API base.
    #[error("catalog URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Networking failed or timed out while calling the catalog.
    #[error("network error talking to the catalog: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The catalog answered with a non-success status.
    #[error("catalog API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the catalog.
        status: u16,
        /// Truncated response body describing the failure.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("catalog response could not be decoded: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
