use std::fmt::Debug;

use crate::objects::ErrorDetail;

/// Errors that can occur when building or executing an objects API request.
///
/// Validation failures are raised synchronously, before any network I/O.
/// Every other variant comes from request encoding, the transport, or the service itself.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum PubNubError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when network requests fail, timeouts occur, or connection issues arise.
    ReqwestError(reqwest::Error),

    /// URL parsing error when constructing request URLs.
    UrlError(url::ParseError),

    /// JSON serialization error while encoding a request body.
    JsonValueError(serde_json::Error),

    /// Required request parameters are missing or invalid.
    ///
    /// Raised before any network call is attempted.
    #[display("Validation error: {message}")]
    #[from(skip)]
    Validation {
        /// What is missing, e.g. `"uuid missing"`.
        message: String,
    },

    /// The scheme, origin and port do not form a usable base URL.
    #[display("Invalid origin: {error}")]
    #[from(skip)]
    InvalidOrigin {
        /// Description of why the origin is invalid.
        error: String,
    },

    /// The system clock cannot produce the Unix timestamp a signed request needs.
    #[display("Invalid timestamp: {error}")]
    #[from(skip)]
    InvalidTimestamp {
        /// Why the clock reading was rejected.
        error: String,
    },

    /// Path template contains unresolved parameters.
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path template that couldn't be resolved.
        path: String,
        /// List of missing parameter names.
        missings: Vec<String>,
    },

    /// JSON response deserialization failure.
    #[display("Failed to deserialize JSON at '{path}': {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// The JSON path where deserialization failed.
        path: String,
        /// The underlying JSON parsing error.
        error: serde_json::Error,
        /// The response body that failed to parse.
        body: String,
    },

    /// The service answered with its error envelope.
    #[display("Server error ({status_code}): {message}")]
    #[from(skip)]
    Server {
        /// HTTP status code of the response.
        status_code: u16,
        /// Error message reported by the service.
        message: String,
        /// Service component that reported the error, e.g. `"objects"`.
        service: Option<String>,
        /// Per-field error details.
        details: Vec<ErrorDetail>,
    },

    /// Non-2xx status code without a parseable error envelope.
    #[display("Unexpected status code {status_code}: {body}")]
    #[from(skip)]
    UnexpectedStatusCode {
        /// The unexpected HTTP status code received.
        status_code: u16,
        /// The response body for debugging.
        body: String,
    },
}

impl PubNubError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` when the request was rejected before reaching the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
