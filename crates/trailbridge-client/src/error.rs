//! Error types for the control-plane client.

use thiserror::Error;

/// Errors that can occur talking to the audit-trail control plane.
///
/// The CLI consumes every variant through the same reporting path; the
/// taxonomy exists for logging and tests.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration needed to reach the control plane was missing.
    #[error("configuration error: {0}")]
    Config(#[from] trailbridge_core::ConfigError),

    /// The resolved endpoint is not a usable base URL.
    #[error("invalid control-plane endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The request could not be sent or the response not read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The named trail does not exist.
    #[error("trail '{0}' not found")]
    TrailNotFound(String),

    /// The control plane rejected the credentials.
    #[error("access denied by the control plane: {0}")]
    AccessDenied(String),

    /// The control plane rejected the request.
    #[error("control plane returned status {status}: {message}")]
    Rejected { status: u16, message: String },
}
