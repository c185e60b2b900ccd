//! Errors produced by [`crate::FactTotemClient`].
//!
//! Every failure is returned to the caller of the operation that hit it.
//! Nothing is retried and nothing is swallowed; the contract does not separate
//! transient from permanent failures, so neither does this type.

use fact_totem_protocol::Action;
use thiserror::Error;

/// Failure of a single fact totem call, or of setting a client up.
#[derive(Debug, Error)]
pub enum FactTotemError {
    /// The client configuration is invalid (bad URL, missing variable,
    /// token that cannot be sent as a header).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The outgoing request could not be serialised.
    #[error("{action} failed: could not encode request: {source}")]
    Encode {
        action: Action,
        source: serde_json::Error,
    },

    /// The HTTPS transport could not be built (e.g. the system trust store
    /// could not be read).
    #[error("Could not build HTTPS transport: {source}")]
    TransportInit { source: reqwest::Error },

    /// The runtime behind [`crate::BlockingClient`] could not be started.
    #[error("Could not start blocking runtime: {source}")]
    Runtime { source: std::io::Error },

    /// The request did not complete: DNS, TLS, connection or timeout failure.
    #[error("{action} failed: {source}")]
    Transport {
        action: Action,
        source: reqwest::Error,
    },

    /// The service answered with a non-success status. `body` is verbatim.
    #[error("{action} failed: {status} {reason}\n{body}")]
    Status {
        action: Action,
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase for `status`, empty if there is none.
        reason: String,
        /// Raw response body.
        body: String,
    },

    /// The success response body did not match the action's response shape.
    #[error("{action} failed: could not decode response: {source}")]
    Decode {
        action: Action,
        source: serde_json::Error,
    },
}

impl FactTotemError {
    /// HTTP status code, if the service answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The action that failed, if the error came from a call.
    pub fn action(&self) -> Option<Action> {
        match self {
            Self::Encode { action, .. }
            | Self::Transport { action, .. }
            | Self::Status { action, .. }
            | Self::Decode { action, .. } => Some(*action),
            Self::Configuration { .. } | Self::TransportInit { .. } | Self::Runtime { .. } => None,
        }
    }

    /// Returns `true` for timeouts raised by the configured request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

/// Result type for fact totem calls.
pub type Result<T> = std::result::Result<T, FactTotemError>;
