//! Error types for `roster-core`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure reported by a [`Gateway`](crate::gateway::Gateway).
///
/// Collection stores never propagate these; they record them as a
/// [`Failure`](crate::store::Failure) in state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
  /// The request never produced a response (connect, timeout, TLS, ...).
  #[error("network error: {0}")]
  Transport(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// Any other non-success response.
  #[error("server returned {status}: {message}")]
  Status { status: u16, message: String },

  /// The response body did not match the expected shape.
  #[error("malformed response: {0}")]
  Decode(String),

  /// The request was rejected before it was sent.
  #[error("invalid request: {0}")]
  Invalid(String),
}

impl GatewayError {
  pub fn kind(&self) -> FailureKind {
    match self {
      Self::Transport(_) => FailureKind::Network,
      Self::NotFound(_) => FailureKind::NotFound,
      Self::Status { .. } => FailureKind::Server,
      Self::Decode(_) => FailureKind::Server,
      Self::Invalid(_) => FailureKind::Validation,
    }
  }
}

/// Coarse classification of a failure, for callers that want to branch on
/// more than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
  Network,
  NotFound,
  Server,
  Validation,
}

pub type Result<T, E = GatewayError> = std::result::Result<T, E>;
