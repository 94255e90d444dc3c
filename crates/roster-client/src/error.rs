//! Error type for `roster-client`.

use thiserror::Error;

/// Failure to set up a connection. Request failures are reported as
/// [`roster_core::GatewayError`] instead.
#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid base url {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("failed to build HTTP client: {0}")]
  Http(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
