//! Connection settings for the roster REST API.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String { "http://localhost:8080".to_owned() }

fn default_timeout_secs() -> u64 { 30 }

/// Where the API lives and how to authenticate against it.
///
/// Every field has a default, so an empty config file or environment is
/// valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  /// Basic-auth username; auth is skipped when empty.
  #[serde(default)]
  pub username:     String,
  #[serde(default)]
  pub password:     String,
  /// Per-request timeout. Expiry surfaces as a network failure.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url:     default_base_url(),
      username:     String::new(),
      password:     String::new(),
      timeout_secs: default_timeout_secs(),
    }
  }
}
