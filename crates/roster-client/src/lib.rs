//! HTTP gateway for the roster REST API.
//!
//! Implements [`roster_core::Gateway`] over `reqwest`. All translation
//! between the wire format and [`roster_core::Employee`] happens here; stores
//! never see DTOs.
//!
//! # Wiring
//!
//! ```rust,ignore
//! let conn = Connection::new(&ClientConfig::default())?;
//! let registry = Registry::new(move |f| HttpGateway::for_feature(conn.clone(), f));
//! registry.facade(Feature::Inspection).load_all().await;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod gateway;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use gateway::{Connection, HttpGateway};
