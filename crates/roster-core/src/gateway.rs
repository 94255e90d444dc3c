//! The `Gateway` trait: the remote collaborator behind a collection store.
//!
//! Implemented by transport backends (e.g. `roster-client`'s HTTP gateway).
//! Wire-format translation happens entirely inside the implementation; stores
//! only ever see domain records.

use std::future::Future;

use crate::{
  error::GatewayError,
  record::{Record, Validate},
};

/// Abstraction over the remote source of truth for one feature's records.
///
/// All methods return `Send` futures so a store can be driven from a
/// multi-threaded tokio runtime.
pub trait Gateway: Send + Sync + 'static {
  type Record: Record;
  /// Input to [`Gateway::create`].
  type Draft: Validate + Send + Sync;
  /// Input to [`Gateway::update`].
  type Patch: Send + Sync;

  /// Fetch the full collection.
  fn get_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Self::Record>, GatewayError>> + Send + '_;

  /// Fetch a single record by key.
  fn get_by_id<'a>(
    &'a self,
    key: &'a <Self::Record as Record>::Key,
  ) -> impl Future<Output = Result<Self::Record, GatewayError>> + Send + 'a;

  /// Create a record. The returned record carries the server-assigned key and
  /// timestamps.
  fn create<'a>(
    &'a self,
    draft: &'a Self::Draft,
  ) -> impl Future<Output = Result<Self::Record, GatewayError>> + Send + 'a;

  /// Update a record and return the server's view of it.
  fn update<'a>(
    &'a self,
    key: &'a <Self::Record as Record>::Key,
    patch: &'a Self::Patch,
  ) -> impl Future<Output = Result<Self::Record, GatewayError>> + Send + 'a;

  /// Delete a record.
  fn delete<'a>(
    &'a self,
    key: &'a <Self::Record as Record>::Key,
  ) -> impl Future<Output = Result<(), GatewayError>> + Send + 'a;
}
