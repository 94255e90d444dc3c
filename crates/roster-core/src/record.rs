//! The two traits a collection store is generic over.

use std::{fmt::Display, hash::Hash};

/// An identity-bearing value held in a collection store.
pub trait Record: Clone + Send + Sync + 'static {
  type Key: Clone + Eq + Hash + Display + Send + Sync + 'static;

  /// The stable unique key. Must never change for the lifetime of a record.
  fn key(&self) -> &Self::Key;
}

/// Declarative filter criteria over records of type `R`.
///
/// Criteria hold no derived results; a store recomputes its filtered view
/// from the current criteria and the current collection.
pub trait Criteria<R>: Clone + Default + Send + Sync + 'static {
  /// Partial criteria accepted by
  /// [`CollectionStore::set_filters`](crate::store::CollectionStore::set_filters).
  type Patch;

  /// Shallow merge: every field present in `patch` replaces the current
  /// value, every absent field keeps it.
  fn merge(&mut self, patch: Self::Patch);

  /// Whether `record` satisfies every constraint that is present.
  fn matches(&self, record: &R) -> bool;

  /// `true` when no dimension is constrained.
  fn is_unconstrained(&self) -> bool;
}

/// Client-side checks run on a create payload before any request is issued.
pub trait Validate {
  fn validate(&self) -> Result<(), crate::error::GatewayError>;
}
