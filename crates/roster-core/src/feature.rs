//! Organizational features and the per-feature store registry.
//!
//! Every feature gets exactly one store for the lifetime of the process. It
//! is built the first time it is asked for and handed out by `Arc`
//! thereafter, so views can come and go without losing state.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::{
  facade::EmployeeFacade,
  gateway::Gateway,
  model::Employee,
  store::EmployeeStore,
};

/// A domain that manages its own employee list.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  EnumCount,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Feature {
  Inspection,
  Tawjeeh,
}

impl Feature {
  /// REST collection path for this feature's employees.
  pub fn base_path(self) -> &'static str {
    match self {
      Self::Inspection => "/api/inspection/employees",
      Self::Tawjeeh => "/api/tawjeeh/employees",
    }
  }

  fn index(self) -> usize { self as usize }
}

/// Lazily-constructed, process-wide employee stores, one per [`Feature`].
pub struct Registry<G, F>
where
  G: Gateway<Record = Employee>,
  F: Fn(Feature) -> G + Send + Sync,
{
  factory: F,
  stores:  [OnceLock<Arc<EmployeeStore<G>>>; Feature::COUNT],
}

impl<G, F> Registry<G, F>
where
  G: Gateway<Record = Employee>,
  F: Fn(Feature) -> G + Send + Sync,
{
  /// `factory` builds the gateway for a feature; it runs at most once per
  /// feature.
  pub fn new(factory: F) -> Self {
    Self {
      factory,
      stores: std::array::from_fn(|_| OnceLock::new()),
    }
  }

  pub fn store(&self, feature: Feature) -> Arc<EmployeeStore<G>> {
    self.stores[feature.index()]
      .get_or_init(|| {
        tracing::debug!(%feature, "initialising store");
        Arc::new(EmployeeStore::new((self.factory)(feature)))
      })
      .clone()
  }

  pub fn facade(&self, feature: Feature) -> EmployeeFacade<G> {
    EmployeeFacade::new(self.store(feature))
  }

  /// Whether the store for `feature` has been built yet.
  pub fn is_initialised(&self, feature: Feature) -> bool {
    self.stores[feature.index()].get().is_some()
  }
}
