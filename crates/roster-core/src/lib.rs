//! Core types, traits and the filtered-collection store for Roster.
//!
//! This crate is deliberately free of HTTP dependencies. Gateways live in
//! other crates (e.g. `roster-client`) and plug in through
//! [`gateway::Gateway`].

pub mod error;
pub mod facade;
pub mod feature;
pub mod filter;
pub mod gateway;
pub mod helpers;
pub mod model;
pub mod record;
pub mod store;

pub use error::{FailureKind, GatewayError, Result};
pub use facade::EmployeeFacade;
pub use feature::{Feature, Registry};
pub use filter::{EmployeeFilters, FiltersPatch};
pub use gateway::Gateway;
pub use model::{
  Employee, EmployeeDraft, EmployeeId, EmployeePatch, EmployeeStatus,
  EmployeeSummary,
};
pub use record::{Criteria, Record, Validate};
pub use store::{CollectionStore, EmployeeStore, Failure, Outcome, Slot, Snapshot};
