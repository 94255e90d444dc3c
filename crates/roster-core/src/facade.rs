//! [`EmployeeFacade`], the single entry point a view talks to.
//!
//! Holds no state of its own: reads project the store, writes forward to it
//! unchanged, and the remaining helpers are pure functions of one employee.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
  filter::{EmployeeFilters, FiltersPatch},
  gateway::Gateway,
  helpers,
  model::{Employee, EmployeeId},
  store::{EmployeeStore, Failure, Outcome, Snapshot},
};

pub struct EmployeeFacade<G>
where
  G: Gateway<Record = Employee>,
{
  store: Arc<EmployeeStore<G>>,
}

impl<G> Clone for EmployeeFacade<G>
where
  G: Gateway<Record = Employee>,
{
  fn clone(&self) -> Self {
    Self {
      store: self.store.clone(),
    }
  }
}

impl<G> EmployeeFacade<G>
where
  G: Gateway<Record = Employee>,
{
  pub fn new(store: Arc<EmployeeStore<G>>) -> Self { Self { store } }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn employees(&self) -> Arc<[Employee]> { self.store.entities() }

  pub fn filtered_employees(&self) -> Arc<[Employee]> { self.store.filtered() }

  pub fn active_employees(&self) -> Vec<Employee> { self.store.active() }

  pub fn departments(&self) -> Vec<String> { self.store.departments() }

  pub fn selected_employee(&self) -> Option<Employee> { self.store.selected() }

  pub fn last_created_employee(&self) -> Option<Employee> {
    self.store.last_created()
  }

  pub fn loading(&self) -> bool { self.store.loading() }

  pub fn error(&self) -> Option<String> { self.store.error() }

  pub fn failure(&self) -> Option<Failure> { self.store.failure() }

  pub fn filters(&self) -> EmployeeFilters { self.store.filters() }

  pub fn total_count(&self) -> usize { self.store.total_count() }

  pub fn filtered_count(&self) -> usize { self.store.filtered_count() }

  pub fn snapshot(&self) -> Snapshot<Employee, EmployeeFilters> {
    self.store.snapshot()
  }

  pub fn subscribe(&self) -> watch::Receiver<u64> { self.store.subscribe() }

  // ── Actions ───────────────────────────────────────────────────────────────

  pub async fn load_all(&self) -> Outcome { self.store.load_all().await }

  pub async fn load_by_id(&self, id: EmployeeId) -> Outcome {
    self.store.load_by_id(id).await
  }

  pub async fn create(&self, draft: G::Draft) -> Outcome {
    self.store.create(draft).await
  }

  pub async fn update(&self, id: EmployeeId, patch: G::Patch) -> Outcome {
    self.store.update(id, patch).await
  }

  pub async fn delete(&self, id: EmployeeId) -> Outcome {
    self.store.delete(id).await
  }

  pub fn set_filters(&self, patch: FiltersPatch) { self.store.set_filters(patch); }

  pub fn replace_filters(&self, filters: EmployeeFilters) {
    self.store.replace_filters(filters);
  }

  pub fn clear_filters(&self) { self.store.clear_filters(); }

  pub fn select_employee(&self, employee: Option<&Employee>) {
    self.store.select(employee);
  }

  pub fn clear_error(&self) { self.store.clear_error(); }

  // ── Helpers ───────────────────────────────────────────────────────────────

  pub fn display_name(&self, e: &Employee) -> String { helpers::full_name(e) }

  pub fn full_info(&self, e: &Employee) -> String { helpers::display_info(e) }

  pub fn is_active(&self, e: &Employee) -> bool { helpers::is_active(e) }

  pub fn can_delete(&self, e: &Employee) -> bool { helpers::can_delete(e) }

  pub fn status_color(&self, e: &Employee) -> &'static str {
    helpers::status_badge_color(e.status)
  }
}
