//! [`CollectionStore`], the filtered-collection state container.
//!
//! A store owns one feature's in-memory collection together with its filter
//! criteria, selection, loading flag and last failure. Async operations call
//! the [`Gateway`] and commit their result in one synchronous step; readers
//! never observe a half-applied mutation.
//!
//! Each async operation belongs to a [`Slot`]. Starting a call bumps its
//! slot's generation, and a completion only commits if its generation is
//! still current. A later call on the same slot therefore supersedes an
//! earlier one that is still in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount};
use tokio::sync::watch;

use crate::{
  error::{FailureKind, GatewayError},
  filter::EmployeeFilters,
  gateway::Gateway,
  helpers,
  model::Employee,
  record::{Criteria, Record, Validate},
};

// ─── Slots and outcomes ──────────────────────────────────────────────────────

/// An async operation category subject to supersession.
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
  EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Slot {
  LoadAll,
  LoadOne,
  Create,
  Update,
  Delete,
}

impl Slot {
  fn index(self) -> usize { self as usize }
}

/// A gateway failure as recorded in store state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
  pub slot:    Slot,
  pub kind:    FailureKind,
  /// Human-readable; this is what [`CollectionStore::error`] returns.
  pub message: String,
}

impl Failure {
  fn new(slot: Slot, err: &GatewayError) -> Self {
    Self {
      slot,
      kind: err.kind(),
      message: err.to_string(),
    }
  }
}

/// What happened to the state as a result of an async store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The result was committed.
  Applied,
  /// A newer call on the same slot was issued first; this result was dropped.
  Superseded,
  /// The gateway failed; the failure was recorded and nothing else changed.
  Failed(Failure),
}

impl Outcome {
  pub fn is_applied(&self) -> bool { matches!(self, Self::Applied) }
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Ticket {
  slot:       Slot,
  generation: u64,
}

struct FilterCache<R> {
  items_rev:    u64,
  criteria_rev: u64,
  view:         Arc<[R]>,
}

struct State<R: Record, C> {
  items:        Arc<[R]>,
  /// Selection is a key resolved against `items` on read. `detached` holds
  /// the record supplied alongside it, used when the key is not (yet) in
  /// the collection.
  selected:     Option<R::Key>,
  detached:     Option<R>,
  /// Key of the record the most recent committed `create` returned.
  created:      Option<R::Key>,
  error:        Option<Failure>,
  criteria:     C,
  generations:  [u64; Slot::COUNT],
  in_flight:    [bool; Slot::COUNT],
  items_rev:    u64,
  criteria_rev: u64,
  revision:     u64,
  cache:        Option<FilterCache<R>>,
}

impl<R: Record, C: Criteria<R>> State<R, C> {
  fn new() -> Self {
    Self {
      items:        Arc::from(Vec::new()),
      selected:     None,
      detached:     None,
      created:      None,
      error:        None,
      criteria:     C::default(),
      generations:  [0; Slot::COUNT],
      in_flight:    [false; Slot::COUNT],
      items_rev:    0,
      criteria_rev: 0,
      revision:     0,
      cache:        None,
    }
  }

  fn loading(&self) -> bool { self.in_flight.iter().any(|f| *f) }

  fn position(&self, key: &R::Key) -> Option<usize> {
    self.items.iter().position(|r| r.key() == key)
  }

  fn set_items(&mut self, items: Vec<R>) {
    self.items = items.into();
    self.items_rev += 1;
  }

  fn append(&mut self, record: R) {
    let mut items = self.items.to_vec();
    // The server is the authority on keys; never hold two copies of one.
    match items.iter().position(|r| r.key() == record.key()) {
      Some(i) => items[i] = record,
      None => items.push(record),
    }
    self.set_items(items);
  }

  /// Swap in a fresh copy of the record at `key`, keeping its position.
  /// Returns whether the collection held it.
  fn refresh(&mut self, key: &R::Key, record: R) -> bool {
    if self.detached.as_ref().is_some_and(|d| d.key() == key) {
      self.detached = Some(record.clone());
    }
    match self.position(key) {
      Some(i) => {
        let mut items = self.items.to_vec();
        items[i] = record;
        self.set_items(items);
        true
      }
      None => false,
    }
  }

  fn remove(&mut self, key: &R::Key) {
    if self.detached.as_ref().is_some_and(|d| d.key() == key) {
      self.detached = None;
    }
    if self.position(key).is_some() {
      let items = self.items.iter().filter(|r| r.key() != key).cloned().collect();
      self.set_items(items);
    }
  }

  fn selected(&self) -> Option<R> {
    let key = self.selected.as_ref()?;
    self
      .items
      .iter()
      .find(|r| r.key() == key)
      .or_else(|| self.detached.as_ref().filter(|d| d.key() == key))
      .cloned()
  }

  fn filtered(&mut self) -> Arc<[R]> {
    if let Some(cache) = &self.cache
      && cache.items_rev == self.items_rev
      && cache.criteria_rev == self.criteria_rev
    {
      return cache.view.clone();
    }

    let view: Arc<[R]> = if self.criteria.is_unconstrained() {
      self.items.clone()
    } else {
      self
        .items
        .iter()
        .filter(|r| self.criteria.matches(r))
        .cloned()
        .collect()
    };

    self.cache = Some(FilterCache {
      items_rev:    self.items_rev,
      criteria_rev: self.criteria_rev,
      view:         view.clone(),
    });
    view
  }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// A consistent read of every store value at one revision.
#[derive(Debug, Clone)]
pub struct Snapshot<R, C> {
  pub revision: u64,
  pub entities: Arc<[R]>,
  pub filtered: Arc<[R]>,
  pub selected: Option<R>,
  pub loading:  bool,
  pub error:    Option<Failure>,
  pub filters:  C,
}

impl<R, C> Snapshot<R, C> {
  pub fn total_count(&self) -> usize { self.entities.len() }

  pub fn filtered_count(&self) -> usize { self.filtered.len() }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A filtered collection of `G::Record`s backed by the gateway `G`.
///
/// Share it behind an [`Arc`]; every method takes `&self`. The state lock is
/// only ever held for synchronous sections, never across an `.await`.
pub struct CollectionStore<G, C>
where
  G: Gateway,
  C: Criteria<G::Record>,
{
  gateway: G,
  state:   Mutex<State<G::Record, C>>,
  changes: watch::Sender<u64>,
}

/// The collection store every employee feature uses.
pub type EmployeeStore<G> = CollectionStore<G, EmployeeFilters>;

impl<G, C> CollectionStore<G, C>
where
  G: Gateway,
  C: Criteria<G::Record>,
{
  /// An empty store with no active filters and no selection.
  pub fn new(gateway: G) -> Self {
    let (changes, _) = watch::channel(0);
    Self {
      gateway,
      state: Mutex::new(State::new()),
      changes,
    }
  }

  pub fn gateway(&self) -> &G { &self.gateway }

  fn lock(&self) -> MutexGuard<'_, State<G::Record, C>> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Run `f` against the state, bump the revision and notify subscribers.
  fn commit<T>(&self, f: impl FnOnce(&mut State<G::Record, C>) -> T) -> T {
    let (out, revision) = {
      let mut state = self.lock();
      let out = f(&mut *state);
      state.revision += 1;
      (out, state.revision)
    };
    self.changes.send_replace(revision);
    out
  }

  fn begin(&self, slot: Slot) -> Ticket {
    let ticket = self.commit(|state| {
      let i = slot.index();
      state.generations[i] += 1;
      state.in_flight[i] = true;
      state.error = None;
      Ticket {
        slot,
        generation: state.generations[i],
      }
    });
    tracing::debug!(%slot, generation = ticket.generation, "request started");
    ticket
  }

  fn finish<T>(
    &self,
    ticket: Ticket,
    result: Result<T, GatewayError>,
    apply: impl FnOnce(&mut State<G::Record, C>, T),
  ) -> Outcome {
    let i = ticket.slot.index();
    let (outcome, revision) = {
      let mut state = self.lock();
      if state.generations[i] != ticket.generation {
        tracing::debug!(
          slot = %ticket.slot,
          generation = ticket.generation,
          current = state.generations[i],
          "dropping superseded completion"
        );
        return Outcome::Superseded;
      }
      state.in_flight[i] = false;
      let outcome = match result {
        Ok(value) => {
          apply(&mut *state, value);
          tracing::debug!(slot = %ticket.slot, "committed");
          Outcome::Applied
        }
        Err(err) => {
          tracing::warn!(slot = %ticket.slot, error = %err, "request failed");
          let failure = Failure::new(ticket.slot, &err);
          state.error = Some(failure.clone());
          Outcome::Failed(failure)
        }
      };
      state.revision += 1;
      (outcome, state.revision)
    };
    self.changes.send_replace(revision);
    outcome
  }

  // ── Async operations ──────────────────────────────────────────────────────

  /// Replace the collection with the gateway's full list.
  pub async fn load_all(&self) -> Outcome {
    let ticket = self.begin(Slot::LoadAll);
    let result = self.gateway.get_all().await;
    self.finish(ticket, result, |state, items| state.set_items(items))
  }

  /// Fetch one record and make it the selection. A copy already in the
  /// collection is refreshed in place so reads never see the older version.
  pub async fn load_by_id(&self, key: <G::Record as Record>::Key) -> Outcome {
    let ticket = self.begin(Slot::LoadOne);
    let result = self.gateway.get_by_id(&key).await;
    self.finish(ticket, result, |state, record| {
      let key = record.key().clone();
      state.refresh(&key, record.clone());
      state.selected = Some(key);
      state.detached = Some(record);
    })
  }

  /// Create a record and append the server's copy to the collection. Nothing
  /// is inserted until the gateway succeeds.
  pub async fn create(&self, draft: G::Draft) -> Outcome {
    let ticket = self.begin(Slot::Create);
    let result = match draft.validate() {
      Ok(()) => self.gateway.create(&draft).await,
      Err(err) => Err(err),
    };
    self.finish(ticket, result, |state, record| {
      state.created = Some(record.key().clone());
      state.append(record);
    })
  }

  /// Update a record and replace it in place with the server's copy.
  pub async fn update(
    &self,
    key: <G::Record as Record>::Key,
    patch: G::Patch,
  ) -> Outcome {
    let ticket = self.begin(Slot::Update);
    let result = self.gateway.update(&key, &patch).await;
    self.finish(ticket, result, |state, record| {
      if !state.refresh(&key, record) {
        tracing::debug!(%key, "updated record is not in the collection");
      }
    })
  }

  /// Delete a record and remove it from the collection.
  pub async fn delete(&self, key: <G::Record as Record>::Key) -> Outcome {
    let ticket = self.begin(Slot::Delete);
    let result = self.gateway.delete(&key).await;
    self.finish(ticket, result, |state, ()| state.remove(&key))
  }

  // ── Synchronous operations ────────────────────────────────────────────────

  /// Shallow-merge `patch` into the current criteria.
  pub fn set_filters(&self, patch: C::Patch) {
    self.commit(|state| {
      state.criteria.merge(patch);
      state.criteria_rev += 1;
    });
  }

  /// Replace the current criteria wholesale.
  pub fn replace_filters(&self, criteria: C) {
    self.commit(|state| {
      state.criteria = criteria;
      state.criteria_rev += 1;
    });
  }

  pub fn clear_filters(&self) { self.replace_filters(C::default()); }

  /// Select `record` (or clear the selection). Only its key is retained as
  /// the reference; reads resolve it against the current collection.
  pub fn select(&self, record: Option<&G::Record>) {
    self.commit(|state| {
      state.selected = record.map(|r| r.key().clone());
      state.detached = record.cloned();
    });
  }

  pub fn select_key(&self, key: Option<<G::Record as Record>::Key>) {
    self.commit(|state| {
      state.selected = key;
      state.detached = None;
    });
  }

  pub fn clear_error(&self) { self.commit(|state| state.error = None); }

  // ── Selectors ─────────────────────────────────────────────────────────────

  /// The unfiltered collection in insertion order.
  pub fn entities(&self) -> Arc<[G::Record]> { self.lock().items.clone() }

  /// The collection with the current criteria applied. With no criteria this
  /// is the collection itself.
  pub fn filtered(&self) -> Arc<[G::Record]> { self.lock().filtered() }

  pub fn total_count(&self) -> usize { self.lock().items.len() }

  pub fn filtered_count(&self) -> usize { self.lock().filtered().len() }

  pub fn selected(&self) -> Option<G::Record> { self.lock().selected() }

  pub fn selected_key(&self) -> Option<<G::Record as Record>::Key> {
    self.lock().selected.clone()
  }

  /// The record the most recent successful `create` produced, as it now
  /// stands in the collection.
  pub fn last_created(&self) -> Option<G::Record> {
    let state = self.lock();
    let key = state.created.as_ref()?;
    state.items.iter().find(|r| r.key() == key).cloned()
  }

  /// Whether any operation is in flight.
  pub fn loading(&self) -> bool { self.lock().loading() }

  /// The message of the last failure, if it has not been cleared.
  pub fn error(&self) -> Option<String> {
    self.lock().error.as_ref().map(|f| f.message.clone())
  }

  pub fn failure(&self) -> Option<Failure> { self.lock().error.clone() }

  pub fn filters(&self) -> C { self.lock().criteria.clone() }

  /// The number of committed mutations so far.
  pub fn revision(&self) -> u64 { self.lock().revision }

  /// Every value at a single revision.
  pub fn snapshot(&self) -> Snapshot<G::Record, C> {
    let mut state = self.lock();
    let filtered = state.filtered();
    Snapshot {
      revision: state.revision,
      entities: state.items.clone(),
      filtered,
      selected: state.selected(),
      loading: state.loading(),
      error: state.error.clone(),
      filters: state.criteria.clone(),
    }
  }

  /// A receiver that observes the revision after every committed mutation.
  pub fn subscribe(&self) -> watch::Receiver<u64> { self.changes.subscribe() }
}

impl<G> CollectionStore<G, EmployeeFilters>
where
  G: Gateway<Record = Employee>,
{
  /// Employees whose status is `Active`, in collection order.
  pub fn active(&self) -> Vec<Employee> {
    self.lock().items.iter().filter(|e| e.is_active()).cloned().collect()
  }

  /// Sorted, de-duplicated departments across the whole collection.
  pub fn departments(&self) -> Vec<String> {
    helpers::unique_departments(&self.lock().items)
  }
}
