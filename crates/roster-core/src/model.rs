//! Employee types shared by every roster feature.
//!
//! An employee is identified by a server-assigned [`EmployeeId`] that never
//! changes after creation. The two timestamps are also server-assigned; the
//! client only ever reads them.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
  error::GatewayError,
  record::{Record, Validate},
};

// ─── Identity ────────────────────────────────────────────────────────────────

/// The stable unique key of an [`Employee`].
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for EmployeeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for EmployeeId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for EmployeeId {
  fn from(s: String) -> Self { Self(s) }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Employment status. The wire form is snake_case (`on_leave`); parsing from
/// user input is case-insensitive.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EmployeeStatus {
  #[default]
  Active,
  Inactive,
  OnLeave,
  Suspended,
}

// ─── Employee ────────────────────────────────────────────────────────────────

/// A single employee record as held by a collection store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  pub id:              EmployeeId,
  pub employee_number: String,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub phone_number:    String,
  pub department:      String,
  pub position:        String,
  pub hire_date:       NaiveDate,
  pub status:          EmployeeStatus,
  /// Server-assigned; never changes after creation.
  pub created_at:      DateTime<Utc>,
  /// Server-assigned; always `>= created_at`.
  pub updated_at:      DateTime<Utc>,
}

impl Employee {
  pub fn is_active(&self) -> bool { self.status == EmployeeStatus::Active }
}

impl Record for Employee {
  type Key = EmployeeId;

  fn key(&self) -> &EmployeeId { &self.id }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Input to a create request. `id`, `created_at` and `updated_at` are always
/// assigned by the server and are not accepted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
  pub employee_number: String,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub phone_number:    Option<String>,
  pub department:      Option<String>,
  pub position:        Option<String>,
  pub hire_date:       Option<NaiveDate>,
  pub status:          Option<EmployeeStatus>,
}

impl EmployeeDraft {
  /// Convenience constructor with only the required fields set.
  pub fn new(
    employee_number: impl Into<String>,
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      employee_number: employee_number.into(),
      first_name: first_name.into(),
      last_name: last_name.into(),
      email: email.into(),
      ..Self::default()
    }
  }
}

impl Validate for EmployeeDraft {
  /// Check the fields a create request cannot do without.
  fn validate(&self) -> Result<(), GatewayError> {
    let required = [
      ("employee_number", &self.employee_number),
      ("first_name", &self.first_name),
      ("last_name", &self.last_name),
      ("email", &self.email),
    ];
    match required.iter().find(|(_, v)| v.trim().is_empty()) {
      Some((field, _)) => {
        Err(GatewayError::Invalid(format!("{field} is required")))
      }
      None => Ok(()),
    }
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// Input to an update request. `None` leaves a field as it is on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
  pub employee_number: Option<String>,
  pub first_name:      Option<String>,
  pub last_name:       Option<String>,
  pub email:           Option<String>,
  pub phone_number:    Option<String>,
  pub department:      Option<String>,
  pub position:        Option<String>,
  pub hire_date:       Option<NaiveDate>,
  pub status:          Option<EmployeeStatus>,
}

impl EmployeePatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// The record as it would look with this patch applied locally. The
  /// server's response to an update stays authoritative; this is a preview.
  pub fn apply(&self, employee: &Employee) -> Employee {
    let mut out = employee.clone();
    if let Some(v) = &self.employee_number {
      out.employee_number = v.clone();
    }
    if let Some(v) = &self.first_name {
      out.first_name = v.clone();
    }
    if let Some(v) = &self.last_name {
      out.last_name = v.clone();
    }
    if let Some(v) = &self.email {
      out.email = v.clone();
    }
    if let Some(v) = &self.phone_number {
      out.phone_number = v.clone();
    }
    if let Some(v) = &self.department {
      out.department = v.clone();
    }
    if let Some(v) = &self.position {
      out.position = v.clone();
    }
    if let Some(v) = self.hire_date {
      out.hire_date = v;
    }
    if let Some(v) = self.status {
      out.status = v;
    }
    out
  }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// A lightweight projection used by lists and cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
  pub id:              EmployeeId,
  pub employee_number: String,
  pub full_name:       String,
  pub department:      String,
  pub status:          EmployeeStatus,
}

impl From<&Employee> for EmployeeSummary {
  fn from(e: &Employee) -> Self {
    Self {
      id:              e.id.clone(),
      employee_number: e.employee_number.clone(),
      full_name:       crate::helpers::full_name(e),
      department:      e.department.clone(),
      status:          e.status,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;
  use crate::record::Validate;

  #[test]
  fn status_parses_case_insensitively() {
    assert_eq!(
      EmployeeStatus::from_str("ACTIVE").unwrap(),
      EmployeeStatus::Active
    );
    assert_eq!(
      EmployeeStatus::from_str("on_leave").unwrap(),
      EmployeeStatus::OnLeave
    );
    assert!(EmployeeStatus::from_str("retired").is_err());
  }

  #[test]
  fn status_wire_form_is_snake_case() {
    let json = serde_json::to_string(&EmployeeStatus::OnLeave).unwrap();
    assert_eq!(json, "\"on_leave\"");
    assert_eq!(EmployeeStatus::Suspended.to_string(), "suspended");
  }

  #[test]
  fn draft_requires_identity_fields() {
    let ok = EmployeeDraft::new("0042", "Ana", "Silva", "ana@example.com");
    assert!(ok.validate().is_ok());

    let missing = EmployeeDraft::new("0042", "Ana", "  ", "ana@example.com");
    let err = missing.validate().unwrap_err();
    assert!(err.to_string().contains("last_name"));
  }

  #[test]
  fn empty_patch_is_empty() {
    assert!(EmployeePatch::default().is_empty());
    let p = EmployeePatch {
      position: Some("Lead".into()),
      ..Default::default()
    };
    assert!(!p.is_empty());
  }
}
