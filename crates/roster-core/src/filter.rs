//! Employee filter criteria.
//!
//! Semantics: OR within the search dimension (the term may match any of
//! first name, last name, employee number or email), AND across dimensions
//! (search, department, status).

use serde::{Deserialize, Serialize};

use crate::{
  model::{Employee, EmployeeStatus},
  record::Criteria,
};

/// Filter criteria for an employee collection. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFilters {
  /// Case-insensitive substring matched against name, number and email.
  pub search:     Option<String>,
  /// Exact department match.
  pub department: Option<String>,
  pub status:     Option<EmployeeStatus>,
}

impl EmployeeFilters {
  /// The trimmed, lowercased search term, or `None` if there is nothing to
  /// search for.
  fn search_term(&self) -> Option<String> {
    self
      .search
      .as_deref()
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(str::to_lowercase)
  }
}

/// Partial update for [`EmployeeFilters`].
///
/// Each field is tri-state: `None` keeps the current value, `Some(None)`
/// clears it, `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiltersPatch {
  pub search:     Option<Option<String>>,
  pub department: Option<Option<String>>,
  pub status:     Option<Option<EmployeeStatus>>,
}

impl FiltersPatch {
  pub fn search(term: impl Into<String>) -> Self {
    Self {
      search: Some(Some(term.into())),
      ..Self::default()
    }
  }

  pub fn department(department: impl Into<String>) -> Self {
    Self {
      department: Some(Some(department.into())),
      ..Self::default()
    }
  }

  pub fn status(status: EmployeeStatus) -> Self {
    Self {
      status: Some(Some(status)),
      ..Self::default()
    }
  }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
  haystack.to_lowercase().contains(needle_lower)
}

impl Criteria<Employee> for EmployeeFilters {
  type Patch = FiltersPatch;

  fn merge(&mut self, patch: FiltersPatch) {
    if let Some(search) = patch.search {
      self.search = search;
    }
    if let Some(department) = patch.department {
      self.department = department;
    }
    if let Some(status) = patch.status {
      self.status = status;
    }
  }

  fn matches(&self, e: &Employee) -> bool {
    if let Some(term) = self.search_term() {
      let hit = contains_ci(&e.first_name, &term)
        || contains_ci(&e.last_name, &term)
        || contains_ci(&e.employee_number, &term)
        || contains_ci(&e.email, &term);
      if !hit {
        return false;
      }
    }
    if let Some(department) = &self.department
      && e.department != *department
    {
      return false;
    }
    if let Some(status) = self.status
      && e.status != status
    {
      return false;
    }
    true
  }

  fn is_unconstrained(&self) -> bool {
    self.search_term().is_none()
      && self.department.is_none()
      && self.status.is_none()
  }
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, TimeZone, Utc};

  use super::*;
  use crate::model::EmployeeId;

  fn employee(first: &str, last: &str, dept: &str, status: EmployeeStatus) -> Employee {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Employee {
      id: EmployeeId::new(first),
      employee_number: "E-100".into(),
      first_name: first.into(),
      last_name: last.into(),
      email: format!("{}@example.com", first.to_lowercase()),
      phone_number: String::new(),
      department: dept.into(),
      position: "Clerk".into(),
      hire_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
      status,
      created_at: at,
      updated_at: at,
    }
  }

  #[test]
  fn default_filters_match_everything() {
    let f = EmployeeFilters::default();
    assert!(f.is_unconstrained());
    assert!(f.matches(&employee("Ana", "Silva", "HR", EmployeeStatus::Suspended)));
  }

  #[test]
  fn blank_search_is_unconstrained() {
    let f = EmployeeFilters {
      search: Some("   ".into()),
      ..Default::default()
    };
    assert!(f.is_unconstrained());
  }

  #[test]
  fn padded_search_term_is_trimmed() {
    let e = employee("Ana", "Silva", "HR", EmployeeStatus::Active);
    let f = EmployeeFilters {
      search: Some("  ana ".into()),
      ..Default::default()
    };
    assert!(!f.is_unconstrained());
    assert!(f.matches(&e));
  }

  #[test]
  fn search_matches_any_field_case_insensitively() {
    let e = employee("Ana", "Silva", "HR", EmployeeStatus::Active);
    for term in ["ANA", "silv", "e-10", "@EXAMPLE"] {
      let f = EmployeeFilters {
        search: Some(term.into()),
        ..Default::default()
      };
      assert!(f.matches(&e), "term {term:?} should match");
    }
    let f = EmployeeFilters {
      search: Some("clerk".into()),
      ..Default::default()
    };
    assert!(!f.matches(&e), "position is not a search field");
  }

  #[test]
  fn dimensions_are_conjunctive() {
    let e = employee("Ana", "Silva", "HR", EmployeeStatus::Active);
    let f = EmployeeFilters {
      search:     Some("ana".into()),
      department: Some("HR".into()),
      status:     Some(EmployeeStatus::Inactive),
    };
    assert!(!f.matches(&e));

    let f = EmployeeFilters {
      status: Some(EmployeeStatus::Active),
      ..f
    };
    assert!(f.matches(&e));
  }

  #[test]
  fn department_match_is_exact() {
    let e = employee("Ana", "Silva", "HR", EmployeeStatus::Active);
    let f = EmployeeFilters {
      department: Some("hr".into()),
      ..Default::default()
    };
    assert!(!f.matches(&e));
  }

  #[test]
  fn merge_is_shallow() {
    let mut f = EmployeeFilters {
      search:     Some("ana".into()),
      department: Some("HR".into()),
      status:     None,
    };
    f.merge(FiltersPatch {
      department: Some(None),
      status: Some(Some(EmployeeStatus::OnLeave)),
      ..Default::default()
    });
    assert_eq!(f.search.as_deref(), Some("ana"));
    assert_eq!(f.department, None);
    assert_eq!(f.status, Some(EmployeeStatus::OnLeave));
  }
}
