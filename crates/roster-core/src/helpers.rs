//! Pure functions over single employees and employee slices.

use std::collections::BTreeSet;

use crate::model::{Employee, EmployeeStatus, EmployeeSummary};

/// `"{first} {last}"`.
pub fn full_name(e: &Employee) -> String {
  format!("{} {}", e.first_name, e.last_name)
}

/// `"{number} - {full name} ({department})"`.
pub fn display_info(e: &Employee) -> String {
  format!("{} - {} ({})", e.employee_number, full_name(e), e.department)
}

pub fn is_active(e: &Employee) -> bool { e.is_active() }

/// Active employees must be deactivated before they can be deleted. This is
/// a UI hint only; the server decides.
pub fn can_delete(e: &Employee) -> bool { !e.is_active() }

/// Hex colour for a status badge.
pub fn status_badge_color(status: EmployeeStatus) -> &'static str {
  match status {
    EmployeeStatus::Active => "#4caf50",
    EmployeeStatus::Inactive => "#9e9e9e",
    EmployeeStatus::OnLeave => "#ff9800",
    EmployeeStatus::Suspended => "#f44336",
  }
}

/// Free-text search over every descriptive field, department and position
/// included. Broader than the store's search criterion, which only looks at
/// names, number and email. A blank term returns everything.
pub fn search_employees(employees: &[Employee], term: &str) -> Vec<Employee> {
  let term = term.trim().to_lowercase();
  if term.is_empty() {
    return employees.to_vec();
  }
  employees
    .iter()
    .filter(|e| {
      [
        &e.first_name,
        &e.last_name,
        &e.employee_number,
        &e.email,
        &e.department,
        &e.position,
      ]
      .iter()
      .any(|field| field.to_lowercase().contains(&term))
    })
    .cloned()
    .collect()
}

/// Left-pad an employee number with zeros to `width` characters.
pub fn format_employee_number(number: &str, width: usize) -> String {
  format!("{number:0>width$}")
}

pub fn unique_departments(employees: &[Employee]) -> Vec<String> {
  employees
    .iter()
    .map(|e| e.department.clone())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

/// Sort by case-insensitive full name.
pub fn sort_by_name(employees: &mut [Employee], ascending: bool) {
  employees.sort_by_cached_key(|e| full_name(e).to_lowercase());
  if !ascending {
    employees.reverse();
  }
}

pub fn sort_by_number(employees: &mut [Employee], ascending: bool) {
  if ascending {
    employees.sort_by(|a, b| a.employee_number.cmp(&b.employee_number));
  } else {
    employees.sort_by(|a, b| b.employee_number.cmp(&a.employee_number));
  }
}

pub fn summarize(employees: &[Employee]) -> Vec<EmployeeSummary> {
  employees.iter().map(EmployeeSummary::from).collect()
}
