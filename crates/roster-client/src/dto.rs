//! Wire representation of employees.
//!
//! Inbound documents are read leniently: every multi-word field is accepted
//! in snake_case or camelCase (snake_case wins when both are present), ids
//! may be strings or numbers, and dates may be plain `YYYY-MM-DD` or full
//! RFC 3339 timestamps. Outbound bodies are
//! always snake_case and omit absent fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use roster_core::{
  Employee, EmployeeDraft, EmployeeId, EmployeePatch, EmployeeStatus,
};
use serde::{Deserialize, Deserializer, Serialize};

// ─── Inbound ─────────────────────────────────────────────────────────────────

/// An employee as read off the wire, with every field resolved.
#[derive(Debug, Deserialize)]
#[serde(try_from = "WireEmployee")]
pub struct EmployeeDto {
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
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl From<EmployeeDto> for Employee {
  fn from(d: EmployeeDto) -> Self {
    Employee {
      id:              d.id,
      employee_number: d.employee_number,
      first_name:      d.first_name,
      last_name:       d.last_name,
      email:           d.email,
      phone_number:    d.phone_number,
      department:      d.department,
      position:        d.position,
      hire_date:       d.hire_date,
      status:          d.status,
      created_at:      d.created_at,
      updated_at:      d.updated_at,
    }
  }
}

/// The raw document. Multi-word fields are read under both spellings as
/// separate keys, so a payload carrying both is still accepted.
#[derive(Deserialize)]
struct WireEmployee {
  #[serde(deserialize_with = "de_id")]
  id:                    EmployeeId,
  employee_number:       Option<String>,
  #[serde(rename = "employeeNumber")]
  employee_number_camel: Option<String>,
  first_name:            Option<String>,
  #[serde(rename = "firstName")]
  first_name_camel:      Option<String>,
  last_name:             Option<String>,
  #[serde(rename = "lastName")]
  last_name_camel:       Option<String>,
  email:                 Option<String>,
  phone_number:          Option<String>,
  #[serde(rename = "phoneNumber")]
  phone_number_camel:    Option<String>,
  department:            Option<String>,
  position:              Option<String>,
  hire_date:             Option<String>,
  #[serde(rename = "hireDate")]
  hire_date_camel:       Option<String>,
  status:                EmployeeStatus,
  created_at:            Option<String>,
  #[serde(rename = "createdAt")]
  created_at_camel:      Option<String>,
  updated_at:            Option<String>,
  #[serde(rename = "updatedAt")]
  updated_at_camel:      Option<String>,
}

/// The snake_case value unless it is missing or empty, else the camelCase
/// one.
fn either(snake: Option<String>, camel: Option<String>) -> Option<String> {
  snake.filter(|s| !s.is_empty()).or(camel)
}

fn required<T>(
  field: &str,
  value: Option<String>,
  parse: fn(&str) -> Option<T>,
) -> Result<T, String> {
  let value = value.ok_or_else(|| format!("missing field `{field}`"))?;
  parse(&value).ok_or_else(|| format!("invalid {field} {value:?}"))
}

impl TryFrom<WireEmployee> for EmployeeDto {
  type Error = String;

  fn try_from(w: WireEmployee) -> Result<Self, String> {
    Ok(Self {
      id:              w.id,
      employee_number: either(w.employee_number, w.employee_number_camel)
        .unwrap_or_default(),
      first_name:      either(w.first_name, w.first_name_camel).unwrap_or_default(),
      last_name:       either(w.last_name, w.last_name_camel).unwrap_or_default(),
      email:           w.email.unwrap_or_default(),
      phone_number:    either(w.phone_number, w.phone_number_camel).unwrap_or_default(),
      department:      w.department.unwrap_or_default(),
      position:        w.position.unwrap_or_default(),
      hire_date:       required(
        "hire_date",
        either(w.hire_date, w.hire_date_camel),
        parse_date,
      )?,
      status:          w.status,
      created_at:      required(
        "created_at",
        either(w.created_at, w.created_at_camel),
        parse_timestamp,
      )?,
      updated_at:      required(
        "updated_at",
        either(w.updated_at, w.updated_at_camel),
        parse_timestamp,
      )?,
    })
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
  Text(String),
  Number(i64),
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<EmployeeId, D::Error> {
  Ok(match RawId::deserialize(d)? {
    RawId::Text(s) => EmployeeId::new(s),
    RawId::Number(n) => EmployeeId::new(n.to_string()),
  })
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .or_else(|| parse_timestamp(s).map(|t| t.date_naive()))
}

pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  if let Ok(t) = DateTime::parse_from_rfc3339(s) {
    return Some(t.with_timezone(&Utc));
  }
  // Servers that drop the offset mean UTC.
  if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
    return Some(t.and_utc());
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|t| t.and_utc())
}

// ─── Outbound ────────────────────────────────────────────────────────────────

/// Body of `POST` and `PUT` requests.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeBody<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub employee_number: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name:      Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_name:       Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:           Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone_number:    Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department:      Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub position:        Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hire_date:       Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:          Option<EmployeeStatus>,
}

impl<'a> From<&'a EmployeeDraft> for EmployeeBody<'a> {
  fn from(d: &'a EmployeeDraft) -> Self {
    Self {
      employee_number: Some(&d.employee_number),
      first_name:      Some(&d.first_name),
      last_name:       Some(&d.last_name),
      email:           Some(&d.email),
      phone_number:    d.phone_number.as_deref(),
      department:      d.department.as_deref(),
      position:        d.position.as_deref(),
      hire_date:       d.hire_date,
      status:          d.status,
    }
  }
}

impl<'a> From<&'a EmployeePatch> for EmployeeBody<'a> {
  fn from(p: &'a EmployeePatch) -> Self {
    Self {
      employee_number: p.employee_number.as_deref(),
      first_name:      p.first_name.as_deref(),
      last_name:       p.last_name.as_deref(),
      email:           p.email.as_deref(),
      phone_number:    p.phone_number.as_deref(),
      department:      p.department.as_deref(),
      position:        p.position.as_deref(),
      hire_date:       p.hire_date,
      status:          p.status,
    }
  }
}
