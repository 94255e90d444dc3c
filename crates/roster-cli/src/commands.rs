//! Subcommand execution. Each command drives the feature facade the way an
//! interactive view would, then prints what the store ends up holding.

use anyhow::{Result, bail};
use roster_client::HttpGateway;
use roster_core::{
  Employee, EmployeeDraft, EmployeeFacade, EmployeeFilters, EmployeeId,
  EmployeePatch, EmployeeStatus, Outcome, helpers,
};

use crate::{Command, Details, SortKey};

type Facade = EmployeeFacade<HttpGateway>;

pub async fn run(facade: &Facade, command: Command) -> Result<()> {
  match command {
    Command::List {
      search,
      department,
      status,
      active,
      anywhere,
      sort,
      desc,
    } => {
      let filters = EmployeeFilters {
        search,
        department,
        status: if active { Some(EmployeeStatus::Active) } else { status },
      };
      list(facade, filters, anywhere, sort, !desc).await
    }
    Command::Departments => {
      applied(facade.load_all().await)?;
      for department in facade.departments() {
        println!("{department}");
      }
      Ok(())
    }
    Command::Show { id } => {
      let employee = fetch(facade, id).await?;
      print_detail(&employee);
      Ok(())
    }
    Command::Create {
      number,
      first,
      last,
      email,
      details,
    } => {
      let mut draft = EmployeeDraft::new(number, first, last, email);
      draft.phone_number = details.phone;
      draft.department = details.department;
      draft.position = details.position;
      draft.hire_date = details.hire_date;
      draft.status = details.status;
      applied(facade.create(draft).await)?;

      let Some(created) = facade.last_created_employee() else {
        bail!("server accepted the employee but returned nothing");
      };
      print_detail(&created);
      Ok(())
    }
    Command::Update {
      id,
      number,
      first,
      last,
      email,
      details,
    } => {
      let patch = EmployeePatch {
        employee_number: number,
        first_name: first,
        last_name: last,
        email,
        ..patch_from(details)
      };
      if patch.is_empty() {
        bail!("nothing to update; pass at least one field flag");
      }
      let id = EmployeeId::new(id);
      // Selecting first lets the store refresh the selection in place.
      fetch(facade, id.to_string()).await?;
      applied(facade.update(id, patch).await)?;
      if let Some(updated) = facade.selected_employee() {
        print_detail(&updated);
      }
      Ok(())
    }
    Command::Delete { id, force } => {
      let employee = fetch(facade, id).await?;
      if !facade.can_delete(&employee) && !force {
        bail!(
          "{} is active; deactivate them first or pass --force",
          facade.display_name(&employee)
        );
      }
      applied(facade.delete(employee.id.clone()).await)?;
      println!("deleted {}", facade.full_info(&employee));
      Ok(())
    }
  }
}

fn patch_from(details: Details) -> EmployeePatch {
  EmployeePatch {
    phone_number: details.phone,
    department: details.department,
    position: details.position,
    hire_date: details.hire_date,
    status: details.status,
    ..EmployeePatch::default()
  }
}

/// Turn a store outcome into an error the binary reports on exit.
fn applied(outcome: Outcome) -> Result<()> {
  match outcome {
    Outcome::Applied => Ok(()),
    Outcome::Superseded => bail!("request was superseded by a newer one"),
    Outcome::Failed(failure) => bail!("{} failed: {}", failure.slot, failure.message),
  }
}

async fn fetch(facade: &Facade, id: String) -> Result<Employee> {
  applied(facade.load_by_id(EmployeeId::new(id.clone())).await)?;
  match facade.selected_employee() {
    Some(employee) => Ok(employee),
    None => bail!("employee {id} not found"),
  }
}

async fn list(
  facade: &Facade,
  filters: EmployeeFilters,
  anywhere: Option<String>,
  sort: Option<SortKey>,
  ascending: bool,
) -> Result<()> {
  applied(facade.load_all().await)?;
  facade.replace_filters(filters);

  let mut rows = match anywhere {
    Some(term) => helpers::search_employees(&facade.filtered_employees(), &term),
    None => facade.filtered_employees().to_vec(),
  };
  match sort {
    Some(SortKey::Name) => helpers::sort_by_name(&mut rows, ascending),
    Some(SortKey::Number) => helpers::sort_by_number(&mut rows, ascending),
    None => {}
  }

  print!("{}", render_table(&rows));
  println!("{}/{} employees", rows.len(), facade.total_count());
  Ok(())
}

// ─── Rendering ────────────────────────────────────────────────────────────────

const HEADERS: [&str; 6] = ["ID", "NUMBER", "NAME", "DEPARTMENT", "POSITION", "STATUS"];

fn render_table(rows: &[Employee]) -> String {
  let cells: Vec<[String; 6]> = rows
    .iter()
    .map(|e| {
      [
        e.id.to_string(),
        e.employee_number.clone(),
        helpers::full_name(e),
        e.department.clone(),
        e.position.clone(),
        e.status.to_string(),
      ]
    })
    .collect();

  let mut widths = HEADERS.map(str::len);
  for row in &cells {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  let mut line = |cols: [&str; 6]| {
    let padded: Vec<String> = cols
      .iter()
      .zip(widths)
      .map(|(c, w)| format!("{c:<w$}"))
      .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
  };
  line(HEADERS);
  for row in &cells {
    line(row.each_ref().map(String::as_str));
  }
  out
}

fn print_detail(e: &Employee) {
  println!("{}", helpers::display_info(e));
  let fields = [
    ("id", e.id.to_string()),
    ("email", e.email.clone()),
    ("phone", e.phone_number.clone()),
    ("position", e.position.clone()),
    ("hire date", e.hire_date.to_string()),
    ("status", e.status.to_string()),
    ("created", e.created_at.to_rfc3339()),
    ("updated", e.updated_at.to_rfc3339()),
  ];
  for (label, value) in fields {
    println!("  {label:<10} {value}");
  }
}
