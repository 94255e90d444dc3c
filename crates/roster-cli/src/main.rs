//! `roster`: command-line client for the per-feature employee rosters.
//!
//! # Usage
//!
//! ```
//! roster --url http://localhost:8080 --domain tawjeeh list --search ana
//! roster --config ~/.config/roster.toml show 42
//! ROSTER_USERNAME=alice ROSTER_PASSWORD=secret roster delete 42 --force
//! ```
//!
//! Settings are layered: the TOML config file, then `ROSTER_*` environment
//! variables, then command-line flags.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use roster_client::{ClientConfig, Connection, HttpGateway};
use roster_core::{EmployeeStatus, Feature, Registry};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage inspection and tawjeeh employee rosters")]
struct Args {
  /// Path to a TOML config file (base_url, username, password, timeout_secs).
  #[arg(short, long, value_name = "FILE", default_value = "roster.toml")]
  config: PathBuf,

  /// Base URL of the roster API.
  #[arg(long)]
  url: Option<String>,

  /// API username.
  #[arg(long)]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long)]
  password: Option<String>,

  /// Which feature's roster to operate on.
  #[arg(long, default_value_t = Feature::Inspection)]
  domain: Feature,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// List employees, optionally filtered.
  List {
    /// Case-insensitive match on name, employee number or email.
    #[arg(long)]
    search:     Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long, conflicts_with = "active")]
    status:     Option<EmployeeStatus>,
    /// Shorthand for `--status active`.
    #[arg(long)]
    active:     bool,
    /// Free-text match that also covers department and position.
    #[arg(long, value_name = "TEXT")]
    anywhere:   Option<String>,
    #[arg(long, value_enum)]
    sort:       Option<SortKey>,
    /// Reverse the sort order.
    #[arg(long, requires = "sort")]
    desc:       bool,
  },

  /// List the departments that have at least one employee.
  Departments,

  /// Show one employee in full.
  Show { id: String },

  /// Create an employee.
  Create {
    #[arg(long)]
    number:  String,
    #[arg(long)]
    first:   String,
    #[arg(long)]
    last:    String,
    #[arg(long)]
    email:   String,
    #[command(flatten)]
    details: Details,
  },

  /// Change some fields of an employee.
  Update {
    id:      String,
    #[arg(long)]
    number:  Option<String>,
    #[arg(long)]
    first:   Option<String>,
    #[arg(long)]
    last:    Option<String>,
    #[arg(long)]
    email:   Option<String>,
    #[command(flatten)]
    details: Details,
  },

  /// Delete an employee. Active employees are refused unless `--force`.
  Delete {
    id:    String,
    #[arg(long)]
    force: bool,
  },
}

/// Optional employee fields shared by `create` and `update`.
#[derive(clap::Args, Debug, Default)]
pub struct Details {
  #[arg(long)]
  pub phone:      Option<String>,
  #[arg(long)]
  pub department: Option<String>,
  #[arg(long)]
  pub position:   Option<String>,
  #[arg(long, value_name = "YYYY-MM-DD")]
  pub hire_date:  Option<NaiveDate>,
  #[arg(long)]
  pub status:     Option<EmployeeStatus>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
  Name,
  Number,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let client_cfg = load_config(&args.config, &args)?;
  tracing::debug!(base_url = %client_cfg.base_url, domain = %args.domain, "configured");

  let conn = Connection::new(&client_cfg).context("failed to set up HTTP client")?;
  let registry = Registry::new(move |feature| HttpGateway::for_feature(conn.clone(), feature));
  let facade = registry.facade(args.domain);

  commands::run(&facade, args.command).await
}

/// Config file, then `ROSTER_*` environment, then flags.
fn load_config(path: &Path, args: &Args) -> anyhow::Result<ClientConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .set_override_option("base_url", args.url.clone())?
    .set_override_option("username", args.user.clone())?
    .set_override_option("password", args.password.clone())?
    .build()
    .with_context(|| format!("failed to read config from {}", path.display()))?;

  settings
    .try_deserialize()
    .context("failed to deserialise ClientConfig")
}
