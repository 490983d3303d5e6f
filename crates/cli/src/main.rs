mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use defstore_lib::consts::{APP_DATA_ENV, CONTAINER_ENV};
use defstore_lib::platform::paths::{ShellOptions, TenantName};
use defstore_lib::store::TenantStores;

use crate::cmd::{
  FieldSpec, cmd_add_part, cmd_add_type, cmd_path, cmd_remove_part, cmd_remove_type, cmd_show,
};
use crate::output::{OutputFormat, print_error};

/// defstore - per-tenant content definition store
#[derive(Parser)]
#[command(name = "defstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Tenant whose definitions to operate on
  #[arg(short, long, global = true, env = "DEFSTORE_TENANT", default_value = "Default")]
  tenant: String,

  /// Application data root (default: platform data directory)
  #[arg(long, global = true, env = APP_DATA_ENV)]
  app_data: Option<PathBuf>,

  /// Directory under the data root holding one directory per tenant
  #[arg(long, global = true, env = CONTAINER_ENV)]
  container: Option<String>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the path of the tenant's definition document
  Path,

  /// Show the tenant's content types and parts
  Show,

  /// Add or replace a content type
  AddType {
    /// Technical name of the content type
    name: String,

    /// Display name (default: the technical name)
    #[arg(long)]
    display_name: Option<String>,

    /// Part to attach, may be repeated
    #[arg(long = "part")]
    parts: Vec<String>,
  },

  /// Remove a content type
  RemoveType {
    /// Technical name of the content type
    name: String,
  },

  /// Add or replace a part definition
  AddPart {
    /// Name of the part
    name: String,

    /// Field as NAME:TYPE (e.g. Subtitle:TextField), may be repeated
    #[arg(long = "field")]
    fields: Vec<FieldSpec>,
  },

  /// Remove a part definition
  RemovePart {
    /// Name of the part
    name: String,
  },
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let tenant = TenantName::new(&cli.tenant).context("Invalid --tenant")?;
  let stores = TenantStores::new(ShellOptions::from_env_with(cli.app_data.clone(), cli.container.clone()));
  let store = stores.get_or_create(&tenant);
  debug!(
    tenant = %tenant,
    app_data = ?stores.options().app_data_path,
    path = ?store.path(),
    "resolved definition store"
  );

  match cli.command {
    Commands::Path => cmd_path(&store, cli.output),
    Commands::Show => cmd_show(&store, cli.verbose, cli.output),
    Commands::AddType {
      name,
      display_name,
      parts,
    } => cmd_add_type(&store, &name, display_name, parts, cli.output),
    Commands::RemoveType { name } => cmd_remove_type(&store, &name, cli.output),
    Commands::AddPart { name, fields } => cmd_add_part(&store, &name, fields, cli.output),
    Commands::RemovePart { name } => cmd_remove_part(&store, &name, cli.output),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
