//! # RBAC Check CLI
//!
//! Evaluates role permissions against a TOML or JSON configuration file.
//!
//! ## Commands
//!
//! - `actions --roles r1,r2` - Effective action set as JSON
//! - `check --roles r1,r2 --action NAME [--scope SCOPE]` - Permission decision as JSON
//! - `roles` - Role names and their direct inheritance
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RBAC_CONFIG` - Configuration file path (default: rbac.toml)
//! - `RUST_LOG` - Log level (default: info)
//!
//! `check` exits with status 2 when the permission is denied.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cretoai_rbac::{Rbac, RbacConfig};
use serde_json::json;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit status for a successful command or a granted permission
const SUCCESS_EXIT_CODE: u8 = 0;

/// Exit status for a denied permission
const DENIED_EXIT_CODE: u8 = 2;

/// RBAC permission checker
#[derive(Parser)]
#[command(name = "rbac-check")]
#[command(about = "Evaluate scoped RBAC permissions from a configuration file")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "rbac.toml", env = "RBAC_CONFIG")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the effective actions of a set of roles
    Actions {
        /// Comma-separated role names
        #[arg(short, long, value_delimiter = ',', required = true)]
        roles: Vec<String>,
    },

    /// Evaluate one action for a set of roles
    Check {
        /// Comma-separated role names
        #[arg(short, long, value_delimiter = ',', required = true)]
        roles: Vec<String>,

        /// Action name
        #[arg(short, long)]
        action: String,

        /// Requested scope (defaults to the lowest registered scope)
        #[arg(short, long)]
        scope: Option<String>,
    },

    /// List configured roles
    Roles,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    run(cli, &mut io::stdout().lock())
}

/// Load the configuration named by `cli` and dispatch its command
fn run(cli: Cli, out: &mut impl Write) -> Result<ExitCode> {
    let rbac = load(&cli.config)?;
    execute(&rbac, cli.command, out).map(ExitCode::from)
}

/// Run one command against `rbac`, writing JSON to `out`
///
/// Returns the process exit status.
fn execute(rbac: &Rbac, command: Command, out: &mut impl Write) -> Result<u8> {
    match command {
        Command::Actions { roles } => {
            let actions = rbac
                .get_allowed_actions(&roles)
                .with_context(|| format!("Failed to resolve actions for roles {:?}", roles))?;

            writeln!(out, "{}", serde_json::to_string_pretty(&actions)?)?;
            Ok(SUCCESS_EXIT_CODE)
        }
        Command::Check {
            roles,
            action,
            scope,
        } => {
            let checker = rbac
                .can(&roles)
                .with_context(|| format!("Failed to resolve roles {:?}", roles))?;

            let permission = match scope {
                Some(scope) => checker
                    .perform_scoped(&action, &scope)
                    .with_context(|| format!("Cannot evaluate '{}' at scope '{}'", action, scope))?,
                None => checker.perform(&action, None),
            };

            debug!("Decision for roles {:?}: granted={}", roles, permission.is_granted());
            writeln!(out, "{}", serde_json::to_string_pretty(&permission)?)?;

            if permission.is_granted() {
                Ok(SUCCESS_EXIT_CODE)
            } else {
                Ok(DENIED_EXIT_CODE)
            }
        }
        Command::Roles => {
            let roles: Vec<_> = rbac
                .graph()
                .roles()
                .map(|r| json!({ "name": r.name, "inherits": r.inherits }))
                .collect();

            writeln!(out, "{}", serde_json::to_string_pretty(&roles)?)?;
            Ok(SUCCESS_EXIT_CODE)
        }
    }
}

fn load(path: &Path) -> Result<Rbac> {
    let rbac = RbacConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        .into_rbac()
        .context("Invalid RBAC configuration")?;

    info!(
        "Loaded {} roles and {} scopes from {}",
        rbac.graph().len(),
        rbac.scopes().len(),
        path.display()
    );

    Ok(rbac)
}
