use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{config, ConfiguredRoles, HttpUserGateway};
use tracing_subscriber::EnvFilter;
use user_panel::{BackendRuntime, PanelOptions, PanelServices, ViewController};

mod alerts;
mod flows;
mod sorter;

use alerts::TerminalAlerts;
use sorter::ColumnSorter;

#[derive(Parser, Debug)]
#[command(name = "cockpit-console", about = "Drive the user administration panel from a terminal")]
struct Cli {
    /// Settings file; defaults to ./cockpit.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured API base URL.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the user list.
    List {
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending.
        #[arg(long)]
        reverse: bool,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: Option<String>,
    },
    Edit {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    Remove {
        #[arg(long)]
        email: String,
    },
    /// Show the roles offered by the add/edit forms.
    Roles,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => config::load_settings_from(path)?,
        None => config::load_settings(),
    };
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }

    let backend = BackendRuntime::start()?;
    let services = PanelServices {
        users: Arc::new(
            HttpUserGateway::from_settings(&settings).context("invalid user API settings")?,
        ),
        roles: Arc::new(ConfiguredRoles::from_settings(&settings)),
        alerts: Arc::new(TerminalAlerts),
        table: Arc::new(ColumnSorter),
    };
    let mut panel = ViewController::with_options(
        services,
        backend.handle(),
        PanelOptions::from_settings(&settings),
    )?;
    let timeout = Duration::from_secs(settings.request_timeout_secs.saturating_add(5));

    match cli.command {
        Command::List { sort, reverse } => {
            flows::list(&mut panel, sort.as_deref(), reverse, timeout)?
        }
        Command::Add { name, email, role } => {
            flows::add(&mut panel, name, email, role, timeout)?
        }
        Command::Edit { email, name, role } => {
            flows::edit(&mut panel, &email, name, role, timeout)?
        }
        Command::Remove { email } => flows::remove(&mut panel, &email, timeout)?,
        Command::Roles => {
            for role in panel.role_list() {
                println!("{role}");
            }
        }
    }

    Ok(())
}
