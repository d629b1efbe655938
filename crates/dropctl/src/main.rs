mod cli;
mod config;
mod error;
mod lifecycle;
mod state;

use std::fs::OpenOptions;
use std::io::Write;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use dropctl_infra::digitalocean::DigitalOceanProvider;
use dropctl_infra::types::DropletId;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::error::Error;
use crate::lifecycle::{Lifecycle, PollSettings, Settings};
use crate::state::SnapshotStore;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&config) {
        eprintln!("failed to open log file {}: {e}", config.log_path.display());
        return ExitCode::FAILURE;
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "operation failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Console output plus an append-only log file of every milestone.
fn init_tracing(config: &AppConfig) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), Error> {
    // Fails fast on a missing token, before any remote call
    let provider = Arc::new(DigitalOceanProvider::from_env()?);
    let store = SnapshotStore::new(&config.state_path);
    let lifecycle = Lifecycle::new(
        provider,
        store,
        Settings::from(&config),
        PollSettings::from(&config),
    );

    match cli.command {
        Command::Create => {
            let droplet = lifecycle.create().await?;
            println!("droplet {} created", droplet.id);
        }
        Command::Destroy {
            droplet_id,
            skip_snapshot,
        } => {
            let id = match droplet_id {
                Some(id) => DropletId(id),
                None => prompt_droplet_id()?,
            };
            lifecycle.destroy(id, skip_snapshot).await?;
            println!("droplet {id} destroyed");
        }
        Command::Restore => {
            let droplet = lifecycle.restore().await?;
            println!("droplet {} restored", droplet.id);
        }
    }

    Ok(())
}

fn prompt_droplet_id() -> Result<DropletId, Error> {
    print!("Droplet ID to destroy: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    let raw = line.trim();
    raw.parse::<u64>()
        .map(DropletId)
        .map_err(|_| Error::InvalidDropletId(raw.to_string()))
}
