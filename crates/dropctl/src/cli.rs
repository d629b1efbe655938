use clap::{Parser, Subcommand};

/// Droplet lifecycle automation for DigitalOcean.
///
/// Each invocation performs one lifecycle operation (create, destroy or
/// restore) and exits. Configuration comes from environment variables
/// (a `.env` file is honoured).
#[derive(Parser)]
#[command(name = "dropctl")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Provision a droplet (and optionally a data volume) and wait until ready
    Create,

    /// Shut down a droplet, detach its volumes, snapshot it and delete it
    Destroy {
        /// Droplet ID to destroy; prompted for interactively when omitted
        droplet_id: Option<u64>,

        /// Skip the snapshot step (the recorded snapshot ID is left untouched)
        #[arg(long)]
        skip_snapshot: bool,
    },

    /// Provision a new droplet from the last recorded snapshot
    Restore,
}
