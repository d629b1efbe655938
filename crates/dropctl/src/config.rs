use std::env;
use std::path::PathBuf;

use crate::error::Error;

/// Runtime configuration, loaded from environment variables.
///
/// Only the API token (read by the provider itself) is required; everything
/// else has a default. Parse failures are configuration errors and abort
/// before any provider call.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub droplet_name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    /// When set, `create` provisions a data volume of this size first.
    pub volume_size_gb: Option<u64>,
    pub volume_name: String,
    /// When set, `restore` attaches this existing volume to the new droplet.
    pub restore_volume_id: Option<String>,
    pub state_path: PathBuf,
    pub log_path: PathBuf,
    pub poll_interval_secs: u64,
    pub poll_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            droplet_name: env_or("DO_DROPLET_NAME", "dropctl-droplet"),
            region: env_or("DO_REGION", "blr1"),
            size: env_or("DO_SIZE", "s-1vcpu-1gb"),
            image: env_or("DO_IMAGE", "fedora-39-x64"),
            volume_size_gb: env_parse_opt("DO_VOLUME_SIZE_GB")?,
            volume_name: env_or("DO_VOLUME_NAME", "dropctl-data"),
            restore_volume_id: env::var("DO_RESTORE_VOLUME_ID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            state_path: env_or("DROPCTL_STATE_PATH", "snapshot_id.json").into(),
            log_path: env_or("DROPCTL_LOG_PATH", "dropctl.log").into(),
            poll_interval_secs: env_parse_opt("DROPCTL_POLL_INTERVAL_SECS")?.unwrap_or(10),
            poll_timeout_secs: env_parse_opt("DROPCTL_POLL_TIMEOUT_SECS")?.unwrap_or(600),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.into())
}

fn env_parse_opt(key: &str) -> Result<Option<u64>, Error> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{key} must be an integer, got {raw:?}"))),
        _ => Ok(None),
    }
}
