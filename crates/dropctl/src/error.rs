use std::time::Duration;

use dropctl_infra::types::{ActionKind, DropletId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Infra(#[from] dropctl_infra::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file is not valid JSON: {0}")]
    StateFormat(#[from] serde_json::Error),

    #[error("no snapshot recorded yet; run destroy without --skip-snapshot first")]
    NoSnapshot,

    #[error("{kind} action on droplet {droplet_id} errored on the provider side")]
    ActionFailed {
        kind: ActionKind,
        droplet_id: DropletId,
    },

    #[error("timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    #[error("invalid droplet id: {0:?}")]
    InvalidDropletId(String),
}
