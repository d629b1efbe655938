use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque provider-side droplet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropletId(pub u64);

impl fmt::Display for DropletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque provider-side block-storage volume identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolumeId(pub String);

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque provider-side snapshot identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub String);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Boot image for a new droplet: a distribution slug or an existing
/// snapshot to restore from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Slug(String),
    Snapshot(SnapshotId),
}

/// Specification for creating a droplet.
#[derive(Debug, Clone)]
pub struct DropletSpec {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: ImageSource,
    pub ssh_keys: Vec<u64>,
    pub volumes: Vec<VolumeId>,
}

/// Specification for creating a block-storage volume.
#[derive(Debug, Clone)]
pub struct VolumeSpec {
    pub name: String,
    pub region: String,
    pub size_gb: u64,
}

/// Droplet status and metadata returned from the provider.
///
/// `volume_ids` is authoritative on the provider side; detach completion is
/// observed by this list shrinking, not by an action record.
#[derive(Debug, Clone)]
pub struct Droplet {
    pub id: DropletId,
    pub name: String,
    pub status: String,
    pub volume_ids: Vec<VolumeId>,
}

/// An asynchronous provider-side operation record.
#[derive(Debug, Clone)]
pub struct Action {
    pub id: u64,
    pub kind: ActionKind,
    pub status: ActionStatus,
}

/// Known action kinds driven by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Shutdown,
    Snapshot,
    Attach,
    Detach,
    Destroy,
    Other(String),
}

impl ActionKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "create" => Self::Create,
            "shutdown" | "power_off" => Self::Shutdown,
            "snapshot" => Self::Snapshot,
            "attach_volume" | "attach" => Self::Attach,
            "detach_volume" | "detach" => Self::Detach,
            "destroy" => Self::Destroy,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Shutdown => "shutdown",
            Self::Snapshot => "snapshot",
            Self::Attach => "attach",
            Self::Detach => "detach",
            Self::Destroy => "destroy",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-reported action status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    InProgress,
    Completed,
    Errored,
    Unknown,
}

impl ActionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "in-progress" => Self::InProgress,
            "completed" => Self::Completed,
            "errored" => Self::Errored,
            _ => Self::Unknown,
        }
    }
}

/// A point-in-time droplet disk image.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub name: String,
}

/// An SSH public key registered on the account.
#[derive(Debug, Clone)]
pub struct SshKey {
    pub id: u64,
    pub name: String,
}

/// A freshly created block-storage volume.
#[derive(Debug, Clone)]
pub struct Volume {
    pub id: VolumeId,
    pub name: String,
    pub size_gb: u64,
}
