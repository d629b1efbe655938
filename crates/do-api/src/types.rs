use serde::{Deserialize, Serialize};

// ── Droplet types ────────────────────────────────────────────────────

/// Boot image reference: a distribution slug (`"fedora-39-x64"`) or a
/// numeric snapshot/image ID. The create endpoint accepts either form.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ImageRef {
    Slug(String),
    Id(u64),
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateDropletRequest {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: ImageRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_keys: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,
    pub backups: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub volume_ids: Vec<String>,
}

// ── Action types ─────────────────────────────────────────────────────

/// Request body for `POST /droplets/{id}/actions`. The `name` field is
/// only meaningful for `type = "snapshot"`.
#[derive(Debug, Clone, Serialize)]
pub struct DropletActionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request body for `POST /volumes/{id}/actions`.
#[derive(Debug, Clone, Serialize)]
pub struct VolumeActionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub droplet_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
}

// ── Volume types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CreateVolumeRequest {
    pub name: String,
    pub region: String,
    pub size_gigabytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub id: String,
    pub name: String,
    pub size_gigabytes: u64,
}

// ── Snapshot / SSH key types ─────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SshKey {
    pub id: u64,
    pub name: String,
}

// ── Response envelopes ───────────────────────────────────────────────
//
// The API wraps every payload in a single-key object.

#[derive(Debug, Deserialize)]
pub(crate) struct DropletEnvelope {
    pub droplet: Droplet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionEnvelope {
    pub action: Action,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionsEnvelope {
    pub actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VolumeEnvelope {
    pub volume: Volume,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotEnvelope {
    pub snapshot: Snapshot,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotsEnvelope {
    pub snapshots: Vec<Snapshot>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SshKeysEnvelope {
    pub ssh_keys: Vec<SshKey>,
}
