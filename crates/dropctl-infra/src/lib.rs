pub mod digitalocean;
pub mod types;

use async_trait::async_trait;
use types::{
    Action, Droplet, DropletId, DropletSpec, Snapshot, SnapshotId, SshKey, Volume, VolumeId,
    VolumeSpec,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("provider error: {0}")]
    Do(#[from] do_api::Error),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("missing env var: {0}")]
    MissingEnv(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map a client-level 404 onto a typed not-found for the given resource.
    fn from_api(err: do_api::Error, resource: &'static str, id: impl ToString) -> Self {
        if err.is_not_found() {
            Error::NotFound {
                resource,
                id: id.to_string(),
            }
        } else {
            Error::Do(err)
        }
    }
}

/// Provider-agnostic interface for droplet lifecycle operations.
///
/// The orchestrator only talks to this trait; the DigitalOcean
/// implementation owns its own configuration, loaded from environment
/// variables at construction. Tests drive the orchestrator through an
/// in-memory fake.
#[async_trait]
pub trait DropletProvider: Send + Sync + 'static {
    /// List all SSH keys registered on the account.
    async fn list_ssh_keys(&self) -> Result<Vec<SshKey>>;

    /// Provision a droplet. The returned handle carries the assigned ID;
    /// the create action may still be in progress.
    async fn create_droplet(&self, spec: &DropletSpec) -> Result<Droplet>;

    /// Fetch current droplet state, including attached volume IDs.
    async fn get_droplet(&self, id: DropletId) -> Result<Droplet>;

    /// Delete a droplet permanently. Deleting an already-absent droplet
    /// succeeds.
    async fn delete_droplet(&self, id: DropletId) -> Result<()>;

    /// Issue an asynchronous shutdown and return its action record.
    async fn shutdown_droplet(&self, id: DropletId) -> Result<Action>;

    /// Issue an asynchronous snapshot with the given name.
    async fn snapshot_droplet(&self, id: DropletId, name: &str) -> Result<Action>;

    /// List the action history of a droplet, most recent first.
    async fn list_droplet_actions(&self, id: DropletId) -> Result<Vec<Action>>;

    /// Provision a block-storage volume.
    async fn create_volume(&self, spec: &VolumeSpec) -> Result<Volume>;

    /// Delete a volume permanently. Deleting an already-absent volume
    /// succeeds.
    async fn delete_volume(&self, id: &VolumeId) -> Result<()>;

    /// Issue an asynchronous detach of a volume from a droplet.
    async fn detach_volume(&self, volume_id: &VolumeId, droplet_id: DropletId) -> Result<Action>;

    /// List all droplet snapshots on the account.
    async fn list_snapshots(&self) -> Result<Vec<Snapshot>>;

    /// Fetch a snapshot by ID. Absence is `Error::NotFound`.
    async fn get_snapshot(&self, id: &SnapshotId) -> Result<Snapshot>;
}
