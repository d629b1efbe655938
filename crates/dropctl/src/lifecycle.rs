use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{Instant, sleep};
use tracing::{error, info, warn};

use dropctl_infra::DropletProvider;
use dropctl_infra::types::{
    ActionKind, ActionStatus, Droplet, DropletId, DropletSpec, ImageSource, VolumeId, VolumeSpec,
};

use crate::config::AppConfig;
use crate::error::Error;
use crate::state::{SnapshotRecord, SnapshotStore};

/// Provisioning parameters for new droplets and volumes.
#[derive(Debug, Clone)]
pub struct Settings {
    pub droplet_name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    pub volume_size_gb: Option<u64>,
    pub volume_name: String,
    pub restore_volume_id: Option<VolumeId>,
}

impl From<&AppConfig> for Settings {
    fn from(config: &AppConfig) -> Self {
        Self {
            droplet_name: config.droplet_name.clone(),
            region: config.region.clone(),
            size: config.size.clone(),
            image: config.image.clone(),
            volume_size_gb: config.volume_size_gb,
            volume_name: config.volume_name.clone(),
            restore_volume_id: config.restore_volume_id.clone().map(VolumeId),
        }
    }
}

/// Bounded polling parameters shared by all wait points.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl From<&AppConfig> for PollSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.poll_interval_secs),
            timeout: Duration::from_secs(config.poll_timeout_secs),
        }
    }
}

/// Sequences droplet lifecycle operations against a provider.
///
/// Each operation is a strictly ordered series of provider calls with
/// polling at every asynchronous step. The only durable local state is the
/// last-known snapshot record in `SnapshotStore`.
pub struct Lifecycle {
    provider: Arc<dyn DropletProvider>,
    store: SnapshotStore,
    settings: Settings,
    poll: PollSettings,
}

impl Lifecycle {
    pub fn new(
        provider: Arc<dyn DropletProvider>,
        store: SnapshotStore,
        settings: Settings,
        poll: PollSettings,
    ) -> Self {
        Self {
            provider,
            store,
            settings,
            poll,
        }
    }

    /// Provision a data volume (when configured) and a droplet with all
    /// account SSH keys attached, then wait for the create action. A fresh
    /// volume is deleted again if droplet provisioning fails.
    pub async fn create(&self) -> Result<Droplet, Error> {
        let mut fresh_volume = None;
        if let Some(size_gb) = self.settings.volume_size_gb {
            let volume = self
                .provider
                .create_volume(&VolumeSpec {
                    name: self.settings.volume_name.clone(),
                    region: self.settings.region.clone(),
                    size_gb,
                })
                .await?;
            info!(volume_id = %volume.id, size_gb, "data volume provisioned");
            fresh_volume = Some(volume.id);
        }

        let ssh_keys = self.provider.list_ssh_keys().await?;
        info!(count = ssh_keys.len(), "attaching account ssh keys");

        let spec = DropletSpec {
            name: self.settings.droplet_name.clone(),
            region: self.settings.region.clone(),
            size: self.settings.size.clone(),
            image: ImageSource::Slug(self.settings.image.clone()),
            ssh_keys: ssh_keys.into_iter().map(|k| k.id).collect(),
            volumes: fresh_volume.iter().cloned().collect(),
        };

        match self.provision(&spec).await {
            Ok(droplet) => Ok(droplet),
            Err(err) => {
                if let Some(volume_id) = fresh_volume {
                    warn!(volume_id = %volume_id, "droplet provisioning failed, deleting fresh data volume");
                    if let Err(cleanup) = self.provider.delete_volume(&volume_id).await {
                        warn!(volume_id = %volume_id, error = %cleanup, "volume cleanup failed");
                    }
                }
                Err(err)
            }
        }
    }

    /// Shut down, detach volumes, snapshot (unless skipped) and delete.
    ///
    /// Steps are strictly ordered: the snapshot only starts after the
    /// shutdown action completed, and deletion only after every volume
    /// detachment was confirmed, so volumes survive the droplet.
    pub async fn destroy(&self, droplet_id: DropletId, skip_snapshot: bool) -> Result<(), Error> {
        let droplet = self.provider.get_droplet(droplet_id).await?;
        info!(droplet_id = %droplet_id, status = %droplet.status, "destroying droplet");

        self.provider.shutdown_droplet(droplet_id).await?;
        self.wait_for_action(droplet_id, ActionKind::Shutdown)
            .await?;
        info!(droplet_id = %droplet_id, "droplet powered off");

        // Detach completion is observed on the droplet's volume list, not
        // as a terminal action record.
        let droplet = self.provider.get_droplet(droplet_id).await?;
        for volume_id in &droplet.volume_ids {
            self.provider.detach_volume(volume_id, droplet_id).await?;
        }
        for volume_id in &droplet.volume_ids {
            self.wait_for_detach(droplet_id, volume_id).await?;
            info!(droplet_id = %droplet_id, volume_id = %volume_id, "volume detached");
        }

        if skip_snapshot {
            info!(droplet_id = %droplet_id, "snapshot skipped");
        } else {
            self.snapshot_and_record(droplet_id).await?;
        }

        self.provider.delete_droplet(droplet_id).await?;
        info!(droplet_id = %droplet_id, "droplet destroyed");
        Ok(())
    }

    /// Provision a new droplet from the last recorded snapshot, attaching
    /// the configured restore volume (if any).
    pub async fn restore(&self) -> Result<Droplet, Error> {
        let record = self.store.load()?.ok_or(Error::NoSnapshot)?;

        let snapshot = self.provider.get_snapshot(&record.snapshot_id).await?;
        info!(snapshot_id = %snapshot.id, snapshot_name = %snapshot.name, "restoring from snapshot");

        let ssh_keys = self.provider.list_ssh_keys().await?;
        let spec = DropletSpec {
            name: self.settings.droplet_name.clone(),
            region: self.settings.region.clone(),
            size: self.settings.size.clone(),
            image: ImageSource::Snapshot(snapshot.id),
            ssh_keys: ssh_keys.into_iter().map(|k| k.id).collect(),
            volumes: self.settings.restore_volume_id.iter().cloned().collect(),
        };

        self.provision(&spec).await
    }

    /// Create a droplet and wait for its create action. On any failure
    /// after the ID was assigned, best-effort delete the partial droplet
    /// exactly once; a cleanup failure is logged and the original error
    /// propagated.
    async fn provision(&self, spec: &DropletSpec) -> Result<Droplet, Error> {
        let droplet = self.provider.create_droplet(spec).await?;
        info!(droplet_id = %droplet.id, "droplet provisioned, waiting for create action");

        if let Err(err) = self.wait_for_action(droplet.id, ActionKind::Create).await {
            warn!(droplet_id = %droplet.id, error = %err, "create did not complete, deleting partial droplet");
            if let Err(cleanup) = self.provider.delete_droplet(droplet.id).await {
                warn!(droplet_id = %droplet.id, error = %cleanup, "cleanup delete failed");
            }
            return Err(err);
        }

        info!(droplet_id = %droplet.id, "droplet active");
        Ok(droplet)
    }

    /// Take a snapshot named after the droplet and timestamp, wait for it,
    /// and overwrite the persisted snapshot record. A snapshot that never
    /// shows up in the listing is reported but does not abort the destroy.
    async fn snapshot_and_record(&self, droplet_id: DropletId) -> Result<(), Error> {
        let name = format!(
            "Snapshot-{droplet_id}-{}",
            Utc::now().format("%Y%m%d%H%M%S")
        );
        self.provider.snapshot_droplet(droplet_id, &name).await?;
        self.wait_for_action(droplet_id, ActionKind::Snapshot)
            .await?;
        info!(droplet_id = %droplet_id, snapshot_name = %name, "snapshot completed");

        let snapshots = self.provider.list_snapshots().await?;
        match snapshots.into_iter().find(|s| s.name == name) {
            Some(snapshot) => {
                self.store.save(&SnapshotRecord {
                    snapshot_id: snapshot.id.clone(),
                    droplet_id,
                    saved_at: Utc::now(),
                })?;
                info!(snapshot_id = %snapshot.id, "last-known snapshot recorded");
            }
            None => {
                error!(snapshot_name = %name, "snapshot missing from listing; last-known snapshot not updated");
            }
        }
        Ok(())
    }

    /// Poll the droplet's action list until the awaited kind completes.
    /// An action observed as errored fails immediately; passing the
    /// deadline fails with a timeout.
    async fn wait_for_action(&self, droplet_id: DropletId, kind: ActionKind) -> Result<(), Error> {
        let deadline = Instant::now() + self.poll.timeout;
        loop {
            let actions = self.provider.list_droplet_actions(droplet_id).await?;
            if let Some(action) = actions.iter().find(|a| a.kind == kind) {
                match action.status {
                    ActionStatus::Completed => return Ok(()),
                    ActionStatus::Errored => {
                        return Err(Error::ActionFailed { kind, droplet_id });
                    }
                    ActionStatus::InProgress | ActionStatus::Unknown => {}
                }
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout {
                    what: format!("{kind} action on droplet {droplet_id}"),
                    timeout: self.poll.timeout,
                });
            }
            sleep(self.poll.interval).await;
        }
    }

    /// Poll the droplet until the volume no longer appears in its
    /// attached-volume list. Other volumes still attached are ignored.
    async fn wait_for_detach(
        &self,
        droplet_id: DropletId,
        volume_id: &VolumeId,
    ) -> Result<(), Error> {
        let deadline = Instant::now() + self.poll.timeout;
        loop {
            let droplet = self.provider.get_droplet(droplet_id).await?;
            if !droplet.volume_ids.contains(volume_id) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout {
                    what: format!("volume {volume_id} to detach from droplet {droplet_id}"),
                    timeout: self.poll.timeout,
                });
            }
            sleep(self.poll.interval).await;
        }
    }
}
