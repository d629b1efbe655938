use async_trait::async_trait;
use tracing::info;

use crate::types::{
    Action, ActionKind, ActionStatus, Droplet, DropletId, DropletSpec, ImageSource, Snapshot,
    SnapshotId, SshKey, Volume, VolumeId, VolumeSpec,
};
use crate::{DropletProvider, Error, Result};

/// DigitalOcean droplet provider.
///
/// Delegates to `do_api::DoClient` for all HTTP calls.
pub struct DigitalOceanProvider {
    client: do_api::DoClient,
}

impl DigitalOceanProvider {
    /// Create from env vars: `DO_API_TOKEN` (required, non-empty).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let token = std::env::var("DO_API_TOKEN")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::MissingEnv("DO_API_TOKEN".into()))?;

        Ok(Self::new(token))
    }

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: do_api::DoClient::new(token),
        }
    }

    fn parse_droplet(droplet: do_api::Droplet) -> Droplet {
        Droplet {
            id: DropletId(droplet.id),
            name: droplet.name,
            status: droplet.status,
            volume_ids: droplet.volume_ids.into_iter().map(VolumeId).collect(),
        }
    }

    fn parse_action(action: do_api::Action) -> Action {
        Action {
            id: action.id,
            kind: ActionKind::parse(&action.kind),
            status: ActionStatus::parse(&action.status),
        }
    }

    fn image_ref(image: &ImageSource) -> do_api::ImageRef {
        match image {
            ImageSource::Slug(slug) => do_api::ImageRef::Slug(slug.clone()),
            // Droplet snapshot IDs are numeric; fall back to the raw string
            // if the provider ever hands back a non-numeric one.
            ImageSource::Snapshot(id) => match id.0.parse::<u64>() {
                Ok(n) => do_api::ImageRef::Id(n),
                Err(_) => do_api::ImageRef::Slug(id.0.clone()),
            },
        }
    }
}

#[async_trait]
impl DropletProvider for DigitalOceanProvider {
    async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        let keys = self.client.list_ssh_keys().await?;
        Ok(keys
            .into_iter()
            .map(|k| SshKey { id: k.id, name: k.name })
            .collect())
    }

    async fn create_droplet(&self, spec: &DropletSpec) -> Result<Droplet> {
        let volumes = if spec.volumes.is_empty() {
            None
        } else {
            Some(spec.volumes.iter().map(|v| v.0.clone()).collect())
        };

        let droplet = self
            .client
            .create_droplet(&do_api::CreateDropletRequest {
                name: spec.name.clone(),
                region: spec.region.clone(),
                size: spec.size.clone(),
                image: Self::image_ref(&spec.image),
                ssh_keys: spec.ssh_keys.clone(),
                volumes,
                backups: false,
            })
            .await?;

        info!(droplet_id = droplet.id, status = %droplet.status, "digitalocean: droplet created");

        Ok(Self::parse_droplet(droplet))
    }

    async fn get_droplet(&self, id: DropletId) -> Result<Droplet> {
        let droplet = self
            .client
            .get_droplet(id.0)
            .await
            .map_err(|e| Error::from_api(e, "droplet", id))?;
        Ok(Self::parse_droplet(droplet))
    }

    async fn delete_droplet(&self, id: DropletId) -> Result<()> {
        self.client.delete_droplet(id.0).await?;
        info!(droplet_id = %id, "digitalocean: droplet deleted");
        Ok(())
    }

    async fn shutdown_droplet(&self, id: DropletId) -> Result<Action> {
        let action = self
            .client
            .droplet_action(
                id.0,
                &do_api::DropletActionRequest {
                    kind: "shutdown".into(),
                    name: None,
                },
            )
            .await
            .map_err(|e| Error::from_api(e, "droplet", id))?;

        info!(droplet_id = %id, action_id = action.id, "digitalocean: shutdown initiated");
        Ok(Self::parse_action(action))
    }

    async fn snapshot_droplet(&self, id: DropletId, name: &str) -> Result<Action> {
        let action = self
            .client
            .droplet_action(
                id.0,
                &do_api::DropletActionRequest {
                    kind: "snapshot".into(),
                    name: Some(name.to_string()),
                },
            )
            .await
            .map_err(|e| Error::from_api(e, "droplet", id))?;

        info!(droplet_id = %id, action_id = action.id, snapshot_name = name, "digitalocean: snapshot initiated");
        Ok(Self::parse_action(action))
    }

    async fn list_droplet_actions(&self, id: DropletId) -> Result<Vec<Action>> {
        let actions = self
            .client
            .list_droplet_actions(id.0)
            .await
            .map_err(|e| Error::from_api(e, "droplet", id))?;
        Ok(actions.into_iter().map(Self::parse_action).collect())
    }

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<Volume> {
        let volume = self
            .client
            .create_volume(&do_api::CreateVolumeRequest {
                name: spec.name.clone(),
                region: spec.region.clone(),
                size_gigabytes: spec.size_gb,
            })
            .await?;

        info!(volume_id = %volume.id, size_gb = volume.size_gigabytes, "digitalocean: volume created");

        Ok(Volume {
            id: VolumeId(volume.id),
            name: volume.name,
            size_gb: volume.size_gigabytes,
        })
    }

    async fn delete_volume(&self, id: &VolumeId) -> Result<()> {
        self.client.delete_volume(&id.0).await?;
        info!(volume_id = %id, "digitalocean: volume deleted");
        Ok(())
    }

    async fn detach_volume(&self, volume_id: &VolumeId, droplet_id: DropletId) -> Result<Action> {
        let action = self
            .client
            .volume_action(
                &volume_id.0,
                &do_api::VolumeActionRequest {
                    kind: "detach".into(),
                    droplet_id: droplet_id.0,
                    region: None,
                },
            )
            .await
            .map_err(|e| Error::from_api(e, "volume", volume_id))?;

        info!(volume_id = %volume_id, droplet_id = %droplet_id, "digitalocean: detach initiated");
        Ok(Self::parse_action(action))
    }

    async fn list_snapshots(&self) -> Result<Vec<Snapshot>> {
        let snapshots = self.client.list_droplet_snapshots().await?;
        Ok(snapshots
            .into_iter()
            .map(|s| Snapshot {
                id: SnapshotId(s.id),
                name: s.name,
            })
            .collect())
    }

    async fn get_snapshot(&self, id: &SnapshotId) -> Result<Snapshot> {
        let snapshot = self
            .client
            .get_snapshot(&id.0)
            .await
            .map_err(|e| Error::from_api(e, "snapshot", id))?;
        Ok(Snapshot {
            id: SnapshotId(snapshot.id),
            name: snapshot.name,
        })
    }
}
