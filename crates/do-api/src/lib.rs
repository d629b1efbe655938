//! Typed Rust client for the DigitalOcean v2 API.
//!
//! Covers the subset needed for droplet lifecycle automation:
//! droplets (create, get, delete), droplet actions (shutdown, snapshot),
//! volumes (create, delete, detach), snapshots and account SSH keys.

mod types;

pub use types::*;

const BASE_URL: &str = "https://api.digitalocean.com/v2";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("digitalocean api request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("digitalocean api {endpoint} returned {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

impl Error {
    /// True if the API rejected the request with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Api { status, .. } if status.as_u16() == 404
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Client for the DigitalOcean v2 REST API.
#[derive(Clone)]
pub struct DoClient {
    token: String,
    http: reqwest::Client,
}

impl DoClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    fn url(path: &str) -> String {
        format!("{BASE_URL}{path}")
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api { endpoint, status, body });
        }
        Ok(resp)
    }

    /// Like `check` but also treats 404 as success (for delete idempotency).
    async fn check_allow_404(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() && status.as_u16() != 404 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api { endpoint, status, body });
        }
        Ok(resp)
    }

    // ── Droplets ─────────────────────────────────────────────────────

    pub async fn create_droplet(&self, req: &CreateDropletRequest) -> Result<Droplet> {
        let resp = self
            .http
            .post(Self::url("/droplets"))
            .header("Authorization", self.auth())
            .json(req)
            .send()
            .await?;

        let env: DropletEnvelope = Self::check(resp, "create droplet")
            .await?
            .json()
            .await?;
        Ok(env.droplet)
    }

    pub async fn get_droplet(&self, droplet_id: u64) -> Result<Droplet> {
        let resp = self
            .http
            .get(Self::url(&format!("/droplets/{droplet_id}")))
            .header("Authorization", self.auth())
            .send()
            .await?;

        let env: DropletEnvelope = Self::check(resp, "get droplet").await?.json().await?;
        Ok(env.droplet)
    }

    pub async fn delete_droplet(&self, droplet_id: u64) -> Result<()> {
        let resp = self
            .http
            .delete(Self::url(&format!("/droplets/{droplet_id}")))
            .header("Authorization", self.auth())
            .send()
            .await?;

        Self::check_allow_404(resp, "delete droplet").await?;
        Ok(())
    }

    // ── Droplet actions ──────────────────────────────────────────────

    pub async fn droplet_action(
        &self,
        droplet_id: u64,
        req: &DropletActionRequest,
    ) -> Result<Action> {
        let resp = self
            .http
            .post(Self::url(&format!("/droplets/{droplet_id}/actions")))
            .header("Authorization", self.auth())
            .json(req)
            .send()
            .await?;

        let env: ActionEnvelope = Self::check(resp, "droplet action").await?.json().await?;
        Ok(env.action)
    }

    pub async fn list_droplet_actions(&self, droplet_id: u64) -> Result<Vec<Action>> {
        let resp = self
            .http
            .get(Self::url(&format!("/droplets/{droplet_id}/actions")))
            .header("Authorization", self.auth())
            .send()
            .await?;

        let env: ActionsEnvelope = Self::check(resp, "list droplet actions")
            .await?
            .json()
            .await?;
        Ok(env.actions)
    }

    // ── Volumes ──────────────────────────────────────────────────────

    pub async fn create_volume(&self, req: &CreateVolumeRequest) -> Result<Volume> {
        let resp = self
            .http
            .post(Self::url("/volumes"))
            .header("Authorization", self.auth())
            .json(req)
            .send()
            .await?;

        let env: VolumeEnvelope = Self::check(resp, "create volume").await?.json().await?;
        Ok(env.volume)
    }

    pub async fn delete_volume(&self, volume_id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(Self::url(&format!("/volumes/{volume_id}")))
            .header("Authorization", self.auth())
            .send()
            .await?;

        Self::check_allow_404(resp, "delete volume").await?;
        Ok(())
    }

    pub async fn volume_action(
        &self,
        volume_id: &str,
        req: &VolumeActionRequest,
    ) -> Result<Action> {
        let resp = self
            .http
            .post(Self::url(&format!("/volumes/{volume_id}/actions")))
            .header("Authorization", self.auth())
            .json(req)
            .send()
            .await?;

        let env: ActionEnvelope = Self::check(resp, "volume action").await?.json().await?;
        Ok(env.action)
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub async fn list_droplet_snapshots(&self) -> Result<Vec<Snapshot>> {
        let resp = self
            .http
            .get(Self::url("/snapshots"))
            .header("Authorization", self.auth())
            .query(&[("resource_type", "droplet")])
            .send()
            .await?;

        let env: SnapshotsEnvelope = Self::check(resp, "list snapshots").await?.json().await?;
        Ok(env.snapshots)
    }

    pub async fn get_snapshot(&self, snapshot_id: &str) -> Result<Snapshot> {
        let resp = self
            .http
            .get(Self::url(&format!("/snapshots/{snapshot_id}")))
            .header("Authorization", self.auth())
            .send()
            .await?;

        let env: SnapshotEnvelope = Self::check(resp, "get snapshot").await?.json().await?;
        Ok(env.snapshot)
    }

    // ── SSH keys ─────────────────────────────────────────────────────

    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        let resp = self
            .http
            .get(Self::url("/account/keys"))
            .header("Authorization", self.auth())
            .send()
            .await?;

        let env: SshKeysEnvelope = Self::check(resp, "list ssh keys").await?.json().await?;
        Ok(env.ssh_keys)
    }
}
