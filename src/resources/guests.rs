use super::guest_path;
use crate::{
    Guest, GuestDetail, GuestType, ProxmoxClient, ProxmoxResult,
    core::domain::model::guest::{RawGuest, RawGuestStatus},
};
use serde::de::IgnoredAny;
use tracing::debug;

/// Power actions exposed under `status/`.
#[derive(Debug, Clone, Copy)]
enum GuestAction {
    Start,
    Stop,
    Reboot,
}

impl GuestAction {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Reboot => "reboot",
        }
    }
}

impl ProxmoxClient {
    /// Lists all VMs and containers on a node, sorted by id.
    ///
    /// Both collections are fetched concurrently. If either request fails the
    /// whole call fails and nothing is returned. Guests sharing an id across
    /// types keep their fetch order (VMs first).
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured, either request
    /// fails, or either response cannot be parsed.
    pub async fn guests(&self, node: &str) -> ProxmoxResult<Vec<Guest>> {
        let (vms, containers) = tokio::try_join!(
            self.guests_of_type(node, GuestType::Qemu),
            self.guests_of_type(node, GuestType::Lxc)
        )?;

        let mut guests = vms;
        guests.extend(containers);
        guests.sort_by_key(|guest| guest.id);

        debug!(node, count = guests.len(), "Listed guests");
        Ok(guests)
    }

    async fn guests_of_type(
        &self,
        node: &str,
        guest_type: GuestType,
    ) -> ProxmoxResult<Vec<Guest>> {
        let raw: Vec<RawGuest> = self
            .api_client
            .get(&["nodes", node, guest_type.as_str()])
            .await?
            .unwrap_or_default();

        Ok(raw
            .into_iter()
            .map(|guest| guest.into_guest(node, guest_type))
            .collect())
    }

    /// Retrieves the runtime detail of a guest.
    ///
    /// The status is returned as the API reported it; use
    /// [`GuestDetail::status_kind`] for the normalized value.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured, the request fails,
    /// or the response cannot be parsed.
    pub async fn guest_detail(
        &self,
        node: &str,
        guest_type: GuestType,
        vmid: u32,
    ) -> ProxmoxResult<GuestDetail> {
        let id = vmid.to_string();
        let raw: RawGuestStatus = self
            .api_client
            .get(&guest_path(node, guest_type, &id, &["status", "current"]))
            .await?
            .unwrap_or_default();

        Ok(raw.into_detail(node, guest_type, vmid))
    }

    /// Asks the API to start a guest. Returns once the request is accepted;
    /// poll [`ProxmoxClient::guest_detail`] to observe the effect.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured or the request fails.
    pub async fn start_guest(
        &self,
        node: &str,
        guest_type: GuestType,
        vmid: u32,
    ) -> ProxmoxResult<()> {
        self.guest_action(node, guest_type, vmid, GuestAction::Start).await
    }

    /// Asks the API to stop a guest. Returns once the request is accepted.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured or the request fails.
    pub async fn stop_guest(
        &self,
        node: &str,
        guest_type: GuestType,
        vmid: u32,
    ) -> ProxmoxResult<()> {
        self.guest_action(node, guest_type, vmid, GuestAction::Stop).await
    }

    /// Asks the API to reboot a guest. Returns once the request is accepted.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured or the request fails.
    pub async fn restart_guest(
        &self,
        node: &str,
        guest_type: GuestType,
        vmid: u32,
    ) -> ProxmoxResult<()> {
        self.guest_action(node, guest_type, vmid, GuestAction::Reboot).await
    }

    async fn guest_action(
        &self,
        node: &str,
        guest_type: GuestType,
        vmid: u32,
        action: GuestAction,
    ) -> ProxmoxResult<()> {
        let id = vmid.to_string();
        let _: Option<IgnoredAny> = self
            .api_client
            .post(
                &guest_path(node, guest_type, &id, &["status", action.as_str()]),
                None,
            )
            .await?;

        debug!(node, %guest_type, vmid, action = action.as_str(), "Guest action accepted");
        Ok(())
    }
}
