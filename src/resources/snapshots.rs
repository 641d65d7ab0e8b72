use super::guest_path;
use crate::{
    GuestType, ProxmoxClient, ProxmoxResult, Snapshot,
    core::domain::model::snapshot::{RawSnapshot, user_snapshots},
};
use serde::de::IgnoredAny;
use tracing::debug;

impl ProxmoxClient {
    /// Lists the snapshots of a guest, without the `current` pseudo-snapshot.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured, the request fails,
    /// or the response cannot be parsed.
    pub async fn snapshots(
        &self,
        node: &str,
        guest_type: GuestType,
        vmid: u32,
    ) -> ProxmoxResult<Vec<Snapshot>> {
        let id = vmid.to_string();
        let raw: Vec<RawSnapshot> = self
            .api_client
            .get(&guest_path(node, guest_type, &id, &["snapshot"]))
            .await?
            .unwrap_or_default();

        let snapshots = user_snapshots(raw);
        debug!(node, vmid, count = snapshots.len(), "Listed snapshots");
        Ok(snapshots)
    }

    /// Takes a snapshot of a guest under `name`.
    ///
    /// Name collisions are left to the API to reject.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured or the request fails.
    pub async fn create_snapshot(
        &self,
        node: &str,
        guest_type: GuestType,
        vmid: u32,
        name: &str,
    ) -> ProxmoxResult<()> {
        let id = vmid.to_string();
        let _: Option<IgnoredAny> = self
            .api_client
            .post(
                &guest_path(node, guest_type, &id, &["snapshot"]),
                Some(&[("snapname", name)]),
            )
            .await?;

        debug!(node, vmid, snapshot = name, "Snapshot creation accepted");
        Ok(())
    }

    /// Deletes the snapshot `name` of a guest.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured or the request fails.
    pub async fn delete_snapshot(
        &self,
        node: &str,
        guest_type: GuestType,
        vmid: u32,
        name: &str,
    ) -> ProxmoxResult<()> {
        let id = vmid.to_string();
        let _: Option<IgnoredAny> = self
            .api_client
            .delete(&guest_path(node, guest_type, &id, &["snapshot", name]))
            .await?;

        debug!(node, vmid, snapshot = name, "Snapshot deletion accepted");
        Ok(())
    }

    /// Rolls a guest back to the snapshot `name`.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured or the request fails.
    pub async fn restore_snapshot(
        &self,
        node: &str,
        guest_type: GuestType,
        vmid: u32,
        name: &str,
    ) -> ProxmoxResult<()> {
        let id = vmid.to_string();
        let _: Option<IgnoredAny> = self
            .api_client
            .post(
                &guest_path(node, guest_type, &id, &["snapshot", name, "rollback"]),
                None,
            )
            .await?;

        debug!(node, vmid, snapshot = name, "Snapshot rollback accepted");
        Ok(())
    }
}
