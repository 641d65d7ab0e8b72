//! Snapshot and lifecycle operations using the Proxmox client.
//!
//! Usage: `snapshot_management <node> <qemu|lxc> <vmid> [snapshot-name]`
//!
//! Lists the snapshots of a guest, takes a new one, and demonstrates the
//! lifecycle calls. Every mutating call only waits for the API to accept the
//! request, so the effect may show up a little later.

use pve_control::{GuestStatus, GuestType, ProxmoxClientBuilder, ProxmoxResult, ValidationError};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ProxmoxResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (node, guest_type, vmid) = match args.as_slice() {
        [node, guest_type, vmid, ..] => (
            node.clone(),
            guest_type.parse::<GuestType>()?,
            vmid.parse::<u32>().map_err(|_| {
                ValidationError::Format(format!("Invalid vmid '{}'", vmid))
            })?,
        ),
        _ => {
            eprintln!("usage: snapshot_management <node> <qemu|lxc> <vmid> [snapshot-name]");
            return Ok(());
        }
    };
    let snapshot_name = args
        .get(3)
        .cloned()
        .unwrap_or_else(|| "pve-control-demo".to_string());

    let client = ProxmoxClientBuilder::from_env()
        .rate_limit(5, 10)
        .build()?;

    // 1. Existing snapshots.
    println!("Snapshots of {} {} on '{}':", guest_type, vmid, node);
    for snapshot in client.snapshots(&node, guest_type, vmid).await? {
        println!(
            "  - {} (created: {}, parent: {}) {}",
            snapshot.name,
            snapshot
                .created_at
                .map_or_else(|| "n/a".to_string(), |t| t.to_string()),
            snapshot.parent.as_deref().unwrap_or("-"),
            snapshot.description.as_deref().unwrap_or("")
        );
    }

    // 2. Take a new snapshot.
    client
        .create_snapshot(&node, guest_type, vmid, &snapshot_name)
        .await?;
    println!("\nSnapshot '{}' requested", snapshot_name);

    // Snapshot tasks run in the background; give it a moment.
    tokio::time::sleep(Duration::from_secs(5)).await;

    // 3. Lifecycle: reboot the guest if it is running.
    let detail = client.guest_detail(&node, guest_type, vmid).await?;
    println!("Guest '{}' is {}", detail.name, detail.status);
    if detail.status_kind() == GuestStatus::Running {
        client.restart_guest(&node, guest_type, vmid).await?;
        println!("Reboot requested");
    }

    // 4. Roll back and clean up.
    client
        .restore_snapshot(&node, guest_type, vmid, &snapshot_name)
        .await?;
    println!("Rollback to '{}' requested", snapshot_name);

    tokio::time::sleep(Duration::from_secs(5)).await;

    client
        .delete_snapshot(&node, guest_type, vmid, &snapshot_name)
        .await?;
    println!("Deletion of '{}' requested", snapshot_name);

    Ok(())
}
