//! Cluster overview using the Proxmox client.
//!
//! This program reads its connection settings from the environment (or a
//! `.env` file), lists every node of the cluster with the guests it hosts,
//! and prints the runtime detail of each running guest.
//!
//! Set `RUST_LOG=pve_control=debug` to see every API request.

use pve_control::{GuestStatus, ProxmoxClientBuilder, ProxmoxResult};
use tracing_subscriber::EnvFilter;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[tokio::main]
async fn main() -> ProxmoxResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // PROXMOX_HOST, PROXMOX_API_TOKEN and PROXMOX_INSECURE.
    let client = ProxmoxClientBuilder::from_env().build()?;
    if !client.is_configured() {
        eprintln!("Set PROXMOX_HOST and PROXMOX_API_TOKEN first");
        return Ok(());
    }

    // 1. List the nodes of the cluster.
    let nodes = client.nodes().await?;
    println!("Found {} node(s)", nodes.len());

    for node in &nodes {
        println!("\n{} ({})", node.name, node.status);

        // 2. List VMs and containers together, sorted by id.
        let guests = client.guests(&node.name).await?;
        if guests.is_empty() {
            println!("  no guests");
            continue;
        }

        for guest in &guests {
            println!(
                "  {:>5} {:<4} {:<8} {}",
                guest.id, guest.guest_type, guest.status, guest.name
            );

            if guest.status != GuestStatus::Running {
                continue;
            }

            // 3. Runtime detail for running guests.
            let detail = client
                .guest_detail(&node.name, guest.guest_type, guest.id)
                .await?;
            println!(
                "        CPU: {:.1}%, Mem: {:.1}/{:.1} GB, Uptime: {}s",
                detail.cpu * 100.0,
                detail.mem as f64 / GIB,
                detail.max_mem as f64 / GIB,
                detail.uptime
            );
        }
    }

    Ok(())
}
