//! Remote operations exposed on [`ProxmoxClient`](crate::ProxmoxClient), grouped
//! by the API resource they act on.

mod guests;
mod nodes;
mod snapshots;

use crate::GuestType;

/// Path of a guest below `api2/json/`, followed by `rest`.
fn guest_path<'a>(
    node: &'a str,
    guest_type: GuestType,
    vmid: &'a str,
    rest: &[&'a str],
) -> Vec<&'a str> {
    let mut path = vec!["nodes", node, guest_type.as_str(), vmid];
    path.extend_from_slice(rest);
    path
}
