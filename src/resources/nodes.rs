use crate::{
    Node, ProxmoxClient, ProxmoxResult, core::domain::model::node::RawNode,
};
use tracing::debug;

impl ProxmoxClient {
    /// Lists the nodes of the cluster.
    ///
    /// Nodes reported without a name are called `"unknown"`, and any status
    /// other than `online`/`offline` is reported as [`NodeStatus::Unknown`](crate::NodeStatus::Unknown).
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured, the request fails,
    /// or the response cannot be parsed.
    pub async fn nodes(&self) -> ProxmoxResult<Vec<Node>> {
        let raw: Vec<RawNode> = self
            .api_client
            .get(&["nodes"])
            .await?
            .unwrap_or_default();

        debug!(count = raw.len(), "Listed nodes");
        Ok(raw.into_iter().map(Node::from).collect())
    }
}
