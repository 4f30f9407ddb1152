//! Node read and patch operations.

use crate::error::ControllerError;
use crate::resolver::ResolvedCidr;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Node;
use kube::Api;
use kube::api::{Patch, PatchParams};
use serde_json::{Value, json};
use tracing::debug;

/// Access to the Node objects the controller assigns CIDRs to.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Current `spec.podCIDR`, empty when unset
    async fn pod_cidr(&self, name: &str) -> Result<String, ControllerError>;

    /// Set `spec.podCIDR`
    async fn set_pod_cidr(&self, name: &str, cidr: &ResolvedCidr) -> Result<(), ControllerError>;
}

/// Pod CIDR of a node object, empty when unset
pub fn pod_cidr_of(node: &Node) -> &str {
    node.spec
        .as_ref()
        .and_then(|spec| spec.pod_cidr.as_deref())
        .unwrap_or_default()
}

/// JSON merge patch body that sets `spec.podCIDR`
pub fn pod_cidr_patch(cidr: &ResolvedCidr) -> Value {
    json!({
        "spec": {
            "podCIDR": cidr.to_string(),
        }
    })
}

/// `NodeClient` backed by the Kubernetes API
#[derive(Clone)]
pub struct KubeNodeClient {
    api: Api<Node>,
}

impl KubeNodeClient {
    pub fn new(api: Api<Node>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NodeClient for KubeNodeClient {
    async fn pod_cidr(&self, name: &str) -> Result<String, ControllerError> {
        let node = self.api.get(name).await?;
        Ok(pod_cidr_of(&node).to_string())
    }

    async fn set_pod_cidr(&self, name: &str, cidr: &ResolvedCidr) -> Result<(), ControllerError> {
        debug!("Patching node {} with podCIDR {}", name, cidr);
        let patch = pod_cidr_patch(cidr);
        let pp = PatchParams::default();
        self.api.patch(name, &pp, &Patch::Merge(&patch)).await?;
        Ok(())
    }
}
