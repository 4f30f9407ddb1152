//! Test utilities for unit testing the reconciler
//!
//! This module provides helpers for creating test nodes, an in-memory node
//! store and a failure sink that records what it was given.

#[cfg(test)]
use crate::error::{ControllerError, FailureBucket};
#[cfg(test)]
use crate::metrics::FailureSink;
#[cfg(test)]
use crate::node::NodeClient;
#[cfg(test)]
use crate::reconciler::Reconciler;
#[cfg(test)]
use crate::resolver::{NodeCidrResolver, ResolvedCidr};
#[cfg(test)]
use k8s_openapi::api::core::v1::{Node, NodeSpec};
#[cfg(test)]
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
#[cfg(test)]
use netbox_client::MockNetBoxClient;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use std::time::Duration;

/// Helper to create a test Node with an optional pod CIDR
#[cfg(test)]
pub fn create_test_node(name: &str, pod_cidr: Option<&str>) -> Node {
    Node {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: Some(NodeSpec {
            pod_cidr: pod_cidr.map(|s| s.to_string()),
            ..Default::default()
        }),
        status: None,
    }
}

/// In-memory `NodeClient`
///
/// Nodes that were never added are reported as missing with a 404, the way
/// the API server would.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct InMemoryNodeClient {
    pod_cidrs: Arc<Mutex<HashMap<String, String>>>,
    patches: Arc<Mutex<Vec<(String, String)>>>,
    fail_patches: Arc<Mutex<bool>>,
}

#[cfg(test)]
impl InMemoryNodeClient {
    pub fn with_nodes(nodes: &[(&str, &str)]) -> Self {
        let client = Self::default();
        for (name, cidr) in nodes {
            client.pod_cidrs.lock().unwrap().insert(name.to_string(), cidr.to_string());
        }
        client
    }

    /// Every successful patch as (node, podCIDR), in order
    pub fn patches(&self) -> Vec<(String, String)> {
        self.patches.lock().unwrap().clone()
    }

    pub fn current(&self, name: &str) -> Option<String> {
        self.pod_cidrs.lock().unwrap().get(name).cloned()
    }

    /// Make every subsequent patch fail with a server error
    pub fn fail_patches(&self) {
        *self.fail_patches.lock().unwrap() = true;
    }
}

#[cfg(test)]
fn api_error(code: u16, reason: &str, message: String) -> ControllerError {
    ControllerError::Kube(kube::Error::Api(kube::error::ErrorResponse {
        status: "Failure".to_string(),
        message,
        reason: reason.to_string(),
        code,
    }))
}

#[cfg(test)]
#[async_trait::async_trait]
impl NodeClient for InMemoryNodeClient {
    async fn pod_cidr(&self, name: &str) -> Result<String, ControllerError> {
        self.current(name)
            .ok_or_else(|| api_error(404, "NotFound", format!("nodes \"{}\" not found", name)))
    }

    async fn set_pod_cidr(&self, name: &str, cidr: &ResolvedCidr) -> Result<(), ControllerError> {
        if *self.fail_patches.lock().unwrap() {
            return Err(api_error(500, "InternalError", "etcd unavailable".to_string()));
        }
        self.pod_cidrs.lock().unwrap().insert(name.to_string(), cidr.to_string());
        self.patches.lock().unwrap().push((name.to_string(), cidr.to_string()));
        Ok(())
    }
}

/// `FailureSink` that remembers every bucket it was given
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    recorded: Arc<Mutex<Vec<FailureBucket>>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn recorded(&self) -> Vec<FailureBucket> {
        self.recorded.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl FailureSink for RecordingSink {
    fn record(&self, bucket: FailureBucket) {
        self.recorded.lock().unwrap().push(bucket);
    }
}

/// Helper to create a reconciler over mock collaborators
#[cfg(test)]
pub fn create_test_reconciler(
    netbox: &MockNetBoxClient,
    nodes: &InMemoryNodeClient,
    sink: &RecordingSink,
    resolve_timeout: Duration,
) -> Reconciler {
    Reconciler::new(
        NodeCidrResolver::new(Arc::new(netbox.clone())),
        Arc::new(nodes.clone()),
        Arc::new(sink.clone()),
        resolve_timeout,
    )
}
