//! Node reconciliation logic.
//!
//! A node is only touched when its `spec.podCIDR` is empty. The CIDR is then
//! resolved from NetBox under a deadline and written back with a merge patch.
//! Every failure is reported to the failure sink before it is returned.

use crate::backoff::NodeBackoff;
use crate::error::ControllerError;
use crate::metrics::FailureSink;
use crate::node::NodeClient;
use crate::resolver::{NodeCidrResolver, ResolvedCidr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Result of a successful node reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The node already had a pod CIDR; nothing was resolved or written
    AlreadySet,
    /// The pod CIDR was resolved and written to the node
    Assigned(ResolvedCidr),
}

/// Reconciles Node objects against NetBox.
pub struct Reconciler {
    resolver: NodeCidrResolver,
    nodes: Arc<dyn NodeClient>,
    failures: Arc<dyn FailureSink>,
    resolve_timeout: Duration,
    backoff: NodeBackoff,
}

impl Reconciler {
    /// Creates a new reconciler.
    pub fn new(
        resolver: NodeCidrResolver,
        nodes: Arc<dyn NodeClient>,
        failures: Arc<dyn FailureSink>,
        resolve_timeout: Duration,
    ) -> Self {
        Self {
            resolver,
            nodes,
            failures,
            resolve_timeout,
            backoff: NodeBackoff::default(),
        }
    }

    /// Ensure the named node has a pod CIDR.
    pub async fn reconcile_node(&self, name: &str) -> Result<ReconcileOutcome, ControllerError> {
        match self.assign_pod_cidr(name).await {
            Ok(outcome) => {
                self.backoff.reset(name);
                Ok(outcome)
            }
            Err(e) => {
                error!("Failed to assign podCIDR to node {}: {}", name, e);
                if let Some(bucket) = e.bucket() {
                    self.failures.record(bucket);
                }
                Err(e)
            }
        }
    }

    async fn assign_pod_cidr(&self, name: &str) -> Result<ReconcileOutcome, ControllerError> {
        let current = self.nodes.pod_cidr(name).await?;
        if !current.is_empty() {
            debug!("Node {} already has podCIDR {}, skipping", name, current);
            return Ok(ReconcileOutcome::AlreadySet);
        }

        debug!("Node {} has no podCIDR, resolving from NetBox", name);
        let cidr = self
            .resolver
            .resolve_with_deadline(name, self.resolve_timeout)
            .await?;

        self.nodes.set_pod_cidr(name, &cidr).await?;
        info!("Assigned podCIDR {} to node {}", cidr, name);
        Ok(ReconcileOutcome::Assigned(cidr))
    }

    /// Delay before retrying a node whose last reconciliation failed
    pub fn retry_delay(&self, name: &str) -> Duration {
        self.backoff.next_delay(name)
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("resolver", &self.resolver)
            .field("resolve_timeout", &self.resolve_timeout)
            .finish_non_exhaustive()
    }
}
