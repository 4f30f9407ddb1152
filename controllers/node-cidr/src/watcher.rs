//! Node watcher.
//!
//! Drives reconciliation of every Node in the cluster through
//! `kube_runtime::Controller`, which handles reconnection and requeueing.

use crate::error::ControllerError;
use crate::node::pod_cidr_of;
use crate::reconciler::Reconciler;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Node;
use kube::{Api, ResourceExt};
use kube_runtime::controller::{Action, Config as ControllerConfig, Error as RuntimeError};
use kube_runtime::{Controller, watcher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

async fn reconcile(node: Arc<Node>, reconciler: Arc<Reconciler>) -> Result<Action, ControllerError> {
    let name = node.name_any();

    // The cached object is enough to skip nodes that already have a CIDR.
    // Nodes without one are re-read by the reconciler before anything is written.
    if !pod_cidr_of(&node).is_empty() {
        debug!("Node {} has podCIDR {}, nothing to do", name, pod_cidr_of(&node));
        return Ok(Action::await_change());
    }

    reconciler.reconcile_node(&name).await?;
    Ok(Action::await_change())
}

fn error_policy(node: Arc<Node>, error: &ControllerError, reconciler: Arc<Reconciler>) -> Action {
    let name = node.name_any();
    let delay = reconciler.retry_delay(&name);
    warn!("Requeueing node {} in {}s after error: {}", name, delay.as_secs(), error);
    Action::requeue(delay)
}

/// Watch all Nodes and assign pod CIDRs until a shutdown signal arrives.
pub async fn watch_nodes(api: Api<Node>, reconciler: Arc<Reconciler>) -> Result<(), ControllerError> {
    info!("Starting Node watcher");

    // Debounce batches bursts of node status updates into one reconciliation
    let controller_config = ControllerConfig::default()
        .debounce(Duration::from_secs(5))
        .concurrency(3);

    Controller::new(api, watcher::Config::default())
        .with_config(controller_config)
        .shutdown_on_signal()
        .run(reconcile, error_policy, reconciler)
        .for_each(|res| async move {
            match res {
                Ok((node, _)) => debug!("Reconciled node {}", node.name),
                // Already logged by the reconciler
                Err(RuntimeError::ReconcilerFailed(_, _)) => {}
                Err(e) => error!("Node controller error: {}", e),
            }
        })
        .await;

    info!("Node watcher stopped");
    Ok(())
}
