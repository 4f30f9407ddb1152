//! Node CIDR Controller
//!
//! Assigns `spec.podCIDR` to Kubernetes nodes that do not have one yet.
//! The CIDR is looked up in NetBox: the node's hostname address leads to its
//! device or virtual machine, whose `cbr0` interface address is masked down
//! to the pod network.
//!
//! Failures are counted in Prometheus (`netbox_fails`, `netbox_result_fails`,
//! `k8s_fails`) and retried with a per-node Fibonacci backoff.

mod backoff;
mod config;
mod controller;
mod error;
mod metrics;
mod node;
mod reconciler;
#[cfg(test)]
mod reconciler_test;
mod resolver;
mod server;
mod test_utils;
mod watcher;

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use controller::Controller;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(debug: bool) {
    // RUST_LOG takes precedence over DEBUG
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    let config = ControllerConfig::from_env()?;
    init_tracing(config.debug);

    // kube and reqwest both link rustls; pick the provider explicitly
    let _ = rustls::crypto::ring::default_provider().install_default();

    info!("Starting Node CIDR Controller");
    info!("Configuration:");
    info!("  NetBox URL: {}", config.netbox_url);
    info!("  Kube context: {}", config.kube_context.as_deref().unwrap_or("in-cluster/default"));
    info!("  Metrics address: {}", config.metrics_addr);
    info!("  Health address: {}", config.health_addr);
    info!("  Resolve timeout: {}s", config.resolve_timeout.as_secs());

    let controller = Controller::new(config).await?;
    controller.run().await?;

    Ok(())
}
