//! Main controller implementation.
//!
//! This module contains the `Controller` struct that wires the NetBox
//! resolver, the node reconciler and the HTTP endpoints together and runs
//! them as background tasks.

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::metrics::ControllerMetrics;
use crate::node::KubeNodeClient;
use crate::reconciler::Reconciler;
use crate::resolver::NodeCidrResolver;
use crate::server;
use crate::watcher;
use k8s_openapi::api::core::v1::Node;
use kube::config::KubeConfigOptions;
use kube::{Api, Client};
use netbox_client::NetBoxClient;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Main controller for node pod CIDR assignment.
pub struct Controller {
    node_watcher: JoinHandle<Result<(), ControllerError>>,
    metrics_server: JoinHandle<Result<(), ControllerError>>,
    health_server: JoinHandle<Result<(), ControllerError>>,
}

/// Build a Kubernetes client, optionally for a specific kubeconfig context.
async fn kube_client(context: Option<&str>) -> Result<Client, ControllerError> {
    match context {
        Some(context) => {
            info!("Using kubeconfig context {}", context);
            let options = KubeConfigOptions {
                context: Some(context.to_string()),
                ..Default::default()
            };
            let config = kube::Config::from_kubeconfig(&options).await.map_err(|e| {
                ControllerError::InvalidConfig(format!("Failed to load kubeconfig context {}: {}", context, e))
            })?;
            Ok(Client::try_from(config)?)
        }
        None => Ok(Client::try_default().await?),
    }
}

impl Controller {
    /// Creates a new controller instance and starts its background tasks.
    pub async fn new(config: ControllerConfig) -> Result<Self, ControllerError> {
        info!("Initializing Node CIDR Controller");

        let kube_client = kube_client(config.kube_context.as_deref()).await?;

        let netbox_client = NetBoxClient::new(config.netbox_url.clone(), config.netbox_token.clone())?;

        // Validate token and connectivity before proceeding
        info!("Validating NetBox token and connectivity...");
        netbox_client.validate_token().await.map_err(|e| {
            error!("Failed to validate NetBox token: {}", e);
            error!("Please ensure:");
            error!("  1. NETBOX_TOKEN environment variable is set correctly");
            error!("  2. The token is valid in NetBox");
            error!("  3. NetBox is reachable at {}", config.netbox_url);
            ControllerError::NetBox(e)
        })?;
        info!("NetBox token validated and connectivity established");

        let metrics = Arc::new(ControllerMetrics::new()?);
        let node_api: Api<Node> = Api::all(kube_client);

        let reconciler = Arc::new(Reconciler::new(
            NodeCidrResolver::new(Arc::new(netbox_client)),
            Arc::new(KubeNodeClient::new(node_api.clone())),
            metrics.clone(),
            config.resolve_timeout,
        ));

        let node_watcher = tokio::spawn(watcher::watch_nodes(node_api, reconciler));

        let metrics_server = tokio::spawn(server::serve(
            config.metrics_addr,
            server::metrics_routes(metrics),
            "Metrics",
        ));

        let health_server = tokio::spawn(server::serve(
            config.health_addr,
            server::health_routes(),
            "Health",
        ));

        Ok(Self {
            node_watcher,
            metrics_server,
            health_server,
        })
    }

    /// Runs the controller until the node watcher stops or a server fails.
    pub async fn run(mut self) -> Result<(), ControllerError> {
        info!("Node CIDR Controller running");

        tokio::select! {
            result = &mut self.node_watcher => {
                result.map_err(|e| ControllerError::Watch(format!("Node watcher panicked: {}", e)))?
                    .map_err(|e| ControllerError::Watch(format!("Node watcher error: {}", e)))?;
                info!("Node watcher finished, shutting down");
            }
            result = &mut self.metrics_server => {
                result.map_err(|e| ControllerError::Watch(format!("Metrics server panicked: {}", e)))??;
                return Err(ControllerError::Watch("Metrics server exited".to_string()));
            }
            result = &mut self.health_server => {
                result.map_err(|e| ControllerError::Watch(format!("Health server panicked: {}", e)))??;
                return Err(ControllerError::Watch("Health server exited".to_string()));
            }
        }

        self.metrics_server.abort();
        self.health_server.abort();
        Ok(())
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller").finish_non_exhaustive()
    }
}
