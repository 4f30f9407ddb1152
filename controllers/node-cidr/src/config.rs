//! Controller configuration from environment variables.

use crate::error::ControllerError;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_NETBOX_URL: &str = "http://netbox.netbox:80";
const DEFAULT_METRICS_BIND_ADDRESS: &str = "0.0.0.0:32280";
const DEFAULT_HEALTH_BIND_ADDRESS: &str = "0.0.0.0:32281";
const DEFAULT_RESOLVE_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration of the Node CIDR Controller
#[derive(Clone)]
pub struct ControllerConfig {
    pub netbox_url: String,
    pub netbox_token: String,
    /// Kubeconfig context to use; `None` uses in-cluster or default config
    pub kube_context: Option<String>,
    pub debug: bool,
    pub metrics_addr: SocketAddr,
    pub health_addr: SocketAddr,
    /// Upper bound on a single node's NetBox resolution
    pub resolve_timeout: Duration,
}

impl ControllerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Unset and empty are treated the same
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let netbox_url = var("NETBOX_URL").unwrap_or_else(|| DEFAULT_NETBOX_URL.to_string());
        let netbox_token = var("NETBOX_TOKEN").ok_or_else(|| {
            ControllerError::InvalidConfig("NETBOX_TOKEN environment variable is required".to_string())
        })?;
        let kube_context = var("KUBECONTEXT");

        let debug = match var("DEBUG") {
            Some(value) => parse_bool("DEBUG", &value)?,
            None => false,
        };

        let metrics_addr = parse_addr(
            "METRICS_BIND_ADDRESS",
            &var("METRICS_BIND_ADDRESS").unwrap_or_else(|| DEFAULT_METRICS_BIND_ADDRESS.to_string()),
        )?;
        let health_addr = parse_addr(
            "HEALTH_BIND_ADDRESS",
            &var("HEALTH_BIND_ADDRESS").unwrap_or_else(|| DEFAULT_HEALTH_BIND_ADDRESS.to_string()),
        )?;

        let resolve_timeout = match var("RESOLVE_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ControllerError::InvalidConfig(format!(
                        "RESOLVE_TIMEOUT_SECS must be a positive number of seconds, got {:?}",
                        value
                    )));
                }
            },
            None => Duration::from_secs(DEFAULT_RESOLVE_TIMEOUT_SECS),
        };

        Ok(Self {
            netbox_url,
            netbox_token,
            kube_context,
            debug,
            metrics_addr,
            health_addr,
            resolve_timeout,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ControllerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ControllerError::InvalidConfig(format!(
            "{} must be a boolean, got {:?}",
            key, value
        ))),
    }
}

fn parse_addr(key: &str, value: &str) -> Result<SocketAddr, ControllerError> {
    value.trim().parse().map_err(|e| {
        ControllerError::InvalidConfig(format!("{} is not a valid socket address ({:?}): {}", key, value, e))
    })
}

// Keeps the token out of logs
impl std::fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("netbox_url", &self.netbox_url)
            .field("netbox_token", &"<redacted>")
            .field("kube_context", &self.kube_context)
            .field("debug", &self.debug)
            .field("metrics_addr", &self.metrics_addr)
            .field("health_addr", &self.health_addr)
            .field("resolve_timeout", &self.resolve_timeout)
            .finish()
    }
}
