//! Controller-specific error types.
//!
//! `ResolutionError` is the taxonomy of the NetBox lookup chain. Every kind
//! maps to exactly one `FailureBucket`, which selects the Prometheus counter
//! the failure is reported to.

use std::fmt;
use thiserror::Error;
use kube::Error as KubeError;
use netbox_client::NetBoxError;

/// Lookup stage a cardinality failure was observed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupContext {
    /// Free-text search for the node's hostname
    Hostname,
    /// Search for the owner's management interface
    ManagementInterface,
    /// Search for the address bound to the management interface
    ManagementAddress,
}

impl fmt::Display for LookupContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hostname => "hostname",
            Self::ManagementInterface => "management-interface",
            Self::ManagementAddress => "management-address",
        };
        f.write_str(name)
    }
}

/// Failure counter a classified error is reported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureBucket {
    /// NetBox could not be reached or answered with an error
    RegistryTransport,
    /// NetBox answered, but with too few, too many or unusable records
    RegistryResult,
    /// Reading or patching the Node object failed
    NodeUpdate,
}

/// Errors from resolving a node's pod CIDR out of NetBox.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Transport or protocol failure talking to NetBox
    #[error("NetBox unavailable: {0}")]
    RegistryUnavailable(#[from] NetBoxError),

    /// Address search returned a count other than exactly one
    #[error("expected {expected} address for {context} lookup, got {got}")]
    AddressCardinality {
        context: LookupContext,
        expected: u64,
        got: u64,
    },

    /// Interface search returned a count other than exactly one
    #[error("expected {expected} interface for {context} lookup, got {got}")]
    InterfaceCardinality {
        context: LookupContext,
        expected: u64,
        got: u64,
    },

    /// Address is not assigned to a device or VM interface
    #[error("no interface assigned to ip {address} (assigned object type: {})", .object_type.as_deref().unwrap_or("<none>"))]
    UnassignedOwner {
        address: String,
        object_type: Option<String>,
    },

    /// Address string is not a valid `ip/prefix`
    #[error("malformed address {address:?}: {source}")]
    MalformedAddress {
        address: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    /// The deadline expired or the caller gave up before resolution finished
    #[error("resolution cancelled before completion")]
    Cancelled,
}

impl ResolutionError {
    /// Failure counter this error is reported to
    pub fn bucket(&self) -> FailureBucket {
        match self {
            Self::RegistryUnavailable(_) | Self::Cancelled => FailureBucket::RegistryTransport,
            Self::AddressCardinality { .. }
            | Self::InterfaceCardinality { .. }
            | Self::UnassignedOwner { .. }
            | Self::MalformedAddress { .. } => FailureBucket::RegistryResult,
        }
    }
}

/// Errors that can occur in the Node CIDR Controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// NetBox API error outside of a resolution (startup token check)
    #[error("NetBox error: {0}")]
    NetBox(#[from] NetBoxError),

    /// Pod CIDR could not be resolved
    #[error("Resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics registry error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// HTTP listener error
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}

impl ControllerError {
    /// Failure counter this error is reported to, if any
    pub fn bucket(&self) -> Option<FailureBucket> {
        match self {
            Self::Resolution(e) => Some(e.bucket()),
            Self::Kube(_) => Some(FailureBucket::NodeUpdate),
            Self::NetBox(_) => Some(FailureBucket::RegistryTransport),
            Self::InvalidConfig(_) | Self::Metrics(_) | Self::Server(_) | Self::Watch(_) => None,
        }
    }
}
