//! Pod CIDR resolution against NetBox.
//!
//! A node's pod CIDR is derived by walking the registry:
//!
//! 1. Free-text search for the node name must match exactly one address.
//! 2. That address must be bound to a dcim interface or a VM interface,
//!    which identifies the owning device or virtual machine.
//! 3. The owner must have exactly one interface named `cbr0`.
//! 4. Exactly one address must be bound to that interface.
//! 5. The address is masked down to its network CIDR.
//!
//! The first stage to fail stops the walk; no further registry calls are made.

pub mod address;
pub mod cidr;
pub mod interface;
pub mod owner;


pub use address::{lookup_hostname_address, resolve_management_address};
pub use cidr::{ResolvedCidr, derive_cidr};
pub use interface::resolve_management_interface;
pub use owner::classify_owner;

use crate::error::ResolutionError;
use netbox_client::{NetBoxClientTrait, PaginatedResponse};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Accept a page only when the registry reports exactly one match.
///
/// A page claiming one match but carrying no result is treated as zero.
pub(crate) fn expect_single<T>(
    page: PaginatedResponse<T>,
    on_mismatch: impl FnOnce(u64) -> ResolutionError,
) -> Result<T, ResolutionError> {
    match (page.count, page.results.into_iter().next()) {
        (1, Some(item)) => Ok(item),
        (1, None) => Err(on_mismatch(0)),
        (count, _) => Err(on_mismatch(count)),
    }
}

/// Resolves node names to pod CIDRs.
///
/// Holds no state besides the registry client, so one instance can serve
/// any number of concurrent resolutions.
#[derive(Clone)]
pub struct NodeCidrResolver {
    client: Arc<dyn NetBoxClientTrait>,
}

impl NodeCidrResolver {
    pub fn new(client: Arc<dyn NetBoxClientTrait>) -> Self {
        Self { client }
    }

    /// Run the full lookup chain for one node.
    pub async fn resolve(&self, node_name: &str) -> Result<ResolvedCidr, ResolutionError> {
        let client = self.client.as_ref();

        let ip = lookup_hostname_address(client, node_name).await?;
        let owner = classify_owner(&ip)?;
        debug!("Node {} address {} belongs to {:?}", node_name, ip.address, owner);

        let interface = resolve_management_interface(client, &owner).await?;
        debug!("Node {} management interface is {:?}", node_name, interface);

        let address = resolve_management_address(client, interface).await?;
        let cidr = derive_cidr(&address)?;
        debug!("Node {} management address {} gives {}", node_name, address, cidr);

        Ok(cidr)
    }

    /// Resolve, giving up as soon as `cancel` completes.
    ///
    /// The in-flight registry request is dropped on cancellation.
    pub async fn resolve_until<C>(&self, node_name: &str, cancel: C) -> Result<ResolvedCidr, ResolutionError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                debug!("Resolution for node {} cancelled", node_name);
                Err(ResolutionError::Cancelled)
            }
            result = self.resolve(node_name) => result,
        }
    }

    /// Resolve within `deadline`, returning `Cancelled` once it expires.
    pub async fn resolve_with_deadline(
        &self,
        node_name: &str,
        deadline: Duration,
    ) -> Result<ResolvedCidr, ResolutionError> {
        self.resolve_until(node_name, tokio::time::sleep(deadline)).await
    }
}

impl std::fmt::Debug for NodeCidrResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeCidrResolver")
            .field("netbox_url", &self.client.base_url())
            .finish()
    }
}
