//! Address searches: the node's hostname record and the management address.

use super::expect_single;
use super::interface::ManagementInterface;
use crate::error::{LookupContext, ResolutionError};
use netbox_client::{IPAddress, IpAddressFilter, NetBoxClientTrait};
use tracing::debug;

/// Find the single address record matching the node name.
///
/// The node name is sent verbatim as the free-text query.
pub async fn lookup_hostname_address(
    client: &dyn NetBoxClientTrait,
    node_name: &str,
) -> Result<IPAddress, ResolutionError> {
    debug!("Searching NetBox addresses for hostname {}", node_name);
    let page = client
        .search_ip_addresses(&IpAddressFilter::Query(node_name.to_string()))
        .await?;
    let ip = expect_single(page, |got| ResolutionError::AddressCardinality {
        context: LookupContext::Hostname,
        expected: 1,
        got,
    })?;
    debug!("Hostname {} matched address {} ({:?})", node_name, ip.address, ip.assigned_object_type);
    Ok(ip)
}

/// Find the single address bound to the management interface.
pub async fn resolve_management_address(
    client: &dyn NetBoxClientTrait,
    interface: ManagementInterface,
) -> Result<String, ResolutionError> {
    debug!("Searching NetBox addresses for {:?}", interface);
    let page = client.search_ip_addresses(&interface.address_filter()).await?;
    let ip = expect_single(page, |got| ResolutionError::AddressCardinality {
        context: LookupContext::ManagementAddress,
        expected: 1,
        got,
    })?;
    Ok(ip.address)
}
