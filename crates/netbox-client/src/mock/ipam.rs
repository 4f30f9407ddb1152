//! IPAM operations for MockNetBoxClient
//!
//! Handles IP address search

use super::{into_page, MockCall, MockNetBoxClient};
use crate::common::PaginatedResponse;
use crate::error::NetBoxError;
use crate::models::*;

pub async fn search_ip_addresses(client: &MockNetBoxClient, filter: &IpAddressFilter) -> Result<PaginatedResponse<IPAddress>, NetBoxError> {
    client.begin_call(MockCall::SearchIpAddresses(filter.clone())).await?;

    let ips = client.ip_addresses.lock().unwrap();
    let results: Vec<IPAddress> = ips
        .values()
        .filter(|ip| matches_filter(ip, filter))
        .cloned()
        .collect();

    Ok(into_page(results, |ip| ip.id))
}

/// Approximates NetBox's filterset: `q` is a case-insensitive substring match on
/// dns name and description, or a prefix match on the address
fn matches_filter(ip: &IPAddress, filter: &IpAddressFilter) -> bool {
    match filter {
        IpAddressFilter::Query(q) => {
            let q = q.to_lowercase();
            ip.address.starts_with(&q)
                || ip.dns_name.to_lowercase().contains(&q)
                || ip.description.to_lowercase().contains(&q)
        }
        IpAddressFilter::InterfaceId(id) => {
            ip.assigned_object_kind() == Some(AssignedObjectKind::Interface)
                && ip.assigned_object_id == Some(*id)
        }
        IpAddressFilter::VmInterfaceId(id) => {
            ip.assigned_object_kind() == Some(AssignedObjectKind::VmInterface)
                && ip.assigned_object_id == Some(*id)
        }
    }
}
