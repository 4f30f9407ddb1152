//! Virtualization operations for MockNetBoxClient
//!
//! Handles VM interface search

use super::{into_page, MockCall, MockNetBoxClient};
use crate::common::PaginatedResponse;
use crate::error::NetBoxError;
use crate::models::*;

pub async fn search_vm_interfaces(client: &MockNetBoxClient, filter: &VmInterfaceFilter) -> Result<PaginatedResponse<VMInterface>, NetBoxError> {
    client.begin_call(MockCall::SearchVmInterfaces(filter.clone())).await?;

    let interfaces = client.vm_interfaces.lock().unwrap();
    let results: Vec<VMInterface> = interfaces
        .values()
        .filter(|i| i.virtual_machine.id == filter.virtual_machine_id && i.name == filter.name)
        .cloned()
        .collect();

    Ok(into_page(results, |i| i.id))
}
