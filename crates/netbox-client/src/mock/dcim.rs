//! DCIM operations for MockNetBoxClient
//!
//! Handles device interface search

use super::{into_page, MockCall, MockNetBoxClient};
use crate::common::PaginatedResponse;
use crate::error::NetBoxError;
use crate::models::*;

pub async fn search_interfaces(client: &MockNetBoxClient, filter: &InterfaceFilter) -> Result<PaginatedResponse<Interface>, NetBoxError> {
    client.begin_call(MockCall::SearchInterfaces(filter.clone())).await?;

    let interfaces = client.interfaces.lock().unwrap();
    let results: Vec<Interface> = interfaces
        .values()
        .filter(|i| i.device.id == filter.device_id && i.name == filter.name)
        .cloned()
        .collect();

    Ok(into_page(results, |i| i.id))
}
