//! Mock NetBoxClient for unit testing
//!
//! This module provides a mock implementation of NetBoxClientTrait that can be used
//! in unit tests without requiring a running NetBox instance.
//!
//! The mock is organized into domain-specific modules:
//! - `ipam.rs` - IP address search
//! - `dcim.rs` - device interface search
//! - `virtualization.rs` - VM interface search
//! - `helpers.rs` - Helper functions for creating records and nested types
//!
//! Every search is recorded so tests can assert which registry calls were made.

mod helpers;
mod ipam;
mod dcim;
mod virtualization;

use crate::common::PaginatedResponse;
use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A registry call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    SearchIpAddresses(IpAddressFilter),
    SearchInterfaces(InterfaceFilter),
    SearchVmInterfaces(VmInterfaceFilter),
}

/// Mock NetBoxClient for testing
///
/// This mock stores resources in memory and can be configured to return
/// specific responses for testing different scenarios.
#[derive(Clone)]
pub struct MockNetBoxClient {
    pub(crate) base_url: String,
    // In-memory storage for resources
    pub(crate) ip_addresses: Arc<Mutex<HashMap<u64, IPAddress>>>,
    pub(crate) interfaces: Arc<Mutex<HashMap<u64, Interface>>>,
    pub(crate) vm_interfaces: Arc<Mutex<HashMap<u64, VMInterface>>>,
    // Observed calls, in order
    pub(crate) calls: Arc<Mutex<Vec<MockCall>>>,
    // When set, every search fails with this API error
    pub(crate) failure: Arc<Mutex<Option<String>>>,
    // When set, every search stays pending forever
    pub(crate) hang: Arc<AtomicBool>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl std::fmt::Debug for MockNetBoxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockNetBoxClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl MockNetBoxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ip_addresses: Arc::new(Mutex::new(HashMap::new())),
            interfaces: Arc::new(Mutex::new(HashMap::new())),
            vm_interfaces: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            hang: Arc::new(AtomicBool::new(false)),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add an IP address to the mock store (for test setup)
    pub fn add_ip_address(&self, ip: IPAddress) {
        self.ip_addresses.lock().unwrap().insert(ip.id, ip);
    }

    /// Add a device interface to the mock store (for test setup)
    pub fn add_interface(&self, interface: Interface) {
        self.interfaces.lock().unwrap().insert(interface.id, interface);
    }

    /// Add a VM interface to the mock store (for test setup)
    pub fn add_vm_interface(&self, interface: VMInterface) {
        self.vm_interfaces.lock().unwrap().insert(interface.id, interface);
    }

    /// Make every subsequent search fail as if NetBox returned an error
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(message.into());
    }

    /// Make every subsequent search hang until the caller gives up
    pub fn hang_requests(&self) {
        self.hang.store(true, Ordering::SeqCst);
    }

    /// All searches made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }

    /// Get helpers instance
    pub(crate) fn helpers(&self) -> helpers::Helpers {
        helpers::Helpers::new(self.base_url.clone())
    }

    /// Record a call and apply the configured failure mode
    pub(crate) async fn begin_call(&self, call: MockCall) -> Result<(), NetBoxError> {
        self.calls.lock().unwrap().push(call);
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(NetBoxError::Api(message));
        }
        Ok(())
    }
}

/// Sort by id so result order is stable across runs
pub(crate) fn into_page<T>(mut results: Vec<T>, id: impl Fn(&T) -> u64) -> PaginatedResponse<T> {
    results.sort_by_key(|r| id(r));
    PaginatedResponse::single_page(results)
}

#[async_trait::async_trait]
impl NetBoxClientTrait for MockNetBoxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(NetBoxError::Authentication(message)),
            None => Ok(()),
        }
    }

    // IPAM Operations
    async fn search_ip_addresses(&self, filter: &IpAddressFilter) -> Result<PaginatedResponse<IPAddress>, NetBoxError> {
        ipam::search_ip_addresses(self, filter).await
    }

    // DCIM Operations
    async fn search_interfaces(&self, filter: &InterfaceFilter) -> Result<PaginatedResponse<Interface>, NetBoxError> {
        dcim::search_interfaces(self, filter).await
    }

    // Virtualization Operations
    async fn search_vm_interfaces(&self, filter: &VmInterfaceFilter) -> Result<PaginatedResponse<VMInterface>, NetBoxError> {
        virtualization::search_vm_interfaces(self, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_ip_addresses_by_query() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let device_if = mock.create_device_interface(1, "eth0");
        mock.create_ip_on_interface("10.0.0.5/24", &device_if, "node-a.example.com");
        mock.create_ip_on_interface("10.0.0.6/24", &device_if, "node-b.example.com");

        let page = mock
            .search_ip_addresses(&IpAddressFilter::Query("node-a".to_string()))
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].address, "10.0.0.5/24");

        let page = mock
            .search_ip_addresses(&IpAddressFilter::Query("example.com".to_string()))
            .await
            .unwrap();
        assert_eq!(page.count, 2);
    }

    #[tokio::test]
    async fn test_search_ip_addresses_by_interface_ids_do_not_mix() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let device_if = mock.create_device_interface(1, "cbr0");
        let vm_if = mock.create_vm_interface(1, "cbr0");
        mock.create_ip_on_interface("10.0.1.5/24", &device_if, "");
        mock.create_ip_on_vm_interface("192.168.5.9/28", &vm_if, "");

        let page = mock
            .search_ip_addresses(&IpAddressFilter::InterfaceId(device_if.id))
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].address, "10.0.1.5/24");

        let page = mock
            .search_ip_addresses(&IpAddressFilter::VmInterfaceId(vm_if.id))
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].address, "192.168.5.9/28");
    }

    #[tokio::test]
    async fn test_search_interfaces_by_device_and_name() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.create_device_interface(3, "cbr0");
        mock.create_device_interface(3, "eth0");
        mock.create_device_interface(4, "cbr0");

        let page = mock
            .search_interfaces(&InterfaceFilter { device_id: 3, name: "cbr0".to_string() })
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].device.id, 3);

        let page = mock
            .search_vm_interfaces(&VmInterfaceFilter { virtual_machine_id: 3, name: "cbr0".to_string() })
            .await
            .unwrap();
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn test_calls_are_recorded_and_failures_injected() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.fail_with("boom");

        let result = mock
            .search_ip_addresses(&IpAddressFilter::Query("node-a".to_string()))
            .await;
        assert!(matches!(result, Err(NetBoxError::Api(ref m)) if m == "boom"));
        assert_eq!(
            mock.calls(),
            vec![MockCall::SearchIpAddresses(IpAddressFilter::Query("node-a".to_string()))]
        );

        mock.clear_calls();
        assert!(mock.calls().is_empty());
    }
}
