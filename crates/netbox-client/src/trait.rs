//! NetBoxClient trait for mocking
//!
//! This trait abstracts the NetBoxClient to enable mocking in unit tests.
//! The concrete NetBoxClient implements this trait, and tests can use mock implementations.

use crate::common::PaginatedResponse;
use crate::error::NetBoxError;
use crate::models::*;

/// Trait for NetBox API client operations
///
/// Each search returns the first result page together with the total match
/// count, so callers can tell "no match" from "ambiguous match".
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NetBoxClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), NetBoxError>;

    // IPAM Operations
    async fn search_ip_addresses(&self, filter: &IpAddressFilter) -> Result<PaginatedResponse<IPAddress>, NetBoxError>;

    // DCIM Operations
    async fn search_interfaces(&self, filter: &InterfaceFilter) -> Result<PaginatedResponse<Interface>, NetBoxError>;

    // Virtualization Operations
    async fn search_vm_interfaces(&self, filter: &VmInterfaceFilter) -> Result<PaginatedResponse<VMInterface>, NetBoxError>;
}
