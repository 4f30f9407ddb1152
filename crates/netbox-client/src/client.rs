//! NetBox API client
//!
//! Implements the NetBox REST API client for node address lookup.
//! Based on NetBox API structure: /api/ipam/ip-addresses/, /api/dcim/interfaces/
//! and /api/virtualization/interfaces/

use crate::common::query::search_resources;
use crate::common::{HttpClient, PaginatedResponse};
use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const IP_ADDRESSES_ENDPOINT: &str = "ipam/ip-addresses";
const INTERFACES_ENDPOINT: &str = "dcim/interfaces";
const VM_INTERFACES_ENDPOINT: &str = "virtualization/interfaces";

/// NetBox API client
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    http: HttpClient,
}

impl NetBoxClient {
    /// Create a new NetBox client
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(NetBoxError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate the API token by making a simple authenticated request.
    ///
    /// This method tests connectivity and token validity before proceeding with operations.
    /// It makes a lightweight request to the NetBox status endpoint.
    ///
    /// # Returns
    /// * `Ok(())` - Token is valid and NetBox is reachable
    /// * `Err(NetBoxError)` - Token is invalid or NetBox is unreachable
    pub async fn validate_token(&self) -> Result<(), NetBoxError> {
        debug!("Validating NetBox token and connectivity");
        let _status: serde_json::Value = self.http.get("/api/status/").await?;
        debug!("Token validated successfully");
        Ok(())
    }

    /// Search IP addresses
    ///
    /// # Arguments
    /// * `filter` - Exactly one of free-text query, interface id or VM interface id
    ///
    /// # Returns
    /// * `Ok(PaginatedResponse<IPAddress>)` - First page of matches and the total count
    /// * `Err(NetBoxError)` - If the request fails
    pub async fn search_ip_addresses(&self, filter: &IpAddressFilter) -> Result<PaginatedResponse<IPAddress>, NetBoxError> {
        debug!("Searching IP addresses with filter: {:?}", filter);
        let pairs = filter.to_query_pairs();
        search_resources(&self.http, IP_ADDRESSES_ENDPOINT, &pairs).await
    }

    /// Search DCIM interfaces
    ///
    /// # Arguments
    /// * `filter` - Owning device id and interface name
    ///
    /// # Returns
    /// * `Ok(PaginatedResponse<Interface>)` - First page of matches and the total count
    /// * `Err(NetBoxError)` - If the request fails
    pub async fn search_interfaces(&self, filter: &InterfaceFilter) -> Result<PaginatedResponse<Interface>, NetBoxError> {
        debug!("Searching interfaces with filter: {:?}", filter);
        let pairs = filter.to_query_pairs();
        search_resources(&self.http, INTERFACES_ENDPOINT, &pairs).await
    }

    /// Search virtualization (VM) interfaces
    ///
    /// # Arguments
    /// * `filter` - Owning virtual machine id and interface name
    ///
    /// # Returns
    /// * `Ok(PaginatedResponse<VMInterface>)` - First page of matches and the total count
    /// * `Err(NetBoxError)` - If the request fails
    pub async fn search_vm_interfaces(&self, filter: &VmInterfaceFilter) -> Result<PaginatedResponse<VMInterface>, NetBoxError> {
        debug!("Searching VM interfaces with filter: {:?}", filter);
        let pairs = filter.to_query_pairs();
        search_resources(&self.http, VM_INTERFACES_ENDPOINT, &pairs).await
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for NetBoxClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        self.validate_token().await
    }

    async fn search_ip_addresses(&self, filter: &IpAddressFilter) -> Result<PaginatedResponse<IPAddress>, NetBoxError> {
        self.search_ip_addresses(filter).await
    }

    async fn search_interfaces(&self, filter: &InterfaceFilter) -> Result<PaginatedResponse<Interface>, NetBoxError> {
        self.search_interfaces(filter).await
    }

    async fn search_vm_interfaces(&self, filter: &VmInterfaceFilter) -> Result<PaginatedResponse<VMInterface>, NetBoxError> {
        self.search_vm_interfaces(filter).await
    }
}
