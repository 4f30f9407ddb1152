//! Integration tests for NetBox client
//!
//! These tests require a running NetBox instance.
//! Set NETBOX_URL and NETBOX_TOKEN environment variables to run.
//! Set NETBOX_TEST_HOST to a hostname that has exactly one address record.

use netbox_client::{
    IpAddressFilter, InterfaceFilter, NetBoxClient, NetBoxClientTrait, VmInterfaceFilter,
};

fn client() -> NetBoxClient {
    let url = std::env::var("NETBOX_URL")
        .unwrap_or_else(|_| "http://localhost:8001".to_string());
    let token = std::env::var("NETBOX_TOKEN")
        .expect("NETBOX_TOKEN environment variable must be set");

    NetBoxClient::new(url, token).expect("Failed to create client")
}

#[tokio::test]
#[ignore] // Requires running NetBox instance
async fn test_validate_token() {
    let client = client();

    client.validate_token().await.expect("Token should be valid");
}

#[tokio::test]
#[ignore]
async fn test_search_ip_addresses_by_hostname() {
    let client = client();
    let host = std::env::var("NETBOX_TEST_HOST")
        .expect("NETBOX_TEST_HOST environment variable must be set");

    let page = client
        .search_ip_addresses(&IpAddressFilter::Query(host.clone()))
        .await
        .expect("Failed to search IP addresses");

    println!("Found {} IP addresses for {}", page.count, host);
    assert!(page.count as usize >= page.results.len());
}

#[tokio::test]
#[ignore]
async fn test_search_interfaces_unknown_device_is_empty() {
    let client = client();

    let page = client
        .search_interfaces(&InterfaceFilter { device_id: u64::from(u32::MAX), name: "cbr0".to_string() })
        .await
        .expect("Failed to search interfaces");

    assert_eq!(page.count, 0);
    assert!(page.results.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_search_vm_interfaces_unknown_vm_is_empty() {
    let client = client();

    let page = client
        .search_vm_interfaces(&VmInterfaceFilter { virtual_machine_id: u64::from(u32::MAX), name: "cbr0".to_string() })
        .await
        .expect("Failed to search VM interfaces");

    assert_eq!(page.count, 0);
}

#[tokio::test]
#[ignore]
async fn test_invalid_token_is_rejected() {
    let url = std::env::var("NETBOX_URL")
        .unwrap_or_else(|_| "http://localhost:8001".to_string());
    let client = NetBoxClient::new(url, "definitely-not-a-token".to_string())
        .expect("Failed to create client");

    assert!(client.validate_token().await.is_err());
}
