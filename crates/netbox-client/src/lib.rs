//! NetBox REST API Client
//!
//! A Rust client library for the subset of the NetBox REST API needed to map
//! a host back to its addresses: IP address search, DCIM interface search and
//! virtualization interface search.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::{IpAddressFilter, NetBoxClient, NetBoxClientTrait};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! // Free-text search for a host's addresses
//! let page = client
//!     .search_ip_addresses(&IpAddressFilter::Query("node-a".to_string()))
//!     .await?;
//! println!("{} matches", page.count);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **IPAM Operations**: Search IP addresses by free text or bound interface
//! - **DCIM Operations**: Search device interfaces by device and name
//! - **Virtualization Operations**: Search VM interfaces by virtual machine and name
//! - **`test-util`**: In-memory `MockNetBoxClient` for unit tests

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod netbox_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::NetBoxClient;
pub use common::{HttpClient, PaginatedResponse};
pub use error::NetBoxError;
pub use models::*;
pub use netbox_trait::NetBoxClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockNetBoxClient;
