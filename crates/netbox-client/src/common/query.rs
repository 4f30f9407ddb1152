//! Query utilities for NetBox API
//!
//! Provides helpers for building list queries against NetBox endpoints.

use crate::common::{HttpClient, PaginatedResponse};
use crate::error::NetBoxError;
use serde::Deserialize;

/// Build the list path for an endpoint with optional filters
pub fn list_path(http: &HttpClient, endpoint: &str, filters: &[(&str, String)]) -> String {
    let url = format!("/api/{}/", endpoint);
    if filters.is_empty() {
        url
    } else {
        format!("{}?{}", url, http.build_query_string(filters))
    }
}

/// Search resources with filtering, returning the first page with its total count
pub async fn search_resources<T: for<'de> Deserialize<'de>>(
    http: &HttpClient,
    endpoint: &str,
    filters: &[(&str, String)],
) -> Result<PaginatedResponse<T>, NetBoxError> {
    let url = list_path(http, endpoint, filters);
    http.get(&url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path() {
        let http = HttpClient::new(reqwest::Client::new(), "http://netbox".to_string(), "t".to_string());
        assert_eq!(list_path(&http, "ipam/ip-addresses", &[]), "/api/ipam/ip-addresses/");
        assert_eq!(
            list_path(&http, "dcim/interfaces", &[("device_id", "3".to_string()), ("name", "cbr0".to_string())]),
            "/api/dcim/interfaces/?device_id=3&name=cbr0"
        );
    }
}
