//! Canonical network CIDR derivation.
//!
//! NetBox stores the management address as a host address with prefix
//! length (`10.0.1.5/24`). Nodes need the network (`10.0.1.0/24`), so the
//! host bits are always cleared.

use crate::error::ResolutionError;
use ipnet::IpNet;
use std::fmt;

/// Network CIDR with all host bits cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedCidr(IpNet);

impl ResolvedCidr {
    /// The masked network
    pub fn network(&self) -> IpNet {
        self.0
    }
}

impl fmt::Display for ResolvedCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parse an `ip/prefix` string and mask off the host bits.
pub fn derive_cidr(address: &str) -> Result<ResolvedCidr, ResolutionError> {
    let net: IpNet = address
        .parse()
        .map_err(|source| ResolutionError::MalformedAddress {
            address: address.to_string(),
            source,
        })?;
    Ok(ResolvedCidr(net.trunc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_bits_are_cleared() {
        assert_eq!(derive_cidr("10.0.1.5/24").unwrap().to_string(), "10.0.1.0/24");
        assert_eq!(derive_cidr("192.168.5.9/28").unwrap().to_string(), "192.168.5.0/28");
        assert_eq!(derive_cidr("172.16.33.200/20").unwrap().to_string(), "172.16.32.0/20");
    }

    #[test]
    fn test_network_address_is_unchanged() {
        assert_eq!(derive_cidr("10.0.1.0/24").unwrap().to_string(), "10.0.1.0/24");
        assert_eq!(derive_cidr("10.0.1.7/32").unwrap().to_string(), "10.0.1.7/32");
        assert_eq!(derive_cidr("10.0.1.7/0").unwrap().to_string(), "0.0.0.0/0");
    }

    #[test]
    fn test_ipv6() {
        assert_eq!(derive_cidr("2001:db8:1::42/64").unwrap().to_string(), "2001:db8:1::/64");
    }

    #[test]
    fn test_malformed_addresses() {
        for input in ["not-an-ip/24", "10.0.1.5", "10.0.1.5/33", "10.0.1.5/", "", "10.0.1/24"] {
            let result = derive_cidr(input);
            assert!(
                matches!(result, Err(ResolutionError::MalformedAddress { ref address, .. }) if address == input),
                "expected MalformedAddress for {input:?}, got {result:?}"
            );
        }
    }
}
