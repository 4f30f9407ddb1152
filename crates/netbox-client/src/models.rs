//! NetBox API models
//!
//! These models match the NetBox REST API serializers used for node address lookup.
//! See: netbox/netbox/ipam/api/serializers_/ip.py,
//! netbox/netbox/dcim/api/serializers_/device_components.py and
//! netbox/netbox/virtualization/api/serializers_/virtualmachines.py

use serde::{Deserialize, Serialize};

/// Content type tag NetBox uses for addresses bound to a physical interface
pub const DCIM_INTERFACE: &str = "dcim.interface";

/// Content type tag NetBox uses for addresses bound to a VM interface
pub const VIRTUALIZATION_VMINTERFACE: &str = "virtualization.vminterface";

/// IP Address model matching NetBox IPAddressSerializer
///
/// Only the fields the controller reads are required; the rest default so
/// that older and newer NetBox releases both deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IPAddress {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub family: Option<AddressFamily>,
    pub address: String, // e.g., "192.168.1.1/24"
    #[serde(default)]
    pub status: Option<IPAddressStatus>,
    #[serde(default)]
    pub assigned_object_type: Option<String>,
    #[serde(default)]
    pub assigned_object_id: Option<u64>,
    #[serde(default)]
    pub assigned_object: Option<AssignedObject>,
    #[serde(default)]
    pub dns_name: String,
    #[serde(default)]
    pub description: String,
}

impl IPAddress {
    /// Parsed form of `assigned_object_type`
    pub fn assigned_object_kind(&self) -> Option<AssignedObjectKind> {
        self.assigned_object_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(AssignedObjectKind::from_content_type)
    }
}

/// Kind of object an IP address is assigned to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignedObjectKind {
    /// `dcim.interface`
    Interface,
    /// `virtualization.vminterface`
    VmInterface,
    /// Any other content type (e.g. `ipam.fhrpgroup`)
    Other(String),
}

impl AssignedObjectKind {
    pub fn from_content_type(content_type: &str) -> Self {
        match content_type {
            DCIM_INTERFACE => Self::Interface,
            VIRTUALIZATION_VMINTERFACE => Self::VmInterface,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_content_type(&self) -> &str {
        match self {
            Self::Interface => DCIM_INTERFACE,
            Self::VmInterface => VIRTUALIZATION_VMINTERFACE,
            Self::Other(other) => other,
        }
    }
}

/// Nested object an IP address is assigned to
///
/// NetBox serializes either a dcim interface (with `device`) or a
/// virtualization interface (with `virtual_machine`) here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssignedObject {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<NestedDevice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_machine: Option<NestedVirtualMachine>,
}

/// Interface model (from DCIM API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Interface {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub device: NestedDevice,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub description: String,
}

/// VM interface model (from virtualization API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VMInterface {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub virtual_machine: NestedVirtualMachine,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub description: String,
}

// Nested serializers (simplified versions for references)

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NestedDevice {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NestedVirtualMachine {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Address family as NetBox renders it (`{"value": 4, "label": "IPv4"}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressFamily {
    pub value: u8,
    #[serde(default)]
    pub label: String,
}

/// IP Address status as NetBox renders it (`{"value": "active", "label": "Active"}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IPAddressStatus {
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// Filter for the IP address search endpoint
///
/// The three keys are used at different stages of node address lookup and are
/// never combined in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpAddressFilter {
    /// Free-text search (`q=`)
    Query(String),
    /// Addresses bound to a dcim interface (`interface_id=`)
    InterfaceId(u64),
    /// Addresses bound to a VM interface (`vminterface_id=`)
    VmInterfaceId(u64),
}

impl IpAddressFilter {
    /// Query parameters for this filter
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Query(q) => vec![("q", q.clone())],
            Self::InterfaceId(id) => vec![("interface_id", id.to_string())],
            Self::VmInterfaceId(id) => vec![("vminterface_id", id.to_string())],
        }
    }
}

/// Filter for the dcim interface search endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceFilter {
    pub device_id: u64,
    pub name: String,
}

impl InterfaceFilter {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("device_id", self.device_id.to_string()),
            ("name", self.name.clone()),
        ]
    }
}

/// Filter for the virtualization interface search endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmInterfaceFilter {
    pub virtual_machine_id: u64,
    pub name: String,
}

impl VmInterfaceFilter {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("virtual_machine_id", self.virtual_machine_id.to_string()),
            ("name", self.name.clone()),
        ]
    }
}
