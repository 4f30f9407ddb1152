//! Helper functions for creating NetBox records in mock implementations

use super::MockNetBoxClient;
use crate::models::*;

/// Helper functions for creating nested types in mock implementations
pub struct Helpers {
    base_url: String,
}

impl Helpers {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /// Helper to create NestedDevice
    pub fn create_nested_device(&self, id: u64) -> NestedDevice {
        let name = format!("device-{}", id);
        NestedDevice {
            id,
            url: format!("{}/api/dcim/devices/{}/", self.base_url, id),
            display: name.clone(),
            name: Some(name),
        }
    }

    /// Helper to create NestedVirtualMachine
    pub fn create_nested_virtual_machine(&self, id: u64) -> NestedVirtualMachine {
        let name = format!("vm-{}", id);
        NestedVirtualMachine {
            id,
            url: format!("{}/api/virtualization/virtual-machines/{}/", self.base_url, id),
            display: name.clone(),
            name: Some(name),
        }
    }

    /// Helper to create an IP address record with the given assignment
    pub fn create_ip_address(
        &self,
        id: u64,
        address: &str,
        dns_name: &str,
        assigned_object_type: Option<&str>,
        assigned_object: Option<AssignedObject>,
    ) -> IPAddress {
        IPAddress {
            id,
            url: format!("{}/api/ipam/ip-addresses/{}/", self.base_url, id),
            display: address.to_string(),
            family: Some(AddressFamily {
                value: if address.contains(':') { 6 } else { 4 },
                label: String::new(),
            }),
            address: address.to_string(),
            status: Some(IPAddressStatus {
                value: "active".to_string(),
                label: "Active".to_string(),
            }),
            assigned_object_type: assigned_object_type.map(|t| t.to_string()),
            assigned_object_id: assigned_object.as_ref().map(|o| o.id),
            assigned_object,
            dns_name: dns_name.to_string(),
            description: String::new(),
        }
    }
}

impl MockNetBoxClient {
    /// Create and store a device interface
    pub fn create_device_interface(&self, device_id: u64, name: &str) -> Interface {
        let id = self.next_id();
        let interface = Interface {
            id,
            url: format!("{}/api/dcim/interfaces/{}/", self.base_url, id),
            display: name.to_string(),
            name: name.to_string(),
            device: self.helpers().create_nested_device(device_id),
            enabled: Some(true),
            description: String::new(),
        };
        self.add_interface(interface.clone());
        interface
    }

    /// Create and store a VM interface
    pub fn create_vm_interface(&self, virtual_machine_id: u64, name: &str) -> VMInterface {
        let id = self.next_id();
        let interface = VMInterface {
            id,
            url: format!("{}/api/virtualization/interfaces/{}/", self.base_url, id),
            display: name.to_string(),
            name: name.to_string(),
            virtual_machine: self.helpers().create_nested_virtual_machine(virtual_machine_id),
            enabled: Some(true),
            description: String::new(),
        };
        self.add_vm_interface(interface.clone());
        interface
    }

    /// Create and store an IP address bound to a device interface
    pub fn create_ip_on_interface(&self, address: &str, interface: &Interface, dns_name: &str) -> IPAddress {
        let assigned = AssignedObject {
            id: interface.id,
            url: interface.url.clone(),
            display: interface.display.clone(),
            name: interface.name.clone(),
            device: Some(interface.device.clone()),
            virtual_machine: None,
        };
        let ip = self.helpers().create_ip_address(
            self.next_id(),
            address,
            dns_name,
            Some(DCIM_INTERFACE),
            Some(assigned),
        );
        self.add_ip_address(ip.clone());
        ip
    }

    /// Create and store an IP address bound to a VM interface
    pub fn create_ip_on_vm_interface(&self, address: &str, interface: &VMInterface, dns_name: &str) -> IPAddress {
        let assigned = AssignedObject {
            id: interface.id,
            url: interface.url.clone(),
            display: interface.display.clone(),
            name: interface.name.clone(),
            device: None,
            virtual_machine: Some(interface.virtual_machine.clone()),
        };
        let ip = self.helpers().create_ip_address(
            self.next_id(),
            address,
            dns_name,
            Some(VIRTUALIZATION_VMINTERFACE),
            Some(assigned),
        );
        self.add_ip_address(ip.clone());
        ip
    }

    /// Create and store an IP address with an arbitrary assignment type and no nested object
    pub fn create_ip_with_assignment(&self, address: &str, assigned_object_type: Option<&str>, dns_name: &str) -> IPAddress {
        let ip = self.helpers().create_ip_address(
            self.next_id(),
            address,
            dns_name,
            assigned_object_type,
            None,
        );
        self.add_ip_address(ip.clone());
        ip
    }
}
