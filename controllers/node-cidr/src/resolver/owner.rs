//! Address owner classification.

use crate::error::ResolutionError;
use netbox_client::{AssignedObjectKind, IPAddress};

/// Device or virtual machine an address record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerReference {
    Device { id: u64 },
    VirtualMachine { id: u64 },
}

/// Decide which device or VM owns an address record.
///
/// Addresses on anything other than a dcim interface or a VM interface, or
/// whose nested owner link is missing, cannot be traversed further.
pub fn classify_owner(ip: &IPAddress) -> Result<OwnerReference, ResolutionError> {
    let unassigned = || ResolutionError::UnassignedOwner {
        address: ip.address.clone(),
        object_type: ip.assigned_object_type.clone(),
    };
    let assigned = ip.assigned_object.as_ref();

    match ip.assigned_object_kind() {
        Some(AssignedObjectKind::Interface) => assigned
            .and_then(|o| o.device.as_ref())
            .map(|device| OwnerReference::Device { id: device.id })
            .ok_or_else(unassigned),
        Some(AssignedObjectKind::VmInterface) => assigned
            .and_then(|o| o.virtual_machine.as_ref())
            .map(|vm| OwnerReference::VirtualMachine { id: vm.id })
            .ok_or_else(unassigned),
        Some(AssignedObjectKind::Other(_)) | None => Err(unassigned()),
    }
}
