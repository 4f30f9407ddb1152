//! Management interface lookup.

use super::expect_single;
use super::owner::OwnerReference;
use crate::error::{LookupContext, ResolutionError};
use netbox_client::{InterfaceFilter, IpAddressFilter, NetBoxClientTrait, VmInterfaceFilter};
use tracing::debug;

/// Name of the interface whose address becomes the node's pod CIDR
pub const MANAGEMENT_INTERFACE_NAME: &str = "cbr0";

/// Resolved management interface id, tagged by id space.
///
/// dcim interface ids and VM interface ids are separate sequences in NetBox,
/// so the tag decides which address filter key the id may be used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementInterface {
    Physical(u64),
    Virtual(u64),
}

impl ManagementInterface {
    /// Address search filter for addresses bound to this interface
    pub fn address_filter(self) -> IpAddressFilter {
        match self {
            Self::Physical(id) => IpAddressFilter::InterfaceId(id),
            Self::Virtual(id) => IpAddressFilter::VmInterfaceId(id),
        }
    }
}

/// Find the owner's single `cbr0` interface.
pub async fn resolve_management_interface(
    client: &dyn NetBoxClientTrait,
    owner: &OwnerReference,
) -> Result<ManagementInterface, ResolutionError> {
    let cardinality = |got: u64| ResolutionError::InterfaceCardinality {
        context: LookupContext::ManagementInterface,
        expected: 1,
        got,
    };

    match *owner {
        OwnerReference::Device { id } => {
            debug!("Looking for device {} interface {}", id, MANAGEMENT_INTERFACE_NAME);
            let filter = InterfaceFilter {
                device_id: id,
                name: MANAGEMENT_INTERFACE_NAME.to_string(),
            };
            let page = client.search_interfaces(&filter).await?;
            let interface = expect_single(page, cardinality)?;
            Ok(ManagementInterface::Physical(interface.id))
        }
        OwnerReference::VirtualMachine { id } => {
            debug!("Looking for virtual machine {} interface {}", id, MANAGEMENT_INTERFACE_NAME);
            let filter = VmInterfaceFilter {
                virtual_machine_id: id,
                name: MANAGEMENT_INTERFACE_NAME.to_string(),
            };
            let page = client.search_vm_interfaces(&filter).await?;
            let interface = expect_single(page, cardinality)?;
            Ok(ManagementInterface::Virtual(interface.id))
        }
    }
}
