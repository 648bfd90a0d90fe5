//! Type definitions for the VLAN reconciler.

/// Upper bound of the 802.1Q tag space.
pub const MAX_VLAN_ID: u32 = 4095;

/// Declared VLAN link parameters for one invocation.
///
/// Constructed once at the CLI boundary and read-only afterwards. A
/// `vlan_id` of 0 means the tag was not supplied.
#[derive(Debug, Clone, Default)]
pub struct VlanSpec {
    /// VLAN link name.
    pub name: String,
    /// Underlying link the VLAN rides on; required when creating.
    pub link: Option<String>,
    /// 802.1Q tag; 0 when not supplied.
    pub vlan_id: u32,
    /// Do not persist the change across reboots.
    pub temporary: bool,
}

impl VlanSpec {
    /// True when the tag lies inside the 802.1Q range.
    pub fn is_valid_vlan_id(&self) -> bool {
        self.vlan_id <= MAX_VLAN_ID
    }
}
