//! Host addresses and the fixed locations of build 641.

use std::fmt;

/// A 32-bit address in the host process.
///
/// The game is a 32-bit executable; every pointer it stores in its objects is
/// four bytes wide, regardless of the pointer width of the code reading it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostAddress(u32);

impl HostAddress {
    /// The null address.
    pub const NULL: HostAddress = HostAddress(0);

    /// Wraps a raw address.
    #[must_use]
    pub const fn new(address: u32) -> Self {
        HostAddress(address)
    }

    /// The raw address.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns `true` for the null address.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// The address `offset` bytes further, wrapping like the host's 32-bit
    /// arithmetic does.
    #[must_use]
    pub const fn offset(self, offset: u32) -> Self {
        HostAddress(self.0.wrapping_add(offset))
    }

    /// `None` for the null address.
    #[must_use]
    pub const fn non_null(self) -> Option<Self> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<u32> for HostAddress {
    fn from(address: u32) -> Self {
        HostAddress(address)
    }
}

/// Fixed code and data locations in game build 641.
pub mod addresses {
    use super::HostAddress;

    /// Constructor of the bulldoze control object.
    pub const DEMOLISH_CONTROL_CTOR: HostAddress = HostAddress::new(0x004b_9070);

    /// Returns whether a view input control currently owns the 3D view.
    pub const IS_ON_TOP: HostAddress = HostAddress::new(0x005f_b190);

    /// Ends the current bulldoze gesture and discards the selection.
    pub const END_INPUT: HostAddress = HostAddress::new(0x004b_9040);

    /// Rebuilds and redraws the selection overlay.
    pub const UPDATE_SELECTED_REGION: HostAddress = HostAddress::new(0x004b_93b0);

    /// Vtable of the bulldoze control.
    pub const DEMOLISH_CONTROL_VTABLE: HostAddress = HostAddress::new(0x00a9_01a8);

    /// Offset of `Init` in a view input control's vtable.
    pub const INIT_SLOT: u32 = 0x0c;

    /// Offset of `SetCursor` in a view input control's vtable.
    pub const SET_CURSOR_SLOT: u32 = 0x20;

    /// Offset of `OnKeyDown` in a view input control's vtable.
    pub const KEY_DOWN_SLOT: u32 = 0x30;

    /// Offset of `OnMouseWheel` in a view input control's vtable.
    pub const MOUSE_WHEEL_SLOT: u32 = 0x4c;

    /// Offset of `Activate` in a view input control's vtable.
    pub const ACTIVATE_SLOT: u32 = 0x54;

    /// Jump-table entry of the bulldoze control's key-down handler.
    pub const KEY_DOWN_ENTRY: HostAddress = HostAddress::new(0x00a9_01d8);

    /// Jump-table entry of the bulldoze control's mouse-wheel handler.
    pub const MOUSE_WHEEL_ENTRY: HostAddress = HostAddress::new(0x00a9_01f4);

    /// Jump-table entry of the bulldoze control's activate handler.
    pub const ACTIVATE_ENTRY: HostAddress = HostAddress::new(0x00a9_01fc);

    /// The `push 0x1` whose two bytes are replaced by `push esi; push eax`.
    pub const PREVIEW_PADDING: HostAddress = HostAddress::new(0x004b_97ed);

    /// Call site of the demolition routine while the selection is updated.
    pub const PREVIEW_CALL_SITE: HostAddress = HostAddress::new(0x004b_97ef);

    /// Call site of the demolition routine when the mouse button is released.
    pub const COMMIT_CALL_SITE: HostAddress = HostAddress::new(0x004b_9d02);

    /// Offset of the routine both demolition call sites invoke.
    ///
    /// Takes the region first and no demolish flag. The patched call sites
    /// run the replacement entries instead, so it is never called from here.
    pub const DEMOLITION_CALL_SITE_SLOT: u32 = 0x18;

    /// Offset of `DemolishRegion` in the demolition service's vtable.
    ///
    /// Takes the demolish flag first: `false` computes the preview and
    /// cost, `true` demolishes. Follows `Init` and `Shutdown`, which follow
    /// the three `IUnknown` slots.
    pub const DEMOLISH_REGION_SLOT: u32 = 0x14;

    /// Privilege type passed to every demolition call.
    pub const PRIVILEGE_TYPE: u32 = 1;

    /// Id of the game's bulldoze control.
    pub const BULLDOZE_CONTROL_ID: u32 = 0x46dd_b5f1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_zero_padded_hex() {
        assert_eq!(HostAddress::new(0x4b9070).to_string(), "0x004b9070");
        assert_eq!(HostAddress::NULL.to_string(), "0x00000000");
    }

    #[test]
    fn offset_wraps() {
        assert_eq!(HostAddress::new(0x10).offset(0x58).value(), 0x68);
        assert_eq!(HostAddress::new(u32::MAX).offset(2).value(), 1);
        assert_eq!(HostAddress::NULL.non_null(), None);
        assert!(HostAddress::new(4).non_null().is_some());
    }

    #[test]
    fn handler_entries_are_vtable_slots() {
        let vtable = addresses::DEMOLISH_CONTROL_VTABLE;
        assert_eq!(vtable.offset(addresses::KEY_DOWN_SLOT), addresses::KEY_DOWN_ENTRY);
        assert_eq!(vtable.offset(addresses::MOUSE_WHEEL_SLOT), addresses::MOUSE_WHEEL_ENTRY);
        assert_eq!(vtable.offset(addresses::ACTIVATE_SLOT), addresses::ACTIVATE_ENTRY);
    }

    #[test]
    fn forwarding_slot_is_not_the_call_site_slot() {
        assert_ne!(
            addresses::DEMOLISH_REGION_SLOT,
            addresses::DEMOLITION_CALL_SITE_SLOT
        );
        assert_eq!(addresses::DEMOLISH_REGION_SLOT % 4, 0);
        assert_eq!(addresses::DEMOLISH_REGION_SLOT / 4, 5);
    }

    #[test]
    fn padding_precedes_preview_call() {
        assert_eq!(
            addresses::PREVIEW_PADDING.offset(2),
            addresses::PREVIEW_CALL_SITE
        );
    }
}
