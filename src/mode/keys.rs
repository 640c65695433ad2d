//! Keyboard modifiers and the mode toggle mapping.
//!
//! The host reports modifier keys as a bit mask alongside every key and wheel
//! event. The toggle key combines with those modifiers to pick the occupant
//! filter and the diagonal flag in one step:
//!
//! | Modifiers            | Filter  | Diagonal |
//! |----------------------|---------|----------|
//! | none                 | None    | off      |
//! | Alt                  | None    | on       |
//! | Ctrl (+Shift)        | Flora   | off      |
//! | Ctrl (+Shift) + Alt  | Flora   | on       |
//! | Shift                | Network | off      |
//! | Shift + Alt          | Network | on       |
//!
//! Control wins over Shift when both are held.

use bitflags::bitflags;

use crate::mode::OccupantFilterKind;

/// Virtual key code of the Escape key.
pub const VK_ESCAPE: u32 = 0x1B;

/// Virtual key code of the `B` key, the default mode toggle key.
pub const VK_B: u32 = 0x42;

bitflags! {
    /// Modifier keys held during an input event, as reported by the host
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierKeys: u32 {
        /// Either Shift key
        const SHIFT = 0x1;
        /// Either Control key
        const CONTROL = 0x2;
        /// Either Alt key; also the diagonal modifier
        const ALT = 0x4;
    }
}

impl ModifierKeys {
    /// Converts the host's modifier mask, ignoring bits this crate does not use.
    #[must_use]
    pub const fn from_host(raw: u32) -> Self {
        Self::from_bits_truncate(raw)
    }

    /// Returns `true` if the diagonal modifier (Alt) is held.
    #[must_use]
    pub const fn diagonal_held(self) -> bool {
        self.contains(Self::ALT)
    }
}

/// Maps the modifiers held with the toggle key to a filter kind and diagonal flag.
///
/// The mapping is total: every combination of the three modifier bits yields
/// a result.
#[must_use]
pub fn toggle_selection(modifiers: ModifierKeys) -> (OccupantFilterKind, bool) {
    let diagonal = modifiers.diagonal_held();

    if modifiers.is_empty() {
        (OccupantFilterKind::None, false)
    } else if modifiers == ModifierKeys::ALT {
        (OccupantFilterKind::None, true)
    } else if modifiers.contains(ModifierKeys::CONTROL) {
        (OccupantFilterKind::Flora, diagonal)
    } else {
        // Only Shift, possibly with Alt, remains
        (OccupantFilterKind::Network, diagonal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_eight_combinations() {
        use OccupantFilterKind::{Flora, Network, None};

        let shift = ModifierKeys::SHIFT;
        let ctrl = ModifierKeys::CONTROL;
        let alt = ModifierKeys::ALT;

        let cases = [
            (ModifierKeys::empty(), (None, false)),
            (alt, (None, true)),
            (ctrl, (Flora, false)),
            (ctrl | alt, (Flora, true)),
            (shift, (Network, false)),
            (shift | alt, (Network, true)),
            (ctrl | shift, (Flora, false)),
            (ctrl | shift | alt, (Flora, true)),
        ];

        for (modifiers, expected) in cases {
            assert_eq!(toggle_selection(modifiers), expected, "{modifiers:?}");
        }
    }

    #[test]
    fn from_host_drops_unknown_bits() {
        let modifiers = ModifierKeys::from_host(0xF0 | 0x4);
        assert_eq!(modifiers, ModifierKeys::ALT);
        assert!(modifiers.diagonal_held());
        assert!(!ModifierKeys::from_host(0x3).diagonal_held());
    }
}
