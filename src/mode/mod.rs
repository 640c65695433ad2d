//! Bulldoze mode: occupant filter, diagonal flag and stripe thickness.
//!
//! # Key Components
//!
//! - [`ModeState`] - the state machine the hook handlers drive
//! - [`toggle_selection`] - modifier keys to mode mapping for the toggle key
//! - [`BulldozeCursor`] / [`CursorSet`] - cursor per mode and its resource id
//! - [`OccupantFilterKind`] - which occupants a demolition may touch

mod cursor;
mod keys;
mod state;

pub use cursor::{BulldozeCursor, CursorSet};
pub use keys::{toggle_selection, ModifierKeys, VK_B, VK_ESCAPE};
pub use state::{ModeState, Thickness};

use strum::{Display, EnumCount, EnumIter};

use crate::filter::{NetworkTypeFlags, OccupantFilter};

/// Which occupants a demolition is restricted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, EnumCount, Display)]
pub enum OccupantFilterKind {
    /// Everything the game would demolish on its own
    #[default]
    None,
    /// Trees and other flora
    Flora,
    /// Transportation networks
    Network,
}

impl OccupantFilterKind {
    /// The concrete filter for this kind.
    #[must_use]
    pub const fn filter(self) -> OccupantFilter {
        match self {
            OccupantFilterKind::None => OccupantFilter::Unrestricted,
            OccupantFilterKind::Flora => OccupantFilter::Flora,
            OccupantFilterKind::Network => {
                OccupantFilter::Network(NetworkTypeFlags::ALL_TRANSPORTATION)
            }
        }
    }
}
