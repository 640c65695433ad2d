//! Occupant filters.
//!
//! The host's demolition routine accepts an optional filter object that it asks,
//! for every occupant in the region, whether the occupant may be demolished.
//! [`OccupantFilter`] is the host-independent description of that filter; the
//! in-process layer wraps it in the object the host expects.

use bitflags::bitflags;

/// Host occupant type id of trees and other flora.
pub const FLORA_OCCUPANT_TYPE: u32 = 0x7475_8926;

/// Host occupant type id of network pieces (roads, rails, pipes, ...).
pub const NETWORK_OCCUPANT_TYPE: u32 = 0x088E_1962;

bitflags! {
    /// Network types, in the bit order the host uses for its network occupants
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NetworkTypeFlags: u32 {
        /// Road
        const ROAD = 1 << 0;
        /// Heavy rail
        const RAIL = 1 << 1;
        /// Elevated highway
        const HIGHWAY = 1 << 2;
        /// Street
        const STREET = 1 << 3;
        /// Water pipe
        const PIPE = 1 << 4;
        /// Power line
        const POWER_LINE = 1 << 5;
        /// Avenue
        const AVENUE = 1 << 6;
        /// Subway
        const SUBWAY = 1 << 7;
        /// Light rail
        const LIGHT_RAIL = 1 << 8;
        /// Monorail
        const MONORAIL = 1 << 9;
        /// One-way road
        const ONE_WAY_ROAD = 1 << 10;
        /// Dirt road
        const DIRT_ROAD = 1 << 11;
        /// Ground highway
        const GROUND_HIGHWAY = 1 << 12;

        /// Every network a vehicle or pedestrian can travel on
        const ALL_TRANSPORTATION = Self::ROAD.bits()
            | Self::RAIL.bits()
            | Self::HIGHWAY.bits()
            | Self::STREET.bits()
            | Self::AVENUE.bits()
            | Self::SUBWAY.bits()
            | Self::LIGHT_RAIL.bits()
            | Self::MONORAIL.bits()
            | Self::ONE_WAY_ROAD.bits()
            | Self::DIRT_ROAD.bits()
            | Self::GROUND_HIGHWAY.bits();
    }
}

/// Restricts a demolition to a class of occupants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OccupantFilter {
    /// No restriction; the host decides on its own
    #[default]
    Unrestricted,
    /// Flora occupants only
    Flora,
    /// Network occupants of the given types only
    Network(NetworkTypeFlags),
}

impl OccupantFilter {
    /// Returns `true` if the filter narrows what the host would demolish.
    #[must_use]
    pub const fn is_restricted(&self) -> bool {
        !matches!(self, OccupantFilter::Unrestricted)
    }

    /// Returns `true` if occupants of this host type id pass the filter.
    ///
    /// For network filters this only checks the occupant type; use
    /// [`includes_network`](Self::includes_network) for the network kind.
    #[must_use]
    pub const fn includes_occupant_type(&self, type_id: u32) -> bool {
        match self {
            OccupantFilter::Unrestricted => true,
            OccupantFilter::Flora => type_id == FLORA_OCCUPANT_TYPE,
            OccupantFilter::Network(_) => type_id == NETWORK_OCCUPANT_TYPE,
        }
    }

    /// Returns `true` if an occupant of host type `type_id` passes the filter.
    ///
    /// `network` reads the occupant's network types and is called only for
    /// network occupants under a network filter. An occupant whose network
    /// types cannot be read is rejected, so a pipe or power line never slips
    /// through a transportation filter.
    pub fn includes_occupant(
        &self,
        type_id: u32,
        network: impl FnOnce() -> Option<NetworkTypeFlags>,
    ) -> bool {
        match self {
            OccupantFilter::Network(_) if type_id == NETWORK_OCCUPANT_TYPE => {
                network().is_some_and(|network| self.includes_network(network))
            }
            _ => self.includes_occupant_type(type_id),
        }
    }

    /// Returns `true` if a network occupant carrying `network` passes the filter.
    ///
    /// A network piece may carry several types at once (an intersection of a
    /// road and a rail, for example); it passes if any of them is accepted.
    #[must_use]
    pub fn includes_network(&self, network: NetworkTypeFlags) -> bool {
        match self {
            OccupantFilter::Unrestricted => true,
            OccupantFilter::Flora => false,
            OccupantFilter::Network(accepted) => accepted.intersects(network),
        }
    }
}
