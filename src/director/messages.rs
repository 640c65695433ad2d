//! Message and resource identifiers used on the host notification bus.

use strum::{Display, EnumCount, EnumIter, FromRepr};

use crate::mode::BulldozeCursor;

/// Id of the extension's director.
pub const DIRECTOR_ID: u32 = 0x5B7D_9E30;

/// Window id of the application window holding the city view.
pub const WINDOW_SC4_APP: u32 = 0x6104_489A;

/// Window id of the 3D city view.
pub const WINDOW_VIEW_3D: u32 = 0x9a47_b417;

/// Interface id the 3D city view is queried for.
pub const IID_VIEW_3D: u32 = 0xFA47_B3F9;

/// Key of a host resource: type, group and instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    /// Resource type
    pub type_id: u32,
    /// Resource group
    pub group: u32,
    /// Resource instance
    pub instance: u32,
}

/// The private key-accelerator resource binding the shortcut keys.
pub const SHORTCUT_ACCELERATORS: ResourceKey = ResourceKey {
    type_id: 0xA2E3_D533,
    group: 0x6930_B865,
    instance: 0x3A80_C2A5,
};

/// Every message the director subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, FromRepr)]
#[repr(u32)]
pub enum Message {
    /// A city finished loading
    PostCityInit = 0x26D3_1EC1,
    /// A city is about to be unloaded
    PreCityShutdown = 0x26D3_1EC2,
    /// The loaded city was established by the player
    CityEstablished = 0x26D3_1EC4,
    /// Bulldoze shortcut, diagonal
    DiagonalShortcut = 0x6A93_5D37,
    /// Bulldoze shortcut, flora
    FloraShortcut = 0x755C_6E40,
    /// Bulldoze shortcut, flora and diagonal
    FloraDiagonalShortcut = 0x755C_6E41,
    /// Bulldoze shortcut, networks
    NetworkShortcut = 0x5ECE_D6AE,
    /// Bulldoze shortcut, networks and diagonal
    NetworkDiagonalShortcut = 0x5ECE_D6AF,
}

impl Message {
    /// The five shortcut messages, in registration order.
    pub const SHORTCUTS: [Message; 5] = [
        Message::DiagonalShortcut,
        Message::FloraShortcut,
        Message::FloraDiagonalShortcut,
        Message::NetworkShortcut,
        Message::NetworkDiagonalShortcut,
    ];

    /// The message id.
    #[must_use]
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// The cursor a shortcut activates the bulldoze tool with.
    #[must_use]
    pub const fn shortcut_cursor(self) -> Option<BulldozeCursor> {
        match self {
            Message::DiagonalShortcut => Some(BulldozeCursor::DefaultDiagonal),
            Message::FloraShortcut => Some(BulldozeCursor::Flora),
            Message::FloraDiagonalShortcut => Some(BulldozeCursor::FloraDiagonal),
            Message::NetworkShortcut => Some(BulldozeCursor::Network),
            Message::NetworkDiagonalShortcut => Some(BulldozeCursor::NetworkDiagonal),
            Message::PostCityInit | Message::PreCityShutdown | Message::CityEstablished => None,
        }
    }
}
