//! Byte layouts of the host objects the extensions touch.
//!
//! The structures here are never instantiated over host memory. They exist so
//! that field offsets are derived by the compiler and checked against the
//! known values at build time; a mismatch fails the build. Pointers are
//! stored as `u32` because the host is a 32-bit process.

use std::mem::{offset_of, size_of};

use crate::config::PreviewColor;

/// The game's bulldoze control object (`0xd8` bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug)]
#[allow(dead_code)]
pub struct DemolishControlLayout {
    /// Primary vtable
    pub vtable: u32,
    /// Set once `Init` ran
    pub initialized: u8,
    _pad0: [u8; 3],
    /// COM reference count
    pub ref_count: u32,
    /// Control id, `0x46ddb5f1` for the bulldoze control
    pub id: u32,
    /// Resource id of the active cursor
    pub cursor_iid: u32,
    /// Cursor object
    pub cursor: u32,
    /// Owning window
    pub window: u32,
    /// 3D view window
    pub view3d_win: u32,
    /// Window manager
    pub window_manager: u32,
    unknown1: u32,
    /// Budget simulator
    pub budget_sim: u32,
    /// City
    pub city: u32,
    /// Demolition service
    pub demolition: u32,
    /// Lot developer
    pub lot_developer: u32,
    /// Lot manager
    pub lot_manager: u32,
    /// Filter applied to demolishable occupants
    pub demolishable_filter: u32,
    /// Occupant manager
    pub occupant_manager: u32,
    /// Non-zero while the user drags a selection
    pub cell_picked: u8,
    unknown2: [u8; 3],
    /// Lot box min X, or the drag start X
    pub lot_min_x: i32,
    /// Lot box min Z, or the drag start Z
    pub lot_min_z: i32,
    /// Lot box max X, or the drag start X
    pub lot_max_x: i32,
    /// Lot box max Z, or the drag start Z
    pub lot_max_z: i32,
    /// X cell where the drag started, `-1` when unset
    pub click_x: i32,
    /// Z cell where the drag started, `-1` when unset
    pub click_z: i32,
    /// X cell under the cursor
    pub cell_point_x: i32,
    /// Z cell under the cursor
    pub cell_point_z: i32,
    /// Selection region, owned by the control
    pub cell_region: u32,
    /// Non-zero if the selection can be demolished
    pub valid_target: u8,
    _pad1: [u8; 3],
    /// Occupant under the cursor
    pub selected_occupant: u32,
    unknown3: [u8; 28],
    /// Overlay view that draws the selection
    pub marked_cell_view: u32,
    /// Non-zero if the selected occupant is a sign post
    pub sign_post_occupant: u8,
    _pad2: [u8; 3],
    /// Overlay color for a destroyable selection
    pub destroy_ok: PreviewColor,
    /// Overlay color for a selection that cannot be destroyed
    pub destroy_not_ok: PreviewColor,
    /// Overlay color for a demolishable selection
    pub demolish_ok: PreviewColor,
    /// Overlay color for a selection that cannot be demolished
    pub demolish_not_ok: PreviewColor,
}

impl DemolishControlLayout {
    /// Total size.
    pub const SIZE: usize = size_of::<Self>();
    /// Offset of [`id`](Self::id).
    pub const ID: u32 = offset_of!(Self, id) as u32;
    /// Offset of [`cursor_iid`](Self::cursor_iid).
    pub const CURSOR_IID: u32 = offset_of!(Self, cursor_iid) as u32;
    /// Offset of [`demolition`](Self::demolition).
    pub const DEMOLITION: u32 = offset_of!(Self, demolition) as u32;
    /// Offset of [`cell_picked`](Self::cell_picked).
    pub const CELL_PICKED: u32 = offset_of!(Self, cell_picked) as u32;
    /// Offset of [`lot_min_x`](Self::lot_min_x).
    pub const LOT_MIN_X: u32 = offset_of!(Self, lot_min_x) as u32;
    /// Offset of [`click_x`](Self::click_x).
    pub const CLICK_X: u32 = offset_of!(Self, click_x) as u32;
    /// Offset of [`click_z`](Self::click_z).
    pub const CLICK_Z: u32 = offset_of!(Self, click_z) as u32;
    /// Offset of [`cell_region`](Self::cell_region).
    pub const CELL_REGION: u32 = offset_of!(Self, cell_region) as u32;
    /// Offset of [`demolish_ok`](Self::demolish_ok).
    pub const DEMOLISH_OK: u32 = offset_of!(Self, demolish_ok) as u32;
}

const _: () = {
    assert!(size_of::<PreviewColor>() == 0x10);
    assert!(DemolishControlLayout::SIZE == 0xd8);
    assert!(offset_of!(DemolishControlLayout, id) == 0xc);
    assert!(offset_of!(DemolishControlLayout, budget_sim) == 0x28);
    assert!(offset_of!(DemolishControlLayout, occupant_manager) == 0x40);
    assert!(offset_of!(DemolishControlLayout, cell_picked) == 0x44);
    assert!(offset_of!(DemolishControlLayout, click_x) == 0x58);
    assert!(offset_of!(DemolishControlLayout, cell_point_x) == 0x60);
    assert!(offset_of!(DemolishControlLayout, cell_region) == 0x68);
    assert!(offset_of!(DemolishControlLayout, valid_target) == 0x6c);
    assert!(offset_of!(DemolishControlLayout, marked_cell_view) == 0x90);
    assert!(offset_of!(DemolishControlLayout, destroy_ok) == 0x98);
    assert!(offset_of!(DemolishControlLayout, demolish_ok) == 0xb8);
};

/// Inclusive cell rectangle as the host stores it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RectLayout {
    /// Minimum X
    pub min_x: i32,
    /// Minimum Z
    pub min_z: i32,
    /// Maximum X
    pub max_x: i32,
    /// Maximum Z
    pub max_z: i32,
}

/// The host's 2D cell array: one byte per cell, rows of `width` cells.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellArrayLayout {
    /// First cell
    pub begin: u32,
    /// One past the last cell
    pub end: u32,
    /// One past the allocated storage
    pub capacity_end: u32,
    /// Cells per row
    pub width: u32,
    /// Number of rows
    pub height: u32,
}

/// The host's cell region: bounds followed by the cell array.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellRegionLayout {
    /// Selection bounds
    pub bounds: RectLayout,
    /// Membership cells
    pub cells: CellArrayLayout,
}

impl CellRegionLayout {
    /// Total size.
    pub const SIZE: usize = size_of::<Self>();
    /// Offset of [`bounds`](Self::bounds).
    pub const BOUNDS: u32 = offset_of!(Self, bounds) as u32;
    /// Offset of the first-cell pointer.
    pub const CELLS_BEGIN: u32 = (offset_of!(Self, cells) + offset_of!(CellArrayLayout, begin)) as u32;
    /// Offset of the one-past-last-cell pointer.
    pub const CELLS_END: u32 = (offset_of!(Self, cells) + offset_of!(CellArrayLayout, end)) as u32;
    /// Offset of the row width.
    pub const CELLS_WIDTH: u32 = (offset_of!(Self, cells) + offset_of!(CellArrayLayout, width)) as u32;
    /// Offset of the row count.
    pub const CELLS_HEIGHT: u32 = (offset_of!(Self, cells) + offset_of!(CellArrayLayout, height)) as u32;
}

const _: () = {
    assert!(size_of::<RectLayout>() == 0x10);
    assert!(CellRegionLayout::SIZE == 0x24);
    assert!(CellRegionLayout::CELLS_BEGIN == 0x10);
    assert!(CellRegionLayout::CELLS_WIDTH == 0x1c);
};
