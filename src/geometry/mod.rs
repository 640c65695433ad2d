//! Region geometry for the bulldoze tool.
//!
//! # Key Components
//!
//! - [`CellBounds`] - inclusive rectangle of grid cells
//! - [`CellMap`] - fixed-size 2D boolean grid with bounds-checked access
//! - [`CellRegion`] - a box plus a membership map of the same dimensions
//! - [`compute_diagonal_region`] - the diagonal stripe rasterizer
//!
//! Regions are values. The host keeps its own, differently shaped region
//! objects; [`crate::host::HostCellRegion`] copies membership between the two
//! without ever resizing the host's storage.

mod bounds;
mod cellmap;
mod diagonal;
mod region;

pub use bounds::{CellBounds, Corner};
pub use cellmap::{CellMap, CellMapIter};
pub use diagonal::{
    compute_diagonal_region, diagonal_region_in, thickness_offsets, Anchor, DiagonalDirection,
    MAX_THICKNESS,
};
pub use region::CellRegion;
