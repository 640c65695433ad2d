//! Diagonal stripe rasterization.
//!
//! A diagonal selection is a line from one corner of the dragged box to the
//! opposite corner, widened perpendicular to its dominant direction. The
//! corner the line starts from is the one nearest to where the user clicked.
//!
//! # Direction
//!
//! The anchor is compared with the box center (truncating integer mean):
//!
//! | Anchor        | Line            |
//! |---------------|-----------------|
//! | `x <= cx, z <= cz` | north-west to south-east |
//! | `x > cx, z <= cz`  | north-east to south-west |
//! | `x <= cx, z > cz`  | south-west to north-east |
//! | `x > cx, z > cz`   | south-east to north-west |
//!
//! Without an anchor the line runs north-west to south-east.
//!
//! # Thickness
//!
//! At every step of the line a run of `|thickness|` cells is marked. Positive
//! values extend the run towards larger coordinates starting at the traced
//! cell, negative values towards smaller coordinates ending at it. The run
//! extends along Z when the line spans strictly more cells along X than along
//! Z, and along X otherwise, so square boxes widen along X. Cells that fall
//! outside the box are dropped.

use std::ops::RangeInclusive;

use crate::geometry::{CellBounds, CellRegion, Corner};

/// Largest stripe thickness, in cells, in either direction.
pub const MAX_THICKNESS: i32 = 9;

/// The cell the user clicked when starting a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Anchor {
    /// X cell of the click
    pub x: i32,
    /// Z cell of the click
    pub z: i32,
}

impl Anchor {
    /// Creates an anchor at the given cell.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Anchor { x, z }
    }

    /// Interprets the click fields the host stores on its bulldoze control.
    ///
    /// The host uses `-1` in either field for "no click recorded".
    #[must_use]
    pub const fn from_host(x: i32, z: i32) -> Option<Self> {
        if x == -1 || z == -1 {
            None
        } else {
            Some(Anchor { x, z })
        }
    }
}

/// Direction of the traced line, named by its start and end corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagonalDirection {
    /// From the minimum-X/minimum-Z corner to the maximum-X/maximum-Z corner
    NorthWestToSouthEast,
    /// From the maximum-X/minimum-Z corner to the minimum-X/maximum-Z corner
    NorthEastToSouthWest,
    /// From the minimum-X/maximum-Z corner to the maximum-X/minimum-Z corner
    SouthWestToNorthEast,
    /// From the maximum-X/maximum-Z corner to the minimum-X/minimum-Z corner
    SouthEastToNorthWest,
}

impl DiagonalDirection {
    /// Picks the direction starting at the corner nearest to `anchor`.
    #[must_use]
    pub fn from_anchor(bounds: &CellBounds, anchor: Option<Anchor>) -> Self {
        let Some(anchor) = anchor else {
            return DiagonalDirection::NorthWestToSouthEast;
        };

        let (center_x, center_z) = bounds.center();
        match (anchor.x <= center_x, anchor.z <= center_z) {
            (true, true) => DiagonalDirection::NorthWestToSouthEast,
            (false, true) => DiagonalDirection::NorthEastToSouthWest,
            (true, false) => DiagonalDirection::SouthWestToNorthEast,
            (false, false) => DiagonalDirection::SouthEastToNorthWest,
        }
    }

    /// The corner the line starts at.
    #[must_use]
    pub const fn start(self) -> Corner {
        match self {
            DiagonalDirection::NorthWestToSouthEast => Corner::NorthWest,
            DiagonalDirection::NorthEastToSouthWest => Corner::NorthEast,
            DiagonalDirection::SouthWestToNorthEast => Corner::SouthWest,
            DiagonalDirection::SouthEastToNorthWest => Corner::SouthEast,
        }
    }

    /// The corner the line ends at.
    #[must_use]
    pub const fn end(self) -> Corner {
        self.start().opposite()
    }
}

/// Offsets of the perpendicular run for a thickness, relative to the traced cell.
///
/// The magnitude is clamped to `1..=MAX_THICKNESS`; zero counts as one.
#[must_use]
pub fn thickness_offsets(thickness: i32) -> RangeInclusive<i32> {
    let thickness = if thickness == 0 {
        1
    } else {
        thickness.clamp(-MAX_THICKNESS, MAX_THICKNESS)
    };

    if thickness > 0 {
        0..=thickness - 1
    } else {
        thickness + 1..=0
    }
}

/// Computes the diagonal stripe spanned by two corner points.
///
/// The region's box is the bounding box of `(x1, z1)` and `(x2, z2)`; the
/// stripe direction is chosen from `anchor`, see the [module documentation](self).
///
/// # Examples
///
/// ```rust
/// use bulldoze_extensions::geometry::{compute_diagonal_region, Anchor};
///
/// let region = compute_diagonal_region(4, 0, 0, 4, Some(Anchor::new(4, 0)), 1);
/// assert!(region.is_selected(4, 0));
/// assert!(region.is_selected(0, 4));
/// assert!(!region.is_selected(0, 0));
/// ```
#[must_use]
pub fn compute_diagonal_region(
    x1: i32,
    z1: i32,
    x2: i32,
    z2: i32,
    anchor: Option<Anchor>,
    thickness: i32,
) -> CellRegion {
    diagonal_region_in(CellBounds::from_corners(x1, z1, x2, z2), anchor, thickness)
}

/// Computes the diagonal stripe inside an existing bounding box.
#[must_use]
pub fn diagonal_region_in(bounds: CellBounds, anchor: Option<Anchor>, thickness: i32) -> CellRegion {
    let mut region = CellRegion::new(bounds, false);

    let direction = DiagonalDirection::from_anchor(&bounds, anchor);
    let (start_x, start_z) = bounds.corner(direction.start());
    let (end_x, end_z) = bounds.corner(direction.end());

    let (start_x, start_z) = (i64::from(start_x), i64::from(start_z));
    let (end_x, end_z) = (i64::from(end_x), i64::from(end_z));

    let dx = (end_x - start_x).abs();
    let dz = (end_z - start_z).abs();
    let sx = if start_x < end_x { 1 } else { -1 };
    let sz = if start_z < end_z { 1 } else { -1 };
    let widen_along_z = dx > dz;
    let offsets = thickness_offsets(thickness);

    let mut err = dx - dz;
    let mut x = start_x;
    let mut z = start_z;

    loop {
        for offset in offsets.clone() {
            let offset = i64::from(offset);
            let (cell_x, cell_z) = if widen_along_z {
                (x, z + offset)
            } else {
                (x + offset, z)
            };

            if let (Ok(cell_x), Ok(cell_z)) = (i32::try_from(cell_x), i32::try_from(cell_z)) {
                region.select(cell_x, cell_z, true);
            }
        }

        if x == end_x && z == end_z {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dz {
            err -= dz;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            z += sz;
        }
    }

    region
}
