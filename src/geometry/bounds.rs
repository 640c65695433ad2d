//! Inclusive cell bounding boxes.

use std::fmt;

/// One of the four corners of a [`CellBounds`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Minimum X, minimum Z
    NorthWest,
    /// Maximum X, minimum Z
    NorthEast,
    /// Minimum X, maximum Z
    SouthWest,
    /// Maximum X, maximum Z
    SouthEast,
}

impl Corner {
    /// The corner diagonally across the box.
    #[must_use]
    pub const fn opposite(self) -> Corner {
        match self {
            Corner::NorthWest => Corner::SouthEast,
            Corner::NorthEast => Corner::SouthWest,
            Corner::SouthWest => Corner::NorthEast,
            Corner::SouthEast => Corner::NorthWest,
        }
    }
}

/// An inclusive rectangle of grid cells.
///
/// Both `min` and `max` coordinates belong to the box, so a box built from a
/// single point has a width and height of one cell. The host stores the same
/// four values as `topLeft`/`bottomRight`, with the Z axis in the `y` slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellBounds {
    /// Smallest X coordinate inside the box
    pub min_x: i32,
    /// Smallest Z coordinate inside the box
    pub min_z: i32,
    /// Largest X coordinate inside the box
    pub max_x: i32,
    /// Largest Z coordinate inside the box
    pub max_z: i32,
}

impl CellBounds {
    /// Builds the box spanned by two corner points given in any order.
    #[must_use]
    pub fn from_corners(x1: i32, z1: i32, x2: i32, z2: i32) -> Self {
        CellBounds {
            min_x: x1.min(x2),
            min_z: z1.min(z2),
            max_x: x1.max(x2),
            max_z: z1.max(z2),
        }
    }

    /// Number of cells along X.
    #[must_use]
    pub fn width(&self) -> usize {
        (i64::from(self.max_x) - i64::from(self.min_x) + 1) as usize
    }

    /// Number of cells along Z.
    #[must_use]
    pub fn height(&self) -> usize {
        (i64::from(self.max_z) - i64::from(self.min_z) + 1) as usize
    }

    /// Returns `true` if the cell lies inside the box.
    #[must_use]
    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// The center cell, using truncating integer division.
    #[must_use]
    pub fn center(&self) -> (i32, i32) {
        (
            ((i64::from(self.min_x) + i64::from(self.max_x)) / 2) as i32,
            ((i64::from(self.min_z) + i64::from(self.max_z)) / 2) as i32,
        )
    }

    /// Coordinates of a corner.
    #[must_use]
    pub fn corner(&self, corner: Corner) -> (i32, i32) {
        match corner {
            Corner::NorthWest => (self.min_x, self.min_z),
            Corner::NorthEast => (self.max_x, self.min_z),
            Corner::SouthWest => (self.min_x, self.max_z),
            Corner::SouthEast => (self.max_x, self.max_z),
        }
    }

    /// Converts a cell position to its offset inside the box, or `None` if it
    /// lies outside.
    #[must_use]
    pub fn local(&self, x: i32, z: i32) -> Option<(usize, usize)> {
        if !self.contains(x, z) {
            return None;
        }

        Some((
            (i64::from(x) - i64::from(self.min_x)) as usize,
            (i64::from(z) - i64::from(self.min_z)) as usize,
        ))
    }
}

impl fmt::Display for CellBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.min_x, self.min_z, self.max_x, self.max_z
        )
    }
}
