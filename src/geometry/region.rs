//! A bounding box paired with a membership map.

use crate::geometry::{CellBounds, CellMap};

/// A rectangular bounding box plus one membership flag per cell.
///
/// The map always has exactly the dimensions of the box; a cell is selected
/// iff its flag is set. Regions are plain values: every recomputation produces
/// a new, independently owned region.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRegion {
    bounds: CellBounds,
    cells: CellMap,
}

impl CellRegion {
    /// Creates a region over `bounds` with every cell set to `value`.
    #[must_use]
    pub fn new(bounds: CellBounds, value: bool) -> Self {
        let cells = if value {
            CellMap::filled(bounds.width(), bounds.height())
        } else {
            CellMap::new(bounds.width(), bounds.height())
        };
        CellRegion { bounds, cells }
    }

    /// The bounding box.
    #[must_use]
    pub fn bounds(&self) -> CellBounds {
        self.bounds
    }

    /// The membership map, indexed relative to the box's minimum corner.
    #[must_use]
    pub fn cells(&self) -> &CellMap {
        &self.cells
    }

    /// Returns `true` if the cell, in world coordinates, is selected.
    /// Cells outside the box are never selected.
    #[must_use]
    pub fn is_selected(&self, x: i32, z: i32) -> bool {
        self.bounds
            .local(x, z)
            .and_then(|(lx, lz)| self.cells.get(lx, lz))
            .unwrap_or(false)
    }

    /// Selects or clears a cell given in world coordinates.
    ///
    /// Returns `false` without touching the map if the cell lies outside the box.
    pub fn select(&mut self, x: i32, z: i32, value: bool) -> bool {
        match self.bounds.local(x, z) {
            Some((lx, lz)) => self.cells.set(lx, lz, value),
            None => false,
        }
    }

    /// Number of selected cells.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.cells.count()
    }

    /// World coordinates of all selected cells, row by row.
    pub fn selected_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (min_x, min_z) = (self.bounds.min_x, self.bounds.min_z);
        self.cells
            .iter()
            .map(move |(x, z)| (min_x + x as i32, min_z + z as i32))
    }

    /// Overwrites the membership of `self` with that of `other`.
    ///
    /// The copy only happens when both regions cover exactly the same box.
    /// On a mismatch nothing is copied and `false` is returned. The box and the
    /// map storage of `self` are never changed, only the flag values.
    pub fn overwrite_from(&mut self, other: &CellRegion) -> bool {
        if self.bounds != other.bounds {
            return false;
        }
        self.cells.copy_from(&other.cells)
    }
}
