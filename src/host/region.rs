//! The host's cell region objects.
//!
//! A host region is a [`CellRegionLayout`] followed, somewhere on the host's
//! heap, by its cell storage. [`HostCellRegion`] reads and overwrites such a
//! region in place; [`encode_region`] builds a self-contained copy of a
//! [`CellRegion`] that can be handed to host routines expecting one.

use crate::{
    geometry::{CellBounds, CellRegion},
    host::{layout::CellRegionLayout, HostAddress, HostMemory},
    Result,
};

/// A cell region owned by the host.
///
/// The view never resizes, reallocates or re-points the region. The only
/// write it performs is replacing the cell values when the new membership
/// fits the existing storage exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostCellRegion {
    address: HostAddress,
}

impl HostCellRegion {
    /// Views the region at `address`, or `None` for a null pointer.
    #[must_use]
    pub fn new(address: HostAddress) -> Option<Self> {
        address.non_null().map(|address| HostCellRegion { address })
    }

    /// Address of the region object.
    #[must_use]
    pub fn address(&self) -> HostAddress {
        self.address
    }

    /// The region's bounding box.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be read.
    pub fn bounds<M: HostMemory>(&self, memory: &M) -> Result<CellBounds> {
        let base = self.address.offset(CellRegionLayout::BOUNDS);
        let min_x = memory.read_i32(base)?;
        let min_z = memory.read_i32(base.offset(4))?;
        let max_x = memory.read_i32(base.offset(8))?;
        let max_z = memory.read_i32(base.offset(12))?;

        Ok(CellBounds::from_corners(min_x, min_z, max_x, max_z))
    }

    /// Reads the region into an owned [`CellRegion`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the cell storage does not match
    /// the bounds, or a memory error if the region cannot be read.
    pub fn read<M: HostMemory>(&self, memory: &M) -> Result<CellRegion> {
        let bounds = self.bounds(memory)?;
        let (begin, len) = self.checked_storage(memory, &bounds)?.ok_or_else(|| {
            malformed_error!("Cell storage of region at {} does not match {}", self.address, bounds)
        })?;

        let mut cells = vec![0u8; len];
        memory.read_bytes(begin, &mut cells)?;

        let mut region = CellRegion::new(bounds, false);
        let width = bounds.width();
        for (index, _) in cells.iter().enumerate().filter(|(_, &cell)| cell != 0) {
            let x = bounds.min_x + (index % width) as i32;
            let z = bounds.min_z + (index / width) as i32;
            region.select(x, z, true);
        }

        Ok(region)
    }

    /// Replaces the region's cell values with those of `region`.
    ///
    /// Nothing is written, and `false` is returned, if the bounds differ or
    /// the host's storage does not hold exactly one cell per position.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be read or written.
    pub fn overwrite<M: HostMemory>(&self, memory: &mut M, region: &CellRegion) -> Result<bool> {
        let bounds = self.bounds(memory)?;
        if bounds != region.bounds() {
            return Ok(false);
        }

        let Some((begin, len)) = self.checked_storage(memory, &bounds)? else {
            return Ok(false);
        };

        let cells = region.cells().to_bytes();
        if cells.len() != len {
            return Ok(false);
        }

        memory.write_bytes(begin, &cells)?;
        Ok(true)
    }

    /// Start and length of the cell storage, if its shape agrees with `bounds`.
    fn checked_storage<M: HostMemory>(
        &self,
        memory: &M,
        bounds: &CellBounds,
    ) -> Result<Option<(HostAddress, usize)>> {
        let begin = memory.read_pointer(self.address.offset(CellRegionLayout::CELLS_BEGIN))?;
        let end = memory.read_pointer(self.address.offset(CellRegionLayout::CELLS_END))?;
        let width = memory.read_u32(self.address.offset(CellRegionLayout::CELLS_WIDTH))? as usize;
        let height = memory.read_u32(self.address.offset(CellRegionLayout::CELLS_HEIGHT))? as usize;

        if begin.is_null() || end < begin || width != bounds.width() || height != bounds.height() {
            return Ok(None);
        }

        let len = (end.value() - begin.value()) as usize;
        if len != width * height {
            return Ok(None);
        }

        Ok(Some((begin, len)))
    }
}

/// Encodes `region` as a host region object placed at `base`.
///
/// The result holds the region header immediately followed by its cells; all
/// pointers inside it refer to `base`, so the bytes must be stored exactly
/// there.
#[must_use]
pub fn encode_region(region: &CellRegion, base: HostAddress) -> Vec<u8> {
    let bounds = region.bounds();
    let cells = region.cells().to_bytes();

    let begin = base.offset(CellRegionLayout::SIZE as u32);
    let end = begin.offset(cells.len() as u32);

    let mut bytes = Vec::with_capacity(CellRegionLayout::SIZE + cells.len());
    for value in [bounds.min_x, bounds.min_z, bounds.max_x, bounds.max_z] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    for value in [
        begin.value(),
        end.value(),
        end.value(),
        region.cells().width() as u32,
        region.cells().height() as u32,
    ] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes.extend_from_slice(&cells);

    bytes
}
