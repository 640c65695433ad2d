//! Typed view over a live bulldoze control.

use crate::{
    config::PreviewColor,
    geometry::{Anchor, CellBounds, CellRegion},
    host::{layout::DemolishControlLayout as Layout, HostAddress, HostCellRegion, HostMemory},
    Error::InvalidAddress,
    Result,
};

/// Field-level access to a bulldoze control owned by the host.
///
/// The view borrows the memory it reads from and knows the control's address;
/// it never constructs, frees or moves the control. Every accessor touches
/// exactly the field it names.
///
/// # Example
///
/// ```rust
/// use bulldoze_extensions::host::{
///     DemolishControlLayout, HostMemory, ShadowControl, SimulatedMemory,
/// };
///
/// let mut memory = SimulatedMemory::new();
/// let base = memory.allocate(DemolishControlLayout::SIZE)?;
/// memory.write_i32(base.offset(DemolishControlLayout::CLICK_X), -1)?;
///
/// let control = ShadowControl::new(&mut memory, base)?;
/// assert!(!control.cell_picked()?);
/// assert_eq!(control.click_anchor()?, None);
/// # Ok::<(), bulldoze_extensions::Error>(())
/// ```
#[derive(Debug)]
pub struct ShadowControl<'m, M: HostMemory> {
    memory: &'m mut M,
    base: HostAddress,
}

impl<'m, M: HostMemory> ShadowControl<'m, M> {
    /// Views the control at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAddress`] for a null address.
    pub fn new(memory: &'m mut M, base: HostAddress) -> Result<Self> {
        if base.is_null() {
            return Err(InvalidAddress(base));
        }
        Ok(ShadowControl { memory, base })
    }

    /// Address of the control.
    #[must_use]
    pub fn base(&self) -> HostAddress {
        self.base
    }

    fn field(&self, offset: u32) -> HostAddress {
        self.base.offset(offset)
    }

    /// Resource id of the control's cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be read.
    pub fn cursor_iid(&self) -> Result<u32> {
        self.memory.read_u32(self.field(Layout::CURSOR_IID))
    }

    /// Whether a drag selection is in progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be read.
    pub fn cell_picked(&self) -> Result<bool> {
        Ok(self.memory.read_u8(self.field(Layout::CELL_PICKED))? != 0)
    }

    /// The raw click cell, `(-1, -1)` when no click was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields cannot be read.
    pub fn click(&self) -> Result<(i32, i32)> {
        Ok((
            self.memory.read_i32(self.field(Layout::CLICK_X))?,
            self.memory.read_i32(self.field(Layout::CLICK_Z))?,
        ))
    }

    /// The click cell as a stripe anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields cannot be read.
    pub fn click_anchor(&self) -> Result<Option<Anchor>> {
        let (x, z) = self.click()?;
        Ok(Anchor::from_host(x, z))
    }

    /// The control's selection region, if it has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be read.
    pub fn cell_region(&self) -> Result<Option<HostCellRegion>> {
        let address = self.memory.read_pointer(self.field(Layout::CELL_REGION))?;
        Ok(HostCellRegion::new(address))
    }

    /// Bounds of the selection region, if the control has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be read.
    pub fn selection_bounds(&self) -> Result<Option<CellBounds>> {
        match self.cell_region()? {
            Some(region) => region.bounds(&*self.memory).map(Some),
            None => Ok(None),
        }
    }

    /// Copies the membership of `region` into the selection region.
    ///
    /// Returns `false` if there is no selection region or it does not cover
    /// exactly the same box; see [`HostCellRegion::overwrite`].
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be read or written.
    pub fn overwrite_selection(&mut self, region: &CellRegion) -> Result<bool> {
        match self.cell_region()? {
            Some(host) => host.overwrite(&mut *self.memory, region),
            None => Ok(false),
        }
    }

    /// The "demolition OK" overlay color.
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be read.
    pub fn demolish_ok_color(&self) -> Result<PreviewColor> {
        let base = self.field(Layout::DEMOLISH_OK);
        Ok(PreviewColor::new(
            self.memory.read_f32(base)?,
            self.memory.read_f32(base.offset(4))?,
            self.memory.read_f32(base.offset(8))?,
            self.memory.read_f32(base.offset(12))?,
        ))
    }

    /// Replaces the "demolition OK" overlay color.
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be written.
    pub fn set_demolish_ok_color(&mut self, color: PreviewColor) -> Result<()> {
        let base = self.field(Layout::DEMOLISH_OK);
        for (index, channel) in color.to_array().into_iter().enumerate() {
            self.memory.write_f32(base.offset(index as u32 * 4), channel)?;
        }
        Ok(())
    }
}
