//! The seams between the handlers and the host.

use crate::{
    config::PreviewColor,
    filter::OccupantFilter,
    geometry::{Anchor, CellBounds, CellRegion},
    host::HostAddress,
    hooks::{DemolitionPass, RegionChoice},
    Result,
};

/// A bulldoze control as seen by the handlers.
///
/// Reads return [`Result`] because they go through host memory; the routines
/// that call into the game (`set_cursor`, `end_input`,
/// `update_selected_region`) cannot fail from the caller's point of view.
pub trait DemolishControl {
    /// Address of the control instance.
    fn address(&self) -> HostAddress;

    /// Whether the control currently owns the 3D view's input.
    fn is_on_top(&mut self) -> bool;

    /// Whether a drag selection is in progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the control cannot be read.
    fn cell_picked(&self) -> Result<bool>;

    /// The cell where the current drag started.
    ///
    /// # Errors
    ///
    /// Returns an error if the control cannot be read.
    fn click_anchor(&self) -> Result<Option<Anchor>>;

    /// Resource id of the control's cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the control cannot be read.
    fn cursor_id(&self) -> Result<u32>;

    /// Switches the control's cursor.
    fn set_cursor(&mut self, cursor_id: u32);

    /// Ends the current gesture and discards the selection.
    fn end_input(&mut self);

    /// Rebuilds and redraws the selection overlay.
    fn update_selected_region(&mut self);

    /// Bounds of the control's selection region, `None` if it has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be read.
    fn selection_bounds(&self) -> Result<Option<CellBounds>>;

    /// Copies `region`'s membership into the selection region in place.
    ///
    /// Returns `false` when nothing was copied.
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be read or written.
    fn overwrite_selection(&mut self, region: &CellRegion) -> Result<bool>;

    /// Sets the "demolition OK" overlay color.
    ///
    /// # Errors
    ///
    /// Returns an error if the color cannot be written.
    fn set_preview_color(&mut self, color: PreviewColor) -> Result<()>;
}

/// The game's demolition routine, as reached from one of the patched call sites.
///
/// Implementations carry the remaining arguments of the intercepted call and
/// forward them unchanged.
pub trait Demolition {
    /// Runs the host routine with the chosen region and filter.
    fn demolish_region(
        &mut self,
        pass: DemolitionPass,
        region: RegionChoice<'_>,
        filter: &OccupantFilter,
    ) -> bool;
}

/// Native routines of the bulldoze control, addressed by instance.
pub trait ControlRoutines {
    /// See [`DemolishControl::is_on_top`].
    fn is_on_top(&mut self, control: HostAddress) -> bool;

    /// See [`DemolishControl::set_cursor`].
    fn set_cursor(&mut self, control: HostAddress, cursor_id: u32);

    /// See [`DemolishControl::end_input`].
    fn end_input(&mut self, control: HostAddress);

    /// See [`DemolishControl::update_selected_region`].
    fn update_selected_region(&mut self, control: HostAddress);
}
