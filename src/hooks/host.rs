//! [`DemolishControl`] on top of host memory.

use crate::{
    config::PreviewColor,
    geometry::{Anchor, CellBounds, CellRegion},
    host::{HostAddress, HostMemory, ShadowControl},
    hooks::{ControlRoutines, DemolishControl},
    Result,
};

/// A live bulldoze control: fields through a [`ShadowControl`], behavior
/// through the host's native routines.
#[derive(Debug)]
pub struct HostControl<'m, M: HostMemory, R: ControlRoutines> {
    view: ShadowControl<'m, M>,
    routines: &'m mut R,
}

impl<'m, M: HostMemory, R: ControlRoutines> HostControl<'m, M, R> {
    /// Wraps the control at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAddress`] for a null address.
    pub fn new(memory: &'m mut M, routines: &'m mut R, address: HostAddress) -> Result<Self> {
        Ok(HostControl {
            view: ShadowControl::new(memory, address)?,
            routines,
        })
    }

    /// The field view.
    #[must_use]
    pub fn view(&self) -> &ShadowControl<'m, M> {
        &self.view
    }
}

impl<M: HostMemory, R: ControlRoutines> DemolishControl for HostControl<'_, M, R> {
    fn address(&self) -> HostAddress {
        self.view.base()
    }

    fn is_on_top(&mut self) -> bool {
        self.routines.is_on_top(self.view.base())
    }

    fn cell_picked(&self) -> Result<bool> {
        self.view.cell_picked()
    }

    fn click_anchor(&self) -> Result<Option<Anchor>> {
        self.view.click_anchor()
    }

    fn cursor_id(&self) -> Result<u32> {
        self.view.cursor_iid()
    }

    fn set_cursor(&mut self, cursor_id: u32) {
        self.routines.set_cursor(self.view.base(), cursor_id);
    }

    fn end_input(&mut self) {
        self.routines.end_input(self.view.base());
    }

    fn update_selected_region(&mut self) {
        self.routines.update_selected_region(self.view.base());
    }

    fn selection_bounds(&self) -> Result<Option<CellBounds>> {
        self.view.selection_bounds()
    }

    fn overwrite_selection(&mut self, region: &CellRegion) -> Result<bool> {
        self.view.overwrite_selection(region)
    }

    fn set_preview_color(&mut self, color: PreviewColor) -> Result<()> {
        self.view.set_demolish_ok_color(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::diagonal_region_in,
        host::SimulatedMemory,
        test::{place_control, rectangle, ControlCall, RecordingRoutines},
    };

    #[test]
    fn fields_come_from_memory() {
        let mut memory = SimulatedMemory::new();
        let base = place_control(&mut memory, Some(&rectangle(2, 3, 6, 5)), (6, 3), true);
        let mut routines = RecordingRoutines::default();

        let control = HostControl::new(&mut memory, &mut routines, base).unwrap();
        assert_eq!(control.address(), base);
        assert!(control.cell_picked().unwrap());
        assert_eq!(control.click_anchor().unwrap(), Some(Anchor::new(6, 3)));
        assert_eq!(
            control.selection_bounds().unwrap(),
            Some(CellBounds::from_corners(2, 3, 6, 5))
        );
    }

    #[test]
    fn behavior_goes_to_routines() {
        let mut memory = SimulatedMemory::new();
        let base = place_control(&mut memory, None, (-1, -1), false);
        let mut routines = RecordingRoutines {
            on_top: false,
            ..RecordingRoutines::default()
        };

        let mut control = HostControl::new(&mut memory, &mut routines, base).unwrap();
        assert!(!control.is_on_top());
        control.set_cursor(0x755c_6e51);
        control.end_input();
        control.update_selected_region();
        assert_eq!(control.click_anchor().unwrap(), None);
        assert!(!control.overwrite_selection(&rectangle(0, 0, 1, 1)).unwrap());

        assert_eq!(
            routines.calls,
            vec![
                (base, ControlCall::SetCursor(0x755c_6e51)),
                (base, ControlCall::EndInput),
                (base, ControlCall::UpdateSelectedRegion),
            ]
        );
    }

    #[test]
    fn overwrite_and_color_reach_memory() {
        let mut memory = SimulatedMemory::new();
        let bounds = CellBounds::from_corners(0, 0, 3, 3);
        let base = place_control(&mut memory, Some(&rectangle(0, 0, 3, 3)), (0, 0), true);
        let mut routines = RecordingRoutines::default();
        let color = PreviewColor::new(0.5, 0.25, 0.125, 1.0);
        let diagonal = diagonal_region_in(bounds, None, 1);

        {
            let mut control = HostControl::new(&mut memory, &mut routines, base).unwrap();
            assert!(control.overwrite_selection(&diagonal).unwrap());
            control.set_preview_color(color).unwrap();
        }

        let view = ShadowControl::new(&mut memory, base).unwrap();
        assert_eq!(view.demolish_ok_color().unwrap(), color);
        let region = view.cell_region().unwrap().unwrap();
        drop(view);
        assert_eq!(region.read(&memory).unwrap(), diagonal);
    }
}
