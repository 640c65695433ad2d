//! In-memory stand-ins for host objects.

use crate::{
    config::PreviewColor,
    filter::OccupantFilter,
    geometry::{Anchor, CellBounds, CellRegion},
    host::HostAddress,
    hooks::{ControlRoutines, DemolishControl, Demolition, DemolitionPass, RegionChoice},
    Result,
};

/// Something a [`FakeControl`] or [`RecordingRoutines`] was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCall {
    SetCursor(u32),
    EndInput,
    UpdateSelectedRegion,
}

/// A bulldoze control kept entirely in Rust values.
#[derive(Clone, Debug)]
pub struct FakeControl {
    pub address: HostAddress,
    pub on_top: bool,
    pub cell_picked: bool,
    pub click: Option<Anchor>,
    pub cursor_id: u32,
    pub selection: Option<CellRegion>,
    pub preview_color: Option<PreviewColor>,
    pub calls: Vec<ControlCall>,
}

impl FakeControl {
    pub fn new(address: u32) -> Self {
        FakeControl {
            address: HostAddress::new(address),
            on_top: true,
            cell_picked: false,
            click: None,
            cursor_id: 0,
            selection: None,
            preview_color: None,
            calls: Vec::new(),
        }
    }

    /// A control in the middle of a drag over `bounds`, started at `click`.
    pub fn dragging(address: u32, bounds: CellBounds, click: Anchor) -> Self {
        FakeControl {
            cell_picked: true,
            click: Some(click),
            selection: Some(CellRegion::new(bounds, true)),
            ..FakeControl::new(address)
        }
    }

    pub fn cursors_set(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ControlCall::SetCursor(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn redraws(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == ControlCall::UpdateSelectedRegion)
            .count()
    }
}

impl DemolishControl for FakeControl {
    fn address(&self) -> HostAddress {
        self.address
    }

    fn is_on_top(&mut self) -> bool {
        self.on_top
    }

    fn cell_picked(&self) -> Result<bool> {
        Ok(self.cell_picked)
    }

    fn click_anchor(&self) -> Result<Option<Anchor>> {
        Ok(self.click)
    }

    fn cursor_id(&self) -> Result<u32> {
        Ok(self.cursor_id)
    }

    fn set_cursor(&mut self, cursor_id: u32) {
        self.cursor_id = cursor_id;
        self.calls.push(ControlCall::SetCursor(cursor_id));
    }

    fn end_input(&mut self) {
        self.cell_picked = false;
        self.calls.push(ControlCall::EndInput);
    }

    fn update_selected_region(&mut self) {
        self.calls.push(ControlCall::UpdateSelectedRegion);
    }

    fn selection_bounds(&self) -> Result<Option<CellBounds>> {
        Ok(self.selection.as_ref().map(CellRegion::bounds))
    }

    fn overwrite_selection(&mut self, region: &CellRegion) -> Result<bool> {
        Ok(match self.selection.as_mut() {
            Some(selection) => selection.overwrite_from(region),
            None => false,
        })
    }

    fn set_preview_color(&mut self, color: PreviewColor) -> Result<()> {
        self.preview_color = Some(color);
        Ok(())
    }
}

/// One call received by a [`RecordingDemolition`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemolitionCall {
    pub pass: DemolitionPass,
    pub diagonal: Option<CellRegion>,
    pub filter: OccupantFilter,
}

/// Records every demolition request and answers with a fixed result.
#[derive(Clone, Debug, Default)]
pub struct RecordingDemolition {
    pub result: bool,
    pub calls: Vec<DemolitionCall>,
}

impl RecordingDemolition {
    pub fn returning(result: bool) -> Self {
        RecordingDemolition {
            result,
            calls: Vec::new(),
        }
    }

    pub fn last(&self) -> &DemolitionCall {
        self.calls.last().expect("no demolition call recorded")
    }
}

impl Demolition for RecordingDemolition {
    fn demolish_region(
        &mut self,
        pass: DemolitionPass,
        region: RegionChoice<'_>,
        filter: &OccupantFilter,
    ) -> bool {
        self.calls.push(DemolitionCall {
            pass,
            diagonal: region.diagonal().cloned(),
            filter: *filter,
        });
        self.result
    }
}

/// Native control routines that only record what they were asked to do.
#[derive(Clone, Debug)]
pub struct RecordingRoutines {
    pub on_top: bool,
    pub calls: Vec<(HostAddress, ControlCall)>,
}

impl Default for RecordingRoutines {
    fn default() -> Self {
        RecordingRoutines {
            on_top: true,
            calls: Vec::new(),
        }
    }
}

impl ControlRoutines for RecordingRoutines {
    fn is_on_top(&mut self, _control: HostAddress) -> bool {
        self.on_top
    }

    fn set_cursor(&mut self, control: HostAddress, cursor_id: u32) {
        self.calls.push((control, ControlCall::SetCursor(cursor_id)));
    }

    fn end_input(&mut self, control: HostAddress) {
        self.calls.push((control, ControlCall::EndInput));
    }

    fn update_selected_region(&mut self, control: HostAddress) {
        self.calls.push((control, ControlCall::UpdateSelectedRegion));
    }
}
