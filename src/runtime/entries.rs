//! Replacement functions installed into the game.
//!
//! The jump-table entries receive the control in `ecx` like a `thiscall`
//! method; `fastcall` with an unused `edx` argument matches that layout. The
//! demolition call sites receive the demolition service the same way.
//!
//! Every entry runs through [`RUNTIME`], which performs the control routines a
//! handler asks for only after the handlers are unlocked. Redrawing the
//! selection calls the preview entry again.

use std::ffi::c_void;

use crate::{
    geometry::CellBounds,
    hooks::{DemolitionPass, HostControl, RegionChoice},
    host::{HostAddress, HostCellRegion, ProcessMemory},
    mode::ModifierKeys,
    runtime::{
        native::{HostDemolition, NativeRoutines},
        RUNTIME,
    },
};

pub(crate) unsafe extern "fastcall" fn on_key_down(
    this: u32,
    _edx: u32,
    vk_code: i32,
    modifiers: u32,
) -> bool {
    RUNTIME.run(&mut NativeRoutines::new(), false, |hooks, routines| {
        let mut memory = ProcessMemory::new();
        let Ok(mut control) = HostControl::new(&mut memory, routines, HostAddress::new(this)) else {
            return false;
        };

        hooks
            .on_key_down(&mut control, vk_code as u32, ModifierKeys::from_host(modifiers))
            .is_handled()
    })
}

pub(crate) unsafe extern "fastcall" fn on_mouse_wheel(
    this: u32,
    _edx: u32,
    _x: i32,
    _z: i32,
    modifiers: u32,
    wheel_delta: i32,
) -> bool {
    RUNTIME.run(&mut NativeRoutines::new(), false, |hooks, routines| {
        let mut memory = ProcessMemory::new();
        let Ok(mut control) = HostControl::new(&mut memory, routines, HostAddress::new(this)) else {
            return false;
        };

        hooks
            .on_mouse_wheel(&mut control, ModifierKeys::from_host(modifiers), wheel_delta)
            .is_handled()
    })
}

pub(crate) unsafe extern "fastcall" fn activate(this: u32, _edx: u32) {
    RUNTIME.run(&mut NativeRoutines::new(), (), |hooks, routines| {
        let mut memory = ProcessMemory::new();
        if let Ok(mut control) = HostControl::new(&mut memory, routines, HostAddress::new(this)) {
            hooks.activate(&mut control);
        }
    });
}

/// Bounds of the region the game passed, if it can be read.
unsafe fn incoming_bounds(region: *const c_void) -> Option<CellBounds> {
    let memory = ProcessMemory::new();
    HostCellRegion::new(HostAddress::new(region as usize as u32))?
        .bounds(&memory)
        .ok()
}

/// Shared body of the two demolition entries.
unsafe fn demolish(pass: DemolitionPass, mut demolition: HostDemolition) -> bool {
    use crate::hooks::Demolition;

    let Some(incoming) = incoming_bounds(demolition.region) else {
        return demolition.demolish_region(pass, RegionChoice::Original, &Default::default());
    };

    let handled = RUNTIME.run(&mut NativeRoutines::new(), None, |hooks, routines| {
        let mut memory = ProcessMemory::new();
        let mut control = hooks
            .state()
            .active_control()
            .and_then(|address| HostControl::new(&mut memory, routines, address).ok());

        Some(match pass {
            DemolitionPass::Preview => {
                hooks.preview_demolish_region(control.as_mut(), &mut demolition, incoming)
            }
            DemolitionPass::Commit => {
                hooks.commit_demolish_region(control.as_ref(), &mut demolition, incoming)
            }
        })
    });

    handled.unwrap_or_else(|| demolition.demolish_region(pass, RegionChoice::Original, &Default::default()))
}

#[allow(clippy::too_many_arguments)]
pub(crate) unsafe extern "fastcall" fn preview_demolish_region(
    demolition: u32,
    _edx: u32,
    region: *const c_void,
    _privilege_type: isize,
    flags: u32,
    clear_zoned_area: u8,
    _filter: *mut c_void,
    total_cost: *mut i64,
    demolished_occupants: isize,
    effect_occupant: u32,
    effect_x: i32,
    effect_z: i32,
) -> bool {
    demolish(
        DemolitionPass::Preview,
        HostDemolition {
            demolition,
            region,
            flags,
            clear_zoned_area: clear_zoned_area != 0,
            total_cost,
            demolished_occupants,
            effect_occupant,
            effect_x,
            effect_z,
        },
    )
}

#[allow(clippy::too_many_arguments)]
pub(crate) unsafe extern "fastcall" fn commit_demolish_region(
    demolition: u32,
    _edx: u32,
    region: *const c_void,
    _privilege_type: isize,
    flags: u32,
    clear_zoned_area: u8,
    _filter: *mut c_void,
    total_cost: *mut i64,
    demolished_occupants: isize,
    effect_occupant: u32,
    effect_x: i32,
    effect_z: i32,
) -> bool {
    demolish(
        DemolitionPass::Commit,
        HostDemolition {
            demolition,
            region,
            flags,
            clear_zoned_area: clear_zoned_area != 0,
            total_cost,
            demolished_occupants,
            effect_occupant,
            effect_x,
            effect_z,
        },
    )
}
