//! Calls into the game's own code.

use std::{ffi::c_void, mem};

use log::debug;

use crate::{
    filter::OccupantFilter,
    geometry::CellRegion,
    hooks::{ControlRoutines, Demolition, DemolitionPass, RegionChoice},
    host::{addresses, encode_region, CellRegionLayout, HostAddress, HostMemory, ProcessMemory},
    runtime::occupant_filter::HostOccupantFilter,
    Result,
};

type ThiscallBool = unsafe extern "thiscall" fn(this: u32) -> bool;
type ThiscallVoid = unsafe extern "thiscall" fn(this: u32);
type ThiscallSetCursor = unsafe extern "thiscall" fn(this: u32, cursor_id: u32) -> bool;
type ThiscallCtor = unsafe extern "thiscall" fn(this: u32) -> u32;

/// `DemolishRegion` at [`addresses::DEMOLISH_REGION_SLOT`].
type ThiscallDemolishRegion = unsafe extern "thiscall" fn(
    this: u32,
    demolish: bool,
    region: *const c_void,
    privilege_type: u32,
    flags: u32,
    clear_zoned_area: bool,
    filter: *mut c_void,
    total_cost: *mut i64,
    demolished_occupants: isize,
    effect_occupant: u32,
    effect_x: i32,
    effect_z: i32,
) -> bool;

/// Turns a code address into a callable function pointer.
///
/// # Safety
///
/// `address` must be the entry of a function with signature `F`.
unsafe fn function<F: Copy>(address: HostAddress) -> F {
    debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<usize>());
    mem::transmute_copy(&(address.value() as usize))
}

/// Looks up a vtable slot of the object at `object`.
fn virtual_function<F: Copy>(memory: &ProcessMemory, object: HostAddress, slot: u32) -> Result<F> {
    let vtable = memory.read_pointer(object)?;
    let entry = memory.read_pointer(vtable.offset(slot))?;
    // SAFETY: the slot offsets describe the view input control vtable layout
    Ok(unsafe { function(entry) })
}

/// The bulldoze control's native routines.
#[derive(Debug)]
pub(crate) struct NativeRoutines {
    memory: ProcessMemory,
}

impl NativeRoutines {
    pub(crate) fn new() -> Self {
        // SAFETY: only addresses of live host objects reach these routines
        NativeRoutines {
            memory: unsafe { ProcessMemory::new() },
        }
    }
}

impl ControlRoutines for NativeRoutines {
    fn is_on_top(&mut self, control: HostAddress) -> bool {
        // SAFETY: fixed routine of build 641
        unsafe { function::<ThiscallBool>(addresses::IS_ON_TOP)(control.value()) }
    }

    fn set_cursor(&mut self, control: HostAddress, cursor_id: u32) {
        match virtual_function::<ThiscallSetCursor>(&self.memory, control, addresses::SET_CURSOR_SLOT) {
            // SAFETY: `control` is a live view input control
            Ok(set_cursor) => unsafe {
                set_cursor(control.value(), cursor_id);
            },
            Err(error) => debug!("Cannot set the cursor of {control}: {error}"),
        }
    }

    fn end_input(&mut self, control: HostAddress) {
        // SAFETY: fixed routine of build 641
        unsafe { function::<ThiscallVoid>(addresses::END_INPUT)(control.value()) }
    }

    fn update_selected_region(&mut self, control: HostAddress) {
        // SAFETY: fixed routine of build 641
        unsafe { function::<ThiscallVoid>(addresses::UPDATE_SELECTED_REGION)(control.value()) }
    }
}

/// A host cell region built from a [`CellRegion`], kept alive for one call.
struct MarshalledRegion {
    storage: Vec<u32>,
}

impl MarshalledRegion {
    fn new(region: &CellRegion) -> Self {
        let words = (CellRegionLayout::SIZE + region.cells().len()).div_ceil(4);
        let mut storage = vec![0u32; words];

        let base = HostAddress::new(storage.as_ptr() as usize as u32);
        let bytes = encode_region(region, base);
        // SAFETY: `storage` holds at least `bytes.len()` bytes
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), storage.as_mut_ptr().cast::<u8>(), bytes.len());
        }

        MarshalledRegion { storage }
    }

    fn as_ptr(&self) -> *const c_void {
        self.storage.as_ptr().cast()
    }
}

/// The arguments of an intercepted demolition call.
#[derive(Debug)]
pub(crate) struct HostDemolition {
    pub(crate) demolition: u32,
    pub(crate) region: *const c_void,
    pub(crate) flags: u32,
    pub(crate) clear_zoned_area: bool,
    pub(crate) total_cost: *mut i64,
    pub(crate) demolished_occupants: isize,
    pub(crate) effect_occupant: u32,
    pub(crate) effect_x: i32,
    pub(crate) effect_z: i32,
}

impl HostDemolition {
    fn call(&self, pass: DemolitionPass, region: *const c_void, filter: *mut c_void) -> bool {
        // SAFETY: `demolition` is the service the game was about to call
        let memory = unsafe { ProcessMemory::new() };
        let demolish_region = match virtual_function::<ThiscallDemolishRegion>(
            &memory,
            HostAddress::new(self.demolition),
            addresses::DEMOLISH_REGION_SLOT,
        ) {
            Ok(function) => function,
            Err(error) => {
                debug!("Cannot reach the demolition service: {error}");
                return false;
            }
        };

        // SAFETY: every argument is forwarded from the intercepted call,
        // except the region and filter, which outlive the call
        unsafe {
            demolish_region(
                self.demolition,
                pass.demolish(),
                region,
                addresses::PRIVILEGE_TYPE,
                self.flags,
                self.clear_zoned_area,
                filter,
                self.total_cost,
                self.demolished_occupants,
                self.effect_occupant,
                self.effect_x,
                self.effect_z,
            )
        }
    }
}

impl Demolition for HostDemolition {
    fn demolish_region(
        &mut self,
        pass: DemolitionPass,
        region: RegionChoice<'_>,
        filter: &OccupantFilter,
    ) -> bool {
        let filter = filter
            .is_restricted()
            .then(|| HostOccupantFilter::create(*filter));
        let filter_ptr = filter.as_ref().map_or(std::ptr::null_mut(), |filter| filter.as_ptr());

        let result = match region {
            RegionChoice::Original => self.call(pass, self.region, filter_ptr),
            RegionChoice::Diagonal(region) => {
                let marshalled = MarshalledRegion::new(region);
                self.call(pass, marshalled.as_ptr(), filter_ptr)
            }
        };

        drop(filter);
        result
    }
}

/// Creates a bulldoze control with `cursor_id` in storage from `allocate`.
///
/// Runs the host constructor, then `Init` so the game sets its default
/// cursor, then `SetCursor`. Returns `None` if allocation fails.
///
/// # Safety
///
/// `allocate` must return storage from the host's allocator, at least
/// `size` bytes and suitably aligned, so the host can release the control.
pub unsafe fn create_view_input_control(
    allocate: impl FnOnce(usize) -> Option<HostAddress>,
    cursor_id: u32,
) -> Option<HostAddress> {
    let control = allocate(crate::host::DemolishControlLayout::SIZE)?.non_null()?;

    function::<ThiscallCtor>(addresses::DEMOLISH_CONTROL_CTOR)(control.value());

    let memory = ProcessMemory::new();
    let init = virtual_function::<ThiscallBool>(&memory, control, addresses::INIT_SLOT).ok()?;
    let set_cursor =
        virtual_function::<ThiscallSetCursor>(&memory, control, addresses::SET_CURSOR_SLOT).ok()?;

    init(control.value());
    set_cursor(control.value(), cursor_id);
    Some(control)
}
