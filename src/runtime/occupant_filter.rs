//! [`OccupantFilter`] as a host filter object.

use std::{ffi::c_void, ptr::NonNull};

use crate::{
    filter::{NetworkTypeFlags, OccupantFilter, NETWORK_OCCUPANT_TYPE},
    host::{HostAddress, HostMemory, ProcessMemory},
};

/// Interface id of the host's base interface.
const GZIID_UNKNOWN: u32 = 0x0000_0001;

/// Interface id of network occupants; matches their occupant type id.
const GZIID_NETWORK_OCCUPANT: u32 = NETWORK_OCCUPANT_TYPE;

/// Offset of `QueryInterface` in any host object's vtable.
const QUERY_INTERFACE_SLOT: u32 = 0x00;

/// Offset of `Release` in any host object's vtable.
const RELEASE_SLOT: u32 = 0x08;

/// Offset of `GetType` in an occupant's vtable.
const OCCUPANT_GET_TYPE_SLOT: u32 = 0x24;

/// Offset of `GetNetworkFlags` in a network occupant's vtable.
const NETWORK_FLAGS_SLOT: u32 = 0x40;

type ThiscallQueryInterface = unsafe extern "thiscall" fn(u32, u32, *mut u32) -> bool;
type ThiscallRelease = unsafe extern "thiscall" fn(u32) -> u32;
type ThiscallU32 = unsafe extern "thiscall" fn(u32) -> u32;

/// Reads the function in `slot` of the vtable of `object`.
///
/// # Safety
///
/// `object` must be a live host object whose vtable has a function of
/// signature `F` at `slot`.
unsafe fn virtual_function<F: Copy>(memory: &ProcessMemory, object: HostAddress, slot: u32) -> Option<F> {
    let entry = memory
        .read_pointer(object)
        .and_then(|vtable| memory.read_pointer(vtable.offset(slot)))
        .ok()?
        .non_null()?;
    Some(std::mem::transmute_copy(&(entry.value() as usize)))
}

/// Network types of `occupant`, or `None` if it is not a network occupant.
unsafe fn network_types(memory: &ProcessMemory, occupant: HostAddress) -> Option<NetworkTypeFlags> {
    let query_interface: ThiscallQueryInterface =
        virtual_function(memory, occupant, QUERY_INTERFACE_SLOT)?;

    let mut network = 0u32;
    if !query_interface(occupant.value(), GZIID_NETWORK_OCCUPANT, &mut network) {
        return None;
    }
    let network = HostAddress::new(network).non_null()?;

    let flags = virtual_function::<ThiscallU32>(memory, network, NETWORK_FLAGS_SLOT)
        .map(|get_flags| NetworkTypeFlags::from_bits_truncate(get_flags(network.value())));
    if let Some(release) = virtual_function::<ThiscallRelease>(memory, network, RELEASE_SLOT) {
        release(network.value());
    }
    flags
}

#[repr(C)]
struct FilterVtable {
    query_interface: unsafe extern "thiscall" fn(*mut HostOccupantFilter, u32, *mut *mut c_void) -> bool,
    add_ref: unsafe extern "thiscall" fn(*mut HostOccupantFilter) -> u32,
    release: unsafe extern "thiscall" fn(*mut HostOccupantFilter) -> u32,
    is_occupant_included: unsafe extern "thiscall" fn(*mut HostOccupantFilter, u32) -> bool,
    is_occupant_type_included: unsafe extern "thiscall" fn(*mut HostOccupantFilter, u32) -> bool,
    is_property_holder_included: unsafe extern "thiscall" fn(*mut HostOccupantFilter, u32) -> bool,
}

static VTABLE: FilterVtable = FilterVtable {
    query_interface,
    add_ref,
    release,
    is_occupant_included,
    is_occupant_type_included,
    is_property_holder_included,
};

/// A reference-counted filter object with the host's occupant filter vtable.
#[repr(C)]
pub(crate) struct HostOccupantFilter {
    vtable: &'static FilterVtable,
    ref_count: u32,
    filter: OccupantFilter,
}

/// Our reference to a [`HostOccupantFilter`]; dropping it releases it.
pub(crate) struct FilterHandle(NonNull<HostOccupantFilter>);

impl HostOccupantFilter {
    /// Creates a filter object holding one reference.
    pub(crate) fn create(filter: OccupantFilter) -> FilterHandle {
        let object = Box::new(HostOccupantFilter {
            vtable: &VTABLE,
            ref_count: 1,
            filter,
        });
        FilterHandle(NonNull::from(Box::leak(object)))
    }
}

impl FilterHandle {
    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr().cast()
    }
}

impl Drop for FilterHandle {
    fn drop(&mut self) {
        // SAFETY: the handle owns one reference
        unsafe {
            release(self.0.as_ptr());
        }
    }
}

unsafe extern "thiscall" fn query_interface(
    this: *mut HostOccupantFilter,
    iid: u32,
    out: *mut *mut c_void,
) -> bool {
    if iid != GZIID_UNKNOWN || out.is_null() {
        return false;
    }

    add_ref(this);
    *out = this.cast();
    true
}

unsafe extern "thiscall" fn add_ref(this: *mut HostOccupantFilter) -> u32 {
    (*this).ref_count += 1;
    (*this).ref_count
}

unsafe extern "thiscall" fn release(this: *mut HostOccupantFilter) -> u32 {
    (*this).ref_count -= 1;
    let remaining = (*this).ref_count;
    if remaining == 0 {
        drop(Box::from_raw(this));
    }
    remaining
}

unsafe extern "thiscall" fn is_occupant_included(this: *mut HostOccupantFilter, occupant: u32) -> bool {
    let memory = ProcessMemory::new();
    let occupant = HostAddress::new(occupant);

    let Some(get_type) = virtual_function::<ThiscallU32>(&memory, occupant, OCCUPANT_GET_TYPE_SLOT) else {
        return false;
    };

    (*this)
        .filter
        .includes_occupant(get_type(occupant.value()), || network_types(&memory, occupant))
}

unsafe extern "thiscall" fn is_occupant_type_included(this: *mut HostOccupantFilter, type_id: u32) -> bool {
    (*this).filter.includes_occupant_type(type_id)
}

unsafe extern "thiscall" fn is_property_holder_included(
    _this: *mut HostOccupantFilter,
    _holder: u32,
) -> bool {
    true
}
