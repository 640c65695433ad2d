//! Memory of the running game process.

use std::ptr;

use winapi::{
    shared::minwindef::{DWORD, LPVOID},
    um::{
        memoryapi::VirtualProtect,
        processthreadsapi::{FlushInstructionCache, GetCurrentProcess},
        winnt::PAGE_EXECUTE_READWRITE,
    },
};

use crate::{
    host::{HostAddress, HostMemory},
    Error::InvalidAddress,
    Result,
};

/// Direct access to the address space the plugin is loaded into.
///
/// Reads and writes are plain copies; the only check is for null. Code
/// patches lift the page protection, write, restore the protection and flush
/// the instruction cache.
#[derive(Debug)]
pub struct ProcessMemory {
    _private: (),
}

impl ProcessMemory {
    /// Creates the accessor.
    ///
    /// # Safety
    ///
    /// Every address later passed to this accessor must be valid for the
    /// access performed on it in the current process. The accessor cannot
    /// check this.
    #[must_use]
    pub unsafe fn new() -> Self {
        ProcessMemory { _private: () }
    }
}

impl HostMemory for ProcessMemory {
    fn read_bytes(&self, address: HostAddress, buffer: &mut [u8]) -> Result<()> {
        if address.is_null() {
            return Err(InvalidAddress(address));
        }

        // SAFETY: validity of the address is the contract of `ProcessMemory::new`
        unsafe {
            ptr::copy_nonoverlapping(
                address.value() as usize as *const u8,
                buffer.as_mut_ptr(),
                buffer.len(),
            );
        }
        Ok(())
    }

    fn write_bytes(&mut self, address: HostAddress, data: &[u8]) -> Result<()> {
        if address.is_null() {
            return Err(InvalidAddress(address));
        }

        // SAFETY: validity of the address is the contract of `ProcessMemory::new`
        unsafe {
            ptr::copy_nonoverlapping(data.as_ptr(), address.value() as usize as *mut u8, data.len());
        }
        Ok(())
    }

    fn patch_code(&mut self, address: HostAddress, data: &[u8]) -> Result<()> {
        if address.is_null() {
            return Err(InvalidAddress(address));
        }

        let target = address.value() as usize as LPVOID;
        let mut old_protection: DWORD = 0;

        // SAFETY: the target lies in the game's image, which stays mapped for the
        // lifetime of the process
        unsafe {
            if VirtualProtect(target, data.len(), PAGE_EXECUTE_READWRITE, &mut old_protection) == 0 {
                return Err(std::io::Error::last_os_error().into());
            }

            ptr::copy_nonoverlapping(data.as_ptr(), target.cast::<u8>(), data.len());

            let mut restored: DWORD = 0;
            let protect_ok = VirtualProtect(target, data.len(), old_protection, &mut restored) != 0;
            let flush_ok = FlushInstructionCache(GetCurrentProcess(), target, data.len()) != 0;
            if !(protect_ok && flush_ok) {
                return Err(std::io::Error::last_os_error().into());
            }
        }
        Ok(())
    }
}
