//! Access to host memory.
//!
//! Everything that reads or writes the game's objects or code goes through
//! [`HostMemory`]. Two implementations exist:
//!
//! - [`SimulatedMemory`] - a sparse, bounds-checked address space used by the
//!   tests and benchmarks
//! - `ProcessMemory` - the live game process (Windows x86 only)
//!
//! # Protection
//!
//! Simulated regions carry a [`Protection`] that mirrors how the game's pages
//! behave: data can be written directly, code and jump tables only through
//! [`HostMemory::patch_code`], and read-only regions not at all.

use std::collections::BTreeMap;

use crate::{
    host::HostAddress,
    Error::{AccessDenied, InvalidAddress, OutOfBounds},
    Result,
};

/// Byte-level access to a 32-bit host address space.
///
/// All multi-byte values are little-endian, as on the host.
pub trait HostMemory {
    /// Fills `buffer` with the bytes starting at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAddress`] if the address is not mapped,
    /// or [`crate::Error::OutOfBounds`] if the read crosses the end of the
    /// mapping.
    fn read_bytes(&self, address: HostAddress, buffer: &mut [u8]) -> Result<()>;

    /// Writes `data` to the bytes starting at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AccessDenied`] for memory that may not be
    /// written, besides the errors of [`read_bytes`](Self::read_bytes).
    fn write_bytes(&mut self, address: HostAddress, data: &[u8]) -> Result<()>;

    /// Writes `data` into code or a jump table.
    ///
    /// Implementations lift the page protection for the duration of the write
    /// and make sure the processor sees the new instructions.
    ///
    /// # Errors
    ///
    /// Same as [`write_bytes`](Self::write_bytes).
    fn patch_code(&mut self, address: HostAddress, data: &[u8]) -> Result<()> {
        self.write_bytes(address, data)
    }

    /// Reads `N` bytes.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes).
    fn read_array<const N: usize>(&self, address: HostAddress) -> Result<[u8; N]> {
        let mut buffer = [0u8; N];
        self.read_bytes(address, &mut buffer)?;
        Ok(buffer)
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes).
    fn read_u8(&self, address: HostAddress) -> Result<u8> {
        Ok(self.read_array::<1>(address)?[0])
    }

    /// Reads a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes).
    fn read_u32(&self, address: HostAddress) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array(address)?))
    }

    /// Reads a little-endian `i32`.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes).
    fn read_i32(&self, address: HostAddress) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array(address)?))
    }

    /// Reads a little-endian `f32`.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes).
    fn read_f32(&self, address: HostAddress) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array(address)?))
    }

    /// Reads a stored pointer.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes).
    fn read_pointer(&self, address: HostAddress) -> Result<HostAddress> {
        self.read_u32(address).map(HostAddress::new)
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// Same as [`write_bytes`](Self::write_bytes).
    fn write_u8(&mut self, address: HostAddress, value: u8) -> Result<()> {
        self.write_bytes(address, &[value])
    }

    /// Writes a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Same as [`write_bytes`](Self::write_bytes).
    fn write_u32(&mut self, address: HostAddress, value: u32) -> Result<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }

    /// Writes a little-endian `i32`.
    ///
    /// # Errors
    ///
    /// Same as [`write_bytes`](Self::write_bytes).
    fn write_i32(&mut self, address: HostAddress, value: i32) -> Result<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }

    /// Writes a little-endian `f32`.
    ///
    /// # Errors
    ///
    /// Same as [`write_bytes`](Self::write_bytes).
    fn write_f32(&mut self, address: HostAddress, value: f32) -> Result<()> {
        self.write_bytes(address, &value.to_le_bytes())
    }
}

/// How a simulated region may be modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Protection {
    /// Ordinary data; any write succeeds
    ReadWrite,
    /// Code or jump tables; only [`HostMemory::patch_code`] may write
    Code,
    /// Nothing may write
    ReadOnly,
}

/// A single mapped region (internal).
#[derive(Clone, Debug)]
struct MappedRegion {
    data: Vec<u8>,
    protection: Protection,
}

/// First address handed out by [`SimulatedMemory::allocate`].
const ALLOCATION_BASE: u32 = 0x1000_0000;

/// A sparse simulated 32-bit address space.
///
/// Regions are mapped at fixed addresses, for example to stand in for the
/// game's jump tables, or allocated from a bump allocator for objects whose
/// address does not matter.
///
/// # Example
///
/// ```rust
/// use bulldoze_extensions::host::{HostAddress, HostMemory, Protection, SimulatedMemory};
///
/// let mut memory = SimulatedMemory::new();
/// memory.map_zeroed(HostAddress::new(0xa901d8), 4, Protection::Code)?;
///
/// assert!(memory.write_u32(HostAddress::new(0xa901d8), 1).is_err());
/// memory.patch_code(HostAddress::new(0xa901d8), &7u32.to_le_bytes())?;
/// assert_eq!(memory.read_u32(HostAddress::new(0xa901d8))?, 7);
/// # Ok::<(), bulldoze_extensions::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct SimulatedMemory {
    regions: BTreeMap<u32, MappedRegion>,
    next_allocation: u32,
}

impl Default for SimulatedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedMemory {
    /// Creates an empty address space.
    #[must_use]
    pub fn new() -> Self {
        SimulatedMemory {
            regions: BTreeMap::new(),
            next_allocation: ALLOCATION_BASE,
        }
    }

    /// Maps `data` at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAddress`] for a null or empty mapping, or
    /// one that overlaps an existing region or wraps the address space.
    pub fn map(&mut self, base: HostAddress, data: Vec<u8>, protection: Protection) -> Result<()> {
        let size = u32::try_from(data.len()).map_err(|_| InvalidAddress(base))?;
        let end = base.value().checked_add(size).ok_or(InvalidAddress(base))?;

        if base.is_null() || size == 0 {
            return Err(InvalidAddress(base));
        }

        let overlaps = self
            .regions
            .range(..end)
            .next_back()
            .is_some_and(|(&start, region)| {
                u64::from(start) + region.data.len() as u64 > u64::from(base.value())
            });
        if overlaps {
            return Err(InvalidAddress(base));
        }

        self.regions.insert(base.value(), MappedRegion { data, protection });
        Ok(())
    }

    /// Maps `size` zero bytes at `base`.
    ///
    /// # Errors
    ///
    /// Same as [`map`](Self::map).
    pub fn map_zeroed(&mut self, base: HostAddress, size: usize, protection: Protection) -> Result<()> {
        self.map(base, vec![0; size], protection)
    }

    /// Allocates `size` zeroed, writable bytes at a fresh 16-byte aligned address.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] once the allocator would leave
    /// the 32-bit address space.
    pub fn allocate(&mut self, size: usize) -> Result<HostAddress> {
        let base = HostAddress::new(self.next_allocation);
        let size32 = u32::try_from(size.max(1)).map_err(|_| OutOfBounds)?;
        let next = self
            .next_allocation
            .checked_add(size32)
            .and_then(|end| end.checked_add(15))
            .ok_or(OutOfBounds)?
            & !15;

        self.map_zeroed(base, size.max(1), Protection::ReadWrite)?;
        self.next_allocation = next;
        Ok(base)
    }

    /// The protection of the region containing `address`.
    #[must_use]
    pub fn protection(&self, address: HostAddress) -> Option<Protection> {
        self.locate(address, 1).ok().map(|(base, _)| self.regions[&base].protection)
    }

    /// The bytes of the region mapped exactly at `base`.
    #[must_use]
    pub fn region(&self, base: HostAddress) -> Option<&[u8]> {
        self.regions.get(&base.value()).map(|region| region.data.as_slice())
    }

    /// Number of mapped regions.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Finds the region holding `len` bytes at `address`; returns its base and
    /// the offset of `address` within it.
    fn locate(&self, address: HostAddress, len: usize) -> Result<(u32, usize)> {
        let (&base, region) = self
            .regions
            .range(..=address.value())
            .next_back()
            .ok_or(InvalidAddress(address))?;

        let offset = (address.value() - base) as usize;
        if offset >= region.data.len() {
            return Err(InvalidAddress(address));
        }
        if offset + len > region.data.len() {
            return Err(OutOfBounds);
        }

        Ok((base, offset))
    }

    fn store(&mut self, address: HostAddress, data: &[u8], allowed: &[Protection]) -> Result<()> {
        let (base, offset) = self.locate(address, data.len())?;
        let Some(region) = self.regions.get_mut(&base) else {
            return Err(InvalidAddress(address));
        };

        if !allowed.contains(&region.protection) {
            return Err(AccessDenied(address));
        }

        region.data[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }
}

impl HostMemory for SimulatedMemory {
    fn read_bytes(&self, address: HostAddress, buffer: &mut [u8]) -> Result<()> {
        let (base, offset) = self.locate(address, buffer.len())?;
        let region = &self.regions[&base];
        buffer.copy_from_slice(&region.data[offset..offset + buffer.len()]);
        Ok(())
    }

    fn write_bytes(&mut self, address: HostAddress, data: &[u8]) -> Result<()> {
        self.store(address, data, &[Protection::ReadWrite])
    }

    fn patch_code(&mut self, address: HostAddress, data: &[u8]) -> Result<()> {
        self.store(address, data, &[Protection::ReadWrite, Protection::Code])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_read_write() {
        let mut memory = SimulatedMemory::new();
        let base = memory.allocate(16).unwrap();

        memory.write_u32(base, 0xDEAD_BEEF).unwrap();
        memory.write_f32(base.offset(4), 0.5).unwrap();
        memory.write_i32(base.offset(8), -1).unwrap();

        assert_eq!(memory.read_u32(base).unwrap(), 0xDEAD_BEEF);
        assert_eq!(memory.read_f32(base.offset(4)).unwrap(), 0.5);
        assert_eq!(memory.read_i32(base.offset(8)).unwrap(), -1);
        assert_eq!(memory.read_u8(base).unwrap(), 0xEF);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut memory = SimulatedMemory::new();
        let base = memory.allocate(8).unwrap();

        assert!(matches!(memory.read_u32(base.offset(6)), Err(Error::OutOfBounds)));
        assert!(matches!(
            memory.write_bytes(base.offset(4), &[0; 8]),
            Err(Error::OutOfBounds)
        ));
    }

    #[test]
    fn test_unmapped_address() {
        let memory = SimulatedMemory::new();
        assert!(matches!(
            memory.read_u32(HostAddress::new(0x1234)),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_code_needs_patch() {
        let mut memory = SimulatedMemory::new();
        let site = HostAddress::new(0x4b9d02);
        memory.map_zeroed(site, 5, Protection::Code).unwrap();

        assert!(matches!(memory.write_u8(site, 0xE8), Err(Error::AccessDenied(_))));
        memory.patch_code(site, &[0xE8]).unwrap();
        assert_eq!(memory.read_u8(site).unwrap(), 0xE8);
        assert_eq!(memory.protection(site), Some(Protection::Code));
    }

    #[test]
    fn test_read_only_rejects_patch() {
        let mut memory = SimulatedMemory::new();
        let base = HostAddress::new(0x40_0000);
        memory.map(base, vec![1, 2, 3, 4], Protection::ReadOnly).unwrap();

        assert!(matches!(memory.patch_code(base, &[0]), Err(Error::AccessDenied(_))));
        assert_eq!(memory.region(base), Some(&[1u8, 2, 3, 4][..]));
    }

    #[test]
    fn test_overlapping_map_rejected() {
        let mut memory = SimulatedMemory::new();
        memory
            .map_zeroed(HostAddress::new(0x1000), 0x100, Protection::ReadWrite)
            .unwrap();

        assert!(memory
            .map_zeroed(HostAddress::new(0x10F0), 0x20, Protection::ReadWrite)
            .is_err());
        assert!(memory
            .map_zeroed(HostAddress::new(0x0FF0), 0x20, Protection::ReadWrite)
            .is_err());
        assert!(memory
            .map_zeroed(HostAddress::new(0x1100), 0x20, Protection::ReadWrite)
            .is_ok());
        assert!(memory.map_zeroed(HostAddress::NULL, 4, Protection::ReadWrite).is_err());
        assert_eq!(memory.region_count(), 2);
    }

    #[test]
    fn test_allocations_are_aligned_and_disjoint() {
        let mut memory = SimulatedMemory::new();
        let first = memory.allocate(5).unwrap();
        let second = memory.allocate(0x24).unwrap();

        assert_eq!(first.value() % 16, 0);
        assert_eq!(second.value() % 16, 0);
        assert!(second.value() >= first.value() + 5);
    }
}
