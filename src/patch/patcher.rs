//! Byte-level code patching.

use crate::{
    host::{HostAddress, HostMemory},
    Error, Result,
};

/// Opcode of the 32-bit relative `call`.
pub const CALL_REL32: u8 = 0xE8;

/// Length of a `call rel32` instruction.
pub const CALL_LENGTH: u32 = 5;

/// Encodes `call target` placed at `site`.
///
/// The displacement is relative to the end of the instruction and wraps like
/// the processor's own address arithmetic.
///
/// # Examples
///
/// ```rust
/// use bulldoze_extensions::{host::HostAddress, patch::encode_call};
///
/// let bytes = encode_call(HostAddress::new(0x1000), HostAddress::new(0x2000));
/// assert_eq!(bytes, [0xE8, 0xFB, 0x0F, 0x00, 0x00]);
/// ```
#[must_use]
pub fn encode_call(site: HostAddress, target: HostAddress) -> [u8; 5] {
    let displacement = target
        .value()
        .wrapping_sub(site.value().wrapping_add(CALL_LENGTH));
    let [a, b, c, d] = displacement.to_le_bytes();
    [CALL_REL32, a, b, c, d]
}

/// Writes hook redirections into host code.
///
/// Every write goes through [`HostMemory::patch_code`], so the backing memory
/// decides how protection is lifted and restored. Failures are reported as
/// [`Error::PatchFailed`] carrying the address that could not be written.
pub struct Patcher<'m, M: HostMemory> {
    memory: &'m mut M,
    written: usize,
}

impl<'m, M: HostMemory> Patcher<'m, M> {
    /// Creates a patcher over `memory`.
    pub fn new(memory: &'m mut M) -> Self {
        Patcher { memory, written: 0 }
    }

    /// Number of patches written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Replaces the single byte at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatchFailed`] if the byte cannot be written.
    pub fn overwrite_memory(&mut self, address: HostAddress, value: u8) -> Result<()> {
        self.patch(address, &[value])
    }

    /// Points the jump-table entry at `entry` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatchFailed`] if the entry cannot be written.
    pub fn install_jump_table_hook(&mut self, entry: HostAddress, target: HostAddress) -> Result<()> {
        self.patch(entry, &target.value().to_le_bytes())
    }

    /// Replaces the instruction at `site` with `call target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatchFailed`] if the call cannot be written.
    pub fn install_call_hook(&mut self, site: HostAddress, target: HostAddress) -> Result<()> {
        self.patch(site, &encode_call(site, target))
    }

    fn patch(&mut self, address: HostAddress, data: &[u8]) -> Result<()> {
        self.memory
            .patch_code(address, data)
            .map_err(|error| Error::PatchFailed {
                address,
                message: error.to_string(),
            })?;

        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Protection, SimulatedMemory};

    fn code() -> SimulatedMemory {
        let mut memory = SimulatedMemory::new();
        memory
            .map(HostAddress::new(0x1000), vec![0x90; 0x100], Protection::Code)
            .unwrap();
        memory
    }

    #[test]
    fn call_hook_encodes_relative_displacement() {
        let mut memory = code();
        let mut patcher = Patcher::new(&mut memory);
        patcher
            .install_call_hook(HostAddress::new(0x1010), HostAddress::new(0x1000))
            .unwrap();
        assert_eq!(patcher.written(), 1);

        let mut bytes = [0u8; 5];
        memory.read_bytes(HostAddress::new(0x1010), &mut bytes).unwrap();
        assert_eq!(bytes[0], CALL_REL32);
        assert_eq!(i32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]), -0x15);
    }

    #[test]
    fn jump_table_hook_writes_target() {
        let mut memory = code();
        Patcher::new(&mut memory)
            .install_jump_table_hook(HostAddress::new(0x1020), HostAddress::new(0xdead_beef))
            .unwrap();
        assert_eq!(memory.read_u32(HostAddress::new(0x1020)).unwrap(), 0xdead_beef);
    }

    #[test]
    fn overwrite_single_byte() {
        let mut memory = code();
        Patcher::new(&mut memory)
            .overwrite_memory(HostAddress::new(0x1001), 0x56)
            .unwrap();
        assert_eq!(memory.read_u8(HostAddress::new(0x1000)).unwrap(), 0x90);
        assert_eq!(memory.read_u8(HostAddress::new(0x1001)).unwrap(), 0x56);
        assert_eq!(memory.read_u8(HostAddress::new(0x1002)).unwrap(), 0x90);
    }

    #[test]
    fn failure_names_the_address() {
        let mut memory = code();
        let mut patcher = Patcher::new(&mut memory);
        let error = patcher
            .install_call_hook(HostAddress::new(0x10fe), HostAddress::new(0x1000))
            .unwrap_err();

        match error {
            Error::PatchFailed { address, .. } => assert_eq!(address, HostAddress::new(0x10fe)),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(patcher.written(), 0);
    }

    #[test]
    fn read_only_memory_is_refused() {
        let mut memory = SimulatedMemory::new();
        memory
            .map_zeroed(HostAddress::new(0x2000), 16, Protection::ReadOnly)
            .unwrap();
        assert!(Patcher::new(&mut memory)
            .overwrite_memory(HostAddress::new(0x2000), 1)
            .is_err());
    }
}
