//! Build detection from the host executable's version resource.
//!
//! The version lives in the `VS_FIXEDFILEINFO` block of the `VS_VERSION_INFO`
//! resource. Rather than walking the resource directory, the `.rsrc` section
//! is searched for the UTF-16 key, and the fixed block is the first
//! `0xFEEF04BD` signature following it.

use std::{fmt, fs, path::Path};

use goblin::pe::PE;
use memmap2::Mmap;
use widestring::u16str;

use crate::Result;

/// Signature opening a `VS_FIXEDFILEINFO` block.
pub const FIXED_FILE_INFO_SIGNATURE: u32 = 0xFEEF_04BD;

/// Size of `VS_FIXEDFILEINFO`.
pub const FIXED_FILE_INFO_SIZE: usize = 52;

/// The four-part file version of the host executable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostVersion {
    /// High word of the most significant dword
    pub major: u16,
    /// Low word of the most significant dword
    pub minor: u16,
    /// High word of the least significant dword
    pub build: u16,
    /// Low word of the least significant dword
    pub revision: u16,
}

impl HostVersion {
    /// Splits the two file-version dwords of `VS_FIXEDFILEINFO`.
    #[must_use]
    pub const fn from_dwords(most_significant: u32, least_significant: u32) -> Self {
        HostVersion {
            major: (most_significant >> 16) as u16,
            minor: (most_significant & 0xffff) as u16,
            build: (least_significant >> 16) as u16,
            revision: (least_significant & 0xffff) as u16,
        }
    }

    /// Reads the version of the executable at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file cannot be opened,
    /// [`crate::Error::Error`] if it cannot be mapped, and the errors of
    /// [`from_bytes`](Self::from_bytes) otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|error| crate::Error::Error(error.to_string()))?;

        Self::from_bytes(&mmap)
    }

    /// Reads the version from the bytes of a PE image as stored on disk.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GoblinErr`] if `data` is not a PE image,
    /// [`crate::Error::NotSupported`] if it has no resource section and
    /// [`crate::Error::Malformed`] if it carries no usable version resource.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let pe = PE::parse(data)?;

        let section = pe
            .sections
            .iter()
            .find(|section| section.name().is_ok_and(|name| name == ".rsrc"))
            .ok_or(crate::Error::NotSupported)?;

        let start = section.pointer_to_raw_data as usize;
        let end = start.saturating_add(section.size_of_raw_data as usize).min(data.len());
        let resources = data
            .get(start..end)
            .ok_or_else(|| malformed_error!("Resource section outside of file - {}", start))?;

        find_fixed_file_info(resources)
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.revision)
    }
}

/// Finds the `VS_FIXEDFILEINFO` block following the `VS_VERSION_INFO` key in
/// raw resource data.
///
/// # Errors
///
/// Returns [`crate::Error::Malformed`] if the key or the block is missing.
pub fn find_fixed_file_info(resources: &[u8]) -> Result<HostVersion> {
    let key: Vec<u8> = u16str!("VS_VERSION_INFO")
        .as_slice()
        .iter()
        .flat_map(|unit| unit.to_le_bytes())
        .collect();

    let key_at = resources
        .windows(key.len())
        .position(|window| window == key.as_slice())
        .ok_or_else(|| malformed_error!("No VS_VERSION_INFO resource"))?;

    let after_key = &resources[key_at + key.len()..];
    let signature = FIXED_FILE_INFO_SIGNATURE.to_le_bytes();
    let block_at = after_key
        .windows(signature.len())
        .position(|window| window == signature)
        .ok_or_else(|| malformed_error!("No VS_FIXEDFILEINFO after VS_VERSION_INFO"))?;

    parse_fixed_file_info(&after_key[block_at..])
}

/// Parses a `VS_FIXEDFILEINFO` block starting at `data[0]`.
///
/// # Errors
///
/// Returns [`crate::Error::Malformed`] if `data` is too short or does not start
/// with the block signature.
pub fn parse_fixed_file_info(data: &[u8]) -> Result<HostVersion> {
    if data.len() < FIXED_FILE_INFO_SIZE {
        return Err(malformed_error!(
            "VS_FIXEDFILEINFO truncated - {} bytes",
            data.len()
        ));
    }

    let dword = |index: usize| {
        let at = index * 4;
        u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
    };

    if dword(0) != FIXED_FILE_INFO_SIGNATURE {
        return Err(malformed_error!("Invalid VS_FIXEDFILEINFO signature - {:#x}", dword(0)));
    }

    Ok(HostVersion::from_dwords(dword(2), dword(3)))
}
