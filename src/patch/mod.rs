//! Version gate, code patcher and hook installer.
//!
//! # Key Components
//!
//! - [`HostVersion`] - the game build read from the executable's version resource
//! - [`Patcher`] - single-byte, jump-table and call-site writes
//! - [`Hook`] - a named interception point as an ordered list of [`PatchStep`]s
//! - [`bulldoze_hooks`] - the five hooks for build 641
//! - [`install`] - version gate plus installation, logged as one outcome line
//!
//! Installation is all-or-nothing only in what it reports: hooks installed
//! before a failure are left in place.

mod hook;
mod installer;
mod patcher;
mod version;

pub use hook::{bulldoze_hooks, HandlerSlot, Hook, HookTargets, PatchStep};
pub use installer::{check_version, install, install_hooks};
pub use patcher::{encode_call, Patcher, CALL_LENGTH, CALL_REL32};
pub use version::{
    find_fixed_file_info, parse_fixed_file_info, HostVersion, FIXED_FILE_INFO_SIGNATURE,
    FIXED_FILE_INFO_SIZE,
};
