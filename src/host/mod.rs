//! Host memory, object layouts and fixed addresses.
//!
//! # Key Components
//!
//! - [`HostMemory`] - byte-level access to the 32-bit host address space
//! - [`SimulatedMemory`] - bounds-checked stand-in for tests and benchmarks
//! - [`DemolishControlLayout`] / [`CellRegionLayout`] - build-time checked
//!   layouts of the host objects
//! - [`ShadowControl`] - typed field access to a live bulldoze control
//! - [`HostCellRegion`] - in-place access to a host-owned selection region
//! - [`addresses`] - code and data locations of build 641

mod address;
mod control;
mod layout;
mod memory;
#[cfg(all(target_os = "windows", target_arch = "x86"))]
mod process;
mod region;

pub use address::{addresses, HostAddress};
pub use control::ShadowControl;
pub use layout::{CellArrayLayout, CellRegionLayout, DemolishControlLayout, RectLayout};
pub use memory::{HostMemory, Protection, SimulatedMemory};
#[cfg(all(target_os = "windows", target_arch = "x86"))]
pub use process::ProcessMemory;
pub use region::{encode_region, HostCellRegion};
