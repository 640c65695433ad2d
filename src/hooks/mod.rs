//! Interception handlers for the bulldoze control.
//!
//! The game calls into five places once the hooks are installed:
//!
//! - key-down and mouse-wheel, through the control's vtable
//! - activation, through the control's vtable
//! - the demolition call made while the selection is updated (preview)
//! - the demolition call made when the mouse button is released (commit)
//!
//! [`BulldozeHooks`] implements all five against the [`DemolishControl`] and
//! [`Demolition`] traits. [`HostControl`] implements [`DemolishControl`] on
//! top of host memory plus the game's own control routines. [`SharedHooks`]
//! holds the handlers for the whole process and defers control routines that
//! re-enter the hooks until its lock is released.

mod handlers;
mod host;
mod shared;
mod traits;
mod types;

pub use handlers::BulldozeHooks;
pub use host::HostControl;
pub use shared::{DeferredRoutines, HostAction, SharedHooks};
pub use traits::{ControlRoutines, DemolishControl, Demolition};
pub use types::{DemolitionPass, InputOutcome, RegionChoice};
