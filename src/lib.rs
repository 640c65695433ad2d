// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]

//! # bulldoze-extensions
//!
//! Extends the SimCity 4 bulldoze tool (game build 641) with diagonal
//! demolition, adjustable stripe thickness and occupant filters for flora and
//! transportation networks.
//!
//! The crate is split into a host-independent core and a thin in-process layer:
//!
//! - [`geometry`] - diagonal stripe rasterization inside a cell bounding box
//! - [`mode`] - the bulldoze mode state machine, modifier keys and cursors
//! - [`filter`] - occupant filters passed to the host demolition routine
//! - [`host`] - typed views over the host's memory, its object layouts and
//!   fixed addresses
//! - [`hooks`] - the interception handlers, written against traits so they can
//!   be driven without a running game
//! - [`patch`] - host version detection and the hook installer
//! - [`director`] - routing of host notifications and shortcut commands
//! - [`config`] and [`logger`] - configuration and the session log
//!
//! ## Computing a diagonal selection
//!
//! ```rust
//! use bulldoze_extensions::geometry::{compute_diagonal_region, Anchor};
//!
//! let region = compute_diagonal_region(0, 0, 4, 4, Some(Anchor::new(1, 1)), 1);
//! assert!(region.is_selected(2, 2));
//! assert!(!region.is_selected(4, 0));
//! assert_eq!(region.selected_count(), 5);
//! ```
//!
//! ## Driving the handlers
//!
//! The handlers never touch the game directly. They talk to a
//! [`hooks::DemolishControl`] and a [`hooks::Demolition`], which the in-process
//! layer implements on top of the host and tests implement with fakes.
//!
//! ```rust,ignore
//! use bulldoze_extensions::prelude::*;
//!
//! let mut hooks = BulldozeHooks::new(ExtensionConfig::default());
//! hooks.activate(&mut control);
//! let outcome = hooks.on_key_down(&mut control, VK_B, ModifierKeys::ALT);
//! assert_eq!(outcome, InputOutcome::Handled);
//! ```
//!
//! ## Installation
//!
//! On Windows x86 the `runtime` module exposes `BulldozeExtensionsInstall`,
//! which detects the game build, patches the five interception points and
//! reports the outcome to the session log. Installation is refused for every
//! build other than 641.
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared fakes used by the unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// Extension configuration: supported build, thickness limit, preview palette,
/// key bindings, cursor ids and logging.
pub mod config;

/// Session logger backed by `env_logger`, writing to a per-session log file.
pub mod logger;

/// Cell bounding boxes, membership maps and the diagonal stripe rasterizer.
///
/// Everything in this module is pure: identical inputs always produce an
/// identical [`geometry::CellRegion`].
pub mod geometry;

/// Bulldoze mode state: occupant filter kind, diagonal flag, thickness and the
/// active control, plus modifier keys and cursor variants.
pub mod mode;

/// Occupant filters restricting which city objects a demolition affects.
pub mod filter;

/// Views over host memory.
///
/// The host owns every object reached through this module. Views read and write
/// individual fields at fixed offsets and never allocate, free, resize or
/// re-point host data.
pub mod host;

/// Interception handlers for key-down, mouse-wheel, activation, preview and
/// commit.
pub mod hooks;

/// Version gate, code patcher and hook installer.
pub mod patch;

/// Notification routing: lifecycle events and shortcut commands.
pub mod director;

/// In-process entry points for the live game (Windows x86 only).
#[cfg(all(target_os = "windows", target_arch = "x86"))]
pub mod runtime;

/// `bulldoze-extensions` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `bulldoze-extensions` Error type
///
/// The main error type for all fallible operations in this crate.
pub use error::Error;
