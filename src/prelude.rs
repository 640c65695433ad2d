//! # bulldoze-extensions Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the bulldoze-extensions library. Import this module to get quick access to the
//! geometry, mode state, handlers and installer.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bulldoze-extensions operations
pub use crate::Error;

/// The result type used throughout bulldoze-extensions
pub use crate::Result;

/// Extension configuration and its parts
pub use crate::config::{ExtensionConfig, LogConfig, PreviewColor, PreviewPalette};

// ================================================================================================
// Geometry
// ================================================================================================

/// Cell boxes, maps and regions
pub use crate::geometry::{CellBounds, CellMap, CellRegion};

/// The diagonal stripe rasterizer
pub use crate::geometry::{compute_diagonal_region, diagonal_region_in, Anchor, DiagonalDirection};

// ================================================================================================
// Mode State and Filters
// ================================================================================================

/// Bulldoze mode state machine
pub use crate::mode::{ModeState, OccupantFilterKind, Thickness};

/// Modifier keys, key codes and the toggle mapping
pub use crate::mode::{toggle_selection, ModifierKeys, VK_B, VK_ESCAPE};

/// Cursor variants and their resource ids
pub use crate::mode::{BulldozeCursor, CursorSet};

/// Occupant filters
pub use crate::filter::{NetworkTypeFlags, OccupantFilter};

// ================================================================================================
// Host Views
// ================================================================================================

/// Host addresses and memory access
pub use crate::host::{HostAddress, HostMemory, SimulatedMemory};

/// Typed views over host objects
pub use crate::host::{HostCellRegion, ShadowControl};

// ================================================================================================
// Handlers, Installer and Director
// ================================================================================================

/// Interception handlers and their seams
pub use crate::hooks::{
    BulldozeHooks, ControlRoutines, DemolishControl, Demolition, DemolitionPass, HostControl,
    InputOutcome, RegionChoice,
};

/// Process-wide handlers with deferred control routines
pub use crate::hooks::{DeferredRoutines, HostAction, SharedHooks};

/// Hook installation
pub use crate::patch::{check_version, install, HookTargets, HostVersion};

/// Notification routing
pub use crate::director::{BulldozeDirector, HostServices, Message, MessageServer, View3D};
