//! Core types for the interception handlers.
//!
//! - [`InputOutcome`]: whether an input event was consumed
//! - [`RegionChoice`]: which region a demolition call receives
//! - [`DemolitionPass`]: preview or commit

use crate::geometry::CellRegion;

/// Whether a handler consumed an input event.
///
/// A [`NotHandled`](Self::NotHandled) event continues to the game's default
/// processing, for example zooming on a mouse-wheel event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputOutcome {
    /// The event was consumed
    Handled,
    /// The game should process the event
    NotHandled,
}

impl InputOutcome {
    /// Returns `true` for [`Handled`](Self::Handled).
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, InputOutcome::Handled)
    }
}

impl From<bool> for InputOutcome {
    fn from(handled: bool) -> Self {
        if handled {
            InputOutcome::Handled
        } else {
            InputOutcome::NotHandled
        }
    }
}

/// The region handed to the host's demolition routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionChoice<'a> {
    /// The rectangular region the game computed
    Original,
    /// A diagonal stripe computed over the same bounds
    Diagonal(&'a CellRegion),
}

impl RegionChoice<'_> {
    /// The substituted region, if any.
    #[must_use]
    pub fn diagonal(&self) -> Option<&CellRegion> {
        match self {
            RegionChoice::Original => None,
            RegionChoice::Diagonal(region) => Some(region),
        }
    }
}

/// Which of the two demolition call sites is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DemolitionPass {
    /// Cost and overlay computation while the user drags
    Preview,
    /// The actual demolition when the mouse button is released
    Commit,
}

impl DemolitionPass {
    /// The `demolish` flag the host routine expects.
    #[must_use]
    pub const fn demolish(self) -> bool {
        matches!(self, DemolitionPass::Commit)
    }
}
