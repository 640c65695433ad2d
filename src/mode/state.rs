//! The bulldoze mode state machine.

use crate::{
    geometry::MAX_THICKNESS,
    host::HostAddress,
    mode::{BulldozeCursor, OccupantFilterKind},
};

/// Signed stripe thickness; never zero.
///
/// The sequence visited by repeated increments is `…, -2, -1, 1, 2, …`,
/// clamped at the configured maximum in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Thickness(i32);

impl Thickness {
    /// A single-cell stripe.
    pub const DEFAULT: Thickness = Thickness(1);

    /// Creates a thickness, or `None` for zero or a magnitude above
    /// [`MAX_THICKNESS`].
    #[must_use]
    pub const fn new(value: i32) -> Option<Self> {
        if value == 0 || value > MAX_THICKNESS || value < -MAX_THICKNESS {
            None
        } else {
            Some(Thickness(value))
        }
    }

    /// The signed value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// One step up, skipping zero and stopping at `max`.
    #[must_use]
    pub fn increased(self, max: i32) -> Self {
        if self.0 == -1 {
            Thickness(1)
        } else {
            Thickness((self.0 + 1).min(max))
        }
    }

    /// One step down, skipping zero and stopping at `-max`.
    #[must_use]
    pub fn decreased(self, max: i32) -> Self {
        if self.0 == 1 {
            Thickness(-1)
        } else {
            Thickness((self.0 - 1).max(-max))
        }
    }
}

impl Default for Thickness {
    fn default() -> Self {
        Thickness::DEFAULT
    }
}

/// Occupant filter, diagonal flag, thickness and active control.
///
/// There is one mode state per process in the live game, but nothing in this
/// type is global: handlers receive it by reference, so tests can create as
/// many independent states as they need.
///
/// # Examples
///
/// ```rust
/// use bulldoze_extensions::{host::HostAddress, mode::{ModeState, OccupantFilterKind}};
///
/// let mut state = ModeState::default();
/// state.reset(HostAddress::new(0x1000));
/// assert!(state.set_option(OccupantFilterKind::Flora, true));
/// assert!(!state.set_option(OccupantFilterKind::Flora, true));
///
/// assert!(state.step_thickness(1));
/// assert_eq!(state.thickness().get(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeState {
    filter: OccupantFilterKind,
    diagonal: bool,
    thickness: Thickness,
    max_thickness: i32,
    active_control: Option<HostAddress>,
}

impl Default for ModeState {
    fn default() -> Self {
        ModeState::new(MAX_THICKNESS)
    }
}

impl ModeState {
    /// Creates the initial state with a thickness limit, clamped to
    /// `1..=MAX_THICKNESS`.
    #[must_use]
    pub fn new(max_thickness: i32) -> Self {
        ModeState {
            filter: OccupantFilterKind::None,
            diagonal: false,
            thickness: Thickness::DEFAULT,
            max_thickness: max_thickness.clamp(1, MAX_THICKNESS),
            active_control: None,
        }
    }

    /// The current occupant filter kind.
    #[must_use]
    pub fn filter_kind(&self) -> OccupantFilterKind {
        self.filter
    }

    /// Whether diagonal mode is on.
    #[must_use]
    pub fn diagonal(&self) -> bool {
        self.diagonal
    }

    /// The current stripe thickness.
    #[must_use]
    pub fn thickness(&self) -> Thickness {
        self.thickness
    }

    /// The thickness limit.
    #[must_use]
    pub fn max_thickness(&self) -> i32 {
        self.max_thickness
    }

    /// The cursor matching the current filter kind and diagonal flag.
    #[must_use]
    pub fn cursor(&self) -> BulldozeCursor {
        BulldozeCursor::for_mode(self.filter, self.diagonal)
    }

    /// The control instance the state was last used with. Non-owning.
    #[must_use]
    pub fn active_control(&self) -> Option<HostAddress> {
        self.active_control
    }

    /// Remembers the control instance the state is used with.
    pub fn set_active_control(&mut self, control: HostAddress) {
        self.active_control = Some(control);
    }

    /// Forgets the active control, for tool teardown.
    pub fn clear_active_control(&mut self) {
        self.active_control = None;
    }

    /// Back to `{None, diagonal off, thickness 1}` for a newly activated control.
    pub fn reset(&mut self, control: HostAddress) {
        self.filter = OccupantFilterKind::None;
        self.diagonal = false;
        self.thickness = Thickness::DEFAULT;
        self.active_control = Some(control);
    }

    /// Seeds filter kind and diagonal flag without touching thickness or control.
    pub fn seed(&mut self, kind: OccupantFilterKind, diagonal: bool) {
        self.filter = kind;
        self.diagonal = diagonal;
    }

    /// Switches filter kind and diagonal flag together.
    ///
    /// Returns `true` if either value changed.
    pub fn set_option(&mut self, kind: OccupantFilterKind, diagonal: bool) -> bool {
        if self.filter == kind && self.diagonal == diagonal {
            return false;
        }

        self.filter = kind;
        self.diagonal = diagonal;
        true
    }

    /// Adjusts the thickness by one step in the direction of `wheel_delta`.
    ///
    /// A zero delta changes nothing. Returns `true` if the thickness changed.
    pub fn step_thickness(&mut self, wheel_delta: i32) -> bool {
        let previous = self.thickness;

        if wheel_delta > 0 {
            self.thickness = self.thickness.increased(self.max_thickness);
        } else if wheel_delta < 0 {
            self.thickness = self.thickness.decreased(self.max_thickness);
        }

        self.thickness != previous
    }
}
