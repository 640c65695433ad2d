//! The interception handlers.

use log::debug;

use crate::{
    config::ExtensionConfig,
    geometry::{diagonal_region_in, CellBounds},
    hooks::{DemolishControl, Demolition, DemolitionPass, InputOutcome, RegionChoice},
    mode::{toggle_selection, ModeState, ModifierKeys, OccupantFilterKind, VK_ESCAPE},
    Result,
};

/// Logs and drops a failed host read.
///
/// Handlers must always return to the game, so a field that cannot be read is
/// treated like an unset one.
fn absorb<T>(result: Result<T>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            debug!("Ignoring {what}: {error}");
            None
        }
    }
}

/// The five interception handlers and the mode state they share.
///
/// Each handler receives the host objects it works on as trait objects, so
/// the same code runs against the live game and against fakes.
///
/// # Example
///
/// ```rust,ignore
/// let mut hooks = BulldozeHooks::new(ExtensionConfig::default());
/// hooks.activate(&mut control);
///
/// // Shift+Alt+B: transportation networks, diagonal
/// hooks.on_key_down(&mut control, VK_B, ModifierKeys::SHIFT | ModifierKeys::ALT);
/// assert!(hooks.state().diagonal());
/// ```
#[derive(Clone, Debug, Default)]
pub struct BulldozeHooks {
    config: ExtensionConfig,
    state: ModeState,
}

impl BulldozeHooks {
    /// Creates the handlers with a fresh mode state.
    #[must_use]
    pub fn new(config: ExtensionConfig) -> Self {
        let state = ModeState::new(config.max_thickness);
        BulldozeHooks { config, state }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// The mode state.
    #[must_use]
    pub fn state(&self) -> &ModeState {
        &self.state
    }

    /// Forgets the active control when the city shuts down.
    pub fn teardown(&mut self) {
        self.state.clear_active_control();
    }

    /// Key-down on the bulldoze control.
    ///
    /// Only acts while the control owns the 3D view. Escape ends a gesture in
    /// progress; the toggle key switches filter kind and diagonal flag
    /// according to `modifiers` and is always consumed.
    pub fn on_key_down<C: DemolishControl>(
        &mut self,
        control: &mut C,
        vk_code: u32,
        modifiers: ModifierKeys,
    ) -> InputOutcome {
        if !control.is_on_top() {
            return InputOutcome::NotHandled;
        }

        if vk_code == VK_ESCAPE {
            let picked = absorb(control.cell_picked(), "cell picked flag").unwrap_or(false);
            if picked {
                control.end_input();
            }
            return InputOutcome::from(picked);
        }

        if vk_code == self.config.toggle_key {
            let (kind, diagonal) = toggle_selection(modifiers);
            self.set_filter_option(control, kind, diagonal);
            return InputOutcome::Handled;
        }

        InputOutcome::NotHandled
    }

    /// Mouse wheel on the bulldoze control.
    ///
    /// With diagonal mode on and Alt held, one notch changes the stripe
    /// thickness by one step and the event is consumed. A change during a
    /// drag recomputes the selection and redraws it. Everything else is left
    /// to the game.
    pub fn on_mouse_wheel<C: DemolishControl>(
        &mut self,
        control: &mut C,
        modifiers: ModifierKeys,
        wheel_delta: i32,
    ) -> InputOutcome {
        if !(self.state.diagonal() && modifiers.diagonal_held()) {
            return InputOutcome::NotHandled;
        }

        if self.state.step_thickness(wheel_delta) {
            debug!("Diagonal thickness is now {}", self.state.thickness().get());

            let picked = absorb(control.cell_picked(), "cell picked flag").unwrap_or(false);
            if picked && self.recompute_selection(control) {
                control.update_selected_region();
            }
        }

        InputOutcome::Handled
    }

    /// Activation of a bulldoze control.
    ///
    /// Resets the mode state, then seeds filter kind and diagonal flag from
    /// the cursor the control was created with.
    pub fn activate<C: DemolishControl>(&mut self, control: &mut C) {
        self.state.reset(control.address());

        let cursor = absorb(control.cursor_id(), "cursor id")
            .and_then(|id| self.config.cursors.cursor(id));
        if let Some(cursor) = cursor {
            let (kind, diagonal) = cursor.mode();
            self.state.seed(kind, diagonal);
        }
    }

    /// Demolition call while the selection is updated.
    ///
    /// `control` is the active control, if one is known; `incoming` is the
    /// bounds of the region the game computed. Colors the overlay for the
    /// filter kind and, in diagonal mode, mirrors the diagonal stripe into the
    /// control's selection and passes it to the game instead of the rectangle.
    pub fn preview_demolish_region<C: DemolishControl, D: Demolition>(
        &self,
        control: Option<&mut C>,
        demolition: &mut D,
        incoming: CellBounds,
    ) -> bool {
        let kind = self.state.filter_kind();
        let filter = kind.filter();

        let Some(control) = control else {
            return demolition.demolish_region(DemolitionPass::Preview, RegionChoice::Original, &filter);
        };

        absorb(
            control.set_preview_color(self.config.palette.color_for(kind)),
            "preview color",
        );

        let has_selection = absorb(control.selection_bounds(), "selection region")
            .flatten()
            .is_some();

        if self.state.diagonal() && has_selection {
            let anchor = absorb(control.click_anchor(), "click cell").flatten();
            let region = diagonal_region_in(incoming, anchor, self.state.thickness().get());

            absorb(control.overwrite_selection(&region), "selection overwrite");
            return demolition.demolish_region(
                DemolitionPass::Preview,
                RegionChoice::Diagonal(&region),
                &filter,
            );
        }

        demolition.demolish_region(DemolitionPass::Preview, RegionChoice::Original, &filter)
    }

    /// Demolition call when the mouse button is released.
    ///
    /// In diagonal mode the game receives the stripe over `incoming`, anchored
    /// at the active control's click cell when a control is known.
    pub fn commit_demolish_region<C: DemolishControl, D: Demolition>(
        &self,
        control: Option<&C>,
        demolition: &mut D,
        incoming: CellBounds,
    ) -> bool {
        let filter = self.state.filter_kind().filter();

        if !self.state.diagonal() {
            return demolition.demolish_region(DemolitionPass::Commit, RegionChoice::Original, &filter);
        }

        let anchor = control.and_then(|control| absorb(control.click_anchor(), "click cell").flatten());
        let region = diagonal_region_in(incoming, anchor, self.state.thickness().get());

        demolition.demolish_region(DemolitionPass::Commit, RegionChoice::Diagonal(&region), &filter)
    }

    /// Switches filter kind and diagonal flag, updating cursor and selection.
    fn set_filter_option<C: DemolishControl>(
        &mut self,
        control: &mut C,
        kind: OccupantFilterKind,
        diagonal: bool,
    ) {
        self.state.set_active_control(control.address());

        if !self.state.set_option(kind, diagonal) {
            return;
        }

        debug!("Bulldoze mode is now {kind}, diagonal {diagonal}");
        control.set_cursor(self.config.cursors.id(self.state.cursor()));

        if absorb(control.cell_picked(), "cell picked flag").unwrap_or(false) {
            if diagonal {
                self.recompute_selection(control);
            }
            control.update_selected_region();
        }
    }

    /// Recomputes the diagonal over the control's current selection bounds and
    /// writes it into the selection in place.
    ///
    /// Returns `false` if the control has no selection region.
    fn recompute_selection<C: DemolishControl>(&self, control: &mut C) -> bool {
        let Some(bounds) = absorb(control.selection_bounds(), "selection region").flatten() else {
            return false;
        };

        let anchor = absorb(control.click_anchor(), "click cell").flatten();
        let region = diagonal_region_in(bounds, anchor, self.state.thickness().get());
        absorb(control.overwrite_selection(&region), "selection overwrite");
        true
    }
}
