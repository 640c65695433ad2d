//! The handlers behind a process-wide lock.
//!
//! Several native routines of the bulldoze control call back into patched
//! code. Redrawing the selection, for example, runs the demolition preview
//! call site, which enters the preview handler again on the same thread. The
//! lock must not be held at that point, so [`SharedHooks::run`] queues every
//! routine that may call back and performs the queue once the lock is released.

use std::sync::{Mutex, TryLockError};

use log::debug;

use crate::{
    hooks::{BulldozeHooks, ControlRoutines},
    host::HostAddress,
    Error, Result,
};

/// A native control routine queued during a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostAction {
    /// Switch the control's cursor
    SetCursor {
        /// The control
        control: HostAddress,
        /// Resource id of the new cursor
        cursor_id: u32,
    },
    /// End the current gesture
    EndInput {
        /// The control
        control: HostAddress,
    },
    /// Rebuild and redraw the selection overlay
    UpdateSelectedRegion {
        /// The control
        control: HostAddress,
    },
}

impl HostAction {
    /// Runs the routine.
    pub fn perform<R: ControlRoutines>(self, routines: &mut R) {
        match self {
            HostAction::SetCursor { control, cursor_id } => routines.set_cursor(control, cursor_id),
            HostAction::EndInput { control } => routines.end_input(control),
            HostAction::UpdateSelectedRegion { control } => routines.update_selected_region(control),
        }
    }
}

/// [`ControlRoutines`] that answer queries at once and queue everything else.
#[derive(Debug)]
pub struct DeferredRoutines<'r, R: ControlRoutines> {
    routines: &'r mut R,
    queued: Vec<HostAction>,
}

impl<'r, R: ControlRoutines> DeferredRoutines<'r, R> {
    /// Wraps `routines` with an empty queue.
    pub fn new(routines: &'r mut R) -> Self {
        DeferredRoutines {
            routines,
            queued: Vec::new(),
        }
    }

    /// The queued routines, in call order.
    #[must_use]
    pub fn queued(&self) -> &[HostAction] {
        &self.queued
    }

    /// Gives up the borrowed routines and returns the queue.
    #[must_use]
    pub fn into_queue(self) -> Vec<HostAction> {
        self.queued
    }
}

impl<R: ControlRoutines> ControlRoutines for DeferredRoutines<'_, R> {
    fn is_on_top(&mut self, control: HostAddress) -> bool {
        self.routines.is_on_top(control)
    }

    fn set_cursor(&mut self, control: HostAddress, cursor_id: u32) {
        self.queued.push(HostAction::SetCursor { control, cursor_id });
    }

    fn end_input(&mut self, control: HostAddress) {
        self.queued.push(HostAction::EndInput { control });
    }

    fn update_selected_region(&mut self, control: HostAddress) {
        self.queued.push(HostAction::UpdateSelectedRegion { control });
    }
}

/// [`BulldozeHooks`] shared by every replacement function in the process.
///
/// # Example
///
/// ```rust,ignore
/// static RUNTIME: SharedHooks = SharedHooks::new();
///
/// RUNTIME.replace(BulldozeHooks::new(config))?;
/// let handled = RUNTIME.run(&mut routines, false, |hooks, routines| {
///     let mut control = HostControl::new(&mut memory, routines, address)?;
///     hooks.on_key_down(&mut control, vk_code, modifiers).is_handled()
/// });
/// ```
#[derive(Debug, Default)]
pub struct SharedHooks {
    hooks: Mutex<Option<BulldozeHooks>>,
}

impl SharedHooks {
    /// Creates an empty slot; every [`run`](Self::run) falls back until
    /// [`replace`](Self::replace) is called.
    #[must_use]
    pub const fn new() -> Self {
        SharedHooks {
            hooks: Mutex::new(None),
        }
    }

    /// Installs `hooks`, dropping any previous handlers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the lock is poisoned.
    pub fn replace(&self, hooks: BulldozeHooks) -> Result<()> {
        *try_lock!(self.hooks)? = Some(hooks);
        Ok(())
    }

    /// Forgets the active control, for tool teardown.
    pub fn teardown(&self) {
        if let Ok(mut hooks) = try_lock!(self.hooks) {
            if let Some(hooks) = hooks.as_mut() {
                hooks.teardown();
            }
        }
    }

    /// Runs `f` with the handlers, then performs the routines it queued.
    ///
    /// Returns `fallback` without running `f` if no handlers are installed or
    /// the lock is held, which only happens when the game enters a handler
    /// from inside another one.
    pub fn run<R, T, F>(&self, routines: &mut R, fallback: T, f: F) -> T
    where
        R: ControlRoutines,
        F: FnOnce(&mut BulldozeHooks, &mut DeferredRoutines<'_, R>) -> T,
    {
        let (result, queued) = {
            let mut guard = match self.hooks.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::WouldBlock) => {
                    debug!("Handler entered while another one runs");
                    return fallback;
                }
                Err(TryLockError::Poisoned(_)) => {
                    debug!("{}", Error::LockError);
                    return fallback;
                }
            };
            let Some(hooks) = guard.as_mut() else {
                return fallback;
            };

            let mut deferred = DeferredRoutines::new(routines);
            let result = f(hooks, &mut deferred);
            (result, deferred.into_queue())
        };

        for action in queued {
            action.perform(routines);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ExtensionConfig,
        geometry::{diagonal_region_in, Anchor, CellBounds},
        hooks::{DemolitionPass, HostControl, InputOutcome},
        host::SimulatedMemory,
        mode::{ModifierKeys, VK_B},
        test::{place_control, rectangle, FakeControl, RecordingDemolition, RecordingRoutines},
    };

    fn shared() -> SharedHooks {
        let shared = SharedHooks::new();
        shared.replace(BulldozeHooks::new(ExtensionConfig::default())).unwrap();
        shared
    }

    fn bounds() -> CellBounds {
        CellBounds::from_corners(0, 0, 4, 4)
    }

    /// Routines whose redraw runs the preview handler again, the way the
    /// game's own selection update does.
    struct RedrawingRoutines<'s> {
        shared: &'s SharedHooks,
        previews: Vec<Option<crate::test::DemolitionCall>>,
        redraws: usize,
    }

    impl ControlRoutines for RedrawingRoutines<'_> {
        fn is_on_top(&mut self, _control: HostAddress) -> bool {
            true
        }

        fn set_cursor(&mut self, _control: HostAddress, _cursor_id: u32) {}

        fn end_input(&mut self, _control: HostAddress) {}

        fn update_selected_region(&mut self, _control: HostAddress) {
            self.redraws += 1;
            let preview = self
                .shared
                .run(&mut RecordingRoutines::default(), None, |hooks, _| {
                    let mut control = FakeControl::dragging(0x4000, bounds(), Anchor::new(0, 0));
                    let mut demolition = RecordingDemolition::returning(true);
                    hooks.preview_demolish_region(Some(&mut control), &mut demolition, bounds());
                    Some(demolition.last().clone())
                });
            self.previews.push(preview);
        }
    }

    fn redrawing(shared: &SharedHooks) -> RedrawingRoutines<'_> {
        RedrawingRoutines {
            shared,
            previews: Vec::new(),
            redraws: 0,
        }
    }

    fn dragging_control(memory: &mut SimulatedMemory) -> HostAddress {
        place_control(memory, Some(&rectangle(0, 0, 4, 4)), (0, 0), true)
    }

    #[test]
    fn toggle_redraw_reenters_preview() {
        let shared = shared();
        let mut routines = redrawing(&shared);
        let mut memory = SimulatedMemory::new();
        let base = dragging_control(&mut memory);

        let outcome = shared.run(&mut routines, None, |hooks, deferred| {
            let mut control = HostControl::new(&mut memory, deferred, base).unwrap();
            Some(hooks.on_key_down(&mut control, VK_B, ModifierKeys::ALT))
        });
        assert_eq!(outcome, Some(InputOutcome::Handled));

        assert_eq!(routines.redraws, 1);
        let preview = routines.previews[0].clone().expect("nested preview ran");
        assert_eq!(preview.pass, DemolitionPass::Preview);
        assert_eq!(
            preview.diagonal,
            Some(diagonal_region_in(bounds(), Some(Anchor::new(0, 0)), 1))
        );
    }

    #[test]
    fn wheel_redraw_sees_new_thickness() {
        let shared = shared();
        let mut routines = redrawing(&shared);
        let mut memory = SimulatedMemory::new();
        let base = dragging_control(&mut memory);

        shared.run(&mut routines, (), |hooks, deferred| {
            let mut control = HostControl::new(&mut memory, deferred, base).unwrap();
            hooks.on_key_down(&mut control, VK_B, ModifierKeys::ALT);
            hooks.on_mouse_wheel(&mut control, ModifierKeys::ALT, 120);
        });

        assert_eq!(routines.redraws, 2);
        let last = routines.previews[1].clone().expect("nested preview ran");
        assert_eq!(
            last.diagonal,
            Some(diagonal_region_in(bounds(), Some(Anchor::new(0, 0)), 2))
        );
    }

    #[test]
    fn queries_are_immediate_and_actions_wait() {
        let shared = shared();
        let mut routines = RecordingRoutines::default();
        let control = HostAddress::new(0x2000);

        let seen_inside = shared.run(&mut routines, 0, |_, deferred| {
            assert!(deferred.is_on_top(control));
            deferred.set_cursor(control, 7);
            deferred.update_selected_region(control);
            deferred.queued().len()
        });

        assert_eq!(seen_inside, 2);
        assert_eq!(
            routines.calls,
            vec![
                (control, crate::test::ControlCall::SetCursor(7)),
                (control, crate::test::ControlCall::UpdateSelectedRegion),
            ]
        );
    }

    #[test]
    fn empty_slot_falls_back() {
        let shared = SharedHooks::new();
        let mut routines = RecordingRoutines::default();
        assert!(!shared.run(&mut routines, false, |_, _| true));

        shared.teardown();
        assert!(routines.calls.is_empty());
    }

    #[test]
    fn teardown_clears_active_control() {
        let shared = shared();
        let mut routines = RecordingRoutines::default();
        shared.run(&mut routines, (), |hooks, deferred| {
            let mut control = FakeControl::new(0x3000);
            hooks.activate(&mut control);
            deferred.end_input(control.address);
        });

        shared.teardown();
        let active = shared.run(&mut routines, None, |hooks, _| hooks.state().active_control());
        assert_eq!(active, None);
    }
}
