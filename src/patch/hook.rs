//! Named interception points and the hook plan for build 641.

use std::fmt;

use strum::{Display, EnumCount, EnumIter};

use crate::{
    host::{addresses, HostAddress, HostMemory},
    patch::Patcher,
    Result,
};

/// The five places the extensions intercept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum HandlerSlot {
    /// Key-down on the bulldoze control (jump table)
    #[strum(to_string = "key-down")]
    KeyDown,
    /// Mouse wheel on the bulldoze control (jump table)
    #[strum(to_string = "mouse-wheel")]
    MouseWheel,
    /// Activation of the bulldoze control (jump table)
    #[strum(to_string = "activate")]
    Activate,
    /// Demolition call while the selection is updated (call site)
    #[strum(to_string = "preview-demolish")]
    PreviewDemolish,
    /// Demolition call on mouse release (call site)
    #[strum(to_string = "commit-demolish")]
    CommitDemolish,
}

/// Entry points of the replacement handlers, one per [`HandlerSlot`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HookTargets {
    /// Key-down handler
    pub key_down: HostAddress,
    /// Mouse-wheel handler
    pub mouse_wheel: HostAddress,
    /// Activation handler
    pub activate: HostAddress,
    /// Preview demolition handler
    pub preview_demolish: HostAddress,
    /// Commit demolition handler
    pub commit_demolish: HostAddress,
}

impl HookTargets {
    /// The handler for `slot`.
    #[must_use]
    pub const fn target(&self, slot: HandlerSlot) -> HostAddress {
        match slot {
            HandlerSlot::KeyDown => self.key_down,
            HandlerSlot::MouseWheel => self.mouse_wheel,
            HandlerSlot::Activate => self.activate,
            HandlerSlot::PreviewDemolish => self.preview_demolish,
            HandlerSlot::CommitDemolish => self.commit_demolish,
        }
    }
}

/// One write performed while installing a [`Hook`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchStep {
    /// Replace a single byte, used to pad displaced instructions
    Byte {
        /// Byte to replace
        address: HostAddress,
        /// New value
        value: u8,
    },
    /// Point a jump-table entry at a handler
    JumpTableEntry {
        /// Table entry
        entry: HostAddress,
        /// Handler
        target: HostAddress,
    },
    /// Replace an instruction with `call handler`
    CallSite {
        /// First byte of the instruction
        site: HostAddress,
        /// Handler
        target: HostAddress,
    },
}

impl PatchStep {
    /// Performs the write.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PatchFailed`] if the write fails.
    pub fn apply<M: HostMemory>(&self, patcher: &mut Patcher<'_, M>) -> Result<()> {
        match *self {
            PatchStep::Byte { address, value } => patcher.overwrite_memory(address, value),
            PatchStep::JumpTableEntry { entry, target } => {
                patcher.install_jump_table_hook(entry, target)
            }
            PatchStep::CallSite { site, target } => patcher.install_call_hook(site, target),
        }
    }
}

impl fmt::Display for PatchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchStep::Byte { address, value } => write!(f, "byte {value:#04x} at {address}"),
            PatchStep::JumpTableEntry { entry, target } => {
                write!(f, "jump table entry {entry} -> {target}")
            }
            PatchStep::CallSite { site, target } => write!(f, "call at {site} -> {target}"),
        }
    }
}

/// A named interception point: the ordered writes that redirect one
/// [`HandlerSlot`] to its handler.
///
/// # Examples
///
/// ```rust
/// use bulldoze_extensions::{host::HostAddress, patch::{HandlerSlot, Hook}};
///
/// let hook = Hook::new(HandlerSlot::PreviewDemolish)
///     .pad(HostAddress::new(0x4b97ed), 0x56)
///     .pad(HostAddress::new(0x4b97ee), 0x50)
///     .call_site(HostAddress::new(0x4b97ef), HostAddress::new(0x1000_0000));
/// assert_eq!(hook.steps().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hook {
    slot: HandlerSlot,
    steps: Vec<PatchStep>,
}

impl Hook {
    /// Creates a hook with no writes.
    #[must_use]
    pub fn new(slot: HandlerSlot) -> Self {
        Hook {
            slot,
            steps: Vec::new(),
        }
    }

    /// The interception point.
    #[must_use]
    pub fn slot(&self) -> HandlerSlot {
        self.slot
    }

    /// The writes in installation order.
    #[must_use]
    pub fn steps(&self) -> &[PatchStep] {
        &self.steps
    }

    /// Appends a padding byte.
    #[must_use]
    pub fn pad(mut self, address: HostAddress, value: u8) -> Self {
        self.steps.push(PatchStep::Byte { address, value });
        self
    }

    /// Appends a jump-table redirection.
    #[must_use]
    pub fn jump_table_entry(mut self, entry: HostAddress, target: HostAddress) -> Self {
        self.steps.push(PatchStep::JumpTableEntry { entry, target });
        self
    }

    /// Appends a call-site redirection.
    #[must_use]
    pub fn call_site(mut self, site: HostAddress, target: HostAddress) -> Self {
        self.steps.push(PatchStep::CallSite { site, target });
        self
    }

    /// Performs every write in order, stopping at the first failure.
    ///
    /// Writes made before the failure stay in place.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PatchFailed`] for the first failing write.
    pub fn install<M: HostMemory>(&self, patcher: &mut Patcher<'_, M>) -> Result<()> {
        for step in &self.steps {
            step.apply(patcher)?;
        }
        Ok(())
    }
}

/// The hooks for build 641, in installation order.
///
/// The preview call site replaces a five-byte call whose first two argument
/// pushes were displaced; `push esi` and `push eax` are written in front of it
/// so the replacement handler receives the same stack.
#[must_use]
pub fn bulldoze_hooks(targets: &HookTargets) -> Vec<Hook> {
    let preview_padding = addresses::PREVIEW_PADDING;

    vec![
        Hook::new(HandlerSlot::KeyDown).jump_table_entry(
            addresses::KEY_DOWN_ENTRY,
            targets.key_down,
        ),
        Hook::new(HandlerSlot::MouseWheel).jump_table_entry(
            addresses::MOUSE_WHEEL_ENTRY,
            targets.mouse_wheel,
        ),
        Hook::new(HandlerSlot::Activate).jump_table_entry(
            addresses::ACTIVATE_ENTRY,
            targets.activate,
        ),
        Hook::new(HandlerSlot::PreviewDemolish)
            .pad(preview_padding, 0x56)
            .pad(preview_padding.offset(1), 0x50)
            .call_site(
                addresses::PREVIEW_CALL_SITE,
                targets.preview_demolish,
            ),
        Hook::new(HandlerSlot::CommitDemolish).call_site(
            addresses::COMMIT_CALL_SITE,
            targets.commit_demolish,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn targets() -> HookTargets {
        HookTargets {
            key_down: HostAddress::new(0x1000_0000),
            mouse_wheel: HostAddress::new(0x1000_0010),
            activate: HostAddress::new(0x1000_0020),
            preview_demolish: HostAddress::new(0x1000_0030),
            commit_demolish: HostAddress::new(0x1000_0040),
        }
    }

    #[test]
    fn plan_follows_slot_order() {
        let slots: Vec<_> = bulldoze_hooks(&targets()).iter().map(Hook::slot).collect();
        let expected: Vec<_> = HandlerSlot::iter().collect();
        assert_eq!(slots, expected);
        assert_eq!(slots.len(), HandlerSlot::COUNT);
    }

    #[test]
    fn every_hook_targets_its_handler() {
        let targets = targets();
        for hook in bulldoze_hooks(&targets) {
            let target = match hook.steps().last() {
                Some(PatchStep::JumpTableEntry { target, .. } | PatchStep::CallSite { target, .. }) => *target,
                other => panic!("{} ends with {other:?}", hook.slot()),
            };
            assert_eq!(target, targets.target(hook.slot()));
        }
    }

    #[test]
    fn preview_pads_before_the_call() {
        let hooks = bulldoze_hooks(&targets());
        assert_eq!(
            hooks[3].steps(),
            &[
                PatchStep::Byte {
                    address: HostAddress::new(0x4b97ed),
                    value: 0x56
                },
                PatchStep::Byte {
                    address: HostAddress::new(0x4b97ee),
                    value: 0x50
                },
                PatchStep::CallSite {
                    site: HostAddress::new(0x4b97ef),
                    target: HostAddress::new(0x1000_0030)
                },
            ]
        );
    }

    #[test]
    fn step_display() {
        let step = PatchStep::Byte {
            address: HostAddress::new(0x4b97ed),
            value: 0x56,
        };
        assert_eq!(step.to_string(), "byte 0x56 at 0x004b97ed");
        assert_eq!(HandlerSlot::PreviewDemolish.to_string(), "preview-demolish");
    }
}
