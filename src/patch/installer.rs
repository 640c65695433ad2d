//! Version gate and hook installation.

use log::{debug, error, info};

use crate::{
    config::ExtensionConfig,
    host::HostMemory,
    patch::{bulldoze_hooks, HookTargets, Patcher},
    Error, Result,
};

/// Succeeds only for the exact build the hook addresses belong to.
///
/// # Errors
///
/// Returns [`Error::UnsupportedVersion`] for any other build.
///
/// # Examples
///
/// ```rust
/// use bulldoze_extensions::patch::check_version;
///
/// assert!(check_version(641, 641).is_ok());
/// assert!(check_version(640, 641).is_err());
/// ```
pub fn check_version(found: u16, expected: u16) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(Error::UnsupportedVersion { found, expected })
    }
}

/// Installs every hook in order, stopping at the first failure.
///
/// Hooks installed before the failure stay in place; nothing is rolled back.
///
/// # Errors
///
/// Returns [`Error::PatchFailed`] for the first write that fails.
pub fn install_hooks<M: HostMemory>(memory: &mut M, targets: &HookTargets) -> Result<()> {
    let mut patcher = Patcher::new(memory);

    for hook in bulldoze_hooks(targets) {
        hook.install(&mut patcher)?;
        debug!("Installed the {} hook", hook.slot());
    }

    Ok(())
}

/// Checks the build and installs the hooks, reporting the outcome as exactly
/// one log line.
///
/// Returns `true` only if every hook was installed. Never retries.
pub fn install<M: HostMemory>(
    memory: &mut M,
    detected_build: u16,
    config: &ExtensionConfig,
    targets: &HookTargets,
) -> bool {
    if let Err(error) = check_version(detected_build, config.supported_build) {
        error!("{error}");
        return false;
    }

    match install_hooks(memory, targets) {
        Ok(()) => {
            info!("Installed the bulldozer extensions.");
            true
        }
        Err(error) => {
            error!("Failed to install the bulldozer extensions.\n{error}");
            false
        }
    }
}
