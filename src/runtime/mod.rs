//! Wiring into the running game.
//!
//! The host's plugin director calls [`BulldozeExtensionsInstall`] once after
//! application start and [`BulldozeExtensionsShutdown`] before a city is
//! unloaded. Everything in between happens in the replacement functions the
//! installer writes into the game.
//!
//! [`create_view_input_control`] is exported for the loader's
//! [`View3D`](crate::director::View3D) implementation; nothing in this crate
//! calls it.

mod entries;
mod native;
mod occupant_filter;

use std::{
    ffi::c_void,
    path::{Path, PathBuf},
    ptr,
};

use log::error;
use widestring::U16Str;
use winapi::{
    shared::minwindef::HMODULE,
    um::libloaderapi::{
        GetModuleFileNameW, GetModuleHandleExW, GET_MODULE_HANDLE_EX_FLAG_FROM_ADDRESS,
        GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT,
    },
};

pub use native::create_view_input_control;

use crate::{
    config::ExtensionConfig,
    hooks::{BulldozeHooks, SharedHooks},
    host::{HostAddress, ProcessMemory},
    logger,
    patch::{self, HookTargets, HostVersion},
};

/// Handlers behind the replacement functions.
pub(crate) static RUNTIME: SharedHooks = SharedHooks::new();

/// Addresses of the replacement functions.
fn targets() -> HookTargets {
    let address = |function: usize| HostAddress::new(function as u32);

    HookTargets {
        key_down: address(entries::on_key_down as usize),
        mouse_wheel: address(entries::on_mouse_wheel as usize),
        activate: address(entries::activate as usize),
        preview_demolish: address(entries::preview_demolish_region as usize),
        commit_demolish: address(entries::commit_demolish_region as usize),
    }
}

/// Path of a module loaded into the process, given an address inside it.
fn module_path(inside: *const c_void) -> Option<PathBuf> {
    let mut module: HMODULE = ptr::null_mut();
    // SAFETY: `inside` is an address in this module, `module` a valid out pointer
    let found = unsafe {
        GetModuleHandleExW(
            GET_MODULE_HANDLE_EX_FLAG_FROM_ADDRESS | GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT,
            inside.cast(),
            &mut module,
        )
    };
    if found == 0 {
        return None;
    }

    let mut buffer = vec![0u16; 1024];
    // SAFETY: the buffer length is passed along
    let len = unsafe { GetModuleFileNameW(module, buffer.as_mut_ptr(), buffer.len() as u32) } as usize;
    if len == 0 || len >= buffer.len() {
        return None;
    }

    Some(PathBuf::from(U16Str::from_slice(&buffer[..len]).to_os_string()))
}

/// Directory of the plugin, where the log file is written.
fn plugin_directory() -> PathBuf {
    module_path(BulldozeExtensionsInstall as *const c_void)
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Installs the extensions into the running game.
///
/// Opens the session log, detects the game build, and patches the five
/// interception points. Returns `true` only if every hook was installed; the
/// outcome is written to the log either way.
#[no_mangle]
pub extern "C" fn BulldozeExtensionsInstall() -> bool {
    let config = ExtensionConfig::default();
    if let Err(error) = logger::init(&config.log, &plugin_directory()) {
        eprintln!("SC4BulldozeExtensions: {error}");
    }

    let build = match std::env::current_exe()
        .map_err(crate::Error::from)
        .and_then(HostVersion::from_file)
    {
        Ok(version) => version.build,
        Err(error) => {
            error!("Cannot read the game version: {error}");
            0
        }
    };

    if let Err(error) = RUNTIME.replace(BulldozeHooks::new(config.clone())) {
        error!("{error}");
        return false;
    }

    // SAFETY: the hook addresses belong to build 641, which `install` checks
    let mut memory = unsafe { ProcessMemory::new() };
    patch::install(&mut memory, build, &config, &targets())
}

/// Forgets the active control before the city is unloaded.
#[no_mangle]
pub extern "C" fn BulldozeExtensionsShutdown() {
    RUNTIME.teardown();
}
