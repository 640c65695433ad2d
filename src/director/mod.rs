//! Host lifecycle and shortcut routing.
//!
//! The host announces application start, city load, city establishment and
//! city shutdown as notifications; keyboard shortcuts arrive the same way once
//! their accelerator resource is registered with the 3D view. The
//! [`BulldozeDirector`] reacts to them through the [`HostServices`],
//! [`MessageServer`] and [`View3D`] traits.
//!
//! The crate implements none of the three traits. The plugin loader that owns
//! the host framework implements them: it forwards notifications to
//! [`BulldozeDirector::do_message`] and backs
//! [`View3D::activate_bulldoze_control`] with `create_view_input_control`
//! from the Windows runtime.

mod dispatch;
mod messages;
mod services;

pub use dispatch::BulldozeDirector;
pub use messages::{
    Message, ResourceKey, DIRECTOR_ID, IID_VIEW_3D, SHORTCUT_ACCELERATORS, WINDOW_SC4_APP,
    WINDOW_VIEW_3D,
};
pub use services::{HostServices, MessageServer, View3D};
