//! Host services the director depends on.

use crate::director::ResourceKey;

/// Subscription side of the host notification bus.
pub trait MessageServer {
    /// Subscribes the director to `message_id`.
    fn add_notification(&mut self, message_id: u32) -> bool;

    /// Unsubscribes the director from `message_id`.
    fn remove_notification(&mut self, message_id: u32) -> bool;
}

/// The 3D city view, the owner of the active input control.
pub trait View3D {
    /// Id of the active input control, if there is one.
    fn current_control_id(&self) -> Option<u32>;

    /// Creates a bulldoze control with `cursor_id` and makes it the only
    /// active control.
    fn activate_bulldoze_control(&mut self, cursor_id: u32) -> bool;
}

/// Application-level services reached through the host framework.
pub trait HostServices: MessageServer {
    /// The host's 3D view handle.
    type View: View3D;

    /// Looks up the 3D city view below the application window.
    fn find_view_3d(&mut self) -> Option<Self::View>;

    /// Whether the loaded city is established, or `None` without a city.
    fn city_established(&self) -> Option<bool>;

    /// Loads the accelerator resource `key` and registers its bindings with
    /// `view`.
    fn register_accelerators(&mut self, key: ResourceKey, view: &mut Self::View) -> bool;
}
