//! The notification-driven director.

use log::debug;

use crate::{
    director::{HostServices, Message, MessageServer, View3D, DIRECTOR_ID, SHORTCUT_ACCELERATORS},
    host::addresses::BULLDOZE_CONTROL_ID,
    mode::{BulldozeCursor, CursorSet},
};

/// Routes host lifecycle notifications and shortcut commands.
///
/// The director holds the 3D view between post-city-init and
/// pre-city-shutdown. Shortcuts are only registered once the city is
/// established; a city that is not yet established defers registration to the
/// one-shot city-established notification.
///
/// # Example
///
/// ```rust,ignore
/// let mut director = BulldozeDirector::new(CursorSet::default());
/// director.post_app_init(&mut host, installed);
///
/// // later, from the host's message pump
/// director.do_message(&mut host, message_id);
/// ```
#[derive(Debug)]
pub struct BulldozeDirector<V: View3D> {
    cursors: CursorSet,
    view: Option<V>,
}

impl<V: View3D> BulldozeDirector<V> {
    /// Creates a director with no view.
    #[must_use]
    pub fn new(cursors: CursorSet) -> Self {
        BulldozeDirector {
            cursors,
            view: None,
        }
    }

    /// Id of the director on the host bus.
    #[must_use]
    pub const fn director_id(&self) -> u32 {
        DIRECTOR_ID
    }

    /// The 3D view, while a city is loaded.
    #[must_use]
    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    /// After application start: subscribes to the city lifecycle, but only if
    /// the hooks were installed. Always succeeds.
    pub fn post_app_init<S: MessageServer>(&mut self, server: &mut S, installed: bool) -> bool {
        if installed {
            server.add_notification(Message::PostCityInit.id());
            server.add_notification(Message::PreCityShutdown.id());
        }
        true
    }

    /// Dispatches one notification. Unknown ids are ignored.
    pub fn do_message<S: HostServices<View = V>>(&mut self, host: &mut S, message_id: u32) -> bool {
        let Some(message) = Message::from_repr(message_id) else {
            return true;
        };

        match message {
            Message::PostCityInit => self.post_city_init(host),
            Message::PreCityShutdown => self.pre_city_shutdown(host),
            Message::CityEstablished => self.city_established(host),
            shortcut => {
                if let Some(cursor) = shortcut.shortcut_cursor() {
                    self.activate_tool(cursor);
                }
            }
        }
        true
    }

    /// Finds the 3D view and registers the shortcuts, deferring registration
    /// until the city is established.
    pub fn post_city_init<S: HostServices<View = V>>(&mut self, host: &mut S) {
        let Some(view) = host.find_view_3d() else {
            debug!("No 3D view after city init");
            return;
        };
        self.view = Some(view);

        match host.city_established() {
            Some(true) => self.register_shortcuts(host),
            Some(false) => {
                host.add_notification(Message::CityEstablished.id());
            }
            None => {}
        }
    }

    /// Registers the deferred shortcuts and drops the one-shot subscription.
    pub fn city_established<S: HostServices<View = V>>(&mut self, host: &mut S) {
        self.register_shortcuts(host);
        host.remove_notification(Message::CityEstablished.id());
    }

    /// Unsubscribes the shortcuts and releases the view.
    pub fn pre_city_shutdown<S: MessageServer>(&mut self, server: &mut S) {
        for shortcut in Message::SHORTCUTS {
            server.remove_notification(shortcut.id());
        }
        self.view = None;
    }

    /// Makes a bulldoze control with `cursor` the active control, unless the
    /// bulldoze tool is active already.
    pub fn activate_tool(&mut self, cursor: BulldozeCursor) {
        let Some(view) = self.view.as_mut() else {
            return;
        };

        if view.current_control_id() == Some(BULLDOZE_CONTROL_ID) {
            return;
        }

        if !view.activate_bulldoze_control(self.cursors.id(cursor)) {
            debug!("Could not activate the bulldoze tool with the {cursor} cursor");
        }
    }

    fn register_shortcuts<S: HostServices<View = V>>(&mut self, host: &mut S) {
        let Some(view) = self.view.as_mut() else {
            return;
        };

        if !host.register_accelerators(SHORTCUT_ACCELERATORS, view) {
            debug!("The shortcut accelerator resource is missing");
            return;
        }

        for shortcut in Message::SHORTCUTS {
            host.add_notification(shortcut.id());
        }
    }
}
