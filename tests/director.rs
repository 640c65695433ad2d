//! Director lifecycle against an in-memory host.

use std::collections::BTreeSet;

use bulldoze_extensions::{
    director::{
        BulldozeDirector, HostServices, Message, MessageServer, ResourceKey, View3D,
        SHORTCUT_ACCELERATORS,
    },
    host::addresses::BULLDOZE_CONTROL_ID,
    mode::CursorSet,
};

#[derive(Debug, Default)]
struct FakeView {
    current: Option<u32>,
    activated: Vec<u32>,
    accelerators: Vec<ResourceKey>,
}

impl View3D for FakeView {
    fn current_control_id(&self) -> Option<u32> {
        self.current
    }

    fn activate_bulldoze_control(&mut self, cursor_id: u32) -> bool {
        self.activated.push(cursor_id);
        self.current = Some(BULLDOZE_CONTROL_ID);
        true
    }
}

#[derive(Debug)]
struct FakeHost {
    subscribed: BTreeSet<u32>,
    has_view: bool,
    established: Option<bool>,
    has_accelerators: bool,
}

impl FakeHost {
    fn new(established: Option<bool>) -> Self {
        FakeHost {
            subscribed: BTreeSet::new(),
            has_view: true,
            established,
            has_accelerators: true,
        }
    }

    fn subscribed_to(&self, message: Message) -> bool {
        self.subscribed.contains(&message.id())
    }

    fn shortcuts_subscribed(&self) -> usize {
        Message::SHORTCUTS
            .iter()
            .filter(|shortcut| self.subscribed_to(**shortcut))
            .count()
    }
}

impl MessageServer for FakeHost {
    fn add_notification(&mut self, message_id: u32) -> bool {
        self.subscribed.insert(message_id)
    }

    fn remove_notification(&mut self, message_id: u32) -> bool {
        self.subscribed.remove(&message_id)
    }
}

impl HostServices for FakeHost {
    type View = FakeView;

    fn find_view_3d(&mut self) -> Option<FakeView> {
        self.has_view.then(FakeView::default)
    }

    fn city_established(&self) -> Option<bool> {
        self.established
    }

    fn register_accelerators(&mut self, key: ResourceKey, view: &mut FakeView) -> bool {
        if self.has_accelerators {
            view.accelerators.push(key);
        }
        self.has_accelerators
    }
}

fn started(host: &mut FakeHost) -> BulldozeDirector<FakeView> {
    let mut director = BulldozeDirector::new(CursorSet::default());
    assert!(director.post_app_init(host, true));
    director
}

#[test]
fn test_app_init_subscribes_only_when_installed() {
    let mut host = FakeHost::new(Some(true));
    let mut director = BulldozeDirector::<FakeView>::new(CursorSet::default());

    assert!(director.post_app_init(&mut host, false));
    assert!(host.subscribed.is_empty());

    assert!(director.post_app_init(&mut host, true));
    assert!(host.subscribed_to(Message::PostCityInit));
    assert!(host.subscribed_to(Message::PreCityShutdown));
    assert_eq!(host.subscribed.len(), 2);
}

#[test]
fn test_established_city_registers_shortcuts_at_once() {
    let mut host = FakeHost::new(Some(true));
    let mut director = started(&mut host);

    assert!(director.do_message(&mut host, Message::PostCityInit.id()));

    assert_eq!(host.shortcuts_subscribed(), Message::SHORTCUTS.len());
    assert!(!host.subscribed_to(Message::CityEstablished));
    assert_eq!(
        director.view().map(|view| view.accelerators.clone()),
        Some(vec![SHORTCUT_ACCELERATORS])
    );
}

#[test]
fn test_new_city_defers_shortcuts_until_established() {
    let mut host = FakeHost::new(Some(false));
    let mut director = started(&mut host);

    director.do_message(&mut host, Message::PostCityInit.id());
    assert_eq!(host.shortcuts_subscribed(), 0);
    assert!(host.subscribed_to(Message::CityEstablished));

    director.do_message(&mut host, Message::CityEstablished.id());
    assert_eq!(host.shortcuts_subscribed(), Message::SHORTCUTS.len());
    assert!(!host.subscribed_to(Message::CityEstablished));
}

#[test]
fn test_missing_accelerators_leave_shortcuts_unsubscribed() {
    let mut host = FakeHost::new(Some(true));
    host.has_accelerators = false;
    let mut director = started(&mut host);

    director.do_message(&mut host, Message::PostCityInit.id());
    assert_eq!(host.shortcuts_subscribed(), 0);
    assert!(director.view().is_some());
}

#[test]
fn test_missing_view_does_nothing() {
    let mut host = FakeHost::new(Some(true));
    host.has_view = false;
    let mut director = started(&mut host);

    director.do_message(&mut host, Message::PostCityInit.id());
    assert!(director.view().is_none());
    assert_eq!(host.shortcuts_subscribed(), 0);

    director.do_message(&mut host, Message::FloraShortcut.id());
    assert!(director.view().is_none());
}

#[test]
fn test_shortcut_activates_tool_with_cursor() {
    let cursors = CursorSet::default();
    let mut host = FakeHost::new(Some(true));
    let mut director = started(&mut host);
    director.do_message(&mut host, Message::PostCityInit.id());

    director.do_message(&mut host, Message::NetworkDiagonalShortcut.id());
    assert_eq!(
        director.view().map(|view| view.activated.clone()),
        Some(vec![cursors.network_diagonal])
    );
}

#[test]
fn test_shortcut_skipped_while_bulldoze_tool_is_active() {
    let mut host = FakeHost::new(Some(true));
    let mut director = started(&mut host);
    director.do_message(&mut host, Message::PostCityInit.id());

    director.do_message(&mut host, Message::FloraShortcut.id());
    director.do_message(&mut host, Message::DiagonalShortcut.id());

    let activated = director.view().map(|view| view.activated.len());
    assert_eq!(activated, Some(1));
}

#[test]
fn test_unknown_message_is_ignored() {
    let mut host = FakeHost::new(Some(true));
    let mut director = started(&mut host);

    assert!(director.do_message(&mut host, 0x1234_5678));
    assert_eq!(host.subscribed.len(), 2);
    assert!(director.view().is_none());
}

#[test]
fn test_shutdown_unsubscribes_and_releases_view() {
    let mut host = FakeHost::new(Some(true));
    let mut director = started(&mut host);
    director.do_message(&mut host, Message::PostCityInit.id());
    assert_eq!(host.shortcuts_subscribed(), Message::SHORTCUTS.len());

    director.do_message(&mut host, Message::PreCityShutdown.id());
    assert_eq!(host.shortcuts_subscribed(), 0);
    assert!(director.view().is_none());
    assert!(host.subscribed_to(Message::PostCityInit));

    director.do_message(&mut host, Message::DiagonalShortcut.id());
    assert!(director.view().is_none());
}
