//! Device attach/detach tests

mod common;

use common::{button, key, record};
use keybinds::bind::{Bind, ControllerButton, ControllerDevice, Device, KeyboardDevice, Modifiers};
use keybinds::store::BindStore;
use keybinds::{BindManager, BindableAction, PressBindEvent};

/// Controller binds under a custom id
struct Gamepad;

impl Device for Gamepad {
    fn id(&self) -> &str {
        "gamepad"
    }

    fn load_bind(&self, data: &str) -> Option<Bind> {
        ControllerDevice.load_bind(data)
    }

    fn save_bind(&self, bind: &Bind) -> Option<String> {
        ControllerDevice.save_bind(bind)
    }
}

/// Keyboard device that writes payloads in a different format
struct LegacyKeyboard;

impl Device for LegacyKeyboard {
    fn id(&self) -> &str {
        "keyboard"
    }

    fn load_bind(&self, data: &str) -> Option<Bind> {
        KeyboardDevice.load_bind(data.strip_prefix("v1/")?)
    }

    fn save_bind(&self, bind: &Bind) -> Option<String> {
        KeyboardDevice.save_bind(bind).map(|p| format!("v1/{}", p))
    }
}

#[test]
fn test_detach_and_reattach_keyboard() {
    let ctrl_k = key('k', Modifiers::CONTROL);
    let mut manager = BindManager::new();
    manager.register_bindable(BindableAction::new("open", "").with_defaults([ctrl_k]), "");

    assert!(manager.detach_device("keyboard").is_some());
    assert!(!manager.has_device("keyboard"));
    assert!(manager.get_binds_for("open").is_empty());
    assert_eq!(manager.deviceless_binds("keyboard", "open"), ["1|75"]);

    manager.attach_device(Box::new(KeyboardDevice));
    assert_eq!(manager.get_binds_for("open"), vec![ctrl_k]);
    assert!(manager.deviceless_binds("keyboard", "open").is_empty());
}

#[test]
fn test_detach_shared_bind_keeps_every_action() {
    let space = key(' ', Modifiers::NONE);
    let mut manager = BindManager::new();
    manager.register_bindable(BindableAction::new("jump", "").with_defaults([space]), "");
    manager.register_bindable(BindableAction::new("confirm", "").with_defaults([space]), "");

    manager.detach_device("keyboard");
    assert!(!manager.is_bound(&space));
    assert_eq!(manager.deviceless_binds("keyboard", "jump"), ["0|32"]);
    assert_eq!(manager.deviceless_binds("keyboard", "confirm"), ["0|32"]);

    manager.attach_device(Box::new(KeyboardDevice));
    assert_eq!(manager.get_bindables_for(&space).len(), 2);
}

#[test]
fn test_detach_only_touches_that_device() {
    let mut manager = BindManager::new();
    manager.attach_device(Box::new(ControllerDevice));
    manager.register_bindable(
        BindableAction::new("jump", "")
            .with_defaults([key('w', Modifiers::NONE), button(ControllerButton::A)]),
        "",
    );

    manager.detach_device("controller");
    assert_eq!(manager.get_binds_for("jump"), vec![key('w', Modifiers::NONE)]);
    assert!(manager.detach_device("controller").is_none());
}

#[test]
fn test_attach_replaces_device_with_same_id() {
    let ctrl_k = key('k', Modifiers::CONTROL);
    let mut manager = BindManager::new();
    manager.register_bindable(BindableAction::new("open", "").with_defaults([ctrl_k]), "");

    // The old device encodes the pending data, the new one cannot read it
    manager.attach_device(Box::new(LegacyKeyboard));
    assert!(manager.get_binds_for("open").is_empty());
    assert!(manager.deviceless_binds("keyboard", "open").is_empty());

    manager.add_bind_to("open", ctrl_k);
    assert_eq!(manager.get_bind_save_string(&ctrl_k), "keyboard:v1/1|75");
}

#[test]
fn test_detached_device_stops_dispatch() {
    let space = key(' ', Modifiers::NONE);
    let mut manager = BindManager::new();
    manager.register_bindable(BindableAction::new("jump", "").with_defaults([space]), "");
    let log = record(&mut manager, "jump");

    manager.detach_device("keyboard");
    manager.post_press(&PressBindEvent::new(space, true));
    assert!(log.borrow().is_empty());

    manager.attach_device(Box::new(KeyboardDevice));
    manager.post_press(&PressBindEvent::new(space, true));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_reattach_keeps_bind_order_across_devices() {
    let w = key('w', Modifiers::NONE);
    let a = button(ControllerButton::A);
    let mut manager = BindManager::new();
    manager.attach_device(Box::new(ControllerDevice));
    manager.register_bindable(BindableAction::new("jump", "").with_defaults([w, a]), "");

    manager.detach_device("keyboard");
    assert_eq!(manager.get_binds_for("jump"), vec![a]);
    manager.attach_device(Box::new(KeyboardDevice));

    assert_eq!(manager.get_binds_for("jump"), vec![w, a]);
    assert!(manager.has_default_binds("jump"));
}

#[test]
fn test_custom_device_id_owns_its_binds() {
    let a = button(ControllerButton::A);
    let mut manager = BindManager::new();
    manager.attach_device(Box::new(Gamepad));
    manager.register_bindable(BindableAction::new("jump", "").with_defaults([a]), "");
    assert_eq!(manager.get_bind_save_string(&a), "gamepad:1000");

    assert!(manager.detach_device("gamepad").is_some());
    assert!(!manager.is_bound(&a));
    assert_eq!(manager.deviceless_binds("gamepad", "jump"), ["1000"]);
    assert!(manager.deviceless_binds("controller", "jump").is_empty());

    manager.attach_device(Box::new(Gamepad));
    assert_eq!(manager.get_binds_for("jump"), vec![a]);
    manager.save();
    assert_eq!(
        manager.store().get("jump").unwrap()["binds"],
        serde_json::json!(["gamepad:1000"])
    );
}
