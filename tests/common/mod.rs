//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use keybinds::bind::{Bind, ControllerButton, KeyCode, Modifiers};
use keybinds::events::{ListenerResult, TargetId};
use keybinds::store::BindStore;
use keybinds::BindManager;

pub const TARGET: TargetId = TargetId(1);

/// Invokes seen by a listener, as `(action id, down)`
pub type InvokeLog = Rc<RefCell<Vec<(String, bool)>>>;

/// Keyboard bind for a character key
pub fn key(c: char, mods: Modifiers) -> Bind {
    Bind::keyboard(KeyCode::Char(c), mods).unwrap()
}

/// Controller bind for a named button
pub fn button(button: ControllerButton) -> Bind {
    Bind::controller(button.code()).unwrap()
}

/// Record every invoke of `action` into a fresh log
pub fn record<S: BindStore>(manager: &mut BindManager<S>, action: &str) -> InvokeLog {
    let log: InvokeLog = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    manager.listen(TARGET, action, move |e| {
        sink.borrow_mut().push((e.id().to_string(), e.is_down()));
        ListenerResult::Propagate
    });
    log
}

/// Number of `down` invokes in `log`
pub fn downs(log: &InvokeLog) -> usize {
    log.borrow().iter().filter(|(_, down)| *down).count()
}
