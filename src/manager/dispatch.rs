//! Press dispatch, subscriptions and key repeat
//!
//! ```text
//! post_press(down) → press listeners → for each bound action:
//!     schedule repeat (delay) → InvokeBindEvent { down: true }
//! tick(dt) → entries at or past zero → InvokeBindEvent { down: true }, reset to rate
//! post_press(up) → unschedule → InvokeBindEvent { down: false }
//! ```

use crate::action::RepeatOptions;
use crate::events::{InvokeBindEvent, ListenerId, ListenerResult, PressBindEvent, TargetId};
use crate::store::BindStore;

use super::BindManager;

fn millis_to_secs(ms: u64) -> f32 {
    ms as f32 / 1000.0
}

impl<S: BindStore> BindManager<S> {
    /// Deliver a raw press or release.
    ///
    /// Press listeners see the event first. Unless one of them stops it,
    /// every action bound to the input is invoked in the order it was
    /// assigned, until an invoke listener returns [`ListenerResult::Stop`].
    pub fn post_press(&mut self, event: &PressBindEvent) -> ListenerResult {
        if self.press_listeners.post(event) == ListenerResult::Stop {
            return ListenerResult::Stop;
        }

        let Some(actions) = self.binds.get(event.bind()).cloned() else {
            return ListenerResult::Propagate;
        };
        for action in actions {
            if event.is_down() {
                if let Some(options) = self.get_repeat_options_for(&action) {
                    if options.enabled {
                        self.repeat(&action, options);
                    }
                }
            } else {
                self.unrepeat(&action);
            }

            let invoke = InvokeBindEvent::new(action, event.is_down());
            if self.invoke_listeners.post(&invoke) == ListenerResult::Stop {
                return ListenerResult::Stop;
            }
        }
        ListenerResult::Propagate
    }

    /// Subscribe to invokes of one action. Cancels running repeats.
    pub fn listen(
        &mut self,
        target: TargetId,
        action: impl Into<String>,
        callback: impl FnMut(&InvokeBindEvent) -> ListenerResult + 'static,
    ) -> ListenerId {
        self.stop_all_repeats();
        let action = action.into();
        self.invoke_listeners
            .add_filtered(target, move |event| event.id() == action, callback)
    }

    /// Subscribe to every raw press ahead of action dispatch, e.g. to
    /// capture the next input for rebinding. Cancels running repeats.
    pub fn listen_press(
        &mut self,
        target: TargetId,
        callback: impl FnMut(&PressBindEvent) -> ListenerResult + 'static,
    ) -> ListenerId {
        self.stop_all_repeats();
        self.press_listeners.add(target, callback)
    }

    /// Returns true if the listener existed
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.invoke_listeners.remove(id) || self.press_listeners.remove(id)
    }

    /// Drop every listener owned by `target`
    pub fn remove_target(&mut self, target: TargetId) {
        self.invoke_listeners.remove_target(target);
        self.press_listeners.remove_target(target);
    }

    // ------------------------------------------------------------------
    // Repeat
    // ------------------------------------------------------------------

    fn repeat(&mut self, action: &str, options: RepeatOptions) {
        self.unrepeat(action);
        self.repeating
            .push((action.to_string(), millis_to_secs(options.delay)));
        self.repeat_scheduled = true;
    }

    fn unrepeat(&mut self, action: &str) {
        self.repeating.retain(|(id, _)| id != action);
        if self.repeating.is_empty() {
            self.repeat_scheduled = false;
        }
    }

    /// Cancel every held repeat and disarm the tick
    pub fn stop_all_repeats(&mut self) {
        if self.repeat_scheduled {
            tracing::debug!("Stopping {} repeats", self.repeating.len());
        }
        self.repeating.clear();
        self.repeat_scheduled = false;
    }

    /// Whether the host should keep calling [`BindManager::tick`]
    pub fn is_repeating(&self) -> bool {
        self.repeat_scheduled
    }

    /// Advance repeat timers by `dt` seconds and fire the ones that elapsed
    pub fn tick(&mut self, dt: f32) {
        if !self.repeat_scheduled {
            return;
        }

        let mut fired = Vec::new();
        for (action, remaining) in &mut self.repeating {
            *remaining -= dt;
            if *remaining <= 0.0 {
                let rate = super::find_action(&self.actions, action)
                    .map_or(0, |data| data.repeat.rate);
                *remaining = millis_to_secs(rate);
                fired.push(action.clone());
            }
        }

        for action in fired {
            self.invoke_listeners
                .post(&InvokeBindEvent::new(action, true));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::action::BindableAction;
    use crate::bind::{Bind, KeyCode, Modifiers};
    use crate::events::{ListenerResult, PressBindEvent, TargetId};
    use crate::manager::BindManager;

    const TARGET: TargetId = TargetId(7);

    fn space() -> Bind {
        Bind::keyboard(KeyCode::Space, Modifiers::NONE).unwrap()
    }

    fn record(manager: &mut BindManager, action: &str) -> Rc<RefCell<Vec<(String, bool)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        manager.listen(TARGET, action, move |e| {
            sink.borrow_mut().push((e.id().to_string(), e.is_down()));
            ListenerResult::Propagate
        });
        log
    }

    #[test]
    fn test_down_and_up_invoke() {
        let mut manager = BindManager::new();
        manager.register_bindable(BindableAction::new("jump", "").with_defaults([space()]), "");
        let log = record(&mut manager, "jump");

        manager.post_press(&PressBindEvent::new(space(), true));
        assert!(manager.is_repeating());
        manager.post_press(&PressBindEvent::new(space(), false));
        assert!(!manager.is_repeating());

        assert_eq!(
            *log.borrow(),
            vec![("jump".to_string(), true), ("jump".to_string(), false)]
        );
    }

    #[test]
    fn test_unbound_press_propagates() {
        let mut manager = BindManager::new();
        let result = manager.post_press(&PressBindEvent::new(space(), true));
        assert_eq!(result, ListenerResult::Propagate);
        assert!(!manager.is_repeating());
    }

    #[test]
    fn test_non_repeatable_does_not_schedule() {
        let mut manager = BindManager::new();
        manager.register_bindable(
            BindableAction::new("save", "")
                .with_defaults([space()])
                .with_repeatable(false),
            "",
        );
        manager.post_press(&PressBindEvent::new(space(), true));
        assert!(!manager.is_repeating());
    }

    #[test]
    fn test_press_listener_stops_dispatch() {
        let mut manager = BindManager::new();
        manager.register_bindable(BindableAction::new("jump", "").with_defaults([space()]), "");
        let log = record(&mut manager, "jump");
        let captured = Rc::new(RefCell::new(None));
        let sink = captured.clone();
        manager.listen_press(TARGET, move |e| {
            *sink.borrow_mut() = Some(*e.bind());
            ListenerResult::Stop
        });

        let result = manager.post_press(&PressBindEvent::new(space(), true));
        assert_eq!(result, ListenerResult::Stop);
        assert_eq!(*captured.borrow(), Some(space()));
        assert!(log.borrow().is_empty());
        assert!(!manager.is_repeating());
    }

    #[test]
    fn test_remove_listener() {
        let mut manager = BindManager::new();
        let id = manager.listen_press(TARGET, |_| ListenerResult::Stop);
        assert!(manager.remove_listener(id));
        assert!(!manager.remove_listener(id));
    }

    #[test]
    fn test_mutation_cancels_repeat() {
        let mut manager = BindManager::new();
        manager.register_bindable(BindableAction::new("jump", "").with_defaults([space()]), "");
        manager.post_press(&PressBindEvent::new(space(), true));
        assert!(manager.is_repeating());

        manager.register_bindable(BindableAction::new("crouch", ""), "");
        assert!(!manager.is_repeating());
    }

    #[test]
    fn test_tick_without_repeats_is_noop() {
        let mut manager = BindManager::new();
        manager.register_bindable(BindableAction::new("jump", ""), "");
        let log = record(&mut manager, "jump");
        manager.tick(10.0);
        assert!(log.borrow().is_empty());
    }
}
