//! Keybinds - rebindable input actions
//!
//! Feature code declares [`BindableAction`]s with default binds; the host
//! feeds raw presses into a [`BindManager`], which maps them to the actions
//! currently bound and notifies subscribers. Bindings are user-editable and
//! persisted per action through a [`BindStore`].

pub mod action;
pub mod bind;
pub mod category;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod events;
pub mod manager;
pub mod store;
pub mod tracing;

// Re-export commonly used types
pub use action::{ActionId, BindableAction, RepeatOptions};
pub use bind::{Bind, ControllerButton, Device, KeyCode, Modifiers};
pub use category::Category;
pub use config::InputConfig;
pub use events::{InvokeBindEvent, ListenerId, ListenerResult, PressBindEvent, TargetId};
pub use manager::BindManager;
pub use store::{BindStore, JsonFileStore, MemoryStore};
