//! Physical input descriptors
//!
//! A [`Bind`] describes one physical input: a keyboard chord or a controller
//! button. Binds are plain values. Two binds built independently for the
//! same input compare equal and hash identically, so they can be used as
//! map keys without sharing.
//!
//! # Architecture
//!
//! ```text
//! host key event → Bind → BindManager::post_press() → InvokeBindEvent per action
//! persisted "<device>:<payload>" ⇄ Device::load_bind / Device::save_bind ⇄ Bind
//! ```

mod device;
mod parse;
mod types;
#[cfg(feature = "winit")]
mod winit_adapter;

use std::fmt;

pub use device::{ControllerDevice, Device, KeyboardDevice};
pub use parse::{parse_key_string, BindParseError};
pub use types::{ControllerButton, KeyCode, Modifiers};
#[cfg(feature = "winit")]
pub use winit_adapter::bind_from_winit;

/// Identifier of an input device family, e.g. "keyboard"
pub type DeviceId = String;

pub const KEYBOARD_DEVICE: &str = "keyboard";
pub const CONTROLLER_DEVICE: &str = "controller";

/// A key with a set of held modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keybind {
    key: KeyCode,
    mods: Modifiers,
}

impl Keybind {
    /// Returns None for `None`/`Unknown` keys, controller buttons, and
    /// characters that have no key code.
    pub fn new(key: KeyCode, mods: Modifiers) -> Option<Self> {
        let key = KeyCode::from_code(key.code());
        match key {
            KeyCode::None | KeyCode::Unknown | KeyCode::Controller(_) => None,
            _ => Some(Self { key, mods }),
        }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.mods
    }

    pub fn hash_code(&self) -> u64 {
        (self.key.code() as u32 as u64) | ((self.mods.bits() as u64) << 29)
    }
}

impl fmt::Display for Keybind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{} + {}", self.mods, self.key)
        }
    }
}

/// A single controller button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControllerBind {
    button: ControllerButton,
}

impl ControllerBind {
    /// Returns None if `code` is not a controller button
    pub fn new(code: i32) -> Option<Self> {
        ControllerButton::from_code(code).map(|button| Self { button })
    }

    pub fn button(&self) -> ControllerButton {
        self.button
    }

    pub fn hash_code(&self) -> u64 {
        self.button.code() as u64
    }
}

impl From<ControllerButton> for ControllerBind {
    fn from(button: ControllerButton) -> Self {
        Self { button }
    }
}

impl fmt::Display for ControllerBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.button)
    }
}

/// How a UI should draw a bind
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindLabel {
    /// Render the text with the label font
    Text(String),
    /// Render the named sprite asset
    Sprite(&'static str),
}

/// One physical input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bind {
    Keyboard(Keybind),
    Controller(ControllerBind),
}

impl Bind {
    /// Keyboard chord, or None if the key can't be bound
    pub fn keyboard(key: KeyCode, mods: Modifiers) -> Option<Bind> {
        Keybind::new(key, mods).map(Bind::Keyboard)
    }

    /// Controller button, or None if `code` is outside the controller range
    pub fn controller(code: i32) -> Option<Bind> {
        ControllerBind::new(code).map(Bind::Controller)
    }

    /// Device-specific hash. Distinct inputs of one device hash distinctly.
    pub fn hash_code(&self) -> u64 {
        match self {
            Bind::Keyboard(k) => k.hash_code(),
            Bind::Controller(c) => c.hash_code(),
        }
    }

    pub fn device_id(&self) -> &'static str {
        match self {
            Bind::Keyboard(_) => KEYBOARD_DEVICE,
            Bind::Controller(_) => CONTROLLER_DEVICE,
        }
    }

    /// Canonical save payload, without the device prefix
    pub fn payload(&self) -> String {
        match self {
            Bind::Keyboard(k) => format!("{}|{}", k.mods.bits(), k.key.code()),
            Bind::Controller(c) => c.button.code().to_string(),
        }
    }

    pub fn label(&self) -> BindLabel {
        match self {
            Bind::Keyboard(k) => BindLabel::Text(k.to_string()),
            Bind::Controller(c) => match c.button.sprite() {
                Some(sprite) => BindLabel::Sprite(sprite),
                None => BindLabel::Text("Unk".to_string()),
            },
        }
    }
}

impl fmt::Display for Bind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bind::Keyboard(k) => fmt::Display::fmt(k, f),
            Bind::Controller(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl From<Keybind> for Bind {
    fn from(bind: Keybind) -> Self {
        Bind::Keyboard(bind)
    }
}

impl From<ControllerBind> for Bind {
    fn from(bind: ControllerBind) -> Self {
        Bind::Controller(bind)
    }
}
