//! Device handlers: decode and encode the binds of one input family
//!
//! A device is registered with the manager under its id. Persisted binds
//! are stored as `"<device id>:<payload>"`; the payload format belongs to
//! the device.

use super::{Bind, ControllerBind, Keybind, KeyCode, Modifiers, CONTROLLER_DEVICE, KEYBOARD_DEVICE};

/// Codec for one family of binds
///
/// A live bind belongs to the attached device whose `save_bind` encodes it:
/// detaching that device parks the bind under the device's id, and save
/// strings use that id. The id is free-form, so a custom gamepad device may
/// claim controller binds under an id other than `"controller"`.
pub trait Device {
    /// Stable identifier, also the prefix of persisted bind strings
    fn id(&self) -> &str;

    /// Parse a persisted payload. Malformed or unsupported data yields None.
    fn load_bind(&self, data: &str) -> Option<Bind>;

    /// Encode a bind this device produced. Binds of other devices yield None.
    fn save_bind(&self, bind: &Bind) -> Option<String>;
}

/// Keyboard chords, payload `"<modifier bits>|<key code>"`
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardDevice;

impl Device for KeyboardDevice {
    fn id(&self) -> &str {
        KEYBOARD_DEVICE
    }

    fn load_bind(&self, data: &str) -> Option<Bind> {
        let (mods, key) = data.split_once('|')?;
        let mods: u32 = mods.trim().parse().ok()?;
        let key: i32 = key.trim().parse().ok()?;
        Keybind::new(KeyCode::from_code(key), Modifiers::from_bits(mods)).map(Bind::Keyboard)
    }

    fn save_bind(&self, bind: &Bind) -> Option<String> {
        match bind {
            Bind::Keyboard(_) => Some(bind.payload()),
            _ => None,
        }
    }
}

/// Controller buttons, payload `"<button code>"`
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerDevice;

impl Device for ControllerDevice {
    fn id(&self) -> &str {
        CONTROLLER_DEVICE
    }

    fn load_bind(&self, data: &str) -> Option<Bind> {
        let code: i32 = data.trim().parse().ok()?;
        ControllerBind::new(code).map(Bind::Controller)
    }

    fn save_bind(&self, bind: &Bind) -> Option<String> {
        match bind {
            Bind::Controller(_) => Some(bind.payload()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::ControllerButton;

    #[test]
    fn test_keyboard_round_trip_all_modifier_sets() {
        let device = KeyboardDevice;
        let keys = [
            KeyCode::Char('a'),
            KeyCode::Char('0'),
            KeyCode::Char('/'),
            KeyCode::Space,
            KeyCode::F(12),
            KeyCode::NumpadEnter,
            KeyCode::Shift,
        ];
        for key in keys {
            for bits in 0..16 {
                let bind = Bind::keyboard(key, Modifiers::from_bits(bits)).unwrap();
                let data = device.save_bind(&bind).unwrap();
                let loaded = device.load_bind(&data).unwrap();
                assert_eq!(loaded, bind);
                assert_eq!(loaded.hash_code(), bind.hash_code());
                assert_eq!(loaded.to_string(), bind.to_string());
            }
        }
    }

    #[test]
    fn test_controller_round_trip() {
        let device = ControllerDevice;
        for code in ControllerButton::FIRST..=ControllerButton::LAST {
            let bind = Bind::controller(code).unwrap();
            let loaded = device.load_bind(&device.save_bind(&bind).unwrap()).unwrap();
            assert_eq!(loaded, bind);
            assert_eq!(loaded.to_string(), bind.to_string());
        }
    }

    #[test]
    fn test_keyboard_rejects_malformed() {
        let device = KeyboardDevice;
        assert!(device.load_bind("").is_none());
        assert!(device.load_bind("1").is_none());
        assert!(device.load_bind("1;83").is_none());
        assert!(device.load_bind("x|83").is_none());
        assert!(device.load_bind("1|").is_none());
        assert!(device.load_bind("0|0").is_none());
        assert!(device.load_bind("0|1000").is_none());
    }

    #[test]
    fn test_controller_rejects_malformed() {
        let device = ControllerDevice;
        assert!(device.load_bind("").is_none());
        assert!(device.load_bind("A").is_none());
        assert!(device.load_bind("65").is_none());
    }

    #[test]
    fn test_save_rejects_foreign_binds() {
        let key = Bind::keyboard(KeyCode::Char('a'), Modifiers::NONE).unwrap();
        let button = Bind::controller(ControllerButton::A.code()).unwrap();
        assert!(ControllerDevice.save_bind(&key).is_none());
        assert!(KeyboardDevice.save_bind(&button).is_none());
    }
}
