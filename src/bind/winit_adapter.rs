//! Adapter to convert winit key events into keyboard binds

use winit::keyboard::{Key, KeyCode as WinitKeyCode, NamedKey, PhysicalKey};

use super::{Bind, KeyCode, Modifiers};

/// Convert winit key event data to a keyboard Bind
///
/// Numpad keys are taken from the physical key so they stay distinct from
/// the digit row. Returns None if the key cannot be mapped or bound.
pub fn bind_from_winit(
    logical_key: &Key,
    physical_key: PhysicalKey,
    ctrl: bool,
    shift: bool,
    alt: bool,
    logo: bool, // logo = command on macOS, Win elsewhere
) -> Option<Bind> {
    let mods = Modifiers::new(ctrl, shift, alt, logo);

    let key_code = numpad_from_physical(physical_key).or_else(|| match logical_key {
        Key::Named(named) => match named {
            NamedKey::Enter => Some(KeyCode::Enter),
            NamedKey::Escape => Some(KeyCode::Escape),
            NamedKey::Tab => Some(KeyCode::Tab),
            NamedKey::Backspace => Some(KeyCode::Backspace),
            NamedKey::Delete => Some(KeyCode::Delete),
            NamedKey::Space => Some(KeyCode::Space),

            // Arrows
            NamedKey::ArrowUp => Some(KeyCode::Up),
            NamedKey::ArrowDown => Some(KeyCode::Down),
            NamedKey::ArrowLeft => Some(KeyCode::Left),
            NamedKey::ArrowRight => Some(KeyCode::Right),

            // Navigation
            NamedKey::Home => Some(KeyCode::Home),
            NamedKey::End => Some(KeyCode::End),
            NamedKey::PageUp => Some(KeyCode::PageUp),
            NamedKey::PageDown => Some(KeyCode::PageDown),
            NamedKey::Insert => Some(KeyCode::Insert),

            // Modifiers pressed on their own
            NamedKey::Shift => Some(KeyCode::Shift),
            NamedKey::Control => Some(KeyCode::Control),
            NamedKey::Alt => Some(KeyCode::Alt),
            NamedKey::Super | NamedKey::Meta => Some(KeyCode::Meta),

            // Function keys
            NamedKey::F1 => Some(KeyCode::F(1)),
            NamedKey::F2 => Some(KeyCode::F(2)),
            NamedKey::F3 => Some(KeyCode::F(3)),
            NamedKey::F4 => Some(KeyCode::F(4)),
            NamedKey::F5 => Some(KeyCode::F(5)),
            NamedKey::F6 => Some(KeyCode::F(6)),
            NamedKey::F7 => Some(KeyCode::F(7)),
            NamedKey::F8 => Some(KeyCode::F(8)),
            NamedKey::F9 => Some(KeyCode::F(9)),
            NamedKey::F10 => Some(KeyCode::F(10)),
            NamedKey::F11 => Some(KeyCode::F(11)),
            NamedKey::F12 => Some(KeyCode::F(12)),

            _ => None,
        },

        // Character keys - normalize to lowercase
        Key::Character(s) => {
            let c = s.chars().next()?;
            Some(KeyCode::Char(c.to_ascii_lowercase()))
        }

        _ => None,
    })?;

    Bind::keyboard(key_code, mods)
}

fn numpad_from_physical(physical_key: PhysicalKey) -> Option<KeyCode> {
    match physical_key {
        PhysicalKey::Code(code) => match code {
            WinitKeyCode::Numpad0 => Some(KeyCode::Numpad0),
            WinitKeyCode::Numpad1 => Some(KeyCode::Numpad1),
            WinitKeyCode::Numpad2 => Some(KeyCode::Numpad2),
            WinitKeyCode::Numpad3 => Some(KeyCode::Numpad3),
            WinitKeyCode::Numpad4 => Some(KeyCode::Numpad4),
            WinitKeyCode::Numpad5 => Some(KeyCode::Numpad5),
            WinitKeyCode::Numpad6 => Some(KeyCode::Numpad6),
            WinitKeyCode::Numpad7 => Some(KeyCode::Numpad7),
            WinitKeyCode::Numpad8 => Some(KeyCode::Numpad8),
            WinitKeyCode::Numpad9 => Some(KeyCode::Numpad9),
            WinitKeyCode::NumpadAdd => Some(KeyCode::NumpadAdd),
            WinitKeyCode::NumpadSubtract => Some(KeyCode::NumpadSubtract),
            WinitKeyCode::NumpadMultiply => Some(KeyCode::NumpadMultiply),
            WinitKeyCode::NumpadDivide => Some(KeyCode::NumpadDivide),
            WinitKeyCode::NumpadEnter => Some(KeyCode::NumpadEnter),
            WinitKeyCode::NumpadDecimal => Some(KeyCode::NumpadDecimal),
            _ => None,
        },
        PhysicalKey::Unidentified(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_key() {
        let bind = bind_from_winit(
            &Key::Character("s".into()),
            PhysicalKey::Code(WinitKeyCode::KeyS),
            true,
            false,
            false,
            false,
        );

        let bind = bind.expect("should map");
        assert_eq!(
            bind,
            Bind::keyboard(KeyCode::Char('s'), Modifiers::CONTROL).unwrap()
        );
    }

    #[test]
    fn test_uppercase_normalized() {
        let bind = bind_from_winit(
            &Key::Character("S".into()),
            PhysicalKey::Code(WinitKeyCode::KeyS),
            false,
            true, // shift
            false,
            false,
        );

        assert_eq!(
            bind,
            Bind::keyboard(KeyCode::Char('s'), Modifiers::SHIFT)
        );
    }

    #[test]
    fn test_numpad_prefers_physical() {
        let bind = bind_from_winit(
            &Key::Character("1".into()),
            PhysicalKey::Code(WinitKeyCode::Numpad1),
            false,
            false,
            false,
            false,
        );

        assert_eq!(bind, Bind::keyboard(KeyCode::Numpad1, Modifiers::NONE));
    }

    #[test]
    fn test_modifier_key_alone() {
        let bind = bind_from_winit(
            &Key::Named(NamedKey::Shift),
            PhysicalKey::Code(WinitKeyCode::ShiftLeft),
            false,
            true,
            false,
            false,
        );

        let Some(Bind::Keyboard(bind)) = bind else {
            panic!("expected keyboard bind");
        };
        assert!(bind.key().is_modifier());
    }

    #[test]
    fn test_unmapped_key() {
        let bind = bind_from_winit(
            &Key::Named(NamedKey::MediaPlayPause),
            PhysicalKey::Code(WinitKeyCode::MediaPlayPause),
            false,
            false,
            false,
            false,
        );
        assert!(bind.is_none());
    }
}
