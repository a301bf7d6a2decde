//! Core input types: Modifiers, KeyCode, ControllerButton
//!
//! Every key has a stable integer code. Keyboard keys follow the Windows
//! virtual-key layout; controller buttons live in their own range above
//! [`ControllerButton::FIRST`]. Codes are what gets persisted, so they must
//! never be renumbered.

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CONTROL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const COMMAND: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    const ALL_BITS: u8 = 0b1111;

    /// Create modifiers from individual flags
    pub const fn new(control: bool, shift: bool, alt: bool, command: bool) -> Self {
        let mut bits = 0u8;
        if control {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if command {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    /// Rebuild modifiers from a persisted bitmask. Unknown bits are dropped.
    pub const fn from_bits(bits: u32) -> Self {
        Modifiers((bits & Self::ALL_BITS as u32) as u8)
    }

    /// Raw bitmask, as written into save strings
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn control(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn command(self) -> bool {
        self.0 & 0b1000 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Get the platform-specific "command" modifier (Cmd on macOS, Ctrl elsewhere)
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::COMMAND
        } else {
            Modifiers::CONTROL
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Fixed display order: Ctrl, Cmd, Shift, Alt
impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.control() {
            parts.push("Ctrl");
        }
        if self.command() {
            parts.push("Cmd");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        write!(f, "{}", parts.join(" + "))
    }
}

/// A single button on a game controller
///
/// Any code in `FIRST..=LAST` is a valid button, including ones without a
/// name; those render as "Unk".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerButton(u16);

impl ControllerButton {
    pub const FIRST: i32 = 1000;
    pub const LAST: i32 = 1031;

    pub const A: ControllerButton = ControllerButton(1000);
    pub const B: ControllerButton = ControllerButton(1001);
    pub const X: ControllerButton = ControllerButton(1002);
    pub const Y: ControllerButton = ControllerButton(1003);
    pub const BACK: ControllerButton = ControllerButton(1004);
    pub const START: ControllerButton = ControllerButton(1005);
    pub const UP: ControllerButton = ControllerButton(1006);
    pub const DOWN: ControllerButton = ControllerButton(1007);
    pub const LEFT: ControllerButton = ControllerButton(1008);
    pub const RIGHT: ControllerButton = ControllerButton(1009);
    pub const LB: ControllerButton = ControllerButton(1010);
    pub const RB: ControllerButton = ControllerButton(1011);
    pub const LT: ControllerButton = ControllerButton(1012);
    pub const RT: ControllerButton = ControllerButton(1013);

    /// Returns None if the code is outside the controller range
    pub fn from_code(code: i32) -> Option<Self> {
        if (Self::FIRST..=Self::LAST).contains(&code) {
            Some(ControllerButton(code as u16))
        } else {
            None
        }
    }

    #[inline]
    pub const fn code(self) -> i32 {
        self.0 as i32
    }

    /// Short display name for named buttons
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::X => "X",
            Self::Y => "Y",
            Self::BACK => "Back",
            Self::START => "Start",
            Self::UP => "Up",
            Self::DOWN => "Down",
            Self::LEFT => "Left",
            Self::RIGHT => "Right",
            Self::LB => "LB",
            Self::RB => "RB",
            Self::LT => "LT",
            Self::RT => "RT",
            _ => return None,
        };
        Some(name)
    }

    /// Sprite asset the UI should draw for this button, if it has one
    pub fn sprite(self) -> Option<&'static str> {
        let sprite = match self {
            Self::A => "controller_btn_a.png",
            Self::B => "controller_btn_b.png",
            Self::X => "controller_btn_x.png",
            Self::Y => "controller_btn_y.png",
            Self::BACK => "controller_btn_back.png",
            Self::START => "controller_btn_start.png",
            Self::UP => "controller_btn_dpad_up.png",
            Self::DOWN => "controller_btn_dpad_down.png",
            Self::LEFT => "controller_btn_dpad_left.png",
            Self::RIGHT => "controller_btn_dpad_right.png",
            // Bumpers and triggers share the thumb art
            Self::LB | Self::LT => "controller_btn_lthumb.png",
            Self::RB | Self::RT => "controller_btn_rthumb.png",
            _ => return None,
        };
        Some(sprite)
    }
}

impl fmt::Display for ControllerButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name().unwrap_or("Unk"))
    }
}

/// A key code representing a physical key or controller button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// No key
    None,
    /// A key we have no code for
    Unknown,

    /// A character key (normalized to lowercase)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F24

    // Numpad (physical keys)
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadEnter,
    NumpadDecimal,

    // Modifier keys pressed on their own
    Shift,
    Control,
    Alt,
    Meta,

    /// A controller button sharing the key code space
    Controller(ControllerButton),
}

/// Character keys and their virtual-key codes
const CHAR_CODES: &[(char, i32)] = &[
    (';', 0xBA),
    ('=', 0xBB),
    (',', 0xBC),
    ('-', 0xBD),
    ('.', 0xBE),
    ('/', 0xBF),
    ('`', 0xC0),
    ('[', 0xDB),
    ('\\', 0xDC),
    (']', 0xDD),
    ('\'', 0xDE),
];

impl KeyCode {
    /// Stable integer code for this key. Characters without a code map to -1.
    pub fn code(self) -> i32 {
        match self {
            KeyCode::None => 0,
            KeyCode::Unknown => -1,
            KeyCode::Char(c) => char_code(c).unwrap_or(-1),
            KeyCode::Backspace => 0x08,
            KeyCode::Tab => 0x09,
            KeyCode::Enter => 0x0D,
            KeyCode::Shift => 0x10,
            KeyCode::Control => 0x11,
            KeyCode::Alt => 0x12,
            KeyCode::Escape => 0x1B,
            KeyCode::Space => 0x20,
            KeyCode::PageUp => 0x21,
            KeyCode::PageDown => 0x22,
            KeyCode::End => 0x23,
            KeyCode::Home => 0x24,
            KeyCode::Left => 0x25,
            KeyCode::Up => 0x26,
            KeyCode::Right => 0x27,
            KeyCode::Down => 0x28,
            KeyCode::Insert => 0x2D,
            KeyCode::Delete => 0x2E,
            KeyCode::Meta => 0x5B,
            KeyCode::Numpad0 => 0x60,
            KeyCode::Numpad1 => 0x61,
            KeyCode::Numpad2 => 0x62,
            KeyCode::Numpad3 => 0x63,
            KeyCode::Numpad4 => 0x64,
            KeyCode::Numpad5 => 0x65,
            KeyCode::Numpad6 => 0x66,
            KeyCode::Numpad7 => 0x67,
            KeyCode::Numpad8 => 0x68,
            KeyCode::Numpad9 => 0x69,
            KeyCode::NumpadMultiply => 0x6A,
            KeyCode::NumpadAdd => 0x6B,
            KeyCode::NumpadEnter => 0x6C,
            KeyCode::NumpadSubtract => 0x6D,
            KeyCode::NumpadDecimal => 0x6E,
            KeyCode::NumpadDivide => 0x6F,
            KeyCode::F(n) if (1..=24).contains(&n) => 0x70 + n as i32 - 1,
            KeyCode::F(_) => -1,
            KeyCode::Controller(button) => button.code(),
        }
    }

    /// Inverse of [`KeyCode::code`]. Codes outside the table become `Unknown`.
    pub fn from_code(code: i32) -> KeyCode {
        if let Some(button) = ControllerButton::from_code(code) {
            return KeyCode::Controller(button);
        }
        match code {
            0 => KeyCode::None,
            0x08 => KeyCode::Backspace,
            0x09 => KeyCode::Tab,
            0x0D => KeyCode::Enter,
            0x10 => KeyCode::Shift,
            0x11 => KeyCode::Control,
            0x12 => KeyCode::Alt,
            0x1B => KeyCode::Escape,
            0x20 => KeyCode::Space,
            0x21 => KeyCode::PageUp,
            0x22 => KeyCode::PageDown,
            0x23 => KeyCode::End,
            0x24 => KeyCode::Home,
            0x25 => KeyCode::Left,
            0x26 => KeyCode::Up,
            0x27 => KeyCode::Right,
            0x28 => KeyCode::Down,
            0x2D => KeyCode::Insert,
            0x2E => KeyCode::Delete,
            0x30..=0x39 => KeyCode::Char((b'0' + (code - 0x30) as u8) as char),
            0x41..=0x5A => KeyCode::Char((b'a' + (code - 0x41) as u8) as char),
            0x5B => KeyCode::Meta,
            0x60 => KeyCode::Numpad0,
            0x61 => KeyCode::Numpad1,
            0x62 => KeyCode::Numpad2,
            0x63 => KeyCode::Numpad3,
            0x64 => KeyCode::Numpad4,
            0x65 => KeyCode::Numpad5,
            0x66 => KeyCode::Numpad6,
            0x67 => KeyCode::Numpad7,
            0x68 => KeyCode::Numpad8,
            0x69 => KeyCode::Numpad9,
            0x6A => KeyCode::NumpadMultiply,
            0x6B => KeyCode::NumpadAdd,
            0x6C => KeyCode::NumpadEnter,
            0x6D => KeyCode::NumpadSubtract,
            0x6E => KeyCode::NumpadDecimal,
            0x6F => KeyCode::NumpadDivide,
            0x70..=0x87 => KeyCode::F((code - 0x70 + 1) as u8),
            _ => CHAR_CODES
                .iter()
                .find(|(_, c)| *c == code)
                .map(|(ch, _)| KeyCode::Char(*ch))
                .unwrap_or(KeyCode::Unknown),
        }
    }

    /// Shift, Control, Alt or Meta pressed on its own
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyCode::Shift | KeyCode::Control | KeyCode::Alt | KeyCode::Meta
        )
    }

    /// Whether this code belongs to the controller range
    pub fn is_controller(self) -> bool {
        matches!(self, KeyCode::Controller(_))
    }
}

fn char_code(c: char) -> Option<i32> {
    let c = c.to_ascii_lowercase();
    match c {
        ' ' => Some(0x20),
        'a'..='z' => Some(0x41 + (c as i32 - 'a' as i32)),
        '0'..='9' => Some(0x30 + (c as i32 - '0' as i32)),
        _ => CHAR_CODES
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, code)| *code),
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::None => Ok(()),
            KeyCode::Unknown => write!(f, "Unk"),
            KeyCode::Char('=') => write!(f, "Plus"),
            KeyCode::Char('-') => write!(f, "Minus"),
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Insert => write!(f, "Insert"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Numpad0 => write!(f, "Num0"),
            KeyCode::Numpad1 => write!(f, "Num1"),
            KeyCode::Numpad2 => write!(f, "Num2"),
            KeyCode::Numpad3 => write!(f, "Num3"),
            KeyCode::Numpad4 => write!(f, "Num4"),
            KeyCode::Numpad5 => write!(f, "Num5"),
            KeyCode::Numpad6 => write!(f, "Num6"),
            KeyCode::Numpad7 => write!(f, "Num7"),
            KeyCode::Numpad8 => write!(f, "Num8"),
            KeyCode::Numpad9 => write!(f, "Num9"),
            KeyCode::NumpadAdd => write!(f, "Num+"),
            KeyCode::NumpadSubtract => write!(f, "Num-"),
            KeyCode::NumpadMultiply => write!(f, "Mul"),
            KeyCode::NumpadDivide => write!(f, "Div"),
            KeyCode::NumpadEnter => write!(f, "NumEnter"),
            KeyCode::NumpadDecimal => write!(f, "Num."),
            KeyCode::Shift => write!(f, "Shift"),
            KeyCode::Control => write!(f, "Ctrl"),
            KeyCode::Alt => write!(f, "Alt"),
            KeyCode::Meta => write!(f, "Meta"),
            KeyCode::Controller(button) => write!(f, "{}", button),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.control());
        assert!(!mods.shift());
        assert!(!mods.alt());
        assert!(!mods.command());
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CONTROL | Modifiers::SHIFT;
        assert!(mods.control());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(!mods.command());
        assert_eq!(mods.bits(), 0b0011);
    }

    #[test]
    fn test_modifiers_from_bits_masks_unknown() {
        let mods = Modifiers::from_bits(0b1_0101);
        assert_eq!(mods, Modifiers::CONTROL | Modifiers::ALT);
    }

    #[test]
    fn test_modifiers_display_order() {
        let mods = Modifiers::ALT | Modifiers::SHIFT | Modifiers::COMMAND | Modifiers::CONTROL;
        assert_eq!(mods.to_string(), "Ctrl + Cmd + Shift + Alt");
    }

    #[test]
    fn test_key_codes_round_trip() {
        let keys = [
            KeyCode::Char('a'),
            KeyCode::Char('z'),
            KeyCode::Char('7'),
            KeyCode::Space,
            KeyCode::Char(';'),
            KeyCode::Enter,
            KeyCode::F(1),
            KeyCode::F(24),
            KeyCode::NumpadDivide,
            KeyCode::Meta,
            KeyCode::Controller(ControllerButton::START),
        ];
        for key in keys {
            assert_eq!(KeyCode::from_code(key.code()), key, "{:?}", key);
        }
    }

    #[test]
    fn test_space_char_is_space_key() {
        assert_eq!(KeyCode::from_code(KeyCode::Char(' ').code()), KeyCode::Space);
    }

    #[test]
    fn test_unmapped_char_is_unknown() {
        assert_eq!(KeyCode::Char('é').code(), -1);
        assert_eq!(KeyCode::from_code(-1), KeyCode::Unknown);
        assert_eq!(KeyCode::from_code(0x3A), KeyCode::Unknown);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::NumpadMultiply.to_string(), "Mul");
        assert_eq!(KeyCode::NumpadDivide.to_string(), "Div");
        assert_eq!(KeyCode::Char('=').to_string(), "Plus");
        assert_eq!(KeyCode::Char('-').to_string(), "Minus");
        assert_eq!(KeyCode::Unknown.to_string(), "Unk");
        assert_eq!(KeyCode::None.to_string(), "");
        assert_eq!(KeyCode::Char('c').to_string(), "C");
    }

    #[test]
    fn test_controller_range() {
        assert!(ControllerButton::from_code(ControllerButton::FIRST).is_some());
        assert!(ControllerButton::from_code(ControllerButton::LAST).is_some());
        assert!(ControllerButton::from_code(ControllerButton::LAST + 1).is_none());
        assert!(ControllerButton::from_code(0x41).is_none());
    }

    #[test]
    fn test_unnamed_controller_button() {
        let button = ControllerButton::from_code(1030).unwrap();
        assert_eq!(button.to_string(), "Unk");
        assert!(button.sprite().is_none());
    }

    #[test]
    fn test_is_modifier() {
        assert!(KeyCode::Shift.is_modifier());
        assert!(KeyCode::Meta.is_modifier());
        assert!(!KeyCode::Char('a').is_modifier());
    }

    #[test]
    fn test_is_controller() {
        assert!(KeyCode::Controller(ControllerButton::A).is_controller());
        assert!(KeyCode::from_code(1005).is_controller());
        assert!(!KeyCode::Char('a').is_controller());
        assert!(!KeyCode::from_code(0x41).is_controller());
    }
}
