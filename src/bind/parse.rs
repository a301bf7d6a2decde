//! Human-readable bind strings
//!
//! Parses strings like "ctrl+shift+s" or "controller+a" into binds. Used for
//! declaring defaults and by the command line tool.

use super::{Bind, ControllerButton, KeyCode, Modifiers};

/// Parse a key string like "cmd+shift+s" into a Bind
pub fn parse_key_string(key_str: &str) -> Result<Bind, BindParseError> {
    let parts: Vec<&str> = key_str.split('+').map(str::trim).collect();

    if parts.iter().any(|p| p.is_empty()) {
        return Err(BindParseError::InvalidKey(key_str.to_string()));
    }

    if let Some(button) = parts
        .first()
        .filter(|p| p.eq_ignore_ascii_case("controller") || p.eq_ignore_ascii_case("pad"))
    {
        let [_, name] = parts.as_slice() else {
            return Err(BindParseError::InvalidKey(format!(
                "Expected a single button after {}: {}",
                button, key_str
            )));
        };
        let button = parse_button(&name.to_lowercase())?;
        return Ok(Bind::Controller(button.into()));
    }

    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in parts {
        let part_lower = part.to_lowercase();
        match part_lower.as_str() {
            "cmd" => {
                // Platform command key
                mods |= Modifiers::cmd();
            }
            "ctrl" | "control" => {
                mods |= Modifiers::CONTROL;
            }
            "shift" => {
                mods |= Modifiers::SHIFT;
            }
            "alt" | "option" | "opt" => {
                mods |= Modifiers::ALT;
            }
            "meta" | "super" | "win" | "command" => {
                mods |= Modifiers::COMMAND;
            }
            _ => {
                if key_part.is_some() {
                    return Err(BindParseError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| BindParseError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Bind::keyboard(key, mods).ok_or_else(|| BindParseError::Unbindable(key_str.to_string()))
}

/// Parse a key code from string
fn parse_key_code(key: &str) -> Result<KeyCode, BindParseError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),
        "plus" => Ok(KeyCode::Char('=')),
        "minus" => Ok(KeyCode::Char('-')),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),
        "insert" | "ins" => Ok(KeyCode::Insert),

        "numpad0" | "num0" => Ok(KeyCode::Numpad0),
        "numpad1" | "num1" => Ok(KeyCode::Numpad1),
        "numpad2" | "num2" => Ok(KeyCode::Numpad2),
        "numpad3" | "num3" => Ok(KeyCode::Numpad3),
        "numpad4" | "num4" => Ok(KeyCode::Numpad4),
        "numpad5" | "num5" => Ok(KeyCode::Numpad5),
        "numpad6" | "num6" => Ok(KeyCode::Numpad6),
        "numpad7" | "num7" => Ok(KeyCode::Numpad7),
        "numpad8" | "num8" => Ok(KeyCode::Numpad8),
        "numpad9" | "num9" => Ok(KeyCode::Numpad9),
        "numpad_add" | "numadd" | "numplus" => Ok(KeyCode::NumpadAdd),
        "numpad_subtract" | "numsub" | "numminus" => Ok(KeyCode::NumpadSubtract),
        "numpad_multiply" | "nummul" | "mul" => Ok(KeyCode::NumpadMultiply),
        "numpad_divide" | "numdiv" | "div" => Ok(KeyCode::NumpadDivide),
        "numpad_enter" | "numenter" => Ok(KeyCode::NumpadEnter),
        "numpad_decimal" | "numdot" => Ok(KeyCode::NumpadDecimal),

        _ => {
            // Function keys: f1..f24
            if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=24).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
            Err(BindParseError::InvalidKey(format!("Unknown key: {}", key)))
        }
    }
}

fn parse_button(name: &str) -> Result<ControllerButton, BindParseError> {
    match name {
        "a" => Ok(ControllerButton::A),
        "b" => Ok(ControllerButton::B),
        "x" => Ok(ControllerButton::X),
        "y" => Ok(ControllerButton::Y),
        "back" | "select" => Ok(ControllerButton::BACK),
        "start" => Ok(ControllerButton::START),
        "up" => Ok(ControllerButton::UP),
        "down" => Ok(ControllerButton::DOWN),
        "left" => Ok(ControllerButton::LEFT),
        "right" => Ok(ControllerButton::RIGHT),
        "lb" => Ok(ControllerButton::LB),
        "rb" => Ok(ControllerButton::RB),
        "lt" => Ok(ControllerButton::LT),
        "rt" => Ok(ControllerButton::RT),
        _ => Err(BindParseError::InvalidButton(name.to_string())),
    }
}

/// Errors that can occur when parsing bind strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindParseError {
    InvalidKey(String),
    InvalidButton(String),
    /// Parsed, but names a key that can't be bound (e.g. unknown character)
    Unbindable(String),
}

impl std::fmt::Display for BindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindParseError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            BindParseError::InvalidButton(b) => write!(f, "Invalid controller button: {}", b),
            BindParseError::Unbindable(k) => write!(f, "Key cannot be bound: {}", k),
        }
    }
}

impl std::error::Error for BindParseError {}
