use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcutParseError {
    #[error("empty shortcut")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("shortcut `{0}` has no key")]
    MissingKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutKey {
    Char(char),
    F(u8),
    Enter,
    Tab,
    Backspace,
    Delete,
}

/// A single key combination such as `ctrl+b` or `f5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub key: ShortcutKey,
}

impl Shortcut {
    #[must_use]
    pub fn plain(key: ShortcutKey) -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
            key,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(ShortcutKey::Char(c.to_ascii_lowercase()))
        }
    }
}

impl FromStr for Shortcut {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ShortcutParseError::Empty);
        }

        let parts: Vec<&str> = trimmed.split('+').map(str::trim).collect();
        let (key_part, modifiers) = match parts.split_last() {
            Some((last, rest)) if !last.is_empty() => (*last, rest),
            _ => return Err(ShortcutParseError::MissingKey(trimmed.to_string())),
        };

        let mut shortcut = Shortcut::plain(parse_key(key_part)?);
        for m in modifiers {
            match m.to_lowercase().as_str() {
                "ctrl" | "control" => shortcut.ctrl = true,
                "alt" | "option" => shortcut.alt = true,
                "shift" => shortcut.shift = true,
                other => return Err(ShortcutParseError::UnknownModifier(other.to_string())),
            }
        }
        Ok(shortcut)
    }
}

fn parse_key(part: &str) -> Result<ShortcutKey, ShortcutParseError> {
    let mut chars = part.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(ShortcutKey::Char(c.to_ascii_lowercase()));
    }

    let lower = part.to_lowercase();
    match lower.as_str() {
        "enter" | "return" => Ok(ShortcutKey::Enter),
        "tab" => Ok(ShortcutKey::Tab),
        "backspace" => Ok(ShortcutKey::Backspace),
        "delete" | "del" => Ok(ShortcutKey::Delete),
        "space" => Ok(ShortcutKey::Char(' ')),
        _ => lower
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(ShortcutKey::F)
            .ok_or_else(|| ShortcutParseError::UnknownKey(part.to_string())),
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        match self.key {
            ShortcutKey::Char(' ') => f.write_str("Space"),
            ShortcutKey::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            ShortcutKey::F(n) => write!(f, "F{n}"),
            ShortcutKey::Enter => f.write_str("Enter"),
            ShortcutKey::Tab => f.write_str("Tab"),
            ShortcutKey::Backspace => f.write_str("Backspace"),
            ShortcutKey::Delete => f.write_str("Del"),
        }
    }
}
