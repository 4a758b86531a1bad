//! Key chord types for keyboard dispatch.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single key within a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordKey {
    /// Regular character
    Char(char),

    // Modifiers
    /// Control modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Shift modifier
    Shift,

    // Named keys
    /// Enter/Return key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Space key
    Space,
}

/// A key chord: modifiers followed by a terminal key, pressed together.
///
/// Chords are written `+`-separated, e.g. `"ctrl+shift+y"` or
/// `"alt+enter"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    keys: Vec<ChordKey>,
}

impl Chord {
    /// Parse a chord from its `+`-separated string representation.
    ///
    /// Examples:
    /// - "alt+enter" -> [Alt, Enter]
    /// - "ctrl+shift+y" -> [Ctrl, Shift, Char('y')]
    /// - "escape" -> [Escape]
    pub fn parse(s: &str) -> Result<Self> {
        let mut keys = Vec::new();
        for part in s.split('+') {
            let part = part.trim().to_lowercase();
            let key = match part.as_str() {
                "ctrl" | "control" => ChordKey::Ctrl,
                "alt" => ChordKey::Alt,
                "shift" => ChordKey::Shift,
                "enter" | "return" => ChordKey::Enter,
                "escape" | "esc" => ChordKey::Escape,
                "tab" => ChordKey::Tab,
                "space" => ChordKey::Space,
                _ => {
                    let mut chars = part.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => ChordKey::Char(c),
                        _ => return Err(Error::InvalidChord(s.to_string())),
                    }
                }
            };
            keys.push(key);
        }
        if keys.is_empty() {
            return Err(Error::InvalidChord(s.to_string()));
        }
        Ok(Self { keys })
    }

    /// The fixed chord sent for approve actions without a clickable
    /// approve-named button ("alt+enter").
    pub fn accept() -> Self {
        Self {
            keys: vec![ChordKey::Alt, ChordKey::Enter],
        }
    }

    /// The fixed chord sent for deny actions without a clickable
    /// deny-named button ("escape").
    pub fn cancel() -> Self {
        Self {
            keys: vec![ChordKey::Escape],
        }
    }

    /// Keys of the chord in press order.
    pub fn keys(&self) -> &[ChordKey] {
        &self.keys
    }
}

impl std::fmt::Display for ChordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChordKey::Char(c) => write!(f, "{c}"),
            ChordKey::Ctrl => write!(f, "ctrl"),
            ChordKey::Alt => write!(f, "alt"),
            ChordKey::Shift => write!(f, "shift"),
            ChordKey::Enter => write!(f, "enter"),
            ChordKey::Escape => write!(f, "escape"),
            ChordKey::Tab => write!(f, "tab"),
            ChordKey::Space => write!(f, "space"),
        }
    }
}

impl std::fmt::Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}
