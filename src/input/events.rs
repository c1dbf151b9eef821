//! Logical key event types shared by the on-screen and desktop input paths.

use crate::input::KeyboardError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Non-printable logical key produced by an operator widget.
///
/// Names are the upper-case identifiers used for operator widgets
/// (`"BACKSPACE"`, `"SHIFT"`, ...), both in config files and replay scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpecialKeyCode {
    /// Delete the character before the caret
    Backspace,
    /// Insert a tab
    Tab,
    /// Switch between the romaji and symbol layouts
    Symbol,
    /// Insert a space
    Space,
    /// Toggle upper/lower case
    Shift,
    /// Return/Enter key
    Return,
    /// Directional navigation (no effect on the target)
    Up,
    Down,
    Left,
    Right,
}

impl SpecialKeyCode {
    /// Every code, in declaration order.
    pub const ALL: [SpecialKeyCode; 10] = [
        SpecialKeyCode::Backspace,
        SpecialKeyCode::Tab,
        SpecialKeyCode::Symbol,
        SpecialKeyCode::Space,
        SpecialKeyCode::Shift,
        SpecialKeyCode::Return,
        SpecialKeyCode::Up,
        SpecialKeyCode::Down,
        SpecialKeyCode::Left,
        SpecialKeyCode::Right,
    ];

    /// Returns the widget name for this code.
    pub fn name(&self) -> &'static str {
        match self {
            SpecialKeyCode::Backspace => "BACKSPACE",
            SpecialKeyCode::Tab => "TAB",
            SpecialKeyCode::Symbol => "SYMBOL",
            SpecialKeyCode::Space => "SPACE",
            SpecialKeyCode::Shift => "SHIFT",
            SpecialKeyCode::Return => "RETURN",
            SpecialKeyCode::Up => "UP",
            SpecialKeyCode::Down => "DOWN",
            SpecialKeyCode::Left => "LEFT",
            SpecialKeyCode::Right => "RIGHT",
        }
    }

    /// Returns true for the four navigation codes.
    pub fn is_directional(&self) -> bool {
        matches!(
            self,
            SpecialKeyCode::Up | SpecialKeyCode::Down | SpecialKeyCode::Left | SpecialKeyCode::Right
        )
    }
}

impl fmt::Display for SpecialKeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpecialKeyCode {
    type Err = KeyboardError;

    /// Parses a widget name such as `"RETURN"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SpecialKeyCode::ALL
            .into_iter()
            .find(|code| code.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| KeyboardError::UnknownKeyCode(trimmed.to_string()))
    }
}

/// A single logical key activation.
///
/// Produced by exactly one widget activation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// Printable text inserted as-is
    Character(String),
    /// Operator key
    Special(SpecialKeyCode),
}

impl KeyEvent {
    /// Convenience constructor for character events.
    pub fn character(text: impl Into<String>) -> Self {
        KeyEvent::Character(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_widget_names_case_insensitively() {
        assert_eq!("BACKSPACE".parse::<SpecialKeyCode>().unwrap(), SpecialKeyCode::Backspace);
        assert_eq!("return".parse::<SpecialKeyCode>().unwrap(), SpecialKeyCode::Return);
        assert_eq!(" Shift ".parse::<SpecialKeyCode>().unwrap(), SpecialKeyCode::Shift);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "ESCAPE".parse::<SpecialKeyCode>().unwrap_err();
        assert!(matches!(err, KeyboardError::UnknownKeyCode(name) if name == "ESCAPE"));
    }

    #[test]
    fn names_round_trip_through_display() {
        for code in SpecialKeyCode::ALL {
            assert_eq!(code.to_string().parse::<SpecialKeyCode>().unwrap(), code);
        }
    }

    #[test]
    fn only_arrows_are_directional() {
        let directional: Vec<_> = SpecialKeyCode::ALL
            .into_iter()
            .filter(SpecialKeyCode::is_directional)
            .collect();
        assert_eq!(
            directional,
            vec![
                SpecialKeyCode::Up,
                SpecialKeyCode::Down,
                SpecialKeyCode::Left,
                SpecialKeyCode::Right
            ]
        );
    }
}
