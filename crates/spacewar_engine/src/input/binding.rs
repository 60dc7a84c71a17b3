//! Textual key bindings such as `"CTRL+SHIFT+A"`

use super::{KeyCode, Modifiers};
use crate::events::KeyboardEvent;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a key binding string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingParseError {
    /// A token is neither a modifier nor a known key
    #[error("unknown key '{0}' in binding")]
    UnknownKey(String),
    /// Only modifiers were given
    #[error("binding has no key")]
    MissingKey,
    /// More than one non-modifier key was given
    #[error("binding names more than one key")]
    MultipleKeys,
}

/// A key plus the exact set of modifiers that must be held with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Main key
    pub key: KeyCode,
    /// Modifiers that must be held, no more and no fewer
    pub modifiers: Modifiers,
}

impl KeyBinding {
    /// Binding for a bare key
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Whether `event` is a press of this binding
    pub fn matches(&self, event: &KeyboardEvent) -> bool {
        event.pressed && event.key == self.key && event.modifiers == self.modifiers
    }
}

impl FromStr for KeyBinding {
    type Err = BindingParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::empty();
        let mut key = None;

        for token in text.split('+').map(str::trim) {
            let parsed = KeyCode::from_name(token)
                .or_else(|| token.eq_ignore_ascii_case("CONTROL").then_some(KeyCode::Control))
                .ok_or_else(|| BindingParseError::UnknownKey(token.to_string()))?;

            match Modifiers::for_key(parsed) {
                Some(flag) => modifiers |= flag,
                None if key.is_some() => return Err(BindingParseError::MultipleKeys),
                None => key = Some(parsed),
            }
        }

        let key = key.ok_or(BindingParseError::MissingKey)?;
        Ok(Self { key, modifiers })
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "CTRL"),
            (Modifiers::SHIFT, "SHIFT"),
            (Modifiers::ALT, "ALT"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(self.key.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modifiers_in_any_order() {
        let binding: KeyBinding = "shift + ctrl + a".parse().unwrap();
        assert_eq!(binding.key, KeyCode::A);
        assert_eq!(binding.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(binding.to_string(), "CTRL+SHIFT+A");
    }

    #[test]
    fn rejects_malformed_bindings() {
        assert_eq!("CTRL".parse::<KeyBinding>(), Err(BindingParseError::MissingKey));
        assert_eq!("A+B".parse::<KeyBinding>(), Err(BindingParseError::MultipleKeys));
        assert_eq!(
            "CTRL+F13".parse::<KeyBinding>(),
            Err(BindingParseError::UnknownKey("F13".to_string()))
        );
    }

    #[test]
    fn matches_exact_modifiers_on_press_only() {
        let save: KeyBinding = "CONTROL+S".parse().unwrap();
        let press = |modifiers, pressed| KeyboardEvent {
            key: KeyCode::S,
            pressed,
            modifiers,
        };

        assert!(save.matches(&press(Modifiers::CTRL, true)));
        assert!(!save.matches(&press(Modifiers::CTRL, false)));
        assert!(!save.matches(&press(Modifiers::CTRL | Modifiers::ALT, true)));
        assert!(!KeyBinding::new(KeyCode::S).matches(&press(Modifiers::CTRL, true)));
    }
}
