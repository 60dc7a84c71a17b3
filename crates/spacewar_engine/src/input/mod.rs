//! Input management system
//!
//! Turns raw [`PlatformMessage`]s into typed [`InputEvent`]s and keeps track
//! of what is currently held down.

mod binding;

pub use binding::{BindingParseError, KeyBinding};

use crate::events::{InputEvent, KeyboardEvent, MouseEvent};
use crate::platform::{PlatformMessage, SizeKind};
use bitflags::bitflags;
use std::collections::HashSet;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Either shift key
    Shift,
    /// Either control key
    Control,
    /// Either alt key
    Alt,
}

const KEY_NAMES: &[(KeyCode, &str)] = &[
    (KeyCode::A, "A"),
    (KeyCode::B, "B"),
    (KeyCode::C, "C"),
    (KeyCode::D, "D"),
    (KeyCode::E, "E"),
    (KeyCode::F, "F"),
    (KeyCode::G, "G"),
    (KeyCode::H, "H"),
    (KeyCode::I, "I"),
    (KeyCode::J, "J"),
    (KeyCode::K, "K"),
    (KeyCode::L, "L"),
    (KeyCode::M, "M"),
    (KeyCode::N, "N"),
    (KeyCode::O, "O"),
    (KeyCode::P, "P"),
    (KeyCode::Q, "Q"),
    (KeyCode::R, "R"),
    (KeyCode::S, "S"),
    (KeyCode::T, "T"),
    (KeyCode::U, "U"),
    (KeyCode::V, "V"),
    (KeyCode::W, "W"),
    (KeyCode::X, "X"),
    (KeyCode::Y, "Y"),
    (KeyCode::Z, "Z"),
    (KeyCode::Space, "SPACE"),
    (KeyCode::Enter, "ENTER"),
    (KeyCode::Escape, "ESCAPE"),
    (KeyCode::Tab, "TAB"),
    (KeyCode::Up, "UP"),
    (KeyCode::Down, "DOWN"),
    (KeyCode::Left, "LEFT"),
    (KeyCode::Right, "RIGHT"),
    (KeyCode::Shift, "SHIFT"),
    (KeyCode::Control, "CTRL"),
    (KeyCode::Alt, "ALT"),
];

impl KeyCode {
    /// Upper-case name used in key bindings
    pub fn name(self) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(key, _)| *key == self)
            .map_or("?", |(_, name)| *name)
    }

    /// Look up a key by its binding name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        KEY_NAMES
            .iter()
            .find(|(_, candidate)| candidate.eq_ignore_ascii_case(name))
            .map(|(key, _)| *key)
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

bitflags! {
    /// Modifier keys held during a keyboard event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Control
        const CTRL = 1 << 0;
        /// Shift
        const SHIFT = 1 << 1;
        /// Alt
        const ALT = 1 << 2;
    }
}

impl Modifiers {
    /// Flag tracked for a modifier key, `None` for ordinary keys
    pub fn for_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Control => Some(Self::CTRL),
            KeyCode::Shift => Some(Self::SHIFT),
            KeyCode::Alt => Some(Self::ALT),
            _ => None,
        }
    }
}

/// Snapshot of held keys, buttons and cursor position
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held_keys: HashSet<KeyCode>,
    held_buttons: HashSet<MouseButton>,
    modifiers: Modifiers,
    cursor: (i32, i32),
    surface: Option<(u32, u32)>,
}

impl InputState {
    /// Whether `key` is currently down
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Whether `button` is currently down
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.held_buttons.contains(&button)
    }

    /// Modifier keys currently held
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Last known cursor position
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Last forwarded surface size
    pub fn surface(&self) -> Option<(u32, u32)> {
        self.surface
    }
}

/// Translates platform messages into typed events
#[derive(Debug, Default)]
pub struct InputRouter {
    state: InputState,
}

impl InputRouter {
    /// Create a router with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Translate one message, updating the tracked state
    ///
    /// Returns `None` for messages that carry nothing new: OS key repeats,
    /// minimisation, cursor moves to the same spot and resizes to the current
    /// size.
    pub fn translate(&mut self, message: PlatformMessage) -> Option<InputEvent> {
        match message {
            PlatformMessage::Destroy => Some(InputEvent::CloseRequested),
            PlatformMessage::MouseButton { button, x, y, pressed } => {
                self.state.cursor = (x, y);
                if pressed {
                    self.state.held_buttons.insert(button);
                } else {
                    self.state.held_buttons.remove(&button);
                }
                Some(InputEvent::Mouse(MouseEvent { x, y, button, pressed }))
            }
            PlatformMessage::MouseMove { x, y } => {
                if self.state.cursor == (x, y) {
                    return None;
                }
                self.state.cursor = (x, y);
                Some(InputEvent::MouseMoved { x, y })
            }
            PlatformMessage::Key { key, pressed } => {
                if let Some(flag) = Modifiers::for_key(key) {
                    self.state.modifiers.set(flag, pressed);
                }
                if pressed {
                    if !self.state.held_keys.insert(key) {
                        log::trace!("Suppressed repeat of {key:?}");
                        return None;
                    }
                } else {
                    self.state.held_keys.remove(&key);
                }
                Some(InputEvent::Keyboard(KeyboardEvent {
                    key,
                    pressed,
                    modifiers: self.state.modifiers,
                }))
            }
            PlatformMessage::Size { kind, width, height } => {
                if kind == SizeKind::Minimized || self.state.surface == Some((width, height)) {
                    return None;
                }
                self.state.surface = Some((width, height));
                Some(InputEvent::Resize { width, height })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: KeyCode, pressed: bool) -> PlatformMessage {
        PlatformMessage::Key { key, pressed }
    }

    #[test]
    fn destroy_becomes_close_request() {
        let mut router = InputRouter::new();
        assert_eq!(router.translate(PlatformMessage::Destroy), Some(InputEvent::CloseRequested));
    }

    #[test]
    fn mouse_buttons_carry_position_and_state() {
        let mut router = InputRouter::new();
        let down = PlatformMessage::MouseButton {
            button: MouseButton::Left,
            x: 10,
            y: 20,
            pressed: true,
        };

        assert_eq!(
            router.translate(down),
            Some(InputEvent::Mouse(MouseEvent {
                x: 10,
                y: 20,
                button: MouseButton::Left,
                pressed: true,
            }))
        );
        assert!(router.state().is_button_down(MouseButton::Left));
        assert_eq!(router.state().cursor(), (10, 20));
        assert_eq!(router.translate(PlatformMessage::MouseMove { x: 10, y: 20 }), None);
    }

    #[test]
    fn key_repeat_is_suppressed_until_release() {
        let mut router = InputRouter::new();
        assert!(router.translate(key(KeyCode::Space, true)).is_some());
        assert!(router.translate(key(KeyCode::Space, true)).is_none());
        assert!(router.state().is_key_down(KeyCode::Space));

        assert!(router.translate(key(KeyCode::Space, false)).is_some());
        assert!(!router.state().is_key_down(KeyCode::Space));
        assert!(router.translate(key(KeyCode::Space, true)).is_some());
    }

    #[test]
    fn modifiers_are_attached_to_key_events() {
        let mut router = InputRouter::new();
        router.translate(key(KeyCode::Control, true));
        let event = router.translate(key(KeyCode::S, true));

        match event {
            Some(InputEvent::Keyboard(k)) => assert_eq!(k.modifiers, Modifiers::CTRL),
            other => panic!("unexpected {other:?}"),
        }

        router.translate(key(KeyCode::Control, false));
        assert_eq!(router.state().modifiers(), Modifiers::empty());
    }

    #[test]
    fn minimise_is_swallowed_and_sizes_deduplicated() {
        let mut router = InputRouter::new();
        let size = |kind, width, height| PlatformMessage::Size { kind, width, height };

        assert_eq!(
            router.translate(size(SizeKind::Restored, 800, 600)),
            Some(InputEvent::Resize { width: 800, height: 600 })
        );
        assert_eq!(router.translate(size(SizeKind::Minimized, 0, 0)), None);
        assert_eq!(router.translate(size(SizeKind::Restored, 800, 600)), None);
        assert_eq!(
            router.translate(size(SizeKind::Maximized, 1920, 1080)),
            Some(InputEvent::Resize { width: 1920, height: 1080 })
        );
    }

    #[test]
    fn key_names_round_trip() {
        for (key, name) in KEY_NAMES {
            assert_eq!(KeyCode::from_name(name), Some(*key));
            assert_eq!(key.name(), *name);
        }
        assert_eq!(KeyCode::from_name("escape"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_name("F13"), None);
    }
}
