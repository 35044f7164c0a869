//! Key bindings and held-button tracking.

use crate::core::controller::Intents;

/// Browser `keyCode` values the walkthrough listens to.
pub mod key_codes {
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const E: u32 = 69;
    pub const F: u32 = 70;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
    pub const F11: u32 = 122;
}

/// Logical buttons. Several keys may map to the same button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Forward,
    Backward,
    Left,
    Right,
    Interact,
    Fullscreen,
}

impl Button {
    const COUNT: usize = 6;

    pub fn from_key_code(key_code: u32) -> Option<Self> {
        use key_codes::*;
        match key_code {
            W | ARROW_UP => Some(Button::Forward),
            S | ARROW_DOWN => Some(Button::Backward),
            A | ARROW_LEFT => Some(Button::Left),
            D | ARROW_RIGHT => Some(Button::Right),
            E => Some(Button::Interact),
            F | F11 => Some(Button::Fullscreen),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One-shot actions raised on a press edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Interact,
    ToggleFullscreen,
}

/// Which logical buttons are held. Updated only on press/release edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonState {
    held: [bool; Button::COUNT],
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key press. Returns an action on the press edge of
    /// interact or fullscreen; auto-repeat while held raises nothing.
    pub fn press(&mut self, key_code: u32) -> Option<Action> {
        let button = Button::from_key_code(key_code)?;
        let was_held = std::mem::replace(&mut self.held[button.index()], true);
        if was_held {
            return None;
        }
        match button {
            Button::Interact => Some(Action::Interact),
            Button::Fullscreen => Some(Action::ToggleFullscreen),
            _ => None,
        }
    }

    pub fn release(&mut self, key_code: u32) {
        if let Some(button) = Button::from_key_code(key_code) {
            self.held[button.index()] = false;
        }
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    /// Movement intents from the held direction buttons.
    pub fn intents(&self) -> Intents {
        Intents {
            forward: self.is_held(Button::Forward),
            backward: self.is_held(Button::Backward),
            left: self.is_held(Button::Left),
            right: self.is_held(Button::Right),
        }
    }

    /// Forget every held button, e.g. when pointer lock is lost.
    pub fn release_all(&mut self) {
        self.held = [false; Button::COUNT];
    }
}
