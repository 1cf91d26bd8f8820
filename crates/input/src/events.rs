use std::path::PathBuf;

use ember_common::{Action, KeyCode, Modifiers, MouseButton, Scancode};
use glam::DVec2;

/// A key changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub scancode: Scancode,
    pub action: Action,
    pub mods: Modifiers,
}

/// A unicode character was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharEvent {
    pub codepoint: u32,
}

impl CharEvent {
    pub fn new(ch: char) -> Self {
        Self {
            codepoint: ch as u32,
        }
    }

    /// The typed character, or `None` for an invalid scalar value.
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.codepoint)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub action: Action,
    pub mods: Modifiers,
}

/// Cursor moved, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPosEvent {
    pub position: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorEnterEvent {
    pub entered: bool,
}

/// Scroll offsets in lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub offset: DVec2,
}

/// Files dropped onto the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub paths: Vec<PathBuf>,
}

/// One window event as delivered by the windowing layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    Key(KeyEvent),
    Char(CharEvent),
    MouseButton(MouseButtonEvent),
    CursorPos(CursorPosEvent),
    CursorEnter(CursorEnterEvent),
    Scroll(ScrollEvent),
    Drop(DropEvent),
}

impl RawEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Char(_) => "char",
            Self::MouseButton(_) => "mouse_button",
            Self::CursorPos(_) => "cursor_pos",
            Self::CursorEnter(_) => "cursor_enter",
            Self::Scroll(_) => "scroll",
            Self::Drop(_) => "drop",
        }
    }
}
