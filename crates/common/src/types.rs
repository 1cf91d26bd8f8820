use serde::{Deserialize, Serialize};

/// Opaque identifier of a platform window.
///
/// Raw window events are keyed by this handle; it is the lookup key for the
/// router that owns the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

/// Logical key code (layout dependent), numbered like GLFW key tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const UNKNOWN: KeyCode = KeyCode(-1);
}

/// Hardware key position, independent of the keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scancode(pub i32);

/// What happened to a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Release,
    Press,
    /// Auto-repeat while the key stays down.
    Repeat,
}

impl Action {
    /// Decode the windowing library's integer action (0 release, 1 press, 2 repeat).
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Release),
            1 => Some(Self::Press),
            2 => Some(Self::Repeat),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            Self::Release => 0,
            Self::Press => 1,
            Self::Repeat => 2,
        }
    }

    pub fn is_release(self) -> bool {
        self == Self::Release
    }

    /// True for press and repeat.
    pub fn is_down(self) -> bool {
        !self.is_release()
    }
}

/// Modifier keys held while an event was produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}
