//! Shared input vocabulary: window handles, key codes, scancodes, actions.
//!
//! # Invariants
//! - Key codes follow the GLFW numbering; scancodes follow PC set 1.
//! - A `KeySequence` never holds more than five keys.

pub mod keys;
pub mod sequence;
pub mod types;

pub use sequence::{KeySequence, SequenceError, MAX_SEQUENCE_LEN};
pub use types::{Action, KeyCode, Modifiers, MouseButton, Scancode, WindowHandle};

pub fn crate_info() -> &'static str {
    "ember-common v0.1.0"
}
