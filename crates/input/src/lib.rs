//! Per-window input routing.
//!
//! Raw window events enter through a [`RouterRegistry`], which hands them to
//! the [`InputRouter`] of their window. Each router keeps one
//! most-recent-first [`ConsumerStack`] per event kind, the current key state
//! and a [`ScancodeBindings`] table that re-fires bindings every tick while
//! their key is held.
//!
//! # Invariants
//! - A dispatch notifies at most one live consumer: the most recently pushed one.
//! - A consumer whose [`Subscription`] was dropped is never invoked again.
//! - Within one key event, stack dispatch happens before the action is recorded.
//! - The registry never holds an entry for a router that was dropped.
//! - No router state is borrowed while a consumer or binding runs.

pub mod bindings;
pub mod bridge;
pub mod consumer;
pub mod events;
pub mod registry;
pub mod router;
pub mod snapshot;

pub use bindings::{KeyBinding, ScancodeBindings, key_binding};
pub use bridge::{WinitBridge, handle_of};
pub use consumer::{ConsumerStack, Subscription};
pub use events::{
    CharEvent, CursorEnterEvent, CursorPosEvent, DropEvent, KeyEvent, MouseButtonEvent, RawEvent,
    ScrollEvent,
};
pub use registry::{InputError, RouterRegistry};
pub use router::{InputRouter, RouterId};
pub use snapshot::{InputSnapshot, InputSource, sequence_held};

pub fn crate_info() -> &'static str {
    "ember-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
