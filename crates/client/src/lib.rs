//! Client-side controllers built on the input router.
//!
//! # Invariants
//! - A player only moves from its scancode bindings, once per router tick.
//! - A dropped player's bindings unbind themselves on their next firing.

mod player;

pub use player::{Player, PlayerConfig, PlayerError};

pub fn crate_info() -> &'static str {
    "ember-client v0.1.0"
}
