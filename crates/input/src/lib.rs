//! Terminal input: key mapping and held-key tracking.
//!
//! Maps `crossterm` key events to [`types::InputAction`]s and runner
//! commands, and folds press/release events into one
//! [`types::InputFrame`] per controller tick.

pub mod map;
pub mod tracker;

pub use tui_blocks_types as types;

pub use map::{handle_key_event, input_action, should_quit, KeyCommand};
pub use tracker::KeyTracker;
