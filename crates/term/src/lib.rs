//! Terminal front end: framebuffer, game view, renderer and bell sound.
//!
//! The game view is pure and renders a
//! [`GameSnapshot`](tui_blocks_core::GameSnapshot) into a [`FrameBuffer`];
//! the renderer diffs consecutive frames and writes only what changed.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sound;

pub use tui_blocks_core as core;
pub use tui_blocks_engine as engine;
pub use tui_blocks_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sound::TerminalSoundPlayer;
