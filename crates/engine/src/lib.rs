//! Game-loop controller for the falling-block game.
//!
//! The controller owns the per-frame state machine: repeat-rate timers,
//! action priority, landing, game over and pause. Everything it drives is
//! reached through the traits in [`collab`], so the controller can be tested
//! with scripted collaborators and run with the ones from `tui-blocks-core`.
//!
//! # Module Structure
//!
//! - [`timers`]: per-action deadlines
//! - [`clock`]: pausable game clock (time scale 0 or 1)
//! - [`config`]: intervals, sound settings, JSON loading
//! - [`collab`]: collaborator traits and their implementations
//! - [`controller`]: the controller and its builder
//! - [`session`]: a controller wired to the standard collaborators, with restart
//!
//! The controller never blocks and never spawns threads; the caller supplies
//! monotonic wall time in milliseconds on every tick.

pub mod clock;
pub mod collab;
pub mod config;
pub mod controller;
pub mod session;
pub mod timers;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use clock::PausableClock;
pub use collab::{Playfield, RecordingSoundPlayer, ScoreTracker, ShapeSpawner, SoundPlayer};
pub use config::{ConfigError, ControllerConfig, GameConfig, SoundSettings};
pub use controller::{
    ControllerBuilder, ControllerEvent, Direction, GameLoopController, Panels, TickEvents,
};
pub use session::{Session, StandardController};
pub use timers::{ActionKind, Deadlines};
pub use types::InputFrame;
