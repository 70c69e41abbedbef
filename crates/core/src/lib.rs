//! Collaborators of the game-loop controller - pure, deterministic, and testable
//!
//! This crate holds everything the controller drives but does not own:
//! the grid, the piece representation, the spawner and the score tracker.
//! It has **zero dependencies** on UI, audio, or I/O.
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid (2 hidden header rows) with validity checks and row clearing
//! - [`shape`]: the active piece and its move/rotate primitives
//! - [`pieces`]: tetromino shape tables
//! - [`rng`]: 7-bag random piece generation
//! - [`spawner`]: hands out new shapes at the spawn position
//! - [`scoring`]: classic line scores and level progression
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{Board, ScoreManager, Spawner};
//!
//! let mut board = Board::new();
//! let mut spawner = Spawner::new(12345);
//! let mut score = ScoreManager::new();
//!
//! let mut shape = spawner.spawn_shape();
//! while board.is_valid_position(&shape) {
//!     shape.move_down();
//! }
//! shape.move_up();
//! board.store_shape_in_grid(&shape);
//!
//! score.score_lines(board.clear_all_rows());
//! assert_eq!(score.score(), 0);
//! ```

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;
pub mod spawner;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use pieces::get_shape;
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_line_score, ScoreManager};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use spawner::Spawner;
