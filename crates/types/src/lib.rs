//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (collaborators, controller, terminal rendering).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Visible height**: 20 rows
//! - **Header**: 2 hidden rows above the visible area where pieces spawn
//! - **Spawn position**: (3, 0) - inside the header
//!
//! A piece that cannot fall while any of its cells is still inside the header
//! ends the game.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Default | Range |
//! |----------|---------|-------|
//! | `DEFAULT_DROP_INTERVAL_MS` | 900 | 20..=1000 |
//! | `DEFAULT_MOVE_REPEAT_MS` | 250 | 20..=1000 |
//! | `DEFAULT_DOWN_REPEAT_MS` | 20 | 10..=1000 |
//! | `DEFAULT_ROTATE_REPEAT_MS` | 250 | 20..=1000 |
//!
//! # Drop Interval by Level
//!
//! The effective interval is `base - level * step`, clamped to
//! `[DROP_INTERVAL_FLOOR_MS, DROP_INTERVAL_CEIL_MS]`. The step is
//! `START_LEVEL_STEP_MS` when a session starts and the gentler
//! `LEVEL_UP_STEP_MS` on every level-up afterwards.
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{InputAction, InputFrame, PieceKind, Rotation, BOARD_WIDTH, VISIBLE_ROWS};
//!
//! assert_eq!(PieceKind::from_code(PieceKind::T.code()), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! let frame = InputFrame::new().pressed(InputAction::MoveRight);
//! assert!(frame.is_held(InputAction::MoveRight));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(VISIBLE_ROWS, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Visible rows of the playfield (20 rows)
pub const VISIBLE_ROWS: u8 = 20;

/// Hidden rows above the visible playfield where new pieces appear
pub const HEADER_ROWS: u8 = 2;

/// Total rows stored by the board (header + visible)
pub const BOARD_HEIGHT: u8 = VISIBLE_ROWS + HEADER_ROWS;

/// Spawn position (x, y) of a new piece's origin
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Fixed frame interval of the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base seconds-per-cell drop interval (0.9s)
pub const DEFAULT_DROP_INTERVAL_MS: u32 = 900;

/// Horizontal move repeat rate while a direction is held (0.25s)
pub const DEFAULT_MOVE_REPEAT_MS: u32 = 250;

/// Soft-drop repeat rate while down is held (0.02s)
pub const DEFAULT_DOWN_REPEAT_MS: u32 = 20;

/// Rotate repeat rate (0.25s)
pub const DEFAULT_ROTATE_REPEAT_MS: u32 = 250;

/// Accepted range for the base drop interval
pub const DROP_INTERVAL_RANGE_MS: (u32, u32) = (20, 1000);

/// Accepted range for the horizontal move repeat rate
pub const MOVE_REPEAT_RANGE_MS: (u32, u32) = (20, 1000);

/// Accepted range for the soft-drop repeat rate
pub const DOWN_REPEAT_RANGE_MS: (u32, u32) = (10, 1000);

/// Accepted range for the rotate repeat rate
pub const ROTATE_REPEAT_RANGE_MS: (u32, u32) = (20, 1000);

/// Per-level drop interval decrement applied when a session starts (0.1s)
pub const START_LEVEL_STEP_MS: u32 = 100;

/// Per-level drop interval decrement applied on level-up (0.05s)
pub const LEVEL_UP_STEP_MS: u32 = 50;

/// Fastest effective drop interval (0.05s)
pub const DROP_INTERVAL_FLOOR_MS: u32 = 50;

/// Slowest effective drop interval (1s)
pub const DROP_INTERVAL_CEIL_MS: u32 = 1000;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Music volume multiplier while paused
pub const PAUSED_MUSIC_FACTOR: f32 = 0.25;

/// Clamp range for every effect playback volume
pub const EFFECT_VOLUME_RANGE: (f32, f32) = (0.05, 1.0);

/// Number of interchangeable vocal clips for multi-row clears
pub const VOCAL_CLIP_COUNT: u8 = 4;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];


/// The seven tetromino piece kinds
///
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Compact grid code (1-7, 0 is reserved for empty cells)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Rotation states of a piece
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Player inputs read by the controller every tick
///
/// Each input resolves to a "held" and a "just pressed" state per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Shift the active piece one cell right
    MoveRight,
    /// Shift the active piece one cell left
    MoveLeft,
    /// Rotate the active piece clockwise
    Rotate,
    /// Soft drop
    MoveDown,
    /// Toggle pause
    Pause,
}

impl InputAction {
    pub const COUNT: usize = 5;

    pub const ALL: [InputAction; Self::COUNT] = [
        InputAction::MoveRight,
        InputAction::MoveLeft,
        InputAction::Rotate,
        InputAction::MoveDown,
        InputAction::Pause,
    ];

    /// Dense index for per-action state arrays
    pub const fn index(self) -> usize {
        match self {
            InputAction::MoveRight => 0,
            InputAction::MoveLeft => 1,
            InputAction::Rotate => 2,
            InputAction::MoveDown => 3,
            InputAction::Pause => 4,
        }
    }
}

/// Per-frame input state: which actions are held and which went down this frame
///
/// A just-pressed action is also held for that frame.
///
/// # Examples
///
/// ```
/// use tui_blocks_types::{InputAction, InputFrame};
///
/// let frame = InputFrame::new().pressed(InputAction::Rotate).held(InputAction::MoveDown);
/// assert!(frame.is_held(InputAction::Rotate));
/// assert!(frame.just_pressed(InputAction::Rotate));
/// assert!(frame.is_held(InputAction::MoveDown));
/// assert!(!frame.just_pressed(InputAction::MoveDown));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    held: [bool; InputAction::COUNT],
    just_pressed: [bool; InputAction::COUNT],
}

impl InputFrame {
    pub const fn new() -> Self {
        Self {
            held: [false; InputAction::COUNT],
            just_pressed: [false; InputAction::COUNT],
        }
    }

    /// Builder: mark an action as held (no edge)
    pub fn held(mut self, action: InputAction) -> Self {
        self.set_held(action, true);
        self
    }

    /// Builder: mark an action as pressed this frame
    pub fn pressed(mut self, action: InputAction) -> Self {
        self.set_pressed(action);
        self
    }

    pub fn set_held(&mut self, action: InputAction, held: bool) {
        self.held[action.index()] = held;
    }

    pub fn set_pressed(&mut self, action: InputAction) {
        self.held[action.index()] = true;
        self.just_pressed[action.index()] = true;
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held[action.index()]
    }

    pub fn just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed[action.index()]
    }

    pub fn is_idle(&self) -> bool {
        !self.held.iter().any(|&h| h)
    }
}

/// Sound effects and vocal cues the controller asks the sound player for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundClip {
    /// A horizontal move succeeded
    Move,
    /// A horizontal move was rejected
    Error,
    /// A piece landed
    Drop,
    /// One or more rows were cleared
    ClearRow,
    /// Level-up vocal cue
    LevelUpVocal,
    /// Game over effect
    GameOver,
    /// Game over vocal cue
    GameOverVocal,
    /// One of the interchangeable multi-row vocal cues
    Vocal(u8),
}

impl SoundClip {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundClip::Move => "move",
            SoundClip::Error => "error",
            SoundClip::Drop => "drop",
            SoundClip::ClearRow => "clear_row",
            SoundClip::LevelUpVocal => "level_up_vocal",
            SoundClip::GameOver => "game_over",
            SoundClip::GameOverVocal => "game_over_vocal",
            SoundClip::Vocal(_) => "vocal",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
