//! Plain-data view of a running session, consumed by renderers.

use crate::board::Board;
use crate::shape::Shape;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Shape> for ActiveSnapshot {
    fn from(value: Shape) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Full grid including header rows, as piece codes (0 = empty)
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Pause panel visible
    pub paused: bool,
    /// Game-over panel visible
    pub game_over: bool,
    pub effects_enabled: bool,
}

impl GameSnapshot {
    pub fn write_board(&mut self, board: &Board) {
        board.write_u8_grid(&mut self.board);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            score: 0,
            level: 0,
            lines: 0,
            paused: false,
            game_over: false,
            effects_enabled: true,
        }
    }
}
