//! The active piece.
//!
//! A `Shape` only knows where it is and how it is turned. Moves and rotations
//! never consult the board; callers validate afterwards and undo rejected
//! steps with the opposite operation.

use crate::pieces::{get_shape, PieceShape};
use crate::types::{PieceKind, Rotation, SPAWN_POSITION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Shape {
    /// Create a shape at the spawn position, facing north
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_POSITION.0, SPAWN_POSITION.1)
    }

    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Mino offsets for the current rotation
    pub fn offsets(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.offsets().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn move_left(&mut self) {
        self.x -= 1;
    }

    pub fn move_right(&mut self) {
        self.x += 1;
    }

    pub fn move_down(&mut self) {
        self.y += 1;
    }

    pub fn move_up(&mut self) {
        self.y -= 1;
    }

    pub fn rotate_right(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    pub fn rotate_left(&mut self) {
        self.rotation = self.rotation.rotate_ccw();
    }
}
