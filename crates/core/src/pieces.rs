//! Pieces module - tetromino shape tables
//!
//! Each piece is four mino offsets from the piece origin (top-left of its
//! 4x4 bounding box), one entry per rotation state. Rotation is a plain state
//! change: there are no wall kicks, a rotation that collides is simply undone
//! by the controller.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Rotation states in North, East, South, West order.
type RotationTable = [PieceShape; 4];

const I_SHAPES: RotationTable = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const O_SHAPES: RotationTable = [[(1, 0), (2, 0), (1, 1), (2, 1)]; 4];

const T_SHAPES: RotationTable = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: RotationTable = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: RotationTable = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const J_SHAPES: RotationTable = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: RotationTable = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

fn rotation_index(rotation: Rotation) -> usize {
    match rotation {
        Rotation::North => 0,
        Rotation::East => 1,
        Rotation::South => 2,
        Rotation::West => 3,
    }
}

/// Get the mino offsets for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let table = match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    };
    table[rotation_index(rotation)]
}
