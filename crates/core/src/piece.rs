//! Piece controller - the active piece and its legal movement
//!
//! Collision rules:
//! - a cell left of column 0, right of the last column, or at/below the floor always collides
//! - a cell above the top row (`y < 0`) only checks the side walls, so pieces may sit partly
//!   above the visible grid
//! - any other cell collides iff the grid cell under it is occupied
//!
//! Rotation is clockwise only. The rotated shape is tried at each horizontal kick offset in
//! order; the first position that does not collide wins. If none fits, nothing changes.

use crate::catalog::{spawn_shape, Shape};
use crate::grid::Grid;
use crate::types::{PieceKind, Rotation};

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current (post-rotation) shape
    pub shape: Shape,
    pub rotation: Rotation,
    /// Column of the shape's top-left anchor
    pub x: i8,
    /// Row of the shape's top-left anchor
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at the spawn anchor: horizontally centered, top aligned
    ///
    /// `x = floor(grid_width / 2) - floor(piece_width / 2)`, `y = 0`.
    pub fn spawn(kind: PieceKind, grid_width: u8) -> Self {
        let shape = spawn_shape(kind);
        Self {
            kind,
            shape,
            rotation: Rotation::North,
            x: (grid_width / 2) as i8 - (shape.cols() / 2) as i8,
            y: 0,
        }
    }

    /// Absolute grid coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn collides(&self, grid: &Grid) -> bool {
        check_collision(grid, &self.shape, self.x, self.y)
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// True if `shape` anchored at (x, y) leaves the playfield or overlaps a filled cell
pub fn check_collision(grid: &Grid, shape: &Shape, x: i8, y: i8) -> bool {
    let width = grid.width() as i16;
    let height = grid.height() as i16;

    shape.cells().iter().any(|&(dx, dy)| {
        let gx = x as i16 + dx as i16;
        let gy = y as i16 + dy as i16;
        if gx < 0 || gx >= width || gy >= height {
            return true;
        }
        gy >= 0 && grid.is_occupied(gx as i8, gy as i8)
    })
}

/// The piece shifted by (dx, dy), if that position is legal
pub fn try_move(grid: &Grid, piece: &ActivePiece, dx: i8, dy: i8) -> Option<ActivePiece> {
    let moved = piece.translated(dx, dy);
    if moved.collides(grid) {
        None
    } else {
        Some(moved)
    }
}

/// Rotate clockwise with horizontal wall kicks
///
/// Returns the rotated piece and the kick offset that was accepted.
pub fn try_rotate(grid: &Grid, piece: &ActivePiece, kicks: &[i8]) -> Option<(ActivePiece, i8)> {
    let shape = piece.shape.rotated_cw();

    for &kick in kicks {
        let Ok(x) = i8::try_from(piece.x as i16 + kick as i16) else {
            continue;
        };
        if !check_collision(grid, &shape, x, piece.y) {
            let rotated = ActivePiece {
                shape,
                rotation: piece.rotation.rotate_cw(),
                x,
                ..*piece
            };
            return Some((rotated, kick));
        }
    }

    None
}

/// How many rows the piece can fall before it would collide
pub fn drop_distance(grid: &Grid, piece: &ActivePiece) -> u32 {
    let mut distance: u32 = 0;
    while !check_collision(grid, &piece.shape, piece.x, piece.y + distance as i8 + 1) {
        distance += 1;
    }
    distance
}
