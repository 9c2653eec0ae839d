//! Catalog module - piece shapes and the rotation transform
//!
//! Shapes are small boolean matrices (row-major, at most 4x4), written here the way they
//! look on screen. A definition never changes; rotating produces a new matrix that is the
//! clockwise quarter turn of the source (transpose, then reverse the row order).

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{CatalogVariant, PieceKind, MAX_SHAPE_DIM};

/// Offset (dx, dy) of a single occupied cell relative to the shape's top-left anchor
pub type MinoOffset = (i8, i8);

/// Occupied cells of a shape, stack allocated
pub type MinoOffsets = ArrayVec<MinoOffset, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Rectangular occupancy matrix of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a 0/1 matrix (top row first)
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a const) if the matrix is empty or larger than 4x4.
    pub const fn from_matrix<const R: usize, const C: usize>(matrix: [[u8; C]; R]) -> Self {
        assert!(R > 0 && R <= MAX_SHAPE_DIM && C > 0 && C <= MAX_SHAPE_DIM);

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                bits[r][c] = matrix[r][c] != 0;
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: R as u8,
            cols: C as u8,
            bits,
        }
    }

    /// Height in rows
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Width in columns
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Occupied cells as (dx, dy) offsets, row by row
    pub fn cells(&self) -> MinoOffsets {
        let mut out = MinoOffsets::new();
        for row in 0..self.rows as usize {
            for col in 0..self.cols as usize {
                if self.bits[row][col] {
                    out.push((col as i8, row as i8));
                }
            }
        }
        out
    }

    pub fn cell_count(&self) -> usize {
        self.bits
            .iter()
            .take(self.rows as usize)
            .map(|row| row.iter().take(self.cols as usize).filter(|&&b| b).count())
            .sum()
    }

    /// Clockwise quarter turn: `new[c][rows - 1 - r] = old[r][c]`
    pub fn rotated_cw(&self) -> Shape {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..rows {
            for c in 0..cols {
                bits[c][rows - 1 - r] = self.bits[r][c];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Apply `turns` clockwise quarter turns
    pub fn rotated(&self, turns: u8) -> Shape {
        (0..turns % 4).fold(*self, |shape, _| shape.rotated_cw())
    }

    /// Rows of 0/1, for display and debugging
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|r| {
                (0..self.cols as usize)
                    .map(|c| self.bits[r][c] as u8)
                    .collect()
            })
            .collect()
    }
}

const I_SHAPE: Shape = Shape::from_matrix([[1, 1, 1, 1]]);
const O_SHAPE: Shape = Shape::from_matrix([[1, 1], [1, 1]]);
const T_SHAPE: Shape = Shape::from_matrix([[0, 1, 0], [1, 1, 1]]);
const S_SHAPE: Shape = Shape::from_matrix([[0, 1, 1], [1, 1, 0]]);
const Z_SHAPE: Shape = Shape::from_matrix([[1, 1, 0], [0, 1, 1]]);
const J_SHAPE: Shape = Shape::from_matrix([[1, 0, 0], [1, 1, 1]]);
const L_SHAPE: Shape = Shape::from_matrix([[0, 0, 1], [1, 1, 1]]);

const SMALL_L_SHAPE: Shape = Shape::from_matrix([[1, 1], [1, 0]]);
const SMALL_L_MIRROR_SHAPE: Shape = Shape::from_matrix([[1, 1], [0, 1]]);
const U_SHAPE: Shape = Shape::from_matrix([[1, 0, 1], [1, 1, 1]]);
const S_ADVANCED_SHAPE: Shape = Shape::from_matrix([[0, 1, 1], [1, 1, 0]]);
const BLOCK_PLUS_SHAPE: Shape = Shape::from_matrix([[1, 1, 1], [1, 1, 0]]);
const T_EXTENDED_SHAPE: Shape = Shape::from_matrix([[0, 1, 0], [0, 1, 1], [0, 1, 0]]);

/// Spawn-orientation shape for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::SmallL => SMALL_L_SHAPE,
        PieceKind::SmallLMirror => SMALL_L_MIRROR_SHAPE,
        PieceKind::U => U_SHAPE,
        PieceKind::SAdvanced => S_ADVANCED_SHAPE,
        PieceKind::BlockPlus => BLOCK_PLUS_SHAPE,
        PieceKind::TExtended => T_EXTENDED_SHAPE,
    }
}

/// Immutable piece definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TetrominoDef {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Palette slot for renderers
    pub color: u8,
}

pub fn definition(kind: PieceKind) -> TetrominoDef {
    TetrominoDef {
        kind,
        shape: spawn_shape(kind),
        color: kind.color_index(),
    }
}

/// Definitions of every piece in a catalog
pub fn catalog(variant: CatalogVariant) -> impl Iterator<Item = TetrominoDef> {
    variant.pieces().iter().map(|&kind| definition(kind))
}

/// Largest row or column extent over all orientations of the catalog's pieces
pub fn max_extent(variant: CatalogVariant) -> u8 {
    catalog(variant)
        .map(|def| def.shape.rows().max(def.shape.cols()))
        .max()
        .unwrap_or(0)
}
