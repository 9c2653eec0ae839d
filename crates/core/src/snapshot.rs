use serde::Serialize;

use crate::catalog::Shape;
use crate::piece::ActivePiece;
use crate::session::Phase;
use crate::types::{PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub shape: Shape,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            shape: value.shape,
        }
    }
}

/// Read-only view of a session for renderers and replays
///
/// `cells` is row-major, `width * height` long; 0 is empty, otherwise `PieceKind::id() + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub width: u8,
    pub height: u8,
    pub cells: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval: u32,
    pub phase: Phase,
    pub pending_clear: Vec<usize>,
    pub paused: bool,
    pub game_over: bool,
    pub pieces_spawned: u32,
}

impl SessionSnapshot {
    pub(crate) fn empty(next: PieceKind) -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            active: None,
            ghost_y: None,
            next,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval: 0,
            phase: Phase::Ready,
            pending_clear: Vec::new(),
            paused: false,
            game_over: false,
            pieces_spawned: 0,
        }
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling && !self.paused
    }

    /// Cell code at (x, y), or `None` outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.cells.get(y * self.width as usize + x).copied()
    }

    /// FNV-1a 64-bit hash of the locked cells
    pub fn board_hash(&self) -> u64 {
        const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const PRIME: u64 = 0x00000100000001B3;

        self.cells.iter().fold(OFFSET_BASIS, |h, &b| {
            (h ^ b as u64).wrapping_mul(PRIME)
        })
    }
}
