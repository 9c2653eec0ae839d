//! Core types module - shared data structures and rule constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable by the simulation core, headless drivers and any
//! presentation layer that consumes snapshots.
//!
//! # Grid Dimensions
//!
//! Default playfield dimensions (configurable per session, see `RulesConfig`):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing
//!
//! The simulation is tick based. Gravity is expressed as a number of ticks per automatic
//! downward step, looked up per level:
//!
//! | Level | Ticks |
//! |-------|-------|
//! | 1 | 90 |
//! | 2 | 80 |
//! | 3 | 70 |
//! | 4 | 60 |
//! | 5 | 50 |
//! | 6 | 35 |
//! | 7 | 25 |
//! | 8 | 18 |
//! | 9 | 12 |
//! | 10 | 6 |
//!
//! # Examples
//!
//! ```
//! use retro_blocks_types::{CatalogVariant, GameAction, PieceKind, Rotation};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(CatalogVariant::Classic.pieces().len(), 7);
//! assert!(CatalogVariant::Extended.pieces().contains(&PieceKind::U));
//! ```

use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount, EnumIter};

/// Default grid width in columns
pub const GRID_WIDTH: u8 = 10;

/// Default grid height in rows
pub const GRID_HEIGHT: u8 = 20;

/// Largest accepted grid dimension (keeps coordinates inside `i8`)
pub const MAX_GRID_DIM: u8 = 64;

/// Largest row or column extent of any piece shape
pub const MAX_SHAPE_DIM: usize = 4;

/// Lines needed per level-up
pub const LINES_PER_LEVEL: u32 = 10;

/// Highest reachable level (levels are 1-based)
pub const MAX_LEVEL: u32 = 10;

/// Gravity table: ticks per automatic downward step, indexed by `level - 1`
pub const LEVEL_SPEEDS: [u32; 10] = [90, 80, 70, 60, 50, 35, 25, 18, 12, 6];

/// Line clear scoring table for 1, 2, 3 and 4 simultaneous lines
///
/// Points are multiplied by the current (1-based) level.
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];

/// Bonus for leaving the grid completely empty after a clear, multiplied by level
pub const PERFECT_CLEAR_BONUS: u32 = 10_000;

/// Points per successful soft drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Horizontal offsets tried, in order, when a rotation collides
pub const KICK_OFFSETS: [i8; 5] = [0, 1, -1, 2, -2];

/// Piece kinds across both catalogs
///
/// The first seven are the classic tetrominoes. The remaining six only appear in the
/// extended catalog:
/// - **SmallL** / **SmallLMirror**: three-cell corners
/// - **U**: five cells, open at the top
/// - **SAdvanced**: an S shape with its own identity (and color slot)
/// - **BlockPlus**: 2x2 block with one extra cell
/// - **TExtended**: T with a lengthened stem
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    SmallL,
    SmallLMirror,
    U,
    SAdvanced,
    BlockPlus,
    TExtended,
}

/// The classic seven-piece set
pub const CLASSIC_PIECES: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::O,
    PieceKind::T,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::J,
    PieceKind::L,
];

/// The extended set: every classic piece plus six additional shapes
pub const EXTENDED_PIECES: [PieceKind; 13] = [
    PieceKind::I,
    PieceKind::O,
    PieceKind::T,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::J,
    PieceKind::L,
    PieceKind::SmallL,
    PieceKind::SmallLMirror,
    PieceKind::U,
    PieceKind::SAdvanced,
    PieceKind::BlockPlus,
    PieceKind::TExtended,
];

impl PieceKind {
    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use retro_blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("small_l"), Some(PieceKind::SmallL));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "small_l" => Some(PieceKind::SmallL),
            "small_l_mirror" => Some(PieceKind::SmallLMirror),
            "u" => Some(PieceKind::U),
            "s_advanced" => Some(PieceKind::SAdvanced),
            "block_plus" => Some(PieceKind::BlockPlus),
            "t_extended" => Some(PieceKind::TExtended),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::SmallL => "small_l",
            PieceKind::SmallLMirror => "small_l_mirror",
            PieceKind::U => "u",
            PieceKind::SAdvanced => "s_advanced",
            PieceKind::BlockPlus => "block_plus",
            PieceKind::TExtended => "t_extended",
        }
    }

    /// Stable numeric id (position in `EXTENDED_PIECES`)
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Inverse of [`PieceKind::id`]
    pub fn from_id(id: u8) -> Option<Self> {
        EXTENDED_PIECES.get(id as usize).copied()
    }

    /// Palette slot used by renderers to color this piece
    ///
    /// Classic pieces use slots 0-6; the extended-only pieces reuse slots 0-5.
    pub fn color_index(&self) -> u8 {
        match self {
            PieceKind::I | PieceKind::SmallL => 0,
            PieceKind::O | PieceKind::SmallLMirror => 1,
            PieceKind::T | PieceKind::U => 2,
            PieceKind::S | PieceKind::SAdvanced => 3,
            PieceKind::Z | PieceKind::BlockPlus => 4,
            PieceKind::J | PieceKind::TExtended => 5,
            PieceKind::L => 6,
        }
    }

    /// Whether this kind belongs to the classic seven
    pub fn is_classic(&self) -> bool {
        CLASSIC_PIECES.contains(self)
    }
}

/// Which piece set a session draws from; fixed for the session's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogVariant {
    #[default]
    Classic,
    Extended,
}

impl CatalogVariant {
    /// Pieces available in this catalog, in id order
    pub fn pieces(&self) -> &'static [PieceKind] {
        match self {
            CatalogVariant::Classic => &CLASSIC_PIECES,
            CatalogVariant::Extended => &EXTENDED_PIECES,
        }
    }

    /// Parse from string (case-insensitive); "advanced" is accepted for the extended set
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(CatalogVariant::Classic),
            "extended" | "advanced" => Some(CatalogVariant::Extended),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogVariant::Classic => "classic",
            CatalogVariant::Extended => "extended",
        }
    }
}

/// Quarter turns applied to a piece since spawn
///
/// - **North**: Spawn orientation
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
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
    /// use retro_blocks_types::Rotation;
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

    /// Number of clockwise quarter turns from North
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Player-intent events fed to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// One downward step; locks the piece if it cannot move
    SoftDrop,
    /// Drop to the lowest legal row and lock immediately
    HardDrop,
    /// Rotate 90° clockwise with wall kicks
    Rotate,
    /// Toggle pause
    Pause,
    /// Start a fresh game with the same rules
    Restart,
}

impl GameAction {
    /// Parse action from string (camelCase names, case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use retro_blocks_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" | "rotatecw" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Encode a cell as a byte: 0 for empty, `1 + id` for a filled cell
pub fn cell_code(cell: Cell) -> u8 {
    match cell {
        None => 0,
        Some(kind) => kind.id() + 1,
    }
}
