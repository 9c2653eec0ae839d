//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on rendering, audio, input devices or wall-clock time, making it:
//!
//! - **Deterministic**: Same seed (or scripted random source) produces identical games
//! - **Testable**: Every rule is reachable from plain function calls
//! - **Portable**: Can be driven by a terminal, a GUI, a bot or a replay file
//!
//! # Module Structure
//!
//! - [`grid`]: Rectangular playfield of locked cells, row detection and compaction
//! - [`catalog`]: Piece shapes for the classic and extended sets, clockwise rotation
//! - [`piece`]: Active piece, collision checks, moves and kicked rotation
//! - [`rng`]: Injectable random source and the one-piece lookahead queue
//! - [`scoring`]: Line clear points, perfect clear bonus, level and gravity tables
//! - [`config`]: Session rules (grid size, catalog, tables) with JSON loading
//! - [`events`]: Events queued by the session and the observer hooks
//! - [`session`]: The state machine tying it all together
//! - [`snapshot`]: Serializable read-only views for renderers and replays
//!
//! # Game Rules
//!
//! - **Uniform draws**: Each piece is drawn independently from the session's catalog
//! - **Clockwise rotation** with horizontal kicks `0, +1, -1, +2, -2`
//! - **No lock delay**: A piece locks the moment a downward step is blocked
//! - **Two-phase clears**: Completed rows are reported first and removed on `complete_clear`
//! - **Scoring**: `40 / 100 / 300 / 1200 x level`, optional perfect clear bonus
//!
//! # Example
//!
//! ```
//! use retro_blocks_core::{RulesConfig, Session};
//! use retro_blocks_core::types::GameAction;
//!
//! let mut session = Session::new(RulesConfig::classic(), 12345).unwrap();
//! session.start();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! session.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(session.pieces_spawned(), 2);
//! ```
//!
//! # Timing
//!
//! The session is driven by discrete ticks. Each [`Session::tick`] advances a gravity
//! counter; when it reaches the level's drop interval the piece steps down one row.

pub mod catalog;
pub mod config;
pub mod events;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use retro_blocks_types as types;

// Re-export commonly used types for convenience
pub use catalog::{definition, spawn_shape, Shape, TetrominoDef};
pub use config::{ConfigError, RulesConfig};
pub use events::{SessionEvent, SessionObserver};
pub use grid::Grid;
pub use piece::{check_collision, try_move, try_rotate, ActivePiece};
pub use rng::{PieceQueue, RandomSource, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use session::{ClearOutcome, ClearReport, Phase, Session, StepOutcome, TickOutcome};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
