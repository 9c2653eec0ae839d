//! Retro Blocks (workspace facade crate).
//!
//! Re-exports the simulation crates under `retro_blocks::{core,engine,types}` and hosts the
//! headless [`runner`] used by the default binary.

pub use retro_blocks_core as core;
pub use retro_blocks_engine as engine;
pub use retro_blocks_types as types;

pub mod runner;
