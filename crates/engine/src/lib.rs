//! Automation on top of the session: placement commands, grid features and a greedy bot
//!
//! Everything here drives a [`Session`](retro_blocks_core::Session) through its public
//! operations only, so an automated game follows exactly the same rules as a played one.

pub mod features;
pub mod place;
pub mod policy;

pub use features::{compute_grid_features, GridFeatures};
pub use place::{apply_place, PlaceError, Placement};
pub use policy::{
    best_placement, run_autoplay, AutoplayReport, HeuristicPolicy, HeuristicWeights, Policy,
};
