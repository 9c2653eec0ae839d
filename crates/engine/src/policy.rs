use log::{debug, warn};

use retro_blocks_core::{ClearOutcome, Phase, RandomSource, Session};

use crate::features::{compute_grid_features, GridFeatures};
use crate::place::{apply_place, Placement};

/// Linear weights over grid features plus lines cleared by the placement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicWeights {
    pub agg_h: f64,
    pub lines: f64,
    pub holes: f64,
    pub bump: f64,
    pub max_h: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            agg_h: -0.51,
            lines: 0.76,
            holes: -0.36,
            bump: -0.18,
            max_h: 0.0,
        }
    }
}

impl HeuristicWeights {
    pub fn score(&self, f: &GridFeatures, lines: u32) -> f64 {
        self.agg_h * f.agg_h as f64
            + self.lines * lines as f64
            + self.holes * f.holes as f64
            + self.bump * f.bump as f64
            + self.max_h * f.max_h as f64
    }
}

/// Chooses a placement for the session's active piece
pub trait Policy {
    fn choose<R: RandomSource + Clone>(&mut self, session: &Session<R>) -> Option<Placement>;
}

/// One-piece greedy search: try every rotation and column, keep the best scoring grid
#[derive(Clone, Debug, Default)]
pub struct HeuristicPolicy {
    pub weights: HeuristicWeights,
}

impl HeuristicPolicy {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }
}

impl Policy for HeuristicPolicy {
    fn choose<R: RandomSource + Clone>(&mut self, session: &Session<R>) -> Option<Placement> {
        best_placement(session, &self.weights)
    }
}

/// Evaluate every legal placement on a scratch copy of the session
pub fn best_placement<R: RandomSource + Clone>(
    session: &Session<R>,
    weights: &HeuristicWeights,
) -> Option<Placement> {
    if !session.is_playable() || session.active().is_none() {
        return None;
    }

    let width = session.grid().width() as i8;
    let mut best: Option<(f64, Placement)> = None;

    for rotations in 0..4u8 {
        for x in -3..width {
            let placement = Placement { rotations, x };
            let mut scratch = session.clone();
            if apply_place(&mut scratch, placement).is_err() {
                continue;
            }

            let lines = match scratch.complete_clear() {
                Some(ClearOutcome::Applied(report)) => report.rows.len() as u32,
                _ => 0,
            };

            let score = if scratch.game_over() {
                f64::NEG_INFINITY
            } else {
                weights.score(&compute_grid_features(scratch.grid()), lines)
            };

            // Strictly greater keeps the first candidate on ties
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, placement));
            }
        }
    }

    if let Some((score, placement)) = best {
        debug!("best placement {:?} scored {:.3}", placement, score);
    }
    best.map(|(_, p)| p)
}

/// Summary of an automated run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayReport {
    pub pieces: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
}

/// Drive a session with `policy` until game over or `max_pieces` have spawned
///
/// Line clears and level transitions are completed immediately.
pub fn run_autoplay<R, P>(
    session: &mut Session<R>,
    policy: &mut P,
    max_pieces: u32,
) -> AutoplayReport
where
    R: RandomSource + Clone,
    P: Policy,
{
    if session.phase() == Phase::Ready {
        session.start();
    }

    while !session.game_over() && session.pieces_spawned() <= max_pieces {
        match session.phase() {
            Phase::Clearing => {
                session.complete_clear();
            }
            Phase::LevelTransition => {
                session.finish_level_transition();
            }
            Phase::Falling if session.paused() => break,
            Phase::Falling => {
                if session.pieces_spawned() == max_pieces {
                    break;
                }
                let placed = policy
                    .choose(session)
                    .map(|p| apply_place(session, p).is_ok())
                    .unwrap_or(false);
                if !placed {
                    warn!("no legal placement found, hard dropping in place");
                    if session.hard_drop().is_none() {
                        break;
                    }
                }
            }
            Phase::Ready | Phase::GameOver => break,
        }
    }

    AutoplayReport {
        pieces: session.pieces_spawned(),
        score: session.score(),
        level: session.level(),
        lines: session.lines(),
        game_over: session.game_over(),
    }
}
