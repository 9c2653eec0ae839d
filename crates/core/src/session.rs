//! Session module - the game state machine
//!
//! A [`Session`] exclusively owns the grid, the active and next pieces and every counter.
//! It advances one discrete input or one gravity tick at a time:
//!
//! ```text
//! Ready ──start──► Falling ──lock──► (no rows) ──spawn──► Falling
//!                     │                 │
//!                     │              (rows) ──► Clearing ──complete_clear──► level check
//!                     │                                                       │
//!                     │                     LevelTransition ◄──(hold on level-up)
//!                     │                             │ finish_level_transition
//!                     └◄────────────── spawn ◄──────┘
//! spawn collision ──► GameOver
//! ```
//!
//! Pausing is an orthogonal flag; resuming returns to exactly the phase that was paused.
//! Illegal requests (input while paused, clearing or over) are ignored, never errors.

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{ConfigError, RulesConfig};
use crate::events::{SessionEvent, SessionObserver};
use crate::grid::Grid;
use crate::piece::{drop_distance, try_move, try_rotate, ActivePiece};
use crate::rng::{PieceQueue, RandomSource, SimpleRng};
use crate::scoring::{calculate_drop_score, calculate_level, calculate_score, ScoreResult};
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::types::{GameAction, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Created, first piece not spawned yet
    Ready,
    /// A piece is falling and accepts input
    Falling,
    /// Complete rows are pending; waiting for `complete_clear`
    Clearing,
    /// Level went up; waiting for `finish_level_transition`
    LevelTransition,
    GameOver,
}

/// Result of a single downward step (soft drop or gravity)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// The piece could not move and was locked
    Locked,
    /// Not playable right now (paused, clearing, game over, not started)
    Ignored,
}

impl StepOutcome {
    pub fn moved(self) -> bool {
        self == StepOutcome::Moved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    /// Gravity counter advanced without reaching the interval
    Waiting,
    Moved,
    Locked,
}

/// What `complete_clear` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    Applied(ClearReport),
    /// No pending row was still complete; play resumed without scoring
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearReport {
    /// Rows actually removed (top to bottom, pre-removal indices)
    pub rows: Vec<usize>,
    pub score: ScoreResult,
    pub perfect_clear: bool,
    /// New level if this clear caused a level-up
    pub level_up: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Session<R = SimpleRng> {
    rules: RulesConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    queue: PieceQueue<R>,
    phase: Phase,
    paused: bool,
    /// Rows reported by `LineClearStarted`, awaiting `complete_clear`
    pending_clear: Vec<usize>,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval: u32,
    drop_counter: u32,
    pieces_spawned: u32,
    events: Vec<SessionEvent>,
}

impl Session<SimpleRng> {
    /// Create a session drawing pieces from a [`SimpleRng`] seeded with `seed`
    pub fn new(rules: RulesConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_rng(rules, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Create a session with an injected random source
    pub fn with_rng(rules: RulesConfig, rng: R) -> Result<Self, ConfigError> {
        rules.validate()?;

        let queue = PieceQueue::new(rules.catalog.pieces(), rng);
        let drop_interval = rules.drop_interval(1);

        Ok(Self {
            grid: Grid::new(rules.grid_width, rules.grid_height),
            active: None,
            queue,
            phase: Phase::Ready,
            paused: false,
            pending_clear: Vec::new(),
            score: 0,
            level: 1,
            lines: 0,
            drop_interval,
            drop_counter: 0,
            pieces_spawned: 0,
            events: Vec::new(),
            rules,
        })
    }

    /// Spawn the first piece. Returns false if already started.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.spawn_piece()
    }

    /// Discard the board and counters and start a new game with the same rules
    ///
    /// The random stream continues, so a restarted game deals a different sequence.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.active = None;
        self.phase = Phase::Ready;
        self.paused = false;
        self.pending_clear.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval = self.rules.drop_interval(1);
        self.drop_counter = 0;
        self.pieces_spawned = 0;
        self.events.clear();
        self.start();
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for scenario setup and external effects
    ///
    /// Mutations during `Phase::Clearing` are tolerated: pending rows are re-validated in
    /// `complete_clear`.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_clearing(&self) -> bool {
        self.phase == Phase::Clearing
    }

    /// Rows awaiting `complete_clear` (empty unless clearing)
    pub fn pending_clear(&self) -> &[usize] {
        &self.pending_clear
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Ticks per automatic downward step at the current level
    pub fn drop_interval(&self) -> u32 {
        self.drop_interval
    }

    pub fn drop_counter(&self) -> u32 {
        self.drop_counter
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn rng(&self) -> &R {
        self.queue.rng()
    }

    /// Input and gravity are processed only while a piece is falling and not paused
    pub fn is_playable(&self) -> bool {
        self.phase == Phase::Falling && !self.paused
    }

    /// Promote the next piece to active and draw a new next piece
    ///
    /// Only valid when no piece is active and the session is not clearing or over.
    /// Returns false if ignored or if the spawn collided (which ends the game).
    pub fn spawn_piece(&mut self) -> bool {
        if self.active.is_some() || self.paused {
            return false;
        }
        match self.phase {
            Phase::Ready | Phase::Falling => self.spawn_next(),
            Phase::Clearing | Phase::LevelTransition | Phase::GameOver => false,
        }
    }

    fn spawn_next(&mut self) -> bool {
        let kind = self.queue.draw();
        let piece = ActivePiece::spawn(kind, self.grid.width());

        self.active = Some(piece);
        self.drop_counter = 0;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        // No retry and no alternate spawn point
        if piece.collides(&self.grid) {
            self.enter_game_over();
            return false;
        }

        self.phase = Phase::Falling;
        debug!(
            "spawned {} at ({}, {}), next {}",
            kind.as_str(),
            piece.x,
            piece.y,
            self.queue.peek().as_str()
        );
        self.events.push(SessionEvent::Spawned {
            kind,
            next: self.queue.peek(),
        });
        true
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.pending_clear.clear();
        info!(
            "game over: score {}, level {}, lines {}, pieces {}",
            self.score, self.level, self.lines, self.pieces_spawned
        );
        self.events.push(SessionEvent::GameOver {
            score: self.score,
            level: self.level,
            lines: self.lines,
        });
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i8) -> bool {
        if !self.is_playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match try_move(&self.grid, &active, dx, 0) {
            Some(moved) => {
                self.active = Some(moved);
                self.events.push(SessionEvent::Moved { dx });
                true
            }
            None => false,
        }
    }

    /// Rotate clockwise, trying each configured kick offset in order
    pub fn rotate(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&self.grid, &active, &self.rules.kick_offsets) {
            Some((rotated, kick)) => {
                self.active = Some(rotated);
                self.events.push(SessionEvent::Rotated { kick });
                true
            }
            None => false,
        }
    }

    /// One player-initiated downward step
    ///
    /// Soft drop points are only awarded when the piece actually moved.
    pub fn soft_drop_step(&mut self) -> StepOutcome {
        if !self.is_playable() {
            return StepOutcome::Ignored;
        }

        let outcome = self.step_down();
        if outcome.moved() {
            self.add_score(calculate_drop_score(1, self.rules.soft_drop_points));
            self.events.push(SessionEvent::SoftDropped);
        }
        outcome
    }

    /// Drop to the lowest legal row and lock at once
    ///
    /// Returns the number of rows travelled, or `None` if ignored.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.is_playable() {
            return None;
        }
        let active = self.active?;

        let distance = drop_distance(&self.grid, &active);
        self.active = Some(active.translated(0, distance as i8));
        self.add_score(calculate_drop_score(distance, self.rules.hard_drop_points));
        self.events.push(SessionEvent::HardDropped { distance });

        self.lock_active();
        Some(distance)
    }

    /// Advance gravity by one tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_playable() || self.active.is_none() {
            return TickOutcome::Ignored;
        }

        self.drop_counter += 1;
        if self.drop_counter < self.drop_interval {
            return TickOutcome::Waiting;
        }

        self.drop_counter = 0;
        match self.step_down() {
            StepOutcome::Moved => TickOutcome::Moved,
            StepOutcome::Locked => TickOutcome::Locked,
            StepOutcome::Ignored => TickOutcome::Ignored,
        }
    }

    /// Shared downward primitive for gravity and soft drop: move, or lock if blocked
    fn step_down(&mut self) -> StepOutcome {
        let Some(active) = self.active else {
            return StepOutcome::Ignored;
        };

        match try_move(&self.grid, &active, 0, 1) {
            Some(moved) => {
                self.active = Some(moved);
                StepOutcome::Moved
            }
            None => {
                self.lock_active();
                StepOutcome::Locked
            }
        }
    }

    /// Toggle pause. Returns false if the toggle was not accepted in the current phase.
    pub fn toggle_pause(&mut self) -> bool {
        let allowed = match self.phase {
            Phase::Falling => true,
            Phase::Clearing | Phase::LevelTransition => self.rules.allow_pause_while_clearing,
            Phase::Ready | Phase::GameOver => false,
        };
        if !allowed {
            return false;
        }

        self.paused = !self.paused;
        self.events.push(if self.paused {
            SessionEvent::Paused
        } else {
            SessionEvent::Resumed
        });
        true
    }

    /// Merge the active piece and either spawn the next one or start a clear
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let written = self
            .grid
            .merge_piece(&piece.shape, piece.x, piece.y, piece.kind);
        if written < piece.shape.cell_count() {
            debug!(
                "{} locked partly above the grid ({} of {} cells kept)",
                piece.kind.as_str(),
                written,
                piece.shape.cell_count()
            );
        }
        self.events.push(SessionEvent::Locked {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
        });

        let rows = self.grid.find_complete_rows();
        if rows.is_empty() {
            self.spawn_next();
            return;
        }

        debug!("lock completed rows {:?}", rows);

        self.phase = Phase::Clearing;
        self.events
            .push(SessionEvent::LineClearStarted { rows: rows.clone() });
        self.pending_clear = rows;
    }

    /// Finish a pending line clear: remove rows, score, check level, then spawn
    ///
    /// This is the continuation handed out with `LineClearStarted`. Returns `None` when
    /// there is no clear in progress (or the session is paused).
    pub fn complete_clear(&mut self) -> Option<ClearOutcome> {
        if self.phase != Phase::Clearing || self.paused {
            return None;
        }

        let pending = std::mem::take(&mut self.pending_clear);
        let rows: Vec<usize> = pending
            .iter()
            .copied()
            .filter(|&y| self.grid.is_row_full(y))
            .collect();

        if rows.len() < pending.len() {
            warn!(
                "pending rows {:?} changed before removal, clearing {:?}",
                pending, rows
            );
        }

        if rows.is_empty() {
            warn!("no valid rows left to clear, resuming play");
            self.events.push(SessionEvent::ClearAborted);
            self.phase = Phase::Falling;
            self.spawn_next();
            return Some(ClearOutcome::Aborted);
        }

        self.grid.remove_rows(&rows);
        self.lines = self.lines.saturating_add(rows.len() as u32);

        let perfect_clear = self.rules.perfect_clear_enabled && self.grid.is_empty();
        let score = calculate_score(&self.rules, rows.len(), self.level, perfect_clear);
        self.add_score(score.total);

        self.events.push(SessionEvent::LinesCleared {
            rows: rows.clone(),
            score: score.line_clear_score,
            total_lines: self.lines,
        });
        if perfect_clear {
            info!("perfect clear at level {}: +{}", self.level, score.perfect_clear_bonus);
            self.events.push(SessionEvent::PerfectClear {
                bonus: score.perfect_clear_bonus,
            });
        }

        let level_up = self.check_level_up();
        if level_up.is_some() && self.rules.hold_on_level_up {
            self.phase = Phase::LevelTransition;
        } else {
            self.phase = Phase::Falling;
            self.spawn_next();
        }

        Some(ClearOutcome::Applied(ClearReport {
            rows,
            score,
            perfect_clear,
            level_up,
        }))
    }

    fn check_level_up(&mut self) -> Option<u32> {
        let new_level = calculate_level(
            self.lines,
            self.rules.lines_per_level,
            self.rules.max_level,
        );
        if new_level <= self.level {
            return None;
        }

        self.level = new_level;
        self.drop_interval = self.rules.drop_interval(new_level);
        info!(
            "level up: {} (drop interval {} ticks)",
            new_level, self.drop_interval
        );
        self.events.push(SessionEvent::LevelUp {
            level: new_level,
            drop_interval: self.drop_interval,
        });
        Some(new_level)
    }

    /// Release a level transition hold and spawn the next piece
    pub fn finish_level_transition(&mut self) -> bool {
        if self.phase != Phase::LevelTransition || self.paused {
            return false;
        }
        self.phase = Phase::Falling;
        self.spawn_next();
        true
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Row the active piece would land on
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + drop_distance(&self.grid, &active) as i8)
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop_step() != StepOutcome::Ignored,
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SessionEvent> {
        self.events.drain(..)
    }

    /// Queued events not yet drained
    pub fn pending_events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Route all queued events to an observer
    pub fn dispatch_events<O: SessionObserver + ?Sized>(&mut self, observer: &mut O) {
        for event in self.events.drain(..) {
            observer.on_event(&event);
        }
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        self.grid.write_codes(&mut out.cells);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.queue.peek();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval = self.drop_interval;
        out.phase = self.phase;
        out.pending_clear.clear();
        out.pending_clear.extend_from_slice(&self.pending_clear);
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.pieces_spawned = self.pieces_spawned;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::empty(self.queue.peek());
        self.snapshot_into(&mut s);
        s
    }
}
