//! Session events and observer hooks
//!
//! The session never calls out while it is mutating state. Every signal is queued as a
//! [`SessionEvent`] and handed to collaborators afterwards, either as a plain list
//! (`Session::drain_events`) or through the [`SessionObserver`] hook methods
//! (`Session::dispatch_events`).

use serde::Serialize;

use crate::types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new active piece entered the grid
    Spawned { kind: PieceKind, next: PieceKind },
    /// Active piece shifted one column (`dx` is -1 or 1)
    Moved { dx: i8 },
    /// Active piece rotated using the given kick offset
    Rotated { kick: i8 },
    /// Player soft drop moved the piece down one row
    SoftDropped,
    HardDropped { distance: u32 },
    /// Active piece merged into the grid with its anchor at (x, y)
    Locked { kind: PieceKind, x: i8, y: i8 },
    /// Rows are complete; the session waits for `complete_clear`
    LineClearStarted { rows: Vec<usize> },
    /// Rows were removed and scored
    LinesCleared {
        rows: Vec<usize>,
        score: u32,
        total_lines: u32,
    },
    /// Every pending row was found incomplete at removal time
    ClearAborted,
    PerfectClear { bonus: u32 },
    LevelUp { level: u32, drop_interval: u32 },
    Paused,
    Resumed,
    GameOver { score: u32, level: u32, lines: u32 },
}

/// Hooks for presentation collaborators (sound, animation, UI)
///
/// All methods default to no-ops. `on_event` sees every event first and then routes to the
/// specific hooks; override it to observe everything.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Moved { .. } => self.on_move(),
            SessionEvent::LineClearStarted { rows } => self.on_line_clear_start(rows),
            SessionEvent::LevelUp { level, .. } => self.on_level_up(*level),
            SessionEvent::PerfectClear { bonus } => self.on_perfect_clear(*bonus),
            SessionEvent::GameOver { .. } => self.on_game_over(),
            _ => {}
        }
    }

    /// A successful horizontal move
    fn on_move(&mut self) {}

    /// Rows about to be removed; call `Session::complete_clear` when the animation is done
    fn on_line_clear_start(&mut self, _rows: &[usize]) {}

    fn on_level_up(&mut self, _new_level: u32) {}

    fn on_perfect_clear(&mut self, _bonus: u32) {}

    fn on_game_over(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        moves: u32,
        clears: Vec<Vec<usize>>,
        levels: Vec<u32>,
        game_overs: u32,
    }

    impl SessionObserver for Recorder {
        fn on_move(&mut self) {
            self.moves += 1;
        }

        fn on_line_clear_start(&mut self, rows: &[usize]) {
            self.clears.push(rows.to_vec());
        }

        fn on_level_up(&mut self, new_level: u32) {
            self.levels.push(new_level);
        }

        fn on_game_over(&mut self) {
            self.game_overs += 1;
        }
    }

    #[test]
    fn test_default_routing() {
        let mut rec = Recorder::default();
        let events = [
            SessionEvent::Moved { dx: 1 },
            SessionEvent::Moved { dx: -1 },
            SessionEvent::Rotated { kick: 0 },
            SessionEvent::LineClearStarted { rows: vec![18, 19] },
            SessionEvent::LevelUp {
                level: 2,
                drop_interval: 80,
            },
            SessionEvent::GameOver {
                score: 0,
                level: 2,
                lines: 10,
            },
        ];
        for event in &events {
            rec.on_event(event);
        }

        assert_eq!(rec.moves, 2);
        assert_eq!(rec.clears, vec![vec![18, 19]]);
        assert_eq!(rec.levels, vec![2]);
        assert_eq!(rec.game_overs, 1);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&SessionEvent::Spawned {
            kind: PieceKind::SmallL,
            next: PieceKind::I,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"spawned","kind":"small_l","next":"i"}"#);
    }
}
