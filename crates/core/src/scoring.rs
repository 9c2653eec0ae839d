//! Scoring module - line clear points, perfect clear bonus, level progression
//!
//! All point values scale with the current 1-based level. The functions take the tables
//! they use as arguments so both rule variants share one implementation.

use crate::config::RulesConfig;

/// Score calculation result for one applied clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// `line_scores[lines - 1] * level`
    pub line_clear_score: u32,
    /// Perfect clear bonus (0 when not earned or disabled)
    pub perfect_clear_bonus: u32,
    pub total: u32,
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(table: &[u32; 4], lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > table.len() {
        return 0;
    }
    table[lines - 1].saturating_mul(level)
}

pub fn calculate_perfect_clear_bonus(bonus: u32, level: u32) -> u32 {
    bonus.saturating_mul(level)
}

/// Score a clear under the given rules
///
/// `perfect_clear` is whether the grid ended up empty; the bonus still only applies when the
/// rules enable it.
pub fn calculate_score(
    rules: &RulesConfig,
    lines: usize,
    level: u32,
    perfect_clear: bool,
) -> ScoreResult {
    let line_clear_score = calculate_line_score(&rules.line_scores, lines, level);
    let perfect_clear_bonus = if perfect_clear && rules.perfect_clear_enabled && lines > 0 {
        calculate_perfect_clear_bonus(rules.perfect_clear_bonus, level)
    } else {
        0
    };

    ScoreResult {
        line_clear_score,
        perfect_clear_bonus,
        total: line_clear_score.saturating_add(perfect_clear_bonus),
    }
}

/// Calculate drop score: `points` per cell travelled
pub fn calculate_drop_score(cells: u32, points: u32) -> u32 {
    cells.saturating_mul(points)
}

/// Level for a line total: `min(max_level, lines / lines_per_level + 1)`
pub fn calculate_level(total_lines: u32, lines_per_level: u32, max_level: u32) -> u32 {
    (total_lines / lines_per_level.max(1) + 1).min(max_level)
}

/// Ticks per gravity step at `level`, clamped to the table
pub fn get_drop_interval(table: &[u32], level: u32) -> u32 {
    let idx = (level.max(1) as usize - 1).min(table.len().saturating_sub(1));
    table.get(idx).copied().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LEVEL_SPEEDS, LINE_SCORES};

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(calculate_line_score(&LINE_SCORES, 1, 1), 40);
        assert_eq!(calculate_line_score(&LINE_SCORES, 2, 1), 100);
        assert_eq!(calculate_line_score(&LINE_SCORES, 3, 1), 300);
        assert_eq!(calculate_line_score(&LINE_SCORES, 4, 1), 1200);

        assert_eq!(calculate_line_score(&LINE_SCORES, 1, 3), 120);
        assert_eq!(calculate_line_score(&LINE_SCORES, 2, 3), 300);
        assert_eq!(calculate_line_score(&LINE_SCORES, 3, 3), 900);
        assert_eq!(calculate_line_score(&LINE_SCORES, 4, 3), 3600);
    }

    #[test]
    fn test_out_of_table_line_counts_score_nothing() {
        assert_eq!(calculate_line_score(&LINE_SCORES, 0, 5), 0);
        assert_eq!(calculate_line_score(&LINE_SCORES, 5, 5), 0);
    }

    #[test]
    fn test_perfect_clear_only_when_enabled() {
        let classic = RulesConfig::classic();
        let extended = RulesConfig::extended();

        let r = calculate_score(&classic, 1, 2, true);
        assert_eq!(r.perfect_clear_bonus, 0);
        assert_eq!(r.total, 80);

        let r = calculate_score(&extended, 1, 2, true);
        assert_eq!(r.line_clear_score, 80);
        assert_eq!(r.perfect_clear_bonus, 20_000);
        assert_eq!(r.total, 20_080);

        let r = calculate_score(&extended, 2, 2, false);
        assert_eq!(r.perfect_clear_bonus, 0);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(10, 1), 10);
        assert_eq!(calculate_drop_score(10, 0), 0);
        assert_eq!(calculate_drop_score(10, 2), 20);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0, 10, 10), 1);
        assert_eq!(calculate_level(9, 10, 10), 1);
        assert_eq!(calculate_level(10, 10, 10), 2);
        assert_eq!(calculate_level(29, 10, 10), 3);
        assert_eq!(calculate_level(500, 10, 10), 10);
        assert_eq!(calculate_level(4, 2, 10), 3);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval(&LEVEL_SPEEDS, 1), 90);
        assert_eq!(get_drop_interval(&LEVEL_SPEEDS, 2), 80);
        assert_eq!(get_drop_interval(&LEVEL_SPEEDS, 10), 6);
        assert_eq!(get_drop_interval(&LEVEL_SPEEDS, 25), 6);
    }
}
