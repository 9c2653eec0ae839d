//! Rules configuration - everything that is fixed at session start
//!
//! Two presets mirror the two rule variants: [`RulesConfig::classic`] (seven pieces, no
//! perfect clear bonus) and [`RulesConfig::extended`] (thirteen pieces, perfect clear bonus).
//! Every field can be overridden, and JSON documents may be partial: missing fields take
//! the classic defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::max_extent;
use crate::scoring::get_drop_interval;
use crate::types::{
    CatalogVariant, GRID_HEIGHT, GRID_WIDTH, KICK_OFFSETS, LEVEL_SPEEDS, LINES_PER_LEVEL,
    LINE_SCORES, MAX_GRID_DIM, MAX_LEVEL, PERFECT_CLEAR_BONUS, SOFT_DROP_POINTS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size {width}x{height} is out of range (1..={max} per side)")]
    GridSize { width: u8, height: u8, max: u8 },
    #[error("grid {width}x{height} cannot hold the largest {variant} piece (extent {extent})")]
    GridTooSmall {
        width: u8,
        height: u8,
        variant: &'static str,
        extent: u8,
    },
    #[error("lines_per_level must be at least 1")]
    ZeroLinesPerLevel,
    #[error("max_level must be at least 1")]
    ZeroMaxLevel,
    #[error("drop_intervals has {len} entries but max_level is {max_level}")]
    DropTableTooShort { len: usize, max_level: u32 },
    #[error("drop interval for level {level} is zero")]
    ZeroDropInterval { level: u32 },
    #[error("kick_offsets must not be empty")]
    NoKickOffsets,
    #[error("kick offset {offset} must be smaller in magnitude than grid width {width}")]
    KickOffsetRange { offset: i8, width: u8 },
    #[error("invalid rules JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub grid_width: u8,
    pub grid_height: u8,
    pub catalog: CatalogVariant,
    pub lines_per_level: u32,
    pub max_level: u32,
    /// Ticks per gravity step, indexed by `level - 1`
    pub drop_intervals: Vec<u32>,
    /// Base points for 1..=4 simultaneous lines
    pub line_scores: [u32; 4],
    pub perfect_clear_enabled: bool,
    pub perfect_clear_bonus: u32,
    /// Points per successful soft drop step
    pub soft_drop_points: u32,
    /// Points per cell travelled by a hard drop
    pub hard_drop_points: u32,
    /// Horizontal offsets tried in order when rotating
    pub kick_offsets: Vec<i8>,
    pub allow_pause_while_clearing: bool,
    /// Park in `Phase::LevelTransition` after a level-up until the presentation releases it
    pub hold_on_level_up: bool,
}

impl RulesConfig {
    /// Seven-piece rules without the perfect clear bonus
    pub fn classic() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            catalog: CatalogVariant::Classic,
            lines_per_level: LINES_PER_LEVEL,
            max_level: MAX_LEVEL,
            drop_intervals: LEVEL_SPEEDS.to_vec(),
            line_scores: LINE_SCORES,
            perfect_clear_enabled: false,
            perfect_clear_bonus: PERFECT_CLEAR_BONUS,
            soft_drop_points: SOFT_DROP_POINTS,
            hard_drop_points: 0,
            kick_offsets: KICK_OFFSETS.to_vec(),
            allow_pause_while_clearing: false,
            hold_on_level_up: false,
        }
    }

    /// Extended piece set with the perfect clear bonus
    pub fn extended() -> Self {
        Self {
            catalog: CatalogVariant::Extended,
            perfect_clear_enabled: true,
            ..Self::classic()
        }
    }

    pub fn for_variant(variant: CatalogVariant) -> Self {
        match variant {
            CatalogVariant::Classic => Self::classic(),
            CatalogVariant::Extended => Self::extended(),
        }
    }

    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.grid_width, self.grid_height);
        if w == 0 || h == 0 || w > MAX_GRID_DIM || h > MAX_GRID_DIM {
            return Err(ConfigError::GridSize {
                width: w,
                height: h,
                max: MAX_GRID_DIM,
            });
        }

        let extent = max_extent(self.catalog);
        if w < extent || h < extent {
            return Err(ConfigError::GridTooSmall {
                width: w,
                height: h,
                variant: self.catalog.as_str(),
                extent,
            });
        }

        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.max_level == 0 {
            return Err(ConfigError::ZeroMaxLevel);
        }
        if self.drop_intervals.len() < self.max_level as usize {
            return Err(ConfigError::DropTableTooShort {
                len: self.drop_intervals.len(),
                max_level: self.max_level,
            });
        }
        if let Some(idx) = self.drop_intervals.iter().position(|&t| t == 0) {
            return Err(ConfigError::ZeroDropInterval {
                level: idx as u32 + 1,
            });
        }
        if self.kick_offsets.is_empty() {
            return Err(ConfigError::NoKickOffsets);
        }
        if let Some(&offset) = self
            .kick_offsets
            .iter()
            .find(|&&k| k.unsigned_abs() >= w)
        {
            return Err(ConfigError::KickOffsetRange { offset, width: w });
        }

        Ok(())
    }

    /// Ticks per gravity step at `level`
    pub fn drop_interval(&self, level: u32) -> u32 {
        get_drop_interval(&self.drop_intervals, level)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        RulesConfig::classic().validate().unwrap();
        RulesConfig::extended().validate().unwrap();
    }

    #[test]
    fn test_presets_differ_only_in_variant_fields() {
        let classic = RulesConfig::classic();
        let extended = RulesConfig::extended();
        assert_eq!(extended.catalog, CatalogVariant::Extended);
        assert!(extended.perfect_clear_enabled);
        assert!(!classic.perfect_clear_enabled);
        assert_eq!(
            RulesConfig {
                catalog: CatalogVariant::Classic,
                perfect_clear_enabled: false,
                ..extended
            },
            classic
        );
    }

    #[test]
    fn test_rejects_zero_drop_interval() {
        let mut rules = RulesConfig::classic();
        rules.drop_intervals[3] = 0;
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::ZeroDropInterval { level: 4 })
        ));
    }

    #[test]
    fn test_rejects_short_drop_table() {
        let rules = RulesConfig {
            max_level: 12,
            ..RulesConfig::classic()
        };
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::DropTableTooShort { len: 10, max_level: 12 })
        ));
    }

    #[test]
    fn test_rejects_narrow_grid() {
        let rules = RulesConfig {
            grid_width: 3,
            ..RulesConfig::classic()
        };
        assert!(matches!(rules.validate(), Err(ConfigError::GridTooSmall { .. })));
    }

    #[test]
    fn test_rejects_kick_wider_than_grid() {
        let rules = RulesConfig {
            kick_offsets: vec![0, 1, -10],
            ..RulesConfig::classic()
        };
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::KickOffsetRange { offset: -10, width: 10 })
        ));
    }

    #[test]
    fn test_drop_interval_lookup() {
        let rules = RulesConfig::classic();
        assert_eq!(rules.drop_interval(1), 90);
        assert_eq!(rules.drop_interval(2), 80);
    }
}
