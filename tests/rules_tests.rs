//! Catalog, rules configuration and scoring through the public API

use retro_blocks::core::catalog::catalog;
use retro_blocks::core::scoring::{calculate_level, calculate_line_score};
use retro_blocks::core::{spawn_shape, ConfigError, RulesConfig, Session};
use retro_blocks::types::{CatalogVariant, PieceKind, LINE_SCORES};

#[test]
fn test_classic_catalog_has_seven_four_cell_pieces() {
    let defs: Vec<_> = catalog(CatalogVariant::Classic).collect();
    assert_eq!(defs.len(), 7);
    for def in &defs {
        assert_eq!(def.shape.cell_count(), 4, "{:?}", def.kind);
        assert!(def.color < 7);
    }
}

#[test]
fn test_extended_catalog_adds_six_shapes() {
    let kinds: Vec<_> = catalog(CatalogVariant::Extended).map(|d| d.kind).collect();
    assert_eq!(kinds.len(), 13);
    assert!(kinds.contains(&PieceKind::SmallL));
    assert!(kinds.contains(&PieceKind::TExtended));
    assert!(!catalog(CatalogVariant::Classic).any(|d| d.kind == PieceKind::U));
}

#[test]
fn test_shape_matrices() {
    assert_eq!(spawn_shape(PieceKind::I).to_matrix(), vec![vec![1, 1, 1, 1]]);
    assert_eq!(
        spawn_shape(PieceKind::U).to_matrix(),
        vec![vec![1, 0, 1], vec![1, 1, 1]]
    );
    assert_eq!(
        spawn_shape(PieceKind::TExtended).to_matrix(),
        vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]
    );
}

#[test]
fn test_four_rotations_restore_every_shape() {
    for def in catalog(CatalogVariant::Extended) {
        let full_turn = def.shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(full_turn, def.shape, "{:?}", def.kind);
        let quarter = def.shape.rotated(1);
        assert_eq!(quarter.rows(), def.shape.cols());
        assert_eq!(quarter.cols(), def.shape.rows());
        assert_eq!(quarter.cell_count(), def.shape.cell_count());
    }
}

#[test]
fn test_o_rotation_is_identity() {
    let o = spawn_shape(PieceKind::O);
    assert_eq!(o.rotated_cw(), o);
}

#[test]
fn test_partial_rules_json_uses_classic_defaults() {
    let rules = RulesConfig::from_json(r#"{"catalog": "extended", "lines_per_level": 5}"#).unwrap();
    assert_eq!(rules.catalog, CatalogVariant::Extended);
    assert_eq!(rules.lines_per_level, 5);
    assert!(!rules.perfect_clear_enabled);
    assert_eq!(rules.grid_width, 10);
    assert_eq!(rules.line_scores, LINE_SCORES);
}

#[test]
fn test_rules_json_round_trip() {
    let rules = RulesConfig {
        grid_width: 12,
        hard_drop_points: 2,
        ..RulesConfig::extended()
    };
    let json = serde_json::to_string(&rules).unwrap();
    assert_eq!(RulesConfig::from_json(&json).unwrap(), rules);
}

#[test]
fn test_invalid_rules_are_rejected() {
    assert!(matches!(
        RulesConfig::from_json("{not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        RulesConfig::from_json(r#"{"lines_per_level": 0}"#),
        Err(ConfigError::ZeroLinesPerLevel)
    ));
    assert!(matches!(
        RulesConfig::from_json(r#"{"kick_offsets": []}"#),
        Err(ConfigError::NoKickOffsets)
    ));
    assert!(matches!(
        RulesConfig::from_json(r#"{"kick_offsets": [0, 127]}"#),
        Err(ConfigError::KickOffsetRange { offset: 127, width: 10 })
    ));
    assert!(matches!(
        RulesConfig::from_json(r#"{"grid_width": 0}"#),
        Err(ConfigError::GridSize { .. })
    ));
}

#[test]
fn test_session_rejects_invalid_rules() {
    let rules = RulesConfig {
        max_level: 0,
        ..RulesConfig::classic()
    };
    let err = Session::new(rules, 1).unwrap_err();
    assert_eq!(err.to_string(), "max_level must be at least 1");
}

#[test]
fn test_wide_kicks_fit_wide_grids() {
    let rules = RulesConfig::from_json(r#"{"grid_width": 40, "kick_offsets": [0, 39, -39]}"#)
        .unwrap();
    let mut session = Session::new(rules, 1).unwrap();
    session.start();
    assert!(session.rotate());
}

#[test]
fn test_custom_grid_spawns_centered() {
    let rules = RulesConfig {
        grid_width: 7,
        grid_height: 12,
        ..RulesConfig::classic()
    };
    let mut session = Session::new(rules, 4).unwrap();
    session.start();

    let active = session.active().unwrap();
    let expected = 7 / 2 - (active.shape.cols() / 2) as i8;
    assert_eq!(active.x, expected);
    assert_eq!(session.snapshot().cells.len(), 84);
}

#[test]
fn test_score_table_scales_with_level() {
    for level in 1..=10 {
        assert_eq!(calculate_line_score(&LINE_SCORES, 4, level), 1200 * level);
    }
    assert_eq!(calculate_level(95, 10, 10), 10);
    assert_eq!(calculate_level(19, 10, 10), 2);
}
