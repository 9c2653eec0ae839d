//! Grid tests

use retro_blocks::core::{spawn_shape, Grid};
use retro_blocks::types::{PieceKind, GRID_HEIGHT, GRID_WIDTH};

fn fill_row(grid: &mut Grid, y: i8, kind: PieceKind) {
    for x in 0..grid.width() as i8 {
        grid.fill(x, y, kind);
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), GRID_HEIGHT);

    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            assert_eq!(grid.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
    assert!(grid.is_empty());
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(GRID_WIDTH as i8, 0), None);
    assert_eq!(grid.get(0, GRID_HEIGHT as i8), None);
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);

    assert!(grid.set(5, 10, Some(PieceKind::T)));
    assert_eq!(grid.get(5, 10), Some(Some(PieceKind::T)));
    assert!(grid.is_occupied(5, 10));

    assert!(grid.set(5, 10, None));
    assert_eq!(grid.get(5, 10), Some(None));
    assert!(!grid.is_occupied(5, 10));

    assert!(!grid.set(-1, 0, Some(PieceKind::T)));
    assert!(!grid.set(0, GRID_HEIGHT as i8, Some(PieceKind::T)));
    assert!(!grid.is_occupied(-1, 0));
}

#[test]
fn test_from_rows() {
    let grid = Grid::from_rows(vec![
        vec![None, Some(PieceKind::U), None],
        vec![Some(PieceKind::I), Some(PieceKind::I), Some(PieceKind::I)],
    ]);
    assert_eq!((grid.width(), grid.height()), (3, 2));
    assert_eq!(grid.get(1, 0), Some(Some(PieceKind::U)));
    assert_eq!(grid.find_complete_rows(), vec![1]);
}

#[test]
fn test_merge_piece() {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    let shape = spawn_shape(PieceKind::O);

    assert_eq!(grid.merge_piece(&shape, 3, 5, PieceKind::O), 4);
    assert_eq!(grid.get(3, 5), Some(Some(PieceKind::O)));
    assert_eq!(grid.get(4, 5), Some(Some(PieceKind::O)));
    assert_eq!(grid.get(3, 6), Some(Some(PieceKind::O)));
    assert_eq!(grid.get(4, 6), Some(Some(PieceKind::O)));
}

#[test]
fn test_merge_piece_above_top_drops_hidden_cells() {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    let shape = spawn_shape(PieceKind::O);

    assert_eq!(grid.merge_piece(&shape, 0, -1, PieceKind::O), 2);
    assert_eq!(grid.occupied_count(), 2);
    assert!(grid.is_occupied(0, 0));
    assert!(grid.is_occupied(1, 0));
}

#[test]
fn test_is_row_full() {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    assert!(!grid.is_row_full(5));

    fill_row(&mut grid, 5, PieceKind::T);
    assert!(grid.is_row_full(5));

    for x in 0..GRID_WIDTH as i8 - 1 {
        grid.fill(x, 6, PieceKind::I);
    }
    assert!(!grid.is_row_full(6));
    assert!(!grid.is_row_full(GRID_HEIGHT as usize));
}

#[test]
fn test_remove_single_row() {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    fill_row(&mut grid, 5, PieceKind::T);
    grid.fill(0, 3, PieceKind::I);
    grid.fill(1, 4, PieceKind::O);

    assert_eq!(grid.remove_rows(&[5]), 1);

    assert_eq!(grid.get(1, 5), Some(Some(PieceKind::O)));
    assert_eq!(grid.get(0, 4), Some(Some(PieceKind::I)));
    assert_eq!(grid.get(0, 3), Some(None));
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_remove_bottom_rows() {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    fill_row(&mut grid, 18, PieceKind::I);
    fill_row(&mut grid, 19, PieceKind::O);
    grid.fill(0, 17, PieceKind::T);

    let rows = grid.find_complete_rows();
    assert_eq!(rows, vec![18, 19]);
    assert_eq!(grid.remove_rows(&rows), 2);

    assert_eq!(grid.get(0, 19), Some(Some(PieceKind::T)));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_remove_non_adjacent_rows_keeps_order() {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    fill_row(&mut grid, 5, PieceKind::T);
    fill_row(&mut grid, 10, PieceKind::I);
    fill_row(&mut grid, 15, PieceKind::O);

    grid.fill(0, 4, PieceKind::J);
    grid.fill(0, 9, PieceKind::L);
    grid.fill(0, 14, PieceKind::S);

    // Unordered with a duplicate: same result as the sorted set
    assert_eq!(grid.remove_rows(&[15, 5, 10, 5]), 3);

    assert_eq!(grid.get(0, 7), Some(Some(PieceKind::J)));
    assert_eq!(grid.get(0, 11), Some(Some(PieceKind::L)));
    assert_eq!(grid.get(0, 15), Some(Some(PieceKind::S)));
    assert_eq!(grid.occupied_count(), 3);
}

#[test]
#[should_panic]
fn test_remove_out_of_range_row_panics() {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    grid.remove_rows(&[GRID_HEIGHT as usize]);
}

#[test]
fn test_grid_clear() {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    fill_row(&mut grid, 5, PieceKind::T);
    grid.clear();
    assert!(grid.is_empty());
}
