use retro_blocks_core::Grid;

/// Classic stacking features of a locked grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridFeatures {
    pub max_h: u32,
    pub agg_h: u32,
    /// Empty cells with a filled cell somewhere above them in the same column
    pub holes: u32,
    /// Sum of absolute height differences between neighbouring columns
    pub bump: u32,
}

/// Compute features on a locked grid in one pass over columns and one over rows
pub fn compute_grid_features(grid: &Grid) -> GridFeatures {
    let mut features = GridFeatures::default();
    let mut prev: Option<u32> = None;

    for x in 0..grid.width() as usize {
        let h = grid.column_height(x) as u32;
        features.max_h = features.max_h.max(h);
        features.agg_h += h;
        if let Some(p) = prev {
            features.bump += p.abs_diff(h);
        }
        prev = Some(h);
    }

    // Top to bottom: a column is covered once any filled cell has been seen in it
    let mut covered = vec![false; grid.width() as usize];
    for row in grid.rows() {
        for (cell, seen) in row.iter().zip(covered.iter_mut()) {
            match cell {
                Some(_) => *seen = true,
                None if *seen => features.holes += 1,
                None => {}
            }
        }
    }

    features
}
