//! Grid module - the fixed-size cell matrix
//!
//! Each cell is either empty or holds the kind of the piece that filled it.
//! Cells live in a flat row-major vector (`y * width + x`); dimensions are fixed at creation.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom (row 0 is the top).
//!
//! The grid only answers for in-range cells. Boundary handling for falling pieces (walls,
//! floor, rows above the visible area) belongs to the piece controller.

use crate::catalog::Shape;
use crate::types::{cell_code, Cell, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u8, height: u8) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a grid from rows of cells (top row first)
    ///
    /// # Panics
    ///
    /// Panics if there are no rows, a row is empty, or rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        assert!(height > 0, "grid needs at least one row");
        let width = rows[0].len();
        assert!(width > 0, "grid rows must be non-empty");
        assert!(
            rows.iter().all(|row| row.len() == width),
            "grid rows must all have the same width"
        );
        assert!(width <= u8::MAX as usize && height <= u8::MAX as usize);

        Self {
            width: width as u8,
            height: height as u8,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y); `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Mark (x, y) as filled by `kind`
    pub fn fill(&mut self, x: i8, y: i8, kind: PieceKind) -> bool {
        self.set(x, y, Some(kind))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Indices of all completely filled rows, top to bottom
    pub fn find_complete_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove the given rows and insert as many empty rows at the top
    ///
    /// Row order in `rows` does not matter and duplicates count once. The relative order of
    /// all remaining rows is preserved. Returns the number of rows removed.
    ///
    /// # Panics
    ///
    /// Panics if any index is outside the grid.
    pub fn remove_rows(&mut self, rows: &[usize]) -> usize {
        let height = self.height as usize;
        let width = self.width as usize;

        let mut remove = vec![false; height];
        for &y in rows {
            assert!(y < height, "row {} out of range (height {})", y, height);
            remove[y] = true;
        }

        // Scan bottom to top, compacting kept rows downwards
        let mut write_y = height;
        for read_y in (0..height).rev() {
            if remove[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        // write_y now equals the number of removed rows
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        write_y
    }

    /// True iff no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Write a piece's occupied cells into the grid at anchor (x, y)
    ///
    /// Cells above the top row are dropped silently. Returns how many cells were written.
    pub fn merge_piece(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.cells() {
            let py = y + dy;
            if py < 0 {
                continue;
            }
            if self.fill(x + dx, py, kind) {
                written += 1;
            }
        }
        written
    }

    /// Height of column `x` measured from the floor (0 for an empty column)
    pub fn column_height(&self, x: usize) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        (0..height)
            .find(|&y| self.cells[y * width + x].is_some())
            .map_or(0, |top| height - top)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write cell codes (0 = empty, 1 + piece id) into `out`, reusing its allocation
    pub fn write_codes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|&cell| cell_code(cell)));
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new(10, 20);
        grid.fill(0, 0, PieceKind::I);
        grid.fill(5, 10, PieceKind::T);

        assert_eq!(grid.cells[0], Some(PieceKind::I));
        assert_eq!(grid.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_remove_rows_compacts_downwards() {
        let mut grid = Grid::new(3, 4);
        grid.fill(0, 0, PieceKind::I);
        grid.fill(1, 2, PieceKind::O);

        for x in 0..3 {
            grid.fill(x, 1, PieceKind::T);
            grid.fill(x, 3, PieceKind::T);
        }

        assert_eq!(grid.remove_rows(&[3, 1]), 2);
        assert!(grid.row(0).iter().all(|c| c.is_none()));
        assert!(grid.row(1).iter().all(|c| c.is_none()));
        assert_eq!(grid.row(2), &[Some(PieceKind::I), None, None]);
        assert_eq!(grid.row(3), &[None, Some(PieceKind::O), None]);
    }

    #[test]
    fn test_column_height() {
        let mut grid = Grid::new(4, 6);
        assert_eq!(grid.column_height(0), 0);
        grid.fill(0, 5, PieceKind::I);
        assert_eq!(grid.column_height(0), 1);
        grid.fill(0, 2, PieceKind::I);
        assert_eq!(grid.column_height(0), 4);
    }
}
