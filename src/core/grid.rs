//! Grid module - owns the play field
//!
//! The grid is a `width x height` field of cells stored as a flat array,
//! row-major (y * width + x). Coordinates: (x, y) with x growing left to
//! right and y growing top to bottom, so row `height - 1` is the floor.
//!
//! Match detection (`mark_lines_to_remove`) and gravity (`settle`) are the
//! two halves of the cascade: marking flags every tile that belongs to a
//! straight line of three or more same-colored tiles, settling removes the
//! marks and compacts each column downward. Running them in a loop until
//! marking finds nothing is how a lock-in resolves combos.

use crate::core::piece::Piece;
use crate::types::Cell;

/// The field of play, holding the tiles that have already fallen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid.
    ///
    /// Dimensions must be at least 1x1; anything else is a caller defect.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width >= 1 && height >= 1, "grid dimensions must be >= 1");
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Build a grid from rows listed top to bottom, the way a field looks
    /// on screen. Handy for pre-filled wells and test fixtures.
    ///
    /// All rows must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert!(!rows.is_empty(), "grid dimensions must be >= 1");
        let width = rows[0].len();
        assert!(rows.iter().all(|row| row.len() == width && width > 0));

        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                grid.cells[y * width + x] = *cell;
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounds-checked read; `None` when (x, y) is outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether (x, y) is inside the grid and empty.
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        matches!(self.cell(x, y), Some(Cell::Empty))
    }

    /// Set a cell. Returns false if (x, y) is out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Unchecked read with in-range coordinates; scan loops only.
    fn at(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    fn put(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.width + x] = cell;
    }

    /// Write the piece's tiles into the grid at (x, y), (x, y-1), (x, y-2).
    ///
    /// Rows above the grid top are skipped; those tiles are lost, which only
    /// happens on the game-over boundary.
    pub fn consolidate(&mut self, piece: &Piece) {
        for (i, &tile) in piece.tiles.iter().enumerate() {
            let y = piece.y - i as i32;
            if y < 0 {
                break;
            }
            self.set(piece.x, y, Cell::Tile(tile));
        }
    }

    /// Scan the whole grid for lines of three or more same-colored tiles in
    /// any of the four straight directions and flag every tile that belongs
    /// to one as `Marked`. Returns how many cells were newly marked.
    ///
    /// Overlapping lines share marks; a cell is counted once no matter how
    /// many lines run through it. The marked set does not depend on scan
    /// order: comparisons always read live tiles, marks are applied after
    /// the full scan.
    pub fn mark_lines_to_remove(&mut self) -> usize {
        let mut lines: Vec<(usize, usize)> = Vec::new();
        self.check_horizontal_lines(&mut lines);
        self.check_vertical_lines(&mut lines);
        self.check_diagonal_lines(&mut lines);

        let mut marked = 0;
        for (x, y) in lines {
            if self.at(x, y) != Cell::Marked {
                self.put(x, y, Cell::Marked);
                marked += 1;
            }
        }
        marked
    }

    fn check_horizontal_lines(&self, lines: &mut Vec<(usize, usize)>) {
        if self.width < 3 {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width - 2 {
                let Some(color) = self.at(x, y).tile() else {
                    continue;
                };
                if self.at(x + 1, y).tile() == Some(color)
                    && self.at(x + 2, y).tile() == Some(color)
                {
                    lines.extend([(x, y), (x + 1, y), (x + 2, y)]);
                }
            }
        }
    }

    fn check_vertical_lines(&self, lines: &mut Vec<(usize, usize)>) {
        if self.height < 3 {
            return;
        }
        for x in 0..self.width {
            for y in 2..self.height {
                let Some(color) = self.at(x, y).tile() else {
                    continue;
                };
                if self.at(x, y - 1).tile() == Some(color)
                    && self.at(x, y - 2).tile() == Some(color)
                {
                    lines.extend([(x, y), (x, y - 1), (x, y - 2)]);
                }
            }
        }
    }

    fn check_diagonal_lines(&self, lines: &mut Vec<(usize, usize)>) {
        if self.width < 3 || self.height < 3 {
            return;
        }
        for y in 2..self.height {
            // Rising lines, read from the lower-left tile upward
            for x in 0..self.width - 2 {
                let Some(color) = self.at(x, y).tile() else {
                    continue;
                };
                if self.at(x + 1, y - 1).tile() == Some(color)
                    && self.at(x + 2, y - 2).tile() == Some(color)
                {
                    lines.extend([(x, y), (x + 1, y - 1), (x + 2, y - 2)]);
                }
            }
            // Falling lines, read from the lower-right tile upward
            for x in 2..self.width {
                let Some(color) = self.at(x, y).tile() else {
                    continue;
                };
                if self.at(x - 1, y - 1).tile() == Some(color)
                    && self.at(x - 2, y - 2).tile() == Some(color)
                {
                    lines.extend([(x, y), (x - 1, y - 1), (x - 2, y - 2)]);
                }
            }
        }
    }

    /// Clear marked cells and compact every column downward.
    ///
    /// Surviving tiles keep their relative vertical order; the vacated top
    /// of each column becomes empty. This is the only place marks are
    /// cleared. Columns never hold a tile above an empty gap outside of a
    /// cascade, so the per-column scan stops at the first empty cell.
    pub fn settle(&mut self) {
        for x in 0..self.width {
            let mut gap = 0;
            for y in (0..self.height).rev() {
                match self.at(x, y) {
                    Cell::Marked => {
                        self.put(x, y, Cell::Empty);
                        gap += 1;
                    }
                    Cell::Empty => break,
                    tile => {
                        if gap > 0 {
                            self.put(x, y + gap, tile);
                            self.put(x, y, Cell::Empty);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell::{Empty as E, Marked as M};

    fn t(color: u8) -> Cell {
        Cell::Tile(color)
    }

    fn grid_of(rows: &[&[Cell]]) -> Grid {
        Grid::from_rows(rows.iter().map(|row| row.to_vec()).collect())
    }

    #[test]
    fn marks_horizontal_line() {
        let mut grid = grid_of(&[
            &[E, E, E, E, E, E],
            &[E, E, E, E, E, E],
            &[E, t(1), t(1), t(1), E, E],
        ]);

        assert_eq!(grid.mark_lines_to_remove(), 3);
        assert_eq!(grid.cell(1, 2), Some(M));
        assert_eq!(grid.cell(2, 2), Some(M));
        assert_eq!(grid.cell(3, 2), Some(M));
        assert_eq!(grid.cell(0, 2), Some(E));
    }

    #[test]
    fn marks_vertical_line() {
        let mut grid = grid_of(&[
            &[t(4), E, E],
            &[t(4), E, E],
            &[t(4), t(2), E],
        ]);

        assert_eq!(grid.mark_lines_to_remove(), 3);
        assert_eq!(grid.cell(0, 0), Some(M));
        assert_eq!(grid.cell(0, 1), Some(M));
        assert_eq!(grid.cell(0, 2), Some(M));
        assert_eq!(grid.cell(1, 2), Some(t(2)));
    }

    #[test]
    fn marks_both_diagonals() {
        // Mirrors the original engine's diagonal fixture
        let mut grid = grid_of(&[
            &[t(1), E, E, E, E, t(1)],
            &[t(2), t(1), E, E, t(1), t(2)],
            &[t(3), t(2), t(1), E, t(2), t(3)],
        ]);

        assert_eq!(grid.mark_lines_to_remove(), 6);
        let expected = grid_of(&[
            &[M, E, E, E, E, M],
            &[t(2), M, E, E, M, t(2)],
            &[t(3), t(2), M, E, M, t(3)],
        ]);
        assert_eq!(grid, expected);
    }

    #[test]
    fn line_longer_than_three_is_fully_marked() {
        let mut grid = grid_of(&[&[t(5), t(5), t(5), t(5), t(5)]]);

        assert_eq!(grid.mark_lines_to_remove(), 5);
        for x in 0..5 {
            assert_eq!(grid.cell(x, 0), Some(M));
        }
    }

    #[test]
    fn overlapping_lines_count_each_cell_once() {
        // A plus shape of 3s: one horizontal and one vertical line sharing
        // the center cell. 5 distinct cells, not 6.
        let mut grid = grid_of(&[
            &[E, t(3), E],
            &[t(3), t(3), t(3)],
            &[E, t(3), E],
        ]);

        assert_eq!(grid.mark_lines_to_remove(), 5);
    }

    #[test]
    fn no_match_marks_nothing_and_mutates_nothing() {
        let mut grid = grid_of(&[
            &[E, E, E, E, E, E],
            &[t(1), t(2), E, E, t(3), t(4)],
            &[t(2), t(1), t(5), E, t(4), t(3)],
        ]);
        let before = grid.clone();

        assert_eq!(grid.mark_lines_to_remove(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn mixed_colors_do_not_match() {
        let mut grid = grid_of(&[&[t(1), t(2), t(1), t(2), t(1), t(2)]]);
        assert_eq!(grid.mark_lines_to_remove(), 0);
    }

    #[test]
    fn settle_drops_tiles_over_marked_cells() {
        let mut grid = grid_of(&[
            &[t(6), E, E],
            &[M, E, E],
            &[M, t(2), E],
        ]);

        grid.settle();

        let expected = grid_of(&[
            &[E, E, E],
            &[E, E, E],
            &[t(6), t(2), E],
        ]);
        assert_eq!(grid, expected);
    }

    #[test]
    fn settle_preserves_column_order() {
        let mut grid = grid_of(&[
            &[t(1), E],
            &[t(2), E],
            &[M, E],
            &[t(3), E],
        ]);

        grid.settle();

        let expected = grid_of(&[
            &[E, E],
            &[t(1), E],
            &[t(2), E],
            &[t(3), E],
        ]);
        assert_eq!(grid, expected);
    }

    #[test]
    fn settle_clears_all_marks() {
        let mut grid = grid_of(&[
            &[M, M, M],
            &[M, M, M],
            &[M, M, M],
        ]);

        grid.settle();
        assert_eq!(grid, Grid::new(3, 3));
    }

    #[test]
    fn cascade_terminates_and_empties_a_uniform_grid() {
        let mut grid = grid_of(&[
            &[t(1), t(1), t(1)],
            &[t(1), t(1), t(1)],
            &[t(1), t(1), t(1)],
        ]);

        let mut passes = 0;
        while grid.mark_lines_to_remove() > 0 {
            grid.settle();
            passes += 1;
            assert!(passes <= 9, "cascade did not terminate");
        }
        assert_eq!(grid, Grid::new(3, 3));
    }

    #[test]
    fn consolidate_writes_piece_tiles_bottom_up() {
        let mut grid = Grid::new(6, 13);
        let piece = Piece {
            tiles: [1, 2, 3],
            x: 3,
            y: 12,
        };

        grid.consolidate(&piece);

        assert_eq!(grid.cell(3, 12), Some(t(1)));
        assert_eq!(grid.cell(3, 11), Some(t(2)));
        assert_eq!(grid.cell(3, 10), Some(t(3)));
    }

    #[test]
    fn consolidate_skips_rows_above_the_top() {
        let mut grid = Grid::new(6, 13);
        let piece = Piece {
            tiles: [4, 5, 6],
            x: 2,
            y: 1,
        };

        grid.consolidate(&piece);

        assert_eq!(grid.cell(2, 1), Some(t(4)));
        assert_eq!(grid.cell(2, 0), Some(t(5)));
        // tiles[2] would land at y = -1 and is lost
        for y in 2..13 {
            assert_eq!(grid.cell(2, y), Some(E));
        }
    }

    #[test]
    fn cell_is_bounds_checked() {
        let grid = Grid::new(4, 4);
        assert_eq!(grid.cell(-1, 0), None);
        assert_eq!(grid.cell(0, -1), None);
        assert_eq!(grid.cell(4, 0), None);
        assert_eq!(grid.cell(0, 4), None);
        assert_eq!(grid.cell(3, 3), Some(E));
    }
}
