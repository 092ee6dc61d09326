use crate::error::{LifeError, Result};
use crate::grid::{Cell, Grid};

/// A named pattern as offsets of its live cells relative to its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// The number of rows and columns the pattern spans.
    pub fn size(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(rows, cols), &(row, col)| {
                (rows.max(row + 1), cols.max(col + 1))
            })
    }
}

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
};

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
};

#[rustfmt::skip]
pub const PULSAR: Pattern = Pattern {
    name: "Pulsar",
    cells: &[
        (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
        (2, 0), (2, 5), (2, 7), (2, 12),
        (3, 0), (3, 5), (3, 7), (3, 12),
        (4, 0), (4, 5), (4, 7), (4, 12),
        (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
        (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
        (8, 0), (8, 5), (8, 7), (8, 12),
        (9, 0), (9, 5), (9, 7), (9, 12),
        (10, 0), (10, 5), (10, 7), (10, 12),
        (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
    ],
};

pub const PATTERNS: &[Pattern] = &[BLOCK, BLINKER, TOAD, BEACON, GLIDER, R_PENTOMINO, PULSAR];

/// Looks up a pattern by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

/// Returns a copy of `grid` with the live cells of `pattern` placed at `origin`.
/// Cells not covered by the pattern keep their state and the input grid is left untouched.
///
/// Fails with `OutOfBounds` if any cell of the pattern lands outside of the grid.
pub fn place_pattern(grid: &Grid, pattern: &Pattern, origin: (usize, usize)) -> Result<Grid> {
    let (row, col) = origin;
    let mut next = grid.clone();

    for &(d_row, d_col) in pattern.cells {
        let (Some(cell_row), Some(cell_col)) = (row.checked_add(d_row), col.checked_add(d_col))
        else {
            return Err(LifeError::OutOfBounds {
                row: row.saturating_add(d_row),
                col: col.saturating_add(d_col),
                rows: grid.rows(),
                cols: grid.cols(),
            });
        };
        next.set(cell_row, cell_col, Cell::Alive)?;
    }

    Ok(next)
}

/// The origin that puts `pattern` at the centre of `grid`.
pub fn centered_origin(grid: &Grid, pattern: &Pattern) -> (usize, usize) {
    let (rows, cols) = pattern.size();
    (
        grid.rows().saturating_sub(rows) / 2,
        grid.cols().saturating_sub(cols) / 2,
    )
}

/// Places `pattern` at the centre of `grid`.
pub fn place_centered(grid: &Grid, pattern: &Pattern) -> Result<Grid> {
    place_pattern(grid, pattern, centered_origin(grid, pattern))
}
