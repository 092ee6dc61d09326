use crate::error::{LifeError, Result};
use regex::Regex;
use std::fmt;

/// The state of a single cell.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Returns the opposite state.
    pub fn toggled(self) -> Cell {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }

    pub fn from_char(value: char) -> Option<Cell> {
        match value {
            '.' => Some(Cell::Dead),
            // Accept the common plaintext conventions for live cells
            '*' | '#' | 'O' => Some(Cell::Alive),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Dead => '.',
            Cell::Alive => '*',
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// A fixed-size grid of cells stored in row-major order.
///
/// The dimensions never change after construction. Coordinates are zero-based
/// `(row, col)` pairs and positions outside the grid are never wrapped around.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell is dead.
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Grid {
        assert!(
            rows > 0 && cols > 0,
            "grid dimensions must be positive, got {}x{}",
            rows,
            cols
        );

        Grid {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        }
    }

    /// Creates a grid from nested rows of cells.
    ///
    /// # Panics
    /// If there are no rows, or the rows do not all have the same non-zero length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Grid {
        let cols = rows.first().map_or(0, |row| row.len());
        assert!(
            rows.iter().all(|row| row.len() == cols),
            "every row of a grid must have the same length"
        );

        let mut grid = Grid::new(rows.len(), cols);
        grid.cells = rows.into_iter().flatten().collect();
        grid
    }

    /// Parses a grid from its text representation.
    ///
    /// ```text
    /// rows 3
    /// cols 3
    /// m .*.
    /// m .*.
    /// m .*.
    /// ```
    pub fn parse(contents: &str) -> Result<Grid> {
        let metadata = Regex::new(r"rows (\d+)\s+cols (\d+)")
            .expect("valid regex")
            .captures(contents)
            .ok_or_else(|| LifeError::Parse("missing `rows` and `cols` header".to_string()))?;

        let rows: usize = parse_dimension(&metadata[1])?;
        let cols: usize = parse_dimension(&metadata[2])?;
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimensions { rows, cols });
        }

        let lines: Vec<&str> = Regex::new(r"m (.*)")
            .expect("valid regex")
            .captures_iter(contents)
            .filter_map(|captures| captures.get(1))
            .map(|line| line.as_str().trim())
            .collect();

        if lines.len() != rows {
            return Err(LifeError::Parse(format!(
                "expected {} rows but found {}",
                rows,
                lines.len()
            )));
        }

        // The header is untrusted, so the rows bound the allocation rather than `rows * cols`
        for (row, line) in lines.iter().enumerate() {
            check_row_width(row, line, cols)?;
        }

        let mut grid = Grid::new(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            grid.fill_row(row, line)?;
        }

        Ok(grid)
    }

    /// Writes the grid in the format accepted by [`Grid::parse`].
    pub fn to_text(&self) -> String {
        let mut text = format!("rows {}\ncols {}\n", self.rows, self.cols);
        for line in self.row_strings() {
            text.push_str("m ");
            text.push_str(&line);
            text.push('\n');
        }
        text
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if !self.contains(row, col) {
            return None;
        }
        Some(self.cells[self.index(row, col)])
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_alive)
    }

    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<()> {
        self.check_bounds(row, col)?;
        let index = self.index(row, col);
        self.cells[index] = value;
        Ok(())
    }

    /// Counts the live cells in the Moore neighbourhood of `(row, col)`.
    /// Positions outside of the grid are skipped, so edge cells have fewer than 8 neighbours.
    pub fn live_neighbours(&self, row: usize, col: usize) -> usize {
        let mut neighbours = 0;

        for i in -1isize..=1 {
            for j in -1isize..=1 {
                if i == 0 && j == 0 {
                    continue;
                }

                let n_row = row as isize + i;
                let n_col = col as isize + j;

                if n_row < 0
                    || n_row >= self.rows as isize
                    || n_col < 0
                    || n_col >= self.cols as isize
                {
                    continue;
                }

                if self.is_alive(n_row as usize, n_col as usize) {
                    neighbours += 1;
                }
            }
        }

        neighbours
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Coordinates of every live cell in row-major order.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(index, _)| (index / self.cols, index % self.cols))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    pub(crate) fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn row_strings(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.to_char()).collect())
            .collect()
    }

    fn fill_row(&mut self, row: usize, line: &str) -> Result<()> {
        check_row_width(row, line, self.cols)?;

        for (col, value) in line.chars().enumerate() {
            let cell = Cell::from_char(value)
                .ok_or_else(|| LifeError::Parse(format!("invalid cell value: {}", value)))?;
            self.set(row, col, cell)?;
        }

        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

fn check_row_width(row: usize, line: &str, cols: usize) -> Result<()> {
    let width = line.chars().count();
    if width != cols {
        return Err(LifeError::Parse(format!(
            "row {} has {} cells but expected {}",
            row, width, cols
        )));
    }
    Ok(())
}

fn parse_dimension(value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| LifeError::Parse(format!("invalid dimension: {}", value)))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.row_strings() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl From<Grid> for Vec<String> {
    fn from(grid: Grid) -> Self {
        grid.row_strings()
    }
}

impl TryFrom<Vec<String>> for Grid {
    type Error = LifeError;

    fn try_from(lines: Vec<String>) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimensions { rows, cols });
        }

        for (row, line) in lines.iter().enumerate() {
            check_row_width(row, line, cols)?;
        }

        let mut grid = Grid::new(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            grid.fill_row(row, line)?;
        }

        Ok(grid)
    }
}
