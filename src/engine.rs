use crate::error::Result;
use crate::grid::{Cell, Grid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a grid of the given dimensions where every cell is dead.
pub fn create_empty_grid(rows: usize, cols: usize) -> Grid {
    Grid::new(rows, cols)
}

/// Creates a grid where each cell is independently alive with probability `probability_alive`.
///
/// # Arguments
/// * `rows` - The number of rows.
/// * `cols` - The number of columns.
/// * `probability_alive` - The chance, between 0.0 and 1.0, of each cell being alive.
/// * `rng` - The random source. Pass a seeded generator for reproducible grids.
///
/// # Panics
/// If `probability_alive` is not between 0.0 and 1.0.
pub fn randomize_grid<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    probability_alive: f64,
    rng: &mut R,
) -> Grid {
    assert!(
        (0.0..=1.0).contains(&probability_alive),
        "probability {} must be between 0.0 and 1.0",
        probability_alive
    );

    let cells = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| Cell::from(rng.gen_bool(probability_alive)))
                .collect()
        })
        .collect();

    Grid::from_rows(cells)
}

/// Returns a copy of `grid` with the cell at `(row, col)` flipped.
/// The input grid is left untouched.
pub fn toggle_cell(grid: &Grid, row: usize, col: usize) -> Result<Grid> {
    grid.check_bounds(row, col)?;

    let mut next = grid.clone();
    let current = grid.get(row, col).unwrap_or_default();
    next.set(row, col, current.toggled())?;

    Ok(next)
}

/// Computes the next generation of `grid`.
///
/// Every cell of the result is computed from the input grid only, never from
/// cells of the result that were already updated.
pub fn step(grid: &Grid) -> Grid {
    let cells = (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| next_state(grid, row, col))
                .collect()
        })
        .collect();

    Grid::from_rows(cells)
}

fn next_state(grid: &Grid, row: usize, col: usize) -> Cell {
    let neighbours = grid.live_neighbours(row, col);
    let current = grid.get(row, col).unwrap_or_default();

    if !(2..=3).contains(&neighbours) {
        // Under or overpopulation
        Cell::Dead
    } else if current == Cell::Dead && neighbours == 3 {
        Cell::Alive
    } else {
        current
    }
}

/// Owns the current grid and replaces it through the pure grid operations.
pub struct GridEngine {
    grid: Grid,
    generation: usize,
    rng: StdRng,
}

impl GridEngine {
    /// Creates an engine with an empty grid.
    ///
    /// # Arguments
    /// * `rows` - The number of rows of the grid.
    /// * `cols` - The number of columns of the grid.
    /// * `seed` - The seed for the random number generator. If `None`, the generator is seeded from entropy.
    pub fn new(rows: usize, cols: usize, seed: Option<u64>) -> GridEngine {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        GridEngine {
            grid: create_empty_grid(rows, cols),
            generation: 0,
            rng,
        }
    }

    /// Creates an engine starting from an existing grid.
    pub fn from_grid(grid: Grid, seed: Option<u64>) -> GridEngine {
        let mut engine = GridEngine::new(grid.rows(), grid.cols(), seed);
        engine.grid = grid;
        engine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The number of generations computed since the grid was last replaced by clear or randomize.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Advances to the next generation and returns the new grid.
    pub fn step(&mut self) -> &Grid {
        self.grid = step(&self.grid);
        self.generation += 1;
        &self.grid
    }

    pub fn toggle(&mut self, row: usize, col: usize) -> Result<&Grid> {
        self.grid = toggle_cell(&self.grid, row, col)?;
        Ok(&self.grid)
    }

    /// Replaces the grid with an empty one.
    pub fn clear(&mut self) -> &Grid {
        self.grid = create_empty_grid(self.grid.rows(), self.grid.cols());
        self.generation = 0;
        &self.grid
    }

    /// Replaces the grid with a random one.
    pub fn randomize(&mut self, probability_alive: f64) -> &Grid {
        self.grid = randomize_grid(
            self.grid.rows(),
            self.grid.cols(),
            probability_alive,
            &mut self.rng,
        );
        self.generation = 0;
        &self.grid
    }

    /// Replaces the grid wholesale, e.g. with a placed pattern.
    pub fn replace(&mut self, grid: Grid) {
        assert!(
            grid.rows() == self.grid.rows() && grid.cols() == self.grid.cols(),
            "replacement grid must keep the engine dimensions"
        );
        self.grid = grid;
        self.generation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;

    fn grid_from(contents: &str) -> Grid {
        Grid::parse(contents).unwrap()
    }

    #[test]
    fn when_creating_an_empty_grid_every_cell_is_dead() {
        let grid = create_empty_grid(4, 5);

        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 5);
        assert!(grid.is_empty());
    }

    #[test]
    fn when_randomizing_with_the_same_seed_the_grids_are_equal() {
        let first = randomize_grid(10, 10, 0.5, &mut StdRng::seed_from_u64(7));
        let second = randomize_grid(10, 10, 0.5, &mut StdRng::seed_from_u64(7));

        assert_eq!(first, second);
    }

    #[test]
    fn when_randomizing_with_probability_zero_or_one_the_grid_is_uniform() {
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(randomize_grid(5, 6, 0.0, &mut rng).population(), 0);
        assert_eq!(randomize_grid(5, 6, 1.0, &mut rng).population(), 30);
    }

    #[test]
    fn when_randomizing_with_probability_one_half_roughly_half_the_cells_are_alive() {
        let grid = randomize_grid(50, 50, 0.5, &mut StdRng::seed_from_u64(42));

        let population = grid.population();
        assert!(population > 1000 && population < 1500);
    }

    #[test]
    #[should_panic(expected = "must be between 0.0 and 1.0")]
    fn when_randomizing_with_an_invalid_probability_it_panics() {
        randomize_grid(2, 2, 1.5, &mut StdRng::seed_from_u64(0));
    }

    #[test]
    fn when_toggling_a_cell_only_that_cell_changes_and_the_input_is_untouched() {
        let grid = create_empty_grid(3, 3);

        let toggled = toggle_cell(&grid, 1, 2).unwrap();

        assert_eq!(toggled.alive_cells(), vec![(1, 2)]);
        assert!(grid.is_empty());
    }

    #[test]
    fn when_toggling_a_cell_outside_of_the_grid_an_error_is_returned() {
        let grid = create_empty_grid(3, 3);

        let result = toggle_cell(&grid, 3, 0);

        assert!(matches!(result, Err(LifeError::OutOfBounds { row: 3, col: 0, .. })));
    }

    #[test]
    fn when_stepping_a_live_cell_with_fewer_than_two_neighbours_it_dies() {
        let grid = grid_from(
            "\
            rows 3
            cols 3
            m ...
            m .**
            m ...",
        );

        assert!(step(&grid).is_empty());
    }

    #[test]
    fn when_stepping_a_live_cell_with_more_than_three_neighbours_it_dies() {
        let grid = grid_from(
            "\
            rows 3
            cols 3
            m *.*
            m .*.
            m *.*",
        );

        assert!(!step(&grid).is_alive(1, 1));
    }

    #[test]
    fn when_stepping_a_live_cell_with_two_or_three_neighbours_it_survives() {
        let grid = grid_from(
            "\
            rows 3
            cols 5
            m *...*
            m .*.*.
            m *..**",
        );

        let next = step(&grid);

        // (1, 1) has two live neighbours, (1, 3) has three
        assert!(next.is_alive(1, 1));
        assert!(next.is_alive(1, 3));
    }

    #[test]
    fn when_stepping_a_dead_cell_with_exactly_three_neighbours_it_is_born() {
        let grid = grid_from(
            "\
            rows 3
            cols 3
            m *.*
            m ...
            m .*.",
        );

        assert!(step(&grid).is_alive(1, 1));
    }

    #[test]
    fn when_stepping_a_dead_cell_with_two_or_four_neighbours_it_stays_dead() {
        let two = grid_from(
            "\
            rows 3
            cols 3
            m *.*
            m ...
            m ...",
        );
        let four = grid_from(
            "\
            rows 3
            cols 3
            m *.*
            m ...
            m *.*",
        );

        assert!(!step(&two).is_alive(1, 1));
        assert!(!step(&four).is_alive(1, 1));
    }

    #[test]
    fn when_stepping_the_result_only_depends_on_the_input_grid() {
        // Updating in place would kill (0, 0) first, leaving (0, 1) with a single neighbour
        let grid = grid_from(
            "\
            rows 3
            cols 3
            m ***
            m ...
            m ...",
        );

        let next = step(&grid);

        assert_eq!(next.alive_cells(), vec![(0, 1), (1, 1)]);
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn when_using_the_engine_step_advances_the_generation() {
        let mut engine = GridEngine::new(5, 5, Some(0));
        engine.toggle(2, 1).unwrap();
        engine.toggle(2, 2).unwrap();
        engine.toggle(2, 3).unwrap();

        let next = engine.step().clone();

        assert_eq!(next.alive_cells(), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn when_clearing_the_engine_the_grid_is_empty_and_the_generation_resets() {
        let mut engine = GridEngine::new(5, 5, Some(0));
        engine.randomize(1.0);
        engine.step();

        engine.clear();

        assert!(engine.grid().is_empty());
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn when_randomizing_engines_with_the_same_seed_the_grids_are_equal() {
        let mut first = GridEngine::new(8, 8, Some(3));
        let mut second = GridEngine::new(8, 8, Some(3));

        assert_eq!(first.randomize(0.5), second.randomize(0.5));
    }

    #[test]
    fn when_toggling_outside_of_the_engine_grid_the_grid_is_unchanged() {
        let mut engine = GridEngine::new(2, 2, Some(0));

        assert!(engine.toggle(0, 2).is_err());
        assert!(engine.grid().is_empty());
    }
}
