use crate::config::SimulationConfig;
use crate::engine::GridEngine;
use crate::error::Result;
use crate::grid::Grid;
use crate::patterns::{place_pattern, Pattern};
use crate::replay::{create_replay_logger, ReplayLogger};
use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

/// Shared handle to the running flag of a [`Simulation`].
///
/// Clones observe the same flag, so a handle taken before a run can stop it
/// from inside the per-generation callback. The run loop reads the flag at the
/// start of every scheduled generation.
#[derive(Clone, Debug, Default)]
pub struct RunningFlag(Rc<Cell<bool>>);

impl RunningFlag {
    pub fn is_running(&self) -> bool {
        self.0.get()
    }

    pub fn start(&self) {
        self.0.set(true);
    }

    pub fn stop(&self) {
        self.0.set(false);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Represents the reason a run finished.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StopReason {
    /// The running flag was cleared.
    Requested,
    /// The configured maximum number of generations was reached.
    GenerationLimit,
    /// A generation was identical to the one before it.
    Stabilized,
}

/// Drives a [`GridEngine`] at a fixed cadence while running.
/// Main entry point for running the simulation.
pub struct Simulation {
    engine: GridEngine,
    running: RunningFlag,
    interval: Duration,
    probability_alive: f64,
    max_generations: Option<usize>,
    stop_when_stable: bool,
    stop_reason: Option<StopReason>,
    // Whether the current run has been started and its stop not yet recorded
    active: bool,
    // Replay position, never goes back even when the generation counter resets
    turn: usize,
    replay_logger: Box<dyn ReplayLogger>,
}

impl Simulation {
    /// Creates a stopped simulation with an empty grid.
    pub fn new(config: &SimulationConfig) -> Result<Simulation> {
        config.validate()?;
        let engine = GridEngine::new(config.rows, config.cols, config.seed);
        Ok(Simulation::with_engine(engine, config))
    }

    /// Creates a stopped simulation starting from `grid`. The grid dimensions take precedence over the config.
    pub fn from_grid(grid: Grid, config: &SimulationConfig) -> Result<Simulation> {
        config.validate()?;
        let engine = GridEngine::from_grid(grid, config.seed);
        Ok(Simulation::with_engine(engine, config))
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn generation(&self) -> usize {
        self.engine.generation()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> RunState {
        if self.running.is_running() {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    /// Returns a handle sharing this simulation's running flag.
    pub fn running_flag(&self) -> RunningFlag {
        self.running.clone()
    }

    /// Why the last run stopped. `None` while running or before the first run.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Flips between running and stopped, the single start/stop control.
    pub fn toggle_running(&mut self) -> RunState {
        match self.state() {
            RunState::Stopped => self.start(),
            RunState::Running => self.stop(),
        }
        self.state()
    }

    pub fn start(&mut self) {
        self.sync_running();
        self.running.start();
        self.sync_running();
    }

    pub fn stop(&mut self) {
        self.finish(StopReason::Requested);
    }

    /// Computes one generation if the simulation is running.
    ///
    /// Returns `None` without touching the grid when stopped, so an invocation
    /// scheduled before a stop request is a no-op. At the generation limit the
    /// run ends instead of stepping.
    pub fn tick(&mut self) -> Option<&Grid> {
        self.sync_running();
        if !self.active {
            return None;
        }

        // A run resumed at the limit must not go past it
        if self.limit_reached() {
            self.finish(StopReason::GenerationLimit);
            return None;
        }

        let previous = self.stop_when_stable.then(|| self.engine.grid().clone());
        self.engine.step();
        self.record_generation();

        if previous.is_some_and(|previous| &previous == self.grid()) {
            self.finish(StopReason::Stabilized);
        } else if self.limit_reached() {
            self.finish(StopReason::GenerationLimit);
        }

        Some(self.grid())
    }

    /// Runs until stopped, sleeping for the configured interval between generations.
    ///
    /// Starts the simulation if it is stopped. `on_generation` is called with every new grid and its
    /// generation number. Once the run ends the replay, if any, is saved.
    pub fn run<F>(&mut self, mut on_generation: F) -> Result<StopReason>
    where
        F: FnMut(&Grid, usize),
    {
        self.start();

        // Record the starting grid so events logged before the first generation are kept
        self.record_generation();

        while self.tick().is_some() {
            on_generation(self.engine.grid(), self.engine.generation());

            if self.running.is_running() && !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }

        self.sync_running();
        let reason = self.stop_reason.unwrap_or(StopReason::Requested);

        self.replay_logger
            .log_end(self.turn, format!("{:?}", reason), self.engine.grid());
        self.replay_logger.save()?;

        Ok(reason)
    }

    pub fn toggle(&mut self, row: usize, col: usize) -> Result<&Grid> {
        self.engine.toggle(row, col)?;
        self.replay_logger.log_toggle(self.turn, (row, col));
        Ok(self.engine.grid())
    }

    pub fn clear(&mut self) -> &Grid {
        self.engine.clear();
        self.replay_logger.log_clear(self.turn);
        self.engine.grid()
    }

    pub fn randomize(&mut self) -> &Grid {
        self.engine.randomize(self.probability_alive);
        self.replay_logger.log_randomize(self.turn);
        self.engine.grid()
    }

    /// Places `pattern` on the current grid with its top-left corner at `origin`.
    pub fn place(&mut self, pattern: &Pattern, origin: (usize, usize)) -> Result<&Grid> {
        let grid = place_pattern(self.engine.grid(), pattern, origin)?;
        self.engine.replace(grid);
        Ok(self.engine.grid())
    }

    fn with_engine(engine: GridEngine, config: &SimulationConfig) -> Simulation {
        let replay_logger = create_replay_logger(
            config.replay_filename.clone(),
            engine.grid().rows(),
            engine.grid().cols(),
        );

        Simulation {
            engine,
            running: RunningFlag::default(),
            interval: config.interval(),
            probability_alive: config.probability_alive,
            max_generations: config.max_generations,
            stop_when_stable: config.stop_when_stable,
            stop_reason: None,
            active: false,
            turn: 0,
            replay_logger,
        }
    }

    /// Ends the current run with `reason`. Does nothing when no run is active.
    fn finish(&mut self, reason: StopReason) {
        self.sync_running();
        if self.active {
            self.running.stop();
            self.active = false;
            self.stop_reason = Some(reason);
            self.replay_logger.log_stop(self.turn);
        }
    }

    /// Catches up with changes made to the flag through a shared handle.
    fn sync_running(&mut self) {
        match (self.active, self.running.is_running()) {
            (false, true) => {
                self.active = true;
                self.stop_reason = None;
                self.replay_logger.log_start(self.turn);
            }
            (true, false) => {
                self.active = false;
                self.stop_reason = Some(StopReason::Requested);
                self.replay_logger.log_stop(self.turn);
            }
            _ => {}
        }
    }

    fn limit_reached(&self) -> bool {
        self.max_generations
            .is_some_and(|max_generations| self.generation() >= max_generations)
    }

    fn record_generation(&mut self) {
        let generation = self.generation();
        let population = self.grid().population();
        self.replay_logger
            .log_generation(self.turn, generation, population);
        self.turn += 1;
    }
}
