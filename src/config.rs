use crate::error::{LifeError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Settings for a simulation run. Every field is optional in JSON and falls back to its default.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// The number of rows of the grid.
    pub rows: usize,
    /// The number of columns of the grid.
    pub cols: usize,
    /// The delay between two generations while running, in milliseconds.
    pub interval_ms: u64,
    /// The chance of each cell being alive when randomizing the grid.
    pub probability_alive: f64,
    /// The seed for the random number generator. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Stop after this many generations. `None` runs until stopped.
    pub max_generations: Option<usize>,
    /// Stop once a generation is identical to the previous one.
    pub stop_when_stable: bool,
    /// The filename to save the replay of a run to. If `None`, no replay will be saved.
    pub replay_filename: Option<String>,
    /// The size of a rendered cell in pixels. Only meaningful to graphical front ends.
    pub cell_size: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            rows: 50,
            cols: 50,
            interval_ms: 200,
            probability_alive: 0.5,
            seed: None,
            max_generations: None,
            stop_when_stable: false,
            replay_filename: None,
            cell_size: 20,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(contents: &str) -> Result<SimulationConfig> {
        let config: SimulationConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SimulationConfig> {
        let contents = fs::read_to_string(path)?;
        SimulationConfig::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }

        if !(0.0..=1.0).contains(&self.probability_alive) {
            return Err(LifeError::InvalidProbability(self.probability_alive));
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
