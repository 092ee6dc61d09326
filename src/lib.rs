//! # life_engine
//!
//! The core engine for Conway's Game of Life on a fixed-size grid without wrap-around.
//!
//! The grid operations are pure functions returning new grids, so a front end
//! only ever swaps its current grid for the one it gets back.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod render;
pub mod replay;
pub mod simulation;

pub use config::SimulationConfig;
pub use engine::create_empty_grid;
pub use engine::randomize_grid;
pub use engine::step;
pub use engine::toggle_cell;
pub use engine::GridEngine;
pub use error::LifeError;
pub use error::Result;
pub use grid::Cell;
pub use grid::Grid;
pub use simulation::RunState;
pub use simulation::RunningFlag;
pub use simulation::Simulation;
pub use simulation::StopReason;
