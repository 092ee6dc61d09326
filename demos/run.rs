use anyhow::{anyhow, Context, Result};
use crossterm::{cursor::Show, execute};
use life_engine::{patterns, render, Simulation, SimulationConfig};
use std::env;
use std::io::stdout;

// Usage: cargo run --example run -- [config.json] [pattern]
fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = match args.first() {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("could not load config from {}", path))?,
        None => SimulationConfig {
            max_generations: Some(500),
            stop_when_stable: true,
            ..SimulationConfig::default()
        },
    };

    let mut simulation = Simulation::new(&config)?;
    match args.get(1) {
        Some(name) => {
            let pattern =
                patterns::find(name).ok_or_else(|| anyhow!("unknown pattern: {}", name))?;
            let origin = patterns::centered_origin(simulation.grid(), pattern);
            simulation.place(pattern, origin)?;
        }
        None => {
            simulation.randomize();
        }
    }

    render::draw(simulation.grid(), simulation.generation())?;

    let mut draw_error = None;
    let reason = simulation.run(|grid, generation| {
        if draw_error.is_none() {
            draw_error = render::draw(grid, generation).err();
        }
    })?;

    execute!(stdout(), Show)?;
    if let Some(error) = draw_error {
        return Err(error.into());
    }

    println!("\nSimulation finished due to: {:?}", reason);
    Ok(())
}
