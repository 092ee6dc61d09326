use crate::error::Result;
use crate::grid::Grid;
use crossterm::{
    cursor::Hide,
    queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Write};

const ALIVE_CHAR: char = '■';
const DEAD_CHAR: char = '·';

/// Renders the grid as plain text, one line per row.
pub fn render_text(grid: &Grid) -> String {
    let mut text = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            text.push(if grid.is_alive(row, col) {
                ALIVE_CHAR
            } else {
                DEAD_CHAR
            });
        }
        text.push('\n');
    }
    text
}

/// Draws the grid to the console.
pub fn draw(grid: &Grid, generation: usize) -> Result<()> {
    draw_to(&mut stdout(), grid, generation)
}

/// Draws the generation, the population and the grid to `out`.
pub fn draw_to<W: Write>(out: &mut W, grid: &Grid, generation: usize) -> Result<()> {
    // Display information about the simulation
    queue!(
        out,
        Clear(ClearType::All),
        Hide,
        Print("Generation: "),
        Print(generation.to_string()),
        Print("\nPopulation: "),
        Print(grid.population().to_string()),
        Print("\n\n")
    )?;

    // Display the grid
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid.is_alive(row, col) {
                queue!(
                    out,
                    SetForegroundColor(Color::Magenta),
                    Print(ALIVE_CHAR),
                    SetForegroundColor(Color::Reset)
                )?;
            } else {
                queue!(out, Print(DEAD_CHAR))?;
            }
        }
        queue!(out, Print("\n"))?;
    }

    out.flush()?;
    Ok(())
}
