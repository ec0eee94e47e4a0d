use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connectn_ai::board::{Board, Cell};

/// Draws the board in place below the cursor, bottom row last
pub fn draw(board: &Board) -> Result<()> {
    let mut stdout = stdout();
    let (width, height) = (board.width(), board.height());

    let cols: String = (1..=width).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..height {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;
    let last_move = board
        .last_move()
        .map(|column| (board.column_height(column) - 1, column));

    for row in 0..height {
        for col in 0..width {
            let cell = board.cell(row as isize, col as isize).unwrap_or(Cell::Empty);
            let mut tile = style("O").on(Color::DarkBlue).with(match cell {
                Cell::PlayerOne => Color::Red,
                Cell::PlayerTwo => Color::Yellow,
                Cell::Empty => Color::DarkBlue,
            });
            tile = if last_move == Some((row, col)) {
                tile.attribute(Attribute::Underlined).attribute(Attribute::Bold)
            } else {
                tile.attribute(Attribute::Bold)
            };
            let (x, y) = tile_position((origin_x, origin_y), row, col)?;
            stdout.queue(MoveTo(x, y))?.queue(PrintStyledContent(tile))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x.saturating_add(width as u16), origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}

/// Terminal position of a tile, row 0 being drawn on the origin line
///
/// Fails when the board is taller than the space above the origin.
fn tile_position((origin_x, origin_y): (u16, u16), row: usize, col: usize) -> Result<(u16, u16)> {
    let y = origin_y
        .checked_sub(row as u16)
        .ok_or_else(|| anyhow!("terminal too short to draw row {} of the board", row + 1))?;
    let x = origin_x
        .checked_add(col as u16)
        .ok_or_else(|| anyhow!("terminal too narrow to draw column {} of the board", col + 1))?;
    Ok((x, y))
}
