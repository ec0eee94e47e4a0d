//! Compact binary encoding of a board
//!
//! The layout is big-endian and byte oriented:
//!
//! | bytes | content                                   |
//! |-------|-------------------------------------------|
//! | 2     | magic `CN`                                |
//! | 1     | format version                            |
//! | 3     | width, height, win length                 |
//! | 1     | side to move (1 or 2)                     |
//! | w*h   | cells row-major from the bottom row, 0/1/2 |

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use std::io::{Read, Write};

use crate::board::{Board, Cell, Player};
use crate::error::{Error, Result};

const MAGIC: u16 = u16::from_be_bytes(*b"CN");
const VERSION: u8 = 1;

pub fn write_board<W: Write>(writer: &mut W, board: &Board) -> Result<()> {
    writer.write_u16::<BigEndian>(MAGIC)?;
    writer.write_u8(VERSION)?;
    // dimensions are bounded by MAX_DIMENSION, which fits in a byte
    writer.write_u8(board.width() as u8)?;
    writer.write_u8(board.height() as u8)?;
    writer.write_u8(board.win_length() as u8)?;
    writer.write_u8(board.player().number())?;
    for row in board.to_grid() {
        for cell in row {
            writer.write_u8(match cell {
                Cell::Empty => 0,
                Cell::PlayerOne => 1,
                Cell::PlayerTwo => 2,
            })?;
        }
    }
    Ok(())
}

pub fn read_board<R: Read>(reader: &mut R) -> Result<Board> {
    if reader.read_u16::<BigEndian>()? != MAGIC {
        return Err(Error::Decode("missing magic bytes".to_string()));
    }
    let version = reader.read_u8()?;
    if version != VERSION {
        return Err(Error::Decode(format!("unsupported version {}", version)));
    }
    let width = reader.read_u8()? as usize;
    let height = reader.read_u8()? as usize;
    let win_length = reader.read_u8()? as usize;
    let player = match reader.read_u8()? {
        1 => Player::One,
        2 => Player::Two,
        other => return Err(Error::Decode(format!("invalid side to move {}", other))),
    };

    let mut grid = Vec::with_capacity(height);
    for _ in 0..height {
        let mut row = Vec::with_capacity(width);
        for _ in 0..width {
            row.push(match reader.read_u8()? {
                0 => Cell::Empty,
                1 => Cell::PlayerOne,
                2 => Cell::PlayerTwo,
                other => return Err(Error::Decode(format!("invalid cell value {}", other))),
            });
        }
        grid.push(row);
    }
    Board::from_grid(&grid, win_length, player)
}

pub fn encode(board: &Board) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(7 + board.width() * board.height());
    write_board(&mut bytes, board)?;
    Ok(bytes)
}

pub fn decode(mut bytes: &[u8]) -> Result<Board> {
    let board = read_board(&mut bytes)?;
    if !bytes.is_empty() {
        return Err(Error::Decode(format!("{} trailing bytes", bytes.len())));
    }
    Ok(board)
}
