//! Grid board with gravity-drop moves and line queries

use std::fmt;

use crate::error::{Error, Result};
use crate::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_WIN_LENGTH, MAX_DIMENSION};

/// The four line axes as `(row step, column step)`, the remaining four
/// directions are their negations
pub const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// All eight neighbour directions as `(row step, column step)`
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The cell value this player's tokens occupy
    pub fn token(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }

    /// 1 or 2, for display
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
        }
    }
}

/// A Connect-N position
///
/// # Layout
/// Cells are stored row-major with row 0 at the bottom of the board, so
/// `grid[row][col]` from [`Board::to_grid`] indexes the same cell as
/// [`Board::cell`]. Every move produces a new `Board`; the input is never
/// mutated, so sibling branches of a search can never share state.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    win_length: usize,
    cells: Vec<Cell>,
    heights: Vec<usize>,
    player: Player,
    num_moves: usize,
    last_move: Option<usize>,
}

impl Board {
    /// Creates an empty board, player one to move
    pub fn new(width: usize, height: usize, win_length: usize) -> Result<Self> {
        validate_dimensions(width, height, win_length)?;
        Ok(Self::empty(width, height, win_length))
    }

    /// Creates an empty 7x6 board with a win length of 4
    pub fn standard() -> Self {
        Self::empty(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_WIN_LENGTH)
    }

    fn empty(width: usize, height: usize, win_length: usize) -> Self {
        Self {
            width,
            height,
            win_length,
            cells: vec![Cell::Empty; width * height],
            heights: vec![0; width],
            player: Player::One,
            num_moves: 0,
            last_move: None,
        }
    }

    /// Creates a standard board from a string of 1-indexed column digits
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        Self::standard().play_moves(moves)
    }

    /// Plays a string of 1-indexed column digits on top of this board
    ///
    /// Fails if a move is unparsable, out of range, into a full column, or
    /// is played after the game has already been won.
    pub fn play_moves<S: AsRef<str>>(self, moves: S) -> Result<Self> {
        let mut board = self;
        for (position, column_char) in moves.as_ref().chars().enumerate() {
            let column = match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 => column - 1,
                _ => {
                    return Err(Error::Parse {
                        position,
                        reason: format!("'{}' is not a column number", column_char),
                    })
                }
            };
            if board.last_move_won() {
                return Err(Error::Parse {
                    position,
                    reason: "the game is already over".to_string(),
                });
            }
            board = board.play(column)?;
        }
        Ok(board)
    }

    /// Rebuilds a board from a row-major grid, row 0 being the bottom row
    ///
    /// The grid must be rectangular, obey gravity, and fit the dimension
    /// limits. The move count is recovered from the number of tokens; the
    /// last move is unknown.
    pub fn from_grid(grid: &[Vec<Cell>], win_length: usize, player: Player) -> Result<Self> {
        let height = grid.len();
        let width = grid.first().map_or(0, |row| row.len());
        validate_dimensions(width, height, win_length)?;
        if grid.iter().any(|row| row.len() != width) {
            return Err(Error::Decode("grid rows have differing lengths".to_string()));
        }

        let mut board = Self::empty(width, height, win_length);
        board.player = player;
        for (row, cells) in grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                if board.heights[col] != row {
                    return Err(Error::Decode(format!(
                        "token at row {} column {} is floating",
                        row, col
                    )));
                }
                board.cells[row * width + col] = cell;
                board.heights[col] += 1;
                board.num_moves += 1;
            }
        }
        Ok(board)
    }

    /// Row-major copy of the cells, row 0 being the bottom row
    pub fn to_grid(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// The player whose turn it is
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// Column of the move that produced this board, if known
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Number of tokens in a column
    pub fn column_height(&self, column: usize) -> usize {
        self.heights[column]
    }

    /// Returns the cell at `(row, col)`, or `None` if it lies off the board
    pub fn cell(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row >= self.height as isize || col >= self.width as isize {
            return None;
        }
        Some(self.cells[row as usize * self.width + col as usize])
    }

    pub fn playable(&self, column: usize) -> bool {
        column < self.width && self.heights[column] < self.height
    }

    /// All columns that can still take a token, in ascending order
    pub fn free_columns(&self) -> Vec<usize> {
        (0..self.width).filter(|&c| self.playable(c)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == self.width * self.height
    }

    /// Drops a token for `player` into `column`, passing the turn to the other player
    pub fn drop_token(&self, column: usize, player: Player) -> Result<Self> {
        if column >= self.width {
            return Err(Error::ColumnOutOfRange {
                column,
                width: self.width,
            });
        }
        if !self.playable(column) {
            return Err(Error::IllegalMove { column });
        }
        let mut next = self.clone();
        let row = next.heights[column];
        next.cells[row * next.width + column] = player.token();
        next.heights[column] += 1;
        next.num_moves += 1;
        next.player = player.other();
        next.last_move = Some(column);
        Ok(next)
    }

    /// Drops a token for the player to move
    pub fn play(&self, column: usize) -> Result<Self> {
        self.drop_token(column, self.player)
    }

    /// Counts the consecutive `token` cells starting one step away from
    /// `(row, col)` in direction `(d_row, d_col)`
    pub fn run_from(&self, row: isize, col: isize, d_row: isize, d_col: isize, token: Cell) -> usize {
        let mut length = 0;
        let (mut r, mut c) = (row + d_row, col + d_col);
        while self.cell(r, c) == Some(token) {
            length += 1;
            r += d_row;
            c += d_col;
        }
        length
    }

    /// Length of the longest `player` line through `(row, col)` along any
    /// axis, counting the cell itself whatever it holds
    pub fn longest_line_through(&self, row: isize, col: isize, player: Player) -> usize {
        let token = player.token();
        AXES.iter()
            .map(|&(dr, dc)| {
                1 + self.run_from(row, col, dr, dc, token) + self.run_from(row, col, -dr, -dc, token)
            })
            .max()
            .unwrap_or(1)
    }

    /// Returns true if a line of `win_length` tokens of `player` starts at
    /// `(row, col)` along any axis
    pub fn line_exists_at(&self, row: usize, col: usize, player: Player) -> bool {
        let token = player.token();
        let (row, col) = (row as isize, col as isize);
        AXES.iter().any(|&(dr, dc)| {
            (0..self.win_length as isize).all(|i| self.cell(row + i * dr, col + i * dc) == Some(token))
        })
    }

    pub fn is_win_for(&self, player: Player) -> bool {
        (0..self.height).any(|row| (0..self.width).any(|col| self.line_exists_at(row, col, player)))
    }

    pub fn winner(&self) -> Option<Player> {
        if self.is_win_for(Player::One) {
            Some(Player::One)
        } else if self.is_win_for(Player::Two) {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Returns true if the player to move would complete a line by playing `column`
    pub fn is_winning_drop(&self, column: usize) -> bool {
        self.playable(column)
            && self.longest_line_through(self.heights[column] as isize, column as isize, self.player)
                >= self.win_length
    }

    /// Returns true if the move that produced this board completed a line
    pub fn last_move_won(&self) -> bool {
        match self.last_move {
            Some(column) => {
                let row = self.heights[column] as isize - 1;
                let mover = self.player.other();
                self.longest_line_through(row, column as isize, mover) >= self.win_length
            }
            None => false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height).rev() {
            let line: String = self.cells[row * self.width..(row + 1) * self.width]
                .iter()
                .map(|cell| cell.symbol())
                .collect();
            writeln!(f, "{}", line)?;
        }
        let columns: String = (1..=self.width)
            .map(|c| std::char::from_digit((c % 10) as u32, 10).unwrap_or('?'))
            .collect();
        write!(f, "{}", columns)
    }
}

fn validate_dimensions(width: usize, height: usize, win_length: usize) -> Result<()> {
    let valid = (1..=MAX_DIMENSION).contains(&width)
        && (1..=MAX_DIMENSION).contains(&height)
        && win_length >= 1
        && win_length <= width.max(height);
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidDimensions {
            width,
            height,
            win_length,
        })
    }
}
