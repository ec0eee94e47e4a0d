//! Successor generation

use crate::board::Board;

/// A child position and the column played to reach it
#[derive(Clone, Debug)]
pub struct Successor {
    pub board: Board,
    pub column: usize,
}

/// Lazily yields the children of a board in ascending column order
///
/// The order is stable and is the tie-break source for move selection, so
/// it must never be changed to a "better first" ordering.
pub struct Successors<'a> {
    board: &'a Board,
    next_column: usize,
}

impl<'a> Successors<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            next_column: 0,
        }
    }
}

impl<'a> Iterator for Successors<'a> {
    type Item = Successor;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_column < self.board.width() {
            let column = self.next_column;
            self.next_column += 1;
            // free columns only, so the drop cannot fail
            if let Ok(board) = self.board.play(column) {
                return Some(Successor { board, column });
            }
        }
        None
    }
}

/// All children of a board, each paired with the column that produced it
pub fn successors(board: &Board) -> Vec<Successor> {
    Successors::new(board).collect()
}
