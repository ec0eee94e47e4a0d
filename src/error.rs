//! Errors raised by the board, codec and search engine

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A token was dropped into a column that has no empty cells left
    #[error("illegal move, column {column} is full")]
    IllegalMove { column: usize },

    #[error("column {column} out of range, columns must be below {width}")]
    ColumnOutOfRange { column: usize, width: usize },

    /// Search was invoked on a board with no free columns
    #[error("no legal move, the board is full")]
    NoLegalMove,

    #[error("invalid board dimensions {width}x{height} with win length {win_length}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        win_length: usize,
    },

    #[error("search depth must be at least 1")]
    InvalidDepth,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The search deadline passed before the given depth completed
    #[error("search deadline expired during depth {depth}")]
    Timeout { depth: usize },

    #[error("could not parse move at position {position}: {reason}")]
    Parse { position: usize, reason: String },

    #[error("could not decode board: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
