//! A game-tree search agent for 'Connect-N', Connect 4 on any board size
//!
//! The agent searches a fixed number of plies ahead with alpha-beta pruned
//! minimax, scoring the frontier with a pattern-based heuristic, and picks
//! the column with the best outcome.
//!
//! # Basic Usage
//!
//! ```
//! use connectn_ai::{board::Board, heuristic::PatternEvaluator, search::{AlphaBeta, Strategy}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three in the bottom row
//! let board = Board::from_moves("112233")?;
//! let mut agent = AlphaBeta::new(PatternEvaluator::default(), 3);
//!
//! assert_eq!(agent.choose_move(&board)?, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod config;

pub mod board;

pub mod codec;

pub mod successors;

pub mod heuristic;

pub mod search;

pub mod arena;

mod test;

pub use error::{Error, Result};

/// The default width of the game board in tiles
pub const DEFAULT_WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const DEFAULT_HEIGHT: usize = 6;

/// The default number of tokens in a row needed to win
pub const DEFAULT_WIN_LENGTH: usize = 4;

/// The default search depth in plies
pub const DEFAULT_DEPTH: usize = 5;

/// The largest supported width or height
pub const MAX_DIMENSION: usize = 64;

// the default board must be winnable
const_assert!(DEFAULT_WIN_LENGTH <= DEFAULT_WIDTH || DEFAULT_WIN_LENGTH <= DEFAULT_HEIGHT);
// dimensions are stored in a single byte by the codec
const_assert!(MAX_DIMENSION <= u8::MAX as usize);
