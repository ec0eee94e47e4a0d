//! Game and search configuration

use std::time::Duration;

use crate::error::{Error, Result};
use crate::{DEFAULT_DEPTH, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_WIN_LENGTH};

/// Board dimensions and win length
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub win_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_length: DEFAULT_WIN_LENGTH,
        }
    }
}

impl GameConfig {
    /// Creates the empty board this configuration describes
    pub fn board(&self) -> Result<crate::board::Board> {
        crate::board::Board::new(self.width, self.height, self.win_length)
    }

    pub fn validate(&self) -> Result<()> {
        self.board().map(|_| ())
    }
}

/// Weights of the pattern evaluator features
///
/// # Scale
/// `win` is a floor: evaluators raise the bonus for a completed line
/// above the largest score a non-winning move can reach on the board at
/// hand, since the exponential run term grows with the win length.
/// `threat_block` sits below it but above the positional features. The final perspective scaling is
/// asymmetric: positions reached by the root player are multiplied by
/// `aggression`, positions reached by the opponent by `-opponent_damping`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Weights {
    pub win: f64,
    pub threat_block: f64,
    pub center: f64,
    /// Base of the exponential reward for runs through the played cell
    pub run_base: f64,
    /// Density weights for neighbourhood radius 1, 2 and 3
    pub density: [f64; 3],
    pub gap: f64,
    pub block: f64,
    pub aggression: f64,
    pub opponent_damping: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            win: 1_000_000.0,
            threat_block: 100_000.0,
            center: 1.0,
            run_base: 2.0,
            density: [0.8, 0.5, 0.3],
            gap: 1.65,
            block: 2.0,
            aggression: 1.01,
            opponent_damping: 0.9,
        }
    }
}

impl Weights {
    pub fn validate(&self) -> Result<()> {
        let problem = if self.win <= self.threat_block {
            Some("win weight must exceed the threat block weight")
        } else if self.run_base < 1.0 {
            Some("run base must be at least 1")
        } else if self.aggression < 1.0 {
            Some("aggression must be at least 1")
        } else if self.opponent_damping <= 0.0 || self.opponent_damping > 1.0 {
            Some("opponent damping must be in (0, 1]")
        } else {
            None
        };
        match problem {
            Some(reason) => Err(Error::InvalidConfig(reason.to_string())),
            None => Ok(()),
        }
    }
}

/// Search depth, optional time budget and evaluator weights
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub max_depth: usize,
    /// When set, searches deepen iteratively until the budget runs out
    pub time_limit: Option<Duration>,
    pub weights: Weights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            time_limit: None,
            weights: Weights::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::InvalidDepth);
        }
        self.weights.validate()
    }
}
