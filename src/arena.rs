//! Matches between two strategies
//!
//! A match plays every opening of a fixed number of plies twice, once with
//! each strategy moving first, so that deterministic strategies still meet
//! a spread of positions.

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use std::fmt;
use std::time::Instant;

use crate::board::{Board, Player};
use crate::error::{Error, Result};
use crate::search::Strategy;
use crate::successors::Successors;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// Plays `board` to completion, `first` moving for the player to move
///
/// A strategy returning a column outside `free_columns` is an error.
pub fn play_game(first: &mut dyn Strategy, second: &mut dyn Strategy, board: Board) -> Result<Outcome> {
    let first_player = board.player();
    let mut board = board;
    loop {
        if board.last_move_won() {
            return Ok(Outcome::Win(board.player().other()));
        }
        if board.is_full() {
            return Ok(Outcome::Draw);
        }
        let strategy: &mut dyn Strategy = if board.player() == first_player {
            &mut *first
        } else {
            &mut *second
        };
        let column = strategy.choose_move(&board)?;
        if !board.playable(column) {
            return Err(Error::IllegalMove { column });
        }
        board = board.play(column)?;
    }
}

/// Every opening of exactly `plies` moves from `board` in which nobody has won yet
pub fn openings(board: &Board, plies: usize) -> Vec<Board> {
    if plies == 0 {
        return vec![board.clone()];
    }
    Successors::new(board)
        .filter(|s| !s.board.last_move_won() && !s.board.is_full())
        .flat_map(|s| openings(&s.board, plies - 1))
        .collect()
}

/// Results from the first strategy's point of view
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl Tally {
    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    fn record(&mut self, outcome: Outcome, first_player: Player) {
        match outcome {
            Outcome::Win(player) if player == first_player => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            wins: self.wins + other.wins,
            losses: self.losses + other.losses,
            draws: self.draws + other.draws,
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} wins, {} losses, {} draws over {} games",
            self.wins,
            self.losses,
            self.draws,
            self.games()
        )
    }
}

/// Plays both colours of every `plies`-move opening in parallel
///
/// Strategies are built per game from the factories, so they need not be
/// shareable between threads.
pub fn run_match<A, B>(board: &Board, plies: usize, make_first: A, make_second: B, show_progress: bool) -> Result<Tally>
where
    A: Fn() -> Box<dyn Strategy> + Sync,
    B: Fn() -> Box<dyn Strategy> + Sync,
{
    let start = Instant::now();
    let positions = openings(board, plies);
    info!("playing {} openings of {} plies", positions.len(), plies);

    let progress = if show_progress {
        ProgressBar::new(2 * positions.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let tally = positions
        .par_iter()
        .flat_map(|position| vec![(position, true), (position, false)])
        .map(|(position, first_moves_first)| {
            let mut first = make_first();
            let mut second = make_second();
            let mover = position.player();
            let mut tally = Tally::default();
            if first_moves_first {
                let outcome = play_game(first.as_mut(), second.as_mut(), position.clone())?;
                tally.record(outcome, mover);
            } else {
                let outcome = play_game(second.as_mut(), first.as_mut(), position.clone())?;
                tally.record(outcome, mover.other());
            }
            progress.inc(1);
            Ok::<_, Error>(tally)
        })
        .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?;

    progress.finish();
    info!("match finished in {:.1}s: {}", start.elapsed().as_secs_f64(), tally);
    Ok(tally)
}
