//! Static evaluation of moves
//!
//! An [`Evaluator`] scores the move that produced a board, from the point
//! of view of a fixed root player. The search engine accumulates these local
//! scores along the path from the root, so the score of a node is always its
//! parent's score plus the local score of the move that created it.
//!
//! [`PatternEvaluator`] and [`CenterEvaluator`] score the placed token by
//! the patterns around it. [`LineEvaluator`] scores the change the move
//! makes to a whole-board sum over line windows.

use crate::board::{Board, Cell, Player, AXES, DIRECTIONS};
use crate::config::Weights;

/// Scores the last move played on a board
pub trait Evaluator {
    /// Returns the local score of the token just dropped into `column` on
    /// `board`, seen from `root`'s perspective
    fn evaluate(&self, board: &Board, column: usize, root: Player) -> f64;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, board: &Board, column: usize, root: Player) -> f64 {
        (**self).evaluate(board, column, root)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, board: &Board, column: usize, root: Player) -> f64 {
        (**self).evaluate(board, column, root)
    }
}

/// Distance of a column from the horizontal centre of the board
pub fn center_distance(width: usize, column: usize) -> f64 {
    ((2 * column + 1) as f64 - width as f64).abs() / 2.0
}

/// Applies the asymmetric perspective scaling to a raw feature sum
fn perspective(raw: f64, mover: Player, root: Player, weights: &Weights) -> f64 {
    if mover == root {
        raw * weights.aggression
    } else {
        raw * -weights.opponent_damping
    }
}

/// Location of the last token on a board and who placed it
struct Placement {
    row: isize,
    col: isize,
    mover: Player,
}

impl Placement {
    fn of(board: &Board, column: usize) -> Option<Self> {
        let height = board.column_height(column);
        if height == 0 {
            return None;
        }
        let row = height as isize - 1;
        let col = column as isize;
        let mover = board.cell(row, col)?.owner()?;
        Some(Self { row, col, mover })
    }
}

/// Full pattern-feature evaluator
///
/// Combines a win override, a threat-block bonus, and positional features
/// (center bias, run accumulation, local density, split-run gaps and
/// blocking value), each weighted by [`Weights`].
#[derive(Copy, Clone, Debug, Default)]
pub struct PatternEvaluator {
    pub weights: Weights,
}

impl PatternEvaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    /// Largest total the positional features and threat bonus can reach
    /// for a move that does not win, plus the largest center penalty
    ///
    /// A non-winning move has at most `n - 2` tokens of its own on either
    /// side along each axis, so its run total is at most `4 * (n - 2)`.
    /// The other run-based features are bounded by the board's span.
    pub fn feature_bound(&self, board: &Board) -> f64 {
        let w = &self.weights;
        let span = board.width().max(board.height()) as f64;
        let runs = w.run_base.abs().powi(4 * (board.win_length() as i32 - 2).max(0)) - 1.0;
        let density = [8.0, 24.0, 48.0]
            .iter()
            .zip(w.density.iter())
            .map(|(cells, weight)| cells * weight.abs())
            .sum::<f64>();
        let gap = w.gap.abs() * 8.0 * (2.0 + 2.0 * span);
        let block = w.block.abs() * 2.0 * span + w.threat_block.abs();
        let center = w.center.abs() * board.width() as f64 / 2.0;
        runs.max(0.0) + density + gap + block + center
    }

    /// Bonus for completing a line, never less than `weights.win` and
    /// always above what any non-winning move on `board` can score
    pub fn win_bonus(&self, board: &Board) -> f64 {
        self.weights.win.max(2.0 * self.feature_bound(board) + 1.0)
    }

    /// The unscaled sum of every feature for the mover of the last token
    pub fn raw_score(&self, board: &Board, column: usize) -> f64 {
        let p = match Placement::of(board, column) {
            Some(p) => p,
            None => return 0.0,
        };
        let w = &self.weights;
        let mut score = 0.0;

        if board.longest_line_through(p.row, p.col, p.mover) >= board.win_length() {
            score += self.win_bonus(board);
        }

        score -= w.center * center_distance(board.width(), column);
        score += w.run_base.powi(run_total(board, &p) as i32) - 1.0;
        for (radius, weight) in w.density.iter().enumerate() {
            score += weight * density(board, &p, radius as isize + 1) as f64;
        }
        score += w.gap * gap_score(board, &p) as f64;

        let block = blocking(board, &p);
        if block.threat {
            score += w.threat_block;
        }
        score += w.block * block.length as f64;

        score
    }
}

impl Evaluator for PatternEvaluator {
    fn evaluate(&self, board: &Board, column: usize, root: Player) -> f64 {
        match Placement::of(board, column) {
            Some(p) => perspective(self.raw_score(board, column), p.mover, root, &self.weights),
            None => 0.0,
        }
    }
}

/// Center bias with the win override, nothing else
#[derive(Copy, Clone, Debug, Default)]
pub struct CenterEvaluator {
    pub weights: Weights,
}

impl CenterEvaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }
}

impl Evaluator for CenterEvaluator {
    fn evaluate(&self, board: &Board, column: usize, root: Player) -> f64 {
        let p = match Placement::of(board, column) {
            Some(p) => p,
            None => return 0.0,
        };
        let mut raw = -self.weights.center * center_distance(board.width(), column);
        if board.longest_line_through(p.row, p.col, p.mover) >= board.win_length() {
            let widest = self.weights.center.abs() * board.width() as f64 / 2.0;
            raw += self.weights.win.max(2.0 * widest + 1.0);
        }
        perspective(raw, p.mover, root, &self.weights)
    }
}

/// Whole-board line window evaluator
///
/// A position is worth the sum over every window of `n` consecutive cells
/// along the four axes. A window holding `k` of the root player's tokens
/// and none of the opponent's counts `run_base^k - 1`, the mirror case
/// counts the negation, and windows holding both players' tokens are dead.
/// A completed window counts the win bonus.
///
/// The local score of a move is the change in that sum, so accumulating
/// it along a path from the root reproduces [`LineEvaluator::position_score`]
/// relative to the root position.
#[derive(Copy, Clone, Debug, Default)]
pub struct LineEvaluator {
    pub weights: Weights,
}

impl LineEvaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    /// Bonus for a completed window, above any change a non-winning move
    /// can cause across the `4 * n` windows passing through one cell
    pub fn win_bonus(&self, board: &Board) -> f64 {
        let n = board.win_length();
        let window = self.weights.run_base.abs().powi(n as i32 - 1);
        let others = 8.0 * n as f64 * window;
        self.weights.win.max(2.0 * others + 1.0)
    }

    /// Sum of every window on the board from `root`'s point of view
    pub fn position_score(&self, board: &Board, root: Player) -> f64 {
        let win_bonus = self.win_bonus(board);
        let mut score = 0.0;
        for row in 0..board.height() as isize {
            for col in 0..board.width() as isize {
                for &(dr, dc) in AXES.iter() {
                    if let Some((own, opponent)) = window_counts(board, row, col, dr, dc, root) {
                        score += self.window_score(own, opponent, board.win_length(), win_bonus);
                    }
                }
            }
        }
        score
    }

    fn window_score(&self, own: usize, opponent: usize, n: usize, win_bonus: f64) -> f64 {
        let value = |k: usize| {
            if k >= n {
                win_bonus
            } else {
                self.weights.run_base.powi(k as i32) - 1.0
            }
        };
        match (own, opponent) {
            (0, 0) => 0.0,
            (k, 0) => value(k),
            (0, k) => -value(k),
            _ => 0.0,
        }
    }
}

impl Evaluator for LineEvaluator {
    fn evaluate(&self, board: &Board, column: usize, root: Player) -> f64 {
        let p = match Placement::of(board, column) {
            Some(p) => p,
            None => return 0.0,
        };
        let n = board.win_length() as isize;
        let win_bonus = self.win_bonus(board);

        // only the windows through the placed token changed
        let mut delta = 0.0;
        for &(dr, dc) in AXES.iter() {
            for offset in 0..n {
                let (row, col) = (p.row - offset * dr, p.col - offset * dc);
                let (own, opponent) = match window_counts(board, row, col, dr, dc, root) {
                    Some(counts) => counts,
                    None => continue,
                };
                let (own_before, opponent_before) = if p.mover == root {
                    (own - 1, opponent)
                } else {
                    (own, opponent - 1)
                };
                delta += self.window_score(own, opponent, n as usize, win_bonus)
                    - self.window_score(own_before, opponent_before, n as usize, win_bonus);
            }
        }
        delta
    }
}

/// Tokens of `root` and of its opponent in the window of `n` cells starting
/// at `(row, col)` along `(dr, dc)`, or `None` if the window leaves the board
fn window_counts(board: &Board, row: isize, col: isize, dr: isize, dc: isize, root: Player) -> Option<(usize, usize)> {
    let (mut own, mut opponent) = (0, 0);
    for i in 0..board.win_length() as isize {
        match board.cell(row + i * dr, col + i * dc)?.owner() {
            Some(player) if player == root => own += 1,
            Some(_) => opponent += 1,
            None => {}
        }
    }
    Some((own, opponent))
}

/// Sum of the mover's run lengths leading away from the placed token in all
/// eight directions
fn run_total(board: &Board, p: &Placement) -> usize {
    let token = p.mover.token();
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| board.run_from(p.row, p.col, dr, dc, token))
        .sum()
}

/// Number of the mover's other tokens within a square of the given radius
fn density(board: &Board, p: &Placement, radius: isize) -> usize {
    let token = p.mover.token();
    let mut count = 0;
    for row in p.row - radius..=p.row + radius {
        for col in p.col - radius..=p.col + radius {
            if (row, col) != (p.row, p.col) && board.cell(row, col) == Some(token) {
                count += 1;
            }
        }
    }
    count
}

/// Reward for runs of the mover that sit one empty cell away along an axis
///
/// For a pattern `X _ X X` with the first `X` just placed, filling the gap
/// later joins both pieces, so the bonus is the length of the far run plus
/// the length of the run through the placed token on the near side.
fn gap_score(board: &Board, p: &Placement) -> usize {
    let token = p.mover.token();
    let mut score = 0;
    for &(dr, dc) in AXES.iter() {
        for &sign in [1isize, -1].iter() {
            let (dr, dc) = (dr * sign, dc * sign);
            let gap = board.cell(p.row + dr, p.col + dc);
            let (far_row, far_col) = (p.row + 2 * dr, p.col + 2 * dc);
            if gap == Some(Cell::Empty) && board.cell(far_row, far_col) == Some(token) {
                score += 1 + board.run_from(far_row, far_col, dr, dc, token);
                score += 1 + board.run_from(p.row, p.col, -dr, -dc, token);
            }
        }
    }
    score
}

struct Block {
    /// Longest opponent line this token now interrupts
    length: usize,
    /// Whether the token stopped an imminent opponent win
    threat: bool,
}

/// Measures the opponent lines the placed token cuts through
///
/// A threat is an opponent line of `n - 1` passing through the cell, or an
/// opponent run of `n - 2` ending at the cell whose far end is still open.
fn blocking(board: &Board, p: &Placement) -> Block {
    let n = board.win_length();
    let opponent = p.mover.other().token();
    let mut block = Block {
        length: 0,
        threat: false,
    };

    for &(dr, dc) in AXES.iter() {
        let forward = board.run_from(p.row, p.col, dr, dc, opponent);
        let backward = board.run_from(p.row, p.col, -dr, -dc, opponent);
        let combined = forward + backward;
        block.length = block.length.max(combined);
        if n >= 2 && combined >= n - 1 {
            block.threat = true;
        }

        // an open-ended n-2 run would have become an unstoppable n-1
        if n >= 4 {
            for &(run, sign) in [(forward, 1isize), (backward, -1)].iter() {
                let beyond = (run as isize + 1) * sign;
                if run == n - 2 && board.cell(p.row + beyond * dr, p.col + beyond * dc) == Some(Cell::Empty) {
                    block.threat = true;
                }
            }
        }
    }
    block
}
