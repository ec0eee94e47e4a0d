//! Depth-bounded adversarial search
//!
//! All strategies build the game tree lazily: each node's children are
//! generated in ascending column order while it is being searched, so the
//! live tree never exceeds one path of nodes plus the successor iterators
//! along it.

use log::{debug, trace};

use std::time::{Duration, Instant};

use crate::board::{Board, Player};
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::heuristic::Evaluator;
use crate::successors::{Successor, Successors};

/// Something that picks a column to play
pub trait Strategy {
    /// Chooses a column of `board` for the player to move
    ///
    /// The returned column is always one of `board.free_columns()`.
    fn choose_move(&mut self, board: &Board) -> Result<usize>;

    fn name(&self) -> &str;
}

/// A board in the search tree together with its path-cumulative score
#[derive(Clone, Debug)]
pub struct SearchNode {
    pub board: Board,
    /// Column played to reach this node, `None` for the root
    pub column: Option<usize>,
    pub score: f64,
}

impl SearchNode {
    /// Creates the root of a search with a zero baseline
    pub fn root(board: Board) -> Self {
        Self::with_baseline(board, None, 0.0)
    }

    /// Creates a node with an explicit inherited score
    pub fn with_baseline(board: Board, column: Option<usize>, score: f64) -> Self {
        Self {
            board,
            column,
            score,
        }
    }

    /// Wraps a successor, scoring it as this node's score plus the local
    /// score of the move that produced it
    pub fn child<E: Evaluator + ?Sized>(&self, successor: Successor, evaluator: &E, root: Player) -> Self {
        let local = evaluator.evaluate(&successor.board, successor.column, root);
        Self {
            score: self.score + local,
            board: successor.board,
            column: Some(successor.column),
        }
    }

    /// Won by the move that reached it, or full
    ///
    /// The root is only ever terminal when full, so a search can still be
    /// asked for a move on a position that is already decided.
    pub fn is_terminal(&self) -> bool {
        self.board.is_full() || (self.column.is_some() && self.board.last_move_won())
    }

    /// Lazily generates the scored children of this node
    pub fn children<'a, E: Evaluator + ?Sized>(
        &'a self,
        evaluator: &'a E,
        root: Player,
    ) -> impl Iterator<Item = SearchNode> + 'a {
        Successors::new(&self.board).map(move |successor| self.child(successor, evaluator, root))
    }
}

/// Score of the chosen line and the columns along it
///
/// `path[0]` is the column to play from the searched position, the rest is
/// the expected continuation. The searched node's own column is not
/// prepended, so this is the child line alone rather than the
/// `[node column] + child path` shape where the move to play sits at
/// `path[1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub score: f64,
    pub path: Vec<usize>,
}

impl SearchResult {
    pub fn best_move(&self) -> Option<usize> {
        self.path.first().copied()
    }
}

fn check_root(board: &Board, max_depth: usize) -> Result<()> {
    if board.free_columns().is_empty() {
        return Err(Error::NoLegalMove);
    }
    if max_depth == 0 {
        return Err(Error::InvalidDepth);
    }
    Ok(())
}

fn into_move(result: &SearchResult) -> Result<usize> {
    result.best_move().ok_or(Error::NoLegalMove)
}

/// Minimax with alpha-beta pruning over an explicit maximizing flag
pub struct AlphaBeta<E> {
    evaluator: E,
    max_depth: usize,
    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl<E: Evaluator> AlphaBeta<E> {
    pub fn new(evaluator: E, max_depth: usize) -> Self {
        Self {
            evaluator,
            max_depth,
            node_count: 0,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Searches `board` for the player to move
    pub fn search(&mut self, board: &Board) -> Result<SearchResult> {
        check_root(board, self.max_depth)?;
        self.search_to(board, self.max_depth, None)
    }

    /// Searches to `depth`, giving up with [`Error::Timeout`] once `deadline` passes
    pub fn search_to(&mut self, board: &Board, depth: usize, deadline: Option<Instant>) -> Result<SearchResult> {
        self.node_count = 0;
        let root = SearchNode::root(board.clone());
        let (score, path) = self.alpha_beta(
            &root,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            true,
            board.player(),
            deadline,
        )?;
        Ok(SearchResult { score, path })
    }

    /// Returns the value of `node` and the best line below it
    ///
    /// Only strict improvements replace the best child, so ties keep the
    /// earliest column in generation order.
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        node: &SearchNode,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        root: Player,
        deadline: Option<Instant>,
    ) -> Result<(f64, Vec<usize>)> {
        self.node_count += 1;

        if depth == 0 || node.is_terminal() {
            return Ok((node.score, Vec::new()));
        }

        let mut value = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        let mut best_path = Vec::new();

        for successor in Successors::new(&node.board) {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return Err(Error::Timeout { depth });
                }
            }
            let column = successor.column;
            let child = node.child(successor, &self.evaluator, root);
            let (score, mut path) =
                self.alpha_beta(&child, depth - 1, alpha, beta, !maximizing, root, deadline)?;

            let improved = if maximizing { score > value } else { score < value };
            if improved {
                value = score;
                path.insert(0, column);
                best_path = path;
            }

            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            // the other player will never allow this line
            if alpha >= beta {
                break;
            }
        }

        Ok((value, best_path))
    }
}

impl<E: Evaluator> Strategy for AlphaBeta<E> {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let result = self.search(board)?;
        debug!(
            "alpha-beta depth {}: column {} score {:.2} ({} nodes)",
            self.max_depth,
            result.path.first().copied().unwrap_or_default(),
            result.score,
            self.node_count
        );
        into_move(&result)
    }

    fn name(&self) -> &str {
        "alpha-beta"
    }
}

/// Alpha-beta in the negamax formulation
///
/// Leaf scores are negated on the opponent's plies instead of switching
/// between maximizing and minimizing, giving the same values as
/// [`AlphaBeta`].
pub struct Negamax<E> {
    evaluator: E,
    max_depth: usize,
    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl<E: Evaluator> Negamax<E> {
    pub fn new(evaluator: E, max_depth: usize) -> Self {
        Self {
            evaluator,
            max_depth,
            node_count: 0,
        }
    }

    pub fn search(&mut self, board: &Board) -> Result<SearchResult> {
        check_root(board, self.max_depth)?;
        self.node_count = 0;
        let root = SearchNode::root(board.clone());
        let (score, path) = self.negamax(&root, self.max_depth, f64::NEG_INFINITY, f64::INFINITY, 1.0, board.player());
        Ok(SearchResult { score, path })
    }

    /// Returns the value of `node` from the side to move's point of view,
    /// `color` being 1 on the root player's plies and -1 otherwise
    fn negamax(
        &mut self,
        node: &SearchNode,
        depth: usize,
        mut alpha: f64,
        beta: f64,
        color: f64,
        root: Player,
    ) -> (f64, Vec<usize>) {
        self.node_count += 1;

        if depth == 0 || node.is_terminal() {
            return (color * node.score, Vec::new());
        }

        let mut value = f64::NEG_INFINITY;
        let mut best_path = Vec::new();
        for successor in Successors::new(&node.board) {
            let column = successor.column;
            let child = node.child(successor, &self.evaluator, root);
            // the search window is flipped for the other player
            let (score, mut path) = self.negamax(&child, depth - 1, -beta, -alpha, -color, root);
            let score = -score;
            if score > value {
                value = score;
                path.insert(0, column);
                best_path = path;
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        (value, best_path)
    }
}

impl<E: Evaluator> Strategy for Negamax<E> {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let result = self.search(board)?;
        debug!(
            "negamax depth {}: column {} score {:.2} ({} nodes)",
            self.max_depth,
            result.path.first().copied().unwrap_or_default(),
            result.score,
            self.node_count
        );
        into_move(&result)
    }

    fn name(&self) -> &str {
        "negamax"
    }
}

/// Plain minimax without pruning, the reference the pruned searches must agree with
pub struct Minimax<E> {
    evaluator: E,
    max_depth: usize,
    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl<E: Evaluator> Minimax<E> {
    pub fn new(evaluator: E, max_depth: usize) -> Self {
        Self {
            evaluator,
            max_depth,
            node_count: 0,
        }
    }

    pub fn search(&mut self, board: &Board) -> Result<SearchResult> {
        check_root(board, self.max_depth)?;
        self.node_count = 0;
        let root = SearchNode::root(board.clone());
        let (score, path) = self.minimax(&root, self.max_depth, true, board.player());
        Ok(SearchResult { score, path })
    }

    fn minimax(&mut self, node: &SearchNode, depth: usize, maximizing: bool, root: Player) -> (f64, Vec<usize>) {
        self.node_count += 1;

        if depth == 0 || node.is_terminal() {
            return (node.score, Vec::new());
        }

        let mut value = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        let mut best_path = Vec::new();
        for successor in Successors::new(&node.board) {
            let column = successor.column;
            let child = node.child(successor, &self.evaluator, root);
            let (score, mut path) = self.minimax(&child, depth - 1, !maximizing, root);
            if (maximizing && score > value) || (!maximizing && score < value) {
                value = score;
                path.insert(0, column);
                best_path = path;
            }
        }
        (value, best_path)
    }
}

impl<E: Evaluator> Strategy for Minimax<E> {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let result = self.search(board)?;
        into_move(&result)
    }

    fn name(&self) -> &str {
        "minimax"
    }
}

/// Alpha-beta deepened one ply at a time until a wall-clock budget runs out
///
/// The deadline is checked between sibling expansions. The first ply always
/// completes, so a move is returned even with a zero budget; afterwards the
/// move from the deepest completed iteration wins.
pub struct IterativeDeepening<E> {
    inner: AlphaBeta<E>,
    time_limit: Duration,
    /// Deepest depth completed by the last search
    pub completed_depth: usize,
}

impl<E: Evaluator> IterativeDeepening<E> {
    pub fn new(evaluator: E, max_depth: usize, time_limit: Duration) -> Self {
        Self {
            inner: AlphaBeta::new(evaluator, max_depth),
            time_limit,
            completed_depth: 0,
        }
    }

    pub fn search(&mut self, board: &Board) -> Result<SearchResult> {
        let max_depth = self.inner.max_depth();
        check_root(board, max_depth)?;
        let deadline = Instant::now() + self.time_limit;

        let mut best = self.inner.search_to(board, 1, None)?;
        self.completed_depth = 1;
        for depth in 2..=max_depth {
            match self.inner.search_to(board, depth, Some(deadline)) {
                Ok(result) => {
                    trace!(
                        "depth {} complete: column {:?} score {:.2}",
                        depth,
                        result.best_move(),
                        result.score
                    );
                    best = result;
                    self.completed_depth = depth;
                }
                Err(Error::Timeout { .. }) => {
                    trace!("deadline reached during depth {}", depth);
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(best)
    }
}

impl<E: Evaluator> Strategy for IterativeDeepening<E> {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let result = self.search(board)?;
        debug!(
            "iterative deepening reached depth {}: column {} score {:.2}",
            self.completed_depth,
            result.path.first().copied().unwrap_or_default(),
            result.score
        );
        into_move(&result)
    }

    fn name(&self) -> &str {
        "iterative-deepening"
    }
}

/// Builds the strategy a [`SearchConfig`] describes: iterative deepening
/// when it carries a time limit, plain alpha-beta otherwise
pub fn from_config<E: Evaluator + 'static>(evaluator: E, config: &SearchConfig) -> Box<dyn Strategy> {
    match config.time_limit {
        Some(limit) => Box::new(IterativeDeepening::new(evaluator, config.max_depth, limit)),
        None => Box::new(AlphaBeta::new(evaluator, config.max_depth)),
    }
}
